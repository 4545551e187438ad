use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ledstudio", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new project file with one default scene.
    New(NewArgs),
    /// Load a project file and check its invariants.
    Validate(ValidateArgs),
    /// Compile a project into Arduino sketch source.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct NewArgs {
    /// Output project JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Number of chained 8x8 modules.
    #[arg(long, default_value_t = 4)]
    modules: usize,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output sketch path (.ino).
    #[arg(long)]
    out: PathBuf,

    /// Data-in pin number.
    #[arg(long, default_value_t = 12)]
    data_pin: u8,

    /// Clock pin number.
    #[arg(long, default_value_t = 11)]
    clk_pin: u8,

    /// Chip-select pin number.
    #[arg(long, default_value_t = 10)]
    cs_pin: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::New(args) => cmd_new(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn cmd_new(args: NewArgs) -> anyhow::Result<()> {
    let session = ledstudio::Session::new(args.modules)
        .with_context(|| format!("create project with {} modules", args.modules))?;
    ledstudio::save_project(session.project(), &args.out)
        .with_context(|| format!("save project '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let project = read_project(&args.in_path)?;
    let frames: usize = project.scenes.iter().map(|s| s.frames.len()).sum();
    eprintln!(
        "ok: {} modules ({:?}), {} scenes, {} frames",
        project.module_count,
        project.direction,
        project.scenes.len(),
        frames
    );
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let project = read_project(&args.in_path)?;
    let pins = ledstudio::SketchPins {
        data: args.data_pin,
        clk: args.clk_pin,
        cs: args.cs_pin,
    };
    let sketch = ledstudio::generate_sketch(&project, &pins);
    ledstudio::save_sketch(&sketch, &args.out)
        .with_context(|| format!("write sketch '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn read_project(path: &Path) -> anyhow::Result<ledstudio::Project> {
    let project = ledstudio::load_project(path)
        .with_context(|| format!("open project '{}'", path.display()))?;
    Ok(project)
}
