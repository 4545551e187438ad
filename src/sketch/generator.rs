use crate::{
    model::project::{Direction, Module, Project, Scene},
    sketch::bitpack::{pack_row, row_hex},
};

/// Display brightness written into the generated `setup()` routine.
const DEFAULT_INTENSITY: u8 = 5;

/// Microcontroller pins wired to the matrix driver chain.
///
/// Pins are supplied by the caller at generation time and are not part of
/// the project data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SketchPins {
    /// Data-in pin.
    pub data: u8,
    /// Clock pin.
    pub clk: u8,
    /// Chip-select pin.
    pub cs: u8,
}

impl Default for SketchPins {
    fn default() -> Self {
        Self {
            data: 12,
            clk: 11,
            cs: 10,
        }
    }
}

/// Subroutine name generated for a scene.
///
/// The name is the scene's display name with every non-alphanumeric
/// character replaced by `_`, prefixed with `a` so it is a valid identifier
/// regardless of the leading character.
pub fn scene_routine_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 1);
    out.push('a');
    for ch in name.chars() {
        out.push(if ch.is_ascii_alphanumeric() { ch } else { '_' });
    }
    out
}

/// Compile a project into Arduino sketch source for MD_MAX72xx hardware.
///
/// The translation is total and deterministic: it cannot fail on a project
/// that passes [`Project::validate`], and identical projects yield
/// byte-identical text. Emission order: preamble, `setup()`, the
/// `lightLed` primitive, one subroutine per scene in project order, then
/// the driver `loop()`.
#[tracing::instrument(skip(project))]
pub fn generate_sketch(project: &Project, pins: &SketchPins) -> String {
    let mut out = String::new();

    out.push_str("#include <MD_MAX72xx.h>\n#include <SPI.h>\n\n");
    out.push_str("#define HARDWARE_TYPE MD_MAX72XX::FC16_HW\n");
    out.push_str(&format!("#define MAX_DEVICES {}\n", project.module_count));
    out.push_str(&format!("#define CLK_PIN   {}\n", pins.clk));
    out.push_str(&format!("#define DATA_PIN  {}\n", pins.data));
    out.push_str(&format!("#define CS_PIN    {}\n\n", pins.cs));
    out.push_str("MD_MAX72XX mx = MD_MAX72XX(HARDWARE_TYPE, CS_PIN, MAX_DEVICES);\n\n");

    out.push_str("void setup()\n{\n");
    out.push_str("  mx.begin();\n");
    out.push_str(&format!(
        "  mx.control(MD_MAX72XX::INTENSITY, {DEFAULT_INTENSITY});\n"
    ));
    out.push_str("  mx.clear();\n}\n\n");

    out.push_str("void lightLed(byte module, byte row, byte value)\n{\n");
    out.push_str("  mx.setRow(module, row, value);\n}\n\n");

    for scene in &project.scenes {
        emit_scene_routine(&mut out, scene, project.direction);
    }

    emit_driver_loop(&mut out, project);
    out
}

fn emit_scene_routine(out: &mut String, scene: &Scene, direction: Direction) {
    out.push_str(&format!("void {}()\n{{\n", scene_routine_name(&scene.name)));

    for (frame_index, frame) in scene.frames.iter().enumerate() {
        if frame_index > 0 {
            out.push('\n');
        }

        // RTL chains are emitted back to front; storage order is untouched.
        let order: Vec<&Module> = match direction {
            Direction::Ltr => frame.modules.iter().collect(),
            Direction::Rtl => frame.modules.iter().rev().collect(),
        };

        for (position, module) in order.iter().enumerate() {
            for (row_index, row) in module.rows.iter().enumerate() {
                let byte = pack_row(row);
                // Zero rows are omitted to keep the sketch small; the
                // per-frame clear below blanks them anyway.
                if byte != 0 {
                    out.push_str(&format!(
                        "  lightLed({position}, {row_index}, {});\n",
                        row_hex(byte)
                    ));
                }
            }
        }

        out.push_str(&format!("  delay({});\n", scene.durations_ms[frame_index]));
        out.push_str("  mx.clear();\n");
    }

    out.push_str("}\n\n");
}

fn emit_driver_loop(out: &mut String, project: &Project) {
    out.push_str("void loop()\n{\n  mx.clear();\n");

    let interstitial = project
        .interstitial_scene_id
        .as_ref()
        .and_then(|id| project.scene(id));

    for scene in &project.scenes {
        if interstitial.is_some_and(|i| i.id == scene.id) {
            // The interstitial scene is never a standalone top-level entry;
            // it only runs interleaved after each regular scene.
            continue;
        }
        out.push('\n');
        emit_scene_call(out, scene);
        if let Some(inter) = interstitial {
            out.push_str("  // interstitial\n");
            emit_scene_call(out, inter);
        }
    }

    out.push_str("}\n");
}

fn emit_scene_call(out: &mut String, scene: &Scene) {
    let name = scene_routine_name(&scene.name);
    if scene.iterations > 1 {
        out.push_str(&format!(
            "  for (byte i = 0; i < {}; i++) {{\n    {name}();\n  }}\n",
            scene.iterations
        ));
    } else {
        out.push_str(&format!("  {name}();\n"));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sketch/generator.rs"]
mod tests;
