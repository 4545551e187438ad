use std::{fs, path::Path};

use crate::{
    foundation::error::{StudioError, StudioResult},
    model::project::Project,
};

/// Save a project to `path` as pretty-printed JSON.
pub fn save_project(project: &Project, path: &Path) -> StudioResult<()> {
    let json = serde_json::to_string_pretty(project).map_err(|e| {
        StudioError::persistence(format!("serialize project: {e}"))
    })?;
    ensure_parent_dir(path)?;
    fs::write(path, json)
        .map_err(|e| StudioError::persistence(format!("write '{}': {e}", path.display())))
}

/// Load and validate a project from `path`.
///
/// A missing, unreadable, or malformed file surfaces as
/// [`StudioError::Persistence`]; the caller's in-memory state is only
/// replaced once a fully valid project has been produced.
pub fn load_project(path: &Path) -> StudioResult<Project> {
    let json = fs::read_to_string(path)
        .map_err(|e| StudioError::persistence(format!("read '{}': {e}", path.display())))?;
    let project: Project = serde_json::from_str(&json)
        .map_err(|e| StudioError::persistence(format!("parse '{}': {e}", path.display())))?;
    project.validate()?;
    Ok(project)
}

/// Write generated sketch text to `path`, unmodified.
pub fn save_sketch(sketch: &str, path: &Path) -> StudioResult<()> {
    ensure_parent_dir(path)?;
    fs::write(path, sketch)
        .map_err(|e| StudioError::persistence(format!("write '{}': {e}", path.display())))
}

/// Create the parent directory of `path` when it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> StudioResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| {
            StudioError::persistence(format!("create dir '{}': {e}", parent.display()))
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/persistence/store.rs"]
mod tests;
