use super::*;

use crate::editor::session::{Session, Tool};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("ledstudio-{}-{}", std::process::id(), name))
}

#[test]
fn save_then_load_round_trips_the_project() {
    let mut session = Session::new(3).unwrap();
    let first = session.current_scene_id().unwrap().clone();
    session.set_led(&first, 0, 2, 4, 1, Tool::Pen).unwrap();
    session.set_frame_duration(&first, 0, 750).unwrap();
    session.add_scene().unwrap();
    session.set_interstitial(Some(first)).unwrap();

    let path = temp_path("roundtrip.json");
    save_project(session.project(), &path).unwrap();
    let loaded = load_project(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(&loaded, session.project());
}

#[test]
fn load_missing_file_is_a_persistence_error() {
    let err = load_project(&temp_path("does-not-exist.json")).unwrap_err();
    assert!(matches!(err, StudioError::Persistence(_)));
}

#[test]
fn load_malformed_json_is_a_persistence_error() {
    let path = temp_path("malformed.json");
    std::fs::write(&path, "not a project").unwrap();
    let err = load_project(&path).unwrap_err();
    let _ = std::fs::remove_file(&path);
    assert!(matches!(err, StudioError::Persistence(_)));
}

#[test]
fn load_rejects_schema_valid_but_invariant_breaking_files() {
    let mut project = Project::new(1).unwrap();
    let id = project.mint_scene_id();
    project.scenes.push(crate::model::project::Scene::new(id, "Bad", 1));
    project.scenes[0].durations_ms.push(100); // breaks the parallel-length invariant

    let path = temp_path("invalid.json");
    std::fs::write(&path, serde_json::to_string(&project).unwrap()).unwrap();
    let loaded = load_project(&path);
    let _ = std::fs::remove_file(&path);
    assert!(loaded.is_err());
}

#[test]
fn save_sketch_writes_text_verbatim() {
    let text = "void loop()\n{\n}\n";
    let path = temp_path("sketch.ino");
    save_sketch(text, &path).unwrap();
    let on_disk = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(on_disk, text);
}

#[test]
fn ensure_parent_dir_creates_missing_directories() {
    let dir = temp_path("nested-dir");
    let path = dir.join("a").join("project.json");
    save_project(Session::new(1).unwrap().project(), &path).unwrap();
    assert!(path.exists());
    let _ = std::fs::remove_dir_all(&dir);
}
