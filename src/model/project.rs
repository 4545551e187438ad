use crate::foundation::error::{StudioError, StudioResult};

/// Width and height of one physical LED matrix module.
pub const MODULE_SIZE: usize = 8;

/// Duration assigned to freshly created frames, in milliseconds.
pub const DEFAULT_FRAME_MS: u64 = 500;

/// Smallest allowed scene iteration count.
pub const MIN_ITERATIONS: u32 = 1;

/// Largest allowed scene iteration count.
pub const MAX_ITERATIONS: u32 = 500;

/// Physical wiring order of the module chain.
///
/// Direction only affects the order modules are emitted in during sketch
/// generation; stored frame data is never reordered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// First stored module is the leftmost device.
    Ltr,
    /// First stored module is the rightmost device; emission order is reversed.
    #[default]
    Rtl,
}

/// One horizontal line of 8 LEDs inside a module.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Row {
    /// LED states for columns 0..7, column 0 leftmost.
    pub leds: [bool; MODULE_SIZE],
}

impl Row {
    /// Whether the LED at `col` is lit.
    pub fn is_lit(&self, col: usize) -> bool {
        self.leds[col]
    }

    /// Set the LED at `col`.
    pub fn set(&mut self, col: usize, on: bool) {
        self.leds[col] = on;
    }
}

/// One 8×8 LED matrix module, addressed by its position in the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Module {
    /// 0-based position of this module in the chain.
    pub ordinal: usize,
    /// Rows 0..7, top to bottom.
    pub rows: [Row; MODULE_SIZE],
}

impl Module {
    /// An all-off module at chain position `ordinal`.
    pub fn blank(ordinal: usize) -> Self {
        Self {
            ordinal,
            rows: [Row::default(); MODULE_SIZE],
        }
    }
}

/// One snapshot of every module's LED state.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    /// Modules in chain order; length always equals [`Project::module_count`].
    pub modules: Vec<Module>,
}

impl Frame {
    /// An all-off frame for a chain of `module_count` modules.
    pub fn blank(module_count: usize) -> Self {
        Self {
            modules: (0..module_count).map(Module::blank).collect(),
        }
    }
}

/// Opaque scene identifier, unique within a project and never reused.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SceneId(pub String);

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, independently sequenced animation unit.
///
/// `frames` and `durations_ms` are parallel sequences and stay the same
/// length (at least 1) through every editor operation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Unique scene id, generated on creation.
    pub id: SceneId,
    /// Display and export label.
    pub name: String,
    /// Ordered frames.
    pub frames: Vec<Frame>,
    /// Per-frame display durations in milliseconds, strictly positive.
    pub durations_ms: Vec<u64>,
    /// How many times the driver loop repeats this scene (1..=500).
    pub iterations: u32,
}

impl Scene {
    /// A new scene with one all-off frame and the default duration.
    pub fn new(id: SceneId, name: impl Into<String>, module_count: usize) -> Self {
        Self {
            id,
            name: name.into(),
            frames: vec![Frame::blank(module_count)],
            durations_ms: vec![DEFAULT_FRAME_MS],
            iterations: MIN_ITERATIONS,
        }
    }

    /// Index of the last frame.
    pub fn last_frame_index(&self) -> usize {
        self.frames.len() - 1
    }
}

/// A complete animation project.
///
/// The project is a pure data model: all mutation happens through the
/// editor session, and the sketch generator only reads it. It serializes
/// via Serde (JSON on disk).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Project {
    /// Number of chained modules; fixed at project creation.
    pub module_count: usize,
    /// Physical wiring order; affects sketch emission only.
    pub direction: Direction,
    /// Scenes in display/export order.
    pub scenes: Vec<Scene>,
    /// Optional scene interleaved after every other scene in the driver loop.
    pub interstitial_scene_id: Option<SceneId>,
    /// Counter backing scene id generation; never decreases, so ids are
    /// never reused within a project's lifetime.
    pub next_scene_id: u64,
}

impl Project {
    /// An empty project for a chain of `module_count` modules.
    pub fn new(module_count: usize) -> StudioResult<Self> {
        if module_count == 0 {
            return Err(StudioError::guard("module count must be at least 1"));
        }
        Ok(Self {
            module_count,
            direction: Direction::default(),
            scenes: Vec::new(),
            interstitial_scene_id: None,
            next_scene_id: 1,
        })
    }

    /// Mint a fresh scene id.
    pub fn mint_scene_id(&mut self) -> SceneId {
        let id = SceneId(format!("scene-{}", self.next_scene_id));
        self.next_scene_id += 1;
        id
    }

    /// Look up a scene by id.
    pub fn scene(&self, id: &SceneId) -> Option<&Scene> {
        self.scenes.iter().find(|s| &s.id == id)
    }

    /// Look up a scene by id, mutably.
    pub fn scene_mut(&mut self, id: &SceneId) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|s| &s.id == id)
    }

    /// Position of a scene in display order.
    pub fn scene_index(&self, id: &SceneId) -> Option<usize> {
        self.scenes.iter().position(|s| &s.id == id)
    }

    /// Validate project invariants: positive module count, parallel
    /// frame/duration sequences, frame shapes, iteration bounds, unique
    /// scene ids, and the interstitial reference.
    pub fn validate(&self) -> StudioResult<()> {
        if self.module_count == 0 {
            return Err(StudioError::guard("module count must be at least 1"));
        }

        for scene in &self.scenes {
            if scene.frames.is_empty() {
                return Err(StudioError::guard(format!(
                    "scene '{}' must keep at least one frame",
                    scene.id
                )));
            }
            if scene.frames.len() != scene.durations_ms.len() {
                return Err(StudioError::guard(format!(
                    "scene '{}' has {} frames but {} durations",
                    scene.id,
                    scene.frames.len(),
                    scene.durations_ms.len()
                )));
            }
            if scene.durations_ms.iter().any(|ms| *ms == 0) {
                return Err(StudioError::guard(format!(
                    "scene '{}' has a zero frame duration",
                    scene.id
                )));
            }
            if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&scene.iterations) {
                return Err(StudioError::guard(format!(
                    "scene '{}' iterations must be within {MIN_ITERATIONS}..={MAX_ITERATIONS}",
                    scene.id
                )));
            }
            for frame in &scene.frames {
                if frame.modules.len() != self.module_count {
                    return Err(StudioError::guard(format!(
                        "scene '{}' has a frame with {} modules, expected {}",
                        scene.id,
                        frame.modules.len(),
                        self.module_count
                    )));
                }
                for (idx, module) in frame.modules.iter().enumerate() {
                    if module.ordinal != idx {
                        return Err(StudioError::guard(format!(
                            "scene '{}' has module ordinal {} at position {idx}",
                            scene.id, module.ordinal
                        )));
                    }
                }
            }
        }

        for (i, scene) in self.scenes.iter().enumerate() {
            if self.scenes[i + 1..].iter().any(|other| other.id == scene.id) {
                return Err(StudioError::guard(format!(
                    "duplicate scene id '{}'",
                    scene.id
                )));
            }
        }

        if let Some(id) = &self.interstitial_scene_id
            && self.scene(id).is_none()
        {
            return Err(StudioError::invalid_reference(format!(
                "interstitial scene '{id}' does not exist"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/project.rs"]
mod tests;
