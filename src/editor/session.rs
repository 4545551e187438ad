use crate::{
    foundation::error::{StudioError, StudioResult},
    model::project::{
        DEFAULT_FRAME_MS, Direction, Frame, MAX_ITERATIONS, MIN_ITERATIONS, MODULE_SIZE, Project,
        Scene, SceneId,
    },
    playback::scheduler::Scheduler,
};

/// LED editing tool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Tool {
    /// Set the LED on.
    Pen,
    /// Set the LED off.
    Eraser,
    /// Invert the LED's current state.
    #[default]
    Smart,
}

/// Which surface the session is presenting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Presentation {
    /// Frame/scene editing surface.
    #[default]
    Editor,
    /// Live playback preview surface.
    Preview,
}

/// The live editing session: one project plus UI-facing selection state.
///
/// Every operation validates its arguments before mutating anything, so a
/// failed call leaves the session untouched. While playback is active all
/// editing operations are rejected with [`StudioError::Guard`]; the
/// playback worker itself only reads scene data and writes the frame
/// cursor.
#[derive(Debug)]
pub struct Session {
    project: Project,
    current_scene: Option<SceneId>,
    current_frame: usize,
    tool: Tool,
    presentation: Presentation,
    scheduler: Scheduler,
}

impl Session {
    /// Start a session on a fresh project with one default scene.
    pub fn new(module_count: usize) -> StudioResult<Self> {
        let mut session = Self {
            project: Project::new(module_count)?,
            current_scene: None,
            current_frame: 0,
            tool: Tool::default(),
            presentation: Presentation::default(),
            scheduler: Scheduler::new(),
        };
        session.append_scene();
        Ok(session)
    }

    /// Start a session on an existing (e.g. loaded) project.
    ///
    /// The project is validated first; no scene is selected initially.
    pub fn from_project(project: Project) -> StudioResult<Self> {
        project.validate()?;
        Ok(Self {
            project,
            current_scene: None,
            current_frame: 0,
            tool: Tool::default(),
            presentation: Presentation::default(),
            scheduler: Scheduler::new(),
        })
    }

    //----------------------------------------------------------------------
    // Observable state
    //----------------------------------------------------------------------

    /// The live project.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Id of the currently selected scene, if any.
    pub fn current_scene_id(&self) -> Option<&SceneId> {
        self.current_scene.as_ref()
    }

    /// Currently selected scene, if any.
    pub fn current_scene(&self) -> Option<&Scene> {
        self.current_scene
            .as_ref()
            .and_then(|id| self.project.scene(id))
    }

    /// Current frame index, re-derived defensively on every read.
    ///
    /// While playing this is the playback cursor. Otherwise a stored index
    /// greater than the current scene's last valid index reads as 0.
    pub fn current_frame_index(&self) -> usize {
        if self.scheduler.is_playing() {
            return self.scheduler.cursor();
        }
        let Some(scene) = self.current_scene() else {
            return 0;
        };
        if self.current_frame > scene.last_frame_index() {
            0
        } else {
            self.current_frame
        }
    }

    /// Active editing tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Active presentation surface.
    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    /// Whether the preview playback is running.
    pub fn is_playing(&self) -> bool {
        self.scheduler.is_playing()
    }

    //----------------------------------------------------------------------
    // Project lifecycle
    //----------------------------------------------------------------------

    /// Replace all state with a fresh project and one default scene.
    pub fn new_project(&mut self, module_count: usize) -> StudioResult<SceneId> {
        self.ensure_editable()?;
        self.project = Project::new(module_count)?;
        self.reset_ui_state();
        Ok(self.append_scene())
    }

    /// Replace the live project with an opened one.
    ///
    /// The incoming project is validated before the swap; on failure the
    /// previous state is retained unmodified.
    pub fn replace_project(&mut self, project: Project) -> StudioResult<()> {
        self.ensure_editable()?;
        project.validate()?;
        self.project = project;
        self.reset_ui_state();
        Ok(())
    }

    //----------------------------------------------------------------------
    // Scene operations
    //----------------------------------------------------------------------

    /// Append a new scene with one all-off frame and make it current.
    pub fn add_scene(&mut self) -> StudioResult<SceneId> {
        self.ensure_editable()?;
        Ok(self.append_scene())
    }

    /// Delete a scene, clearing any selection or interstitial reference to it.
    pub fn delete_scene(&mut self, id: &SceneId) -> StudioResult<()> {
        self.ensure_editable()?;
        let index = self
            .project
            .scene_index(id)
            .ok_or_else(|| StudioError::invalid_reference(format!("no scene '{id}'")))?;
        self.project.scenes.remove(index);
        if self.current_scene.as_ref() == Some(id) {
            self.current_scene = None;
            self.current_frame = 0;
        }
        if self.project.interstitial_scene_id.as_ref() == Some(id) {
            self.project.interstitial_scene_id = None;
        }
        Ok(())
    }

    /// Make a scene the current one.
    pub fn select_scene(&mut self, id: &SceneId) -> StudioResult<()> {
        self.ensure_editable()?;
        if self.project.scene(id).is_none() {
            return Err(StudioError::invalid_reference(format!("no scene '{id}'")));
        }
        self.current_scene = Some(id.clone());
        Ok(())
    }

    /// Set a scene's iteration count.
    ///
    /// Values outside 1..=500 are rejected without clamping.
    pub fn set_iterations(&mut self, id: &SceneId, iterations: u32) -> StudioResult<()> {
        self.ensure_editable()?;
        let scene = self.scene_checked_mut(id)?;
        if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&iterations) {
            return Err(StudioError::guard(format!(
                "iterations must be within {MIN_ITERATIONS}..={MAX_ITERATIONS}, got {iterations}"
            )));
        }
        scene.iterations = iterations;
        Ok(())
    }

    /// Set or clear the interstitial scene.
    pub fn set_interstitial(&mut self, id: Option<SceneId>) -> StudioResult<()> {
        self.ensure_editable()?;
        if let Some(id) = &id
            && self.project.scene(id).is_none()
        {
            return Err(StudioError::invalid_reference(format!("no scene '{id}'")));
        }
        self.project.interstitial_scene_id = id;
        Ok(())
    }

    /// Set the module wiring direction (affects sketch emission order only).
    pub fn set_direction(&mut self, direction: Direction) -> StudioResult<()> {
        self.ensure_editable()?;
        self.project.direction = direction;
        Ok(())
    }

    //----------------------------------------------------------------------
    // Frame operations
    //----------------------------------------------------------------------

    /// Select a frame of the current scene.
    pub fn select_frame(&mut self, index: usize) -> StudioResult<()> {
        self.ensure_editable()?;
        let scene = self.current_scene_checked()?;
        if index >= scene.frames.len() {
            return Err(StudioError::out_of_range(format!(
                "frame index {index} out of 0..{}",
                scene.frames.len()
            )));
        }
        self.current_frame = index;
        Ok(())
    }

    /// Insert a new all-off frame immediately after `index`.
    ///
    /// The new frame's duration is copied from the scene's last existing
    /// duration, not from the frame it follows.
    pub fn insert_frame_after(&mut self, id: &SceneId, index: usize) -> StudioResult<()> {
        self.ensure_editable()?;
        let module_count = self.project.module_count;
        let scene = self.scene_checked_mut(id)?;
        if index >= scene.frames.len() {
            return Err(StudioError::out_of_range(format!(
                "frame index {index} out of 0..{}",
                scene.frames.len()
            )));
        }
        let duration = scene.durations_ms.last().copied().unwrap_or(DEFAULT_FRAME_MS);
        scene.frames.insert(index + 1, Frame::blank(module_count));
        scene.durations_ms.insert(index + 1, duration);
        Ok(())
    }

    /// Delete the frame at `index`.
    ///
    /// A scene can never drop to zero frames; deleting the only frame is a
    /// guarded no-op. When the scene is current, the selection moves to
    /// `index - 1` (0 when the first frame was deleted), clamped to the new
    /// last index.
    pub fn delete_frame(&mut self, id: &SceneId, index: usize) -> StudioResult<()> {
        self.ensure_editable()?;
        let scene = self.scene_checked_mut(id)?;
        if scene.frames.len() < 2 {
            return Err(StudioError::guard(
                "a scene must keep at least one frame",
            ));
        }
        if index >= scene.frames.len() {
            return Err(StudioError::out_of_range(format!(
                "frame index {index} out of 0..{}",
                scene.frames.len()
            )));
        }
        scene.frames.remove(index);
        scene.durations_ms.remove(index);

        let last = scene.last_frame_index();
        let selection = if index == 0 { 0 } else { (index - 1).min(last) };
        if self.current_scene.as_ref() == Some(id) {
            self.current_frame = selection;
        }
        Ok(())
    }

    /// Duplicate the frame (and duration) at `index`, inserting the copy at
    /// `index + 1` and selecting it when the scene is current.
    pub fn copy_frame(&mut self, id: &SceneId, index: usize) -> StudioResult<()> {
        self.ensure_editable()?;
        let scene = self.scene_checked_mut(id)?;
        if index >= scene.frames.len() {
            return Err(StudioError::out_of_range(format!(
                "frame index {index} out of 0..{}",
                scene.frames.len()
            )));
        }
        let frame = scene.frames[index].clone();
        let duration = scene.durations_ms[index];
        scene.frames.insert(index + 1, frame);
        scene.durations_ms.insert(index + 1, duration);
        if self.current_scene.as_ref() == Some(id) {
            self.current_frame = index + 1;
        }
        Ok(())
    }

    /// Set the duration of the frame at `index` (milliseconds, > 0).
    pub fn set_frame_duration(&mut self, id: &SceneId, index: usize, ms: u64) -> StudioResult<()> {
        self.ensure_editable()?;
        let scene = self.scene_checked_mut(id)?;
        if index >= scene.durations_ms.len() {
            return Err(StudioError::out_of_range(format!(
                "frame index {index} out of 0..{}",
                scene.durations_ms.len()
            )));
        }
        if ms == 0 {
            return Err(StudioError::guard("frame duration must be positive"));
        }
        scene.durations_ms[index] = ms;
        Ok(())
    }

    /// Swap the frames (and durations) at `i1` and `i2`.
    ///
    /// Single-step forward and backward moves are both expressed as swaps.
    pub fn move_frame(&mut self, id: &SceneId, i1: usize, i2: usize) -> StudioResult<()> {
        self.ensure_editable()?;
        let scene = self.scene_checked_mut(id)?;
        let len = scene.frames.len();
        if i1 >= len || i2 >= len {
            return Err(StudioError::out_of_range(format!(
                "frame indices {i1}/{i2} out of 0..{len}"
            )));
        }
        scene.frames.swap(i1, i2);
        scene.durations_ms.swap(i1, i2);
        Ok(())
    }

    //----------------------------------------------------------------------
    // LED operations
    //----------------------------------------------------------------------

    /// Select the active editing tool.
    pub fn set_tool(&mut self, tool: Tool) -> StudioResult<()> {
        self.ensure_editable()?;
        self.tool = tool;
        Ok(())
    }

    /// Apply a tool to exactly one LED.
    ///
    /// [`Tool::Pen`] lights it, [`Tool::Eraser`] clears it, [`Tool::Smart`]
    /// inverts it. Rejected while the preview presentation is active.
    pub fn set_led(
        &mut self,
        id: &SceneId,
        frame_index: usize,
        module_index: usize,
        row: usize,
        col: usize,
        tool: Tool,
    ) -> StudioResult<()> {
        self.ensure_editable()?;
        if self.presentation == Presentation::Preview {
            return Err(StudioError::guard("LED edits are rejected in preview"));
        }
        if row >= MODULE_SIZE || col >= MODULE_SIZE {
            return Err(StudioError::out_of_range(format!(
                "row/col {row}/{col} out of 0..{MODULE_SIZE}"
            )));
        }
        let scene = self.scene_checked_mut(id)?;
        let frame_count = scene.frames.len();
        let frame = scene.frames.get_mut(frame_index).ok_or_else(|| {
            StudioError::out_of_range(format!("frame index {frame_index} out of 0..{frame_count}"))
        })?;
        let module_count = frame.modules.len();
        let module = frame.modules.get_mut(module_index).ok_or_else(|| {
            StudioError::out_of_range(format!(
                "module index {module_index} out of 0..{module_count}"
            ))
        })?;
        let led = &mut module.rows[row].leds[col];
        *led = match tool {
            Tool::Pen => true,
            Tool::Eraser => false,
            Tool::Smart => !*led,
        };
        Ok(())
    }

    //----------------------------------------------------------------------
    // Playback
    //----------------------------------------------------------------------

    /// Switch between the editor and preview surfaces.
    ///
    /// Switching back to the editor stops playback first.
    pub fn set_presentation(&mut self, presentation: Presentation) {
        if presentation == Presentation::Editor {
            self.stop();
        }
        self.presentation = presentation;
    }

    /// Start cycling the current scene's frames in the preview.
    ///
    /// Requires a current scene; rejected when already playing.
    #[tracing::instrument(skip(self))]
    pub fn play(&mut self) -> StudioResult<()> {
        if self.scheduler.is_playing() {
            return Err(StudioError::guard("playback is already running"));
        }
        let scene = self.current_scene_checked()?;
        let durations = scene.durations_ms.clone();
        self.presentation = Presentation::Preview;
        self.scheduler.start(durations)
    }

    /// Stop playback.
    ///
    /// Synchronous: once this returns, no further cursor update is
    /// published. The selection stays on the frame the preview reached.
    pub fn stop(&mut self) {
        if !self.scheduler.is_playing() {
            return;
        }
        self.scheduler.stop();
        let reached = self.scheduler.cursor();
        self.current_frame = match self.current_scene() {
            Some(scene) if reached <= scene.last_frame_index() => reached,
            _ => 0,
        };
    }

    //----------------------------------------------------------------------
    // Internals
    //----------------------------------------------------------------------

    fn ensure_editable(&self) -> StudioResult<()> {
        if self.scheduler.is_playing() {
            return Err(StudioError::guard(
                "operation rejected while playback is active",
            ));
        }
        Ok(())
    }

    fn reset_ui_state(&mut self) {
        self.current_scene = None;
        self.current_frame = 0;
        self.tool = Tool::default();
        self.presentation = Presentation::default();
    }

    fn append_scene(&mut self) -> SceneId {
        let number = self.project.next_scene_id;
        let id = self.project.mint_scene_id();
        let scene = Scene::new(id.clone(), format!("Scene_{number}"), self.project.module_count);
        self.project.scenes.push(scene);
        self.current_scene = Some(id.clone());
        id
    }

    fn current_scene_checked(&self) -> StudioResult<&Scene> {
        let id = self
            .current_scene
            .as_ref()
            .ok_or_else(|| StudioError::guard("no scene selected"))?;
        self.project
            .scene(id)
            .ok_or_else(|| StudioError::invalid_reference(format!("no scene '{id}'")))
    }

    fn scene_checked_mut(&mut self, id: &SceneId) -> StudioResult<&mut Scene> {
        self.project
            .scene_mut(id)
            .ok_or_else(|| StudioError::invalid_reference(format!("no scene '{id}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
