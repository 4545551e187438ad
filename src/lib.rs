//! Ledstudio is the core of a frame-based animation studio for chains of
//! 8×8 LED matrix modules.
//!
//! It models animation projects as pure data, edits them through a
//! guarded session, and compiles them into Arduino sketch source for
//! MD_MAX72xx-compatible drivers.
//!
//! # Pipeline overview
//!
//! 1. **Model**: [`Project`] → scenes → frames → modules → rows, pure
//!    serde data with a single [`Project::validate`] entry point
//! 2. **Edit**: [`Session`] applies the command surface (scene/frame/LED
//!    operations), validating before mutating and rejecting everything
//!    while playback is active
//! 3. **Compile**: [`generate_sketch`] deterministically turns a project
//!    into firmware text (bit-packed rows, per-scene subroutines,
//!    iteration/interstitial sequencing, wiring-direction reversal)
//! 4. **Preview**: [`Scheduler`] cycles the current-frame cursor on a
//!    cancellable worker thread
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic output**: identical projects compile to byte-identical
//!   sketch text.
//! - **Transactional edits**: a failed operation leaves the session
//!   untouched; structural invariants (parallel frame/duration sequences,
//!   at least one frame per scene) hold after every operation.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod editor;
mod foundation;
mod model;
mod persistence;
mod playback;
mod sketch;

pub use editor::session::{Presentation, Session, Tool};
pub use foundation::error::{StudioError, StudioResult};
pub use model::project::{
    DEFAULT_FRAME_MS, Direction, Frame, MAX_ITERATIONS, MIN_ITERATIONS, MODULE_SIZE, Module,
    Project, Row, Scene, SceneId,
};
pub use persistence::store::{ensure_parent_dir, load_project, save_project, save_sketch};
pub use playback::scheduler::Scheduler;
pub use sketch::bitpack::{pack_row, row_hex, unpack_row};
pub use sketch::generator::{SketchPins, generate_sketch, scene_routine_name};
