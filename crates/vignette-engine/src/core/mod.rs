//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! the application, the per-frame contexts handed to it, and the loop's run state.

mod app;
mod ctx;
mod frame_loop;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, InitCtx};
pub use frame_loop::{FrameLoop, LoopEvent, RunState};
