//! Time subsystem.
//!
//! Provides monotonic, testable frame timing without coupling to the runtime.
//! Intended usage:
//! - one `AnimationClock` per render loop
//! - call `tick()` once per frame and feed `FrameTime::dt` to the animation update

mod clock;

pub use clock::{AnimationClock, FrameTime};
