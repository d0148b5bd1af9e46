//! Time subsystem.
//!
//! Frame timing is wall-clock based: motion is scaled by the elapsed time of
//! the previous frame, not by frame count, so speed is frame-rate
//! independent. One `FrameClock` per window loop; call `tick()` once per
//! frame.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
