//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The window runtime translates platform events into calls on [`InputState`].

mod state;
mod types;

pub use state::{InputState, MouseTracker};
pub use types::Key;
