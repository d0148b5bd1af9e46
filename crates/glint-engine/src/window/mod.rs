//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop, the window, and the GL context/surface, and
//! drives the [`crate::core::App`] lifecycle callbacks.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
pub use winit::dpi::LogicalSize;
