//! Glint engine crate.
//!
//! This crate owns the platform + GL runtime pieces used by the viewer layer:
//! device abstraction, shader program lifecycle, camera math, input state,
//! frame timing, and the window runtime.

pub mod camera;
pub mod core;
pub mod device;
pub mod input;
pub mod shader;
pub mod texture;
pub mod time;
pub mod window;

pub mod logging;
