//! Application contract.
//!
//! The runtime owns the event loop and invokes the [`App`] lifecycle
//! callbacks; applications hold no window or context handles of their own.

mod app;

pub use app::{App, AppControl, FrameCtx};
