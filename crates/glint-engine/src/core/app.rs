use std::rc::Rc;

use anyhow::Result;

use crate::device::Device;
use crate::input::InputState;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Per-frame context passed to [`App::on_update`] and [`App::on_render`].
pub struct FrameCtx<'a> {
    /// Input state as of this frame.
    pub input: &'a InputState,

    /// Elapsed time of the previous frame, in seconds.
    pub dt: f32,
}

/// Application lifecycle contract, invoked by the externally owned event loop.
///
/// Sequencing invariants the runtime guarantees:
/// - `on_load` completes before the window is shown; a load error means the
///   window is never shown and the run aborts.
/// - within a frame, `on_update` always completes before `on_render` begins;
///   execution is strictly single-threaded, so no synchronization is needed
///   around state shared between the two.
/// - `on_update` is skipped while the window lacks focus.
/// - `on_unload` runs exactly once, before the GL context is destroyed, on
///   every exit path.
pub trait App {
    /// Acquires GPU resources. The device stays valid until `on_unload`.
    fn on_load(&mut self, device: Rc<dyn Device>, width: u32, height: u32) -> Result<()>;

    /// Processes input and advances simulation state.
    fn on_update(&mut self, ctx: &FrameCtx<'_>) -> AppControl;

    /// Submits draw commands for one frame.
    ///
    /// An error here is fatal and terminates the loop; per-frame failures are
    /// not expected once load has succeeded.
    fn on_render(&mut self, ctx: &FrameCtx<'_>) -> Result<()>;

    /// The drawable size changed.
    fn on_resize(&mut self, width: u32, height: u32);

    /// Releases GPU resources acquired in `on_load`.
    fn on_unload(&mut self);
}
