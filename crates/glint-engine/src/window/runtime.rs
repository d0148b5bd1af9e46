use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::{Context, Result, anyhow};
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{Device, GlowDevice};
use crate::input::{InputState, Key};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Confine and hide the cursor for mouse-look.
    pub grab_cursor: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "glint".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            grab_cursor: true,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs `app` inside a window until it exits or a fatal error occurs.
    ///
    /// The window is created hidden; it becomes visible only after
    /// `App::on_load` succeeds, so a broken shader or missing resource never
    /// flashes an empty window.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = RuntimeState {
            config,
            app,
            window: None,
            loaded: false,
            unloaded: false,
            fatal: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Everything owned per window: platform handles, GL context, and the
/// per-frame bookkeeping.
///
/// Field order matters: the surface and context must drop before the window
/// whose native handle they were created from.
struct WindowState {
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    device: Rc<dyn Device>,
    input: InputState,
    clock: FrameClock,
    window: Window,
}

struct RuntimeState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    app: A,
    window: Option<WindowState>,
    loaded: bool,
    unloaded: bool,
    fatal: Option<anyhow::Error>,
}

impl<A> RuntimeState<A>
where
    A: App + 'static,
{
    /// Creates the window, a 3.3 core GL context, and the glow device, then
    /// runs `App::on_load` before the window is shown.
    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(self.config.initial_size)
            .with_visible(false);

        let template = ConfigTemplateBuilder::new().with_depth_size(24);
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(event_loop, template, |mut configs| {
                configs.next().expect("no GL framebuffer config available")
            })
            .map_err(|e| anyhow!("failed to create window and GL config: {e}"))?;
        let window = window.context("display builder produced no window")?;

        let raw_handle = window
            .window_handle()
            .context("failed to get raw window handle")?
            .as_raw();
        let display = gl_config.display();

        let context_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(raw_handle));
        let not_current = unsafe { display.create_context(&gl_config, &context_attrs) }
            .context("failed to create GL context")?;

        let surface_attrs = window
            .build_surface_attributes(SurfaceAttributesBuilder::new())
            .context("failed to build surface attributes")?;
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attrs) }
            .context("failed to create GL surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;
        if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
            log::debug!("vsync unavailable: {e}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name))
        };
        let device: Rc<dyn Device> = Rc::new(GlowDevice::new(gl));

        let size = window.inner_size();
        device.set_viewport(size.width, size.height);
        self.app
            .on_load(device.clone(), size.width, size.height)
            .context("application load failed")?;
        self.loaded = true;

        if self.config.grab_cursor {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
            match grabbed {
                Ok(()) => window.set_cursor_visible(false),
                Err(e) => log::debug!("cursor grab unavailable: {e}"),
            }
        }

        window.set_visible(true);
        window.request_redraw();

        self.window = Some(WindowState {
            surface,
            context,
            device,
            input: InputState::default(),
            clock: FrameClock::new(),
            window,
        });
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for RuntimeState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: each presented frame schedules the next.
        if let Some(state) = self.window.as_ref() {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.window.as_mut() else {
            return;
        };

        match event {
            WindowEvent::Focused(focused) => {
                state.input.set_focused(focused);
                if focused {
                    // Frames were not presented while unfocused; without a
                    // reset the next dt would cover the whole blur period.
                    state.clock.reset();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    state.input.key_event(map_key(code), pressed);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                state.input.pointer_moved(position.x as f32, position.y as f32);
            }

            WindowEvent::Resized(size) => {
                let (width, height) = (size.width.max(1), size.height.max(1));
                state.surface.resize(
                    &state.context,
                    NonZeroU32::new(width).unwrap_or(NonZeroU32::MIN),
                    NonZeroU32::new(height).unwrap_or(NonZeroU32::MIN),
                );
                self.app.on_resize(width, height);
            }

            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::RedrawRequested => {
                let frame = state.clock.tick();

                // Update is skipped entirely without focus: no camera drift
                // while another window has the keyboard and pointer.
                if state.input.focused {
                    let ctx = FrameCtx {
                        input: &state.input,
                        dt: frame.dt,
                    };
                    if self.app.on_update(&ctx) == AppControl::Exit {
                        event_loop.exit();
                        return;
                    }
                }

                let ctx = FrameCtx {
                    input: &state.input,
                    dt: frame.dt,
                };
                if let Err(err) = self.app.on_render(&ctx) {
                    self.fail(event_loop, err.context("render failed"));
                    return;
                }

                if let Err(e) = state.surface.swap_buffers(&state.context) {
                    self.fail(event_loop, anyhow!("failed to present frame: {e}"));
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Unload while the GL context is still alive and current; the
        // context and surface are dropped right after.
        if self.loaded && !self.unloaded {
            self.app.on_unload();
            self.unloaded = true;
        }
        self.window = None;
    }
}

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Space => Key::Space,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyW => Key::W,
        other => Key::Unknown(other as u32),
    }
}
