//! The frame controller: per-frame input handling, camera movement, and
//! draw submission for the textured quad.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use glam::{Mat4, Vec3};

use glint_engine::camera::Camera;
use glint_engine::core::{App, AppControl, FrameCtx};
use glint_engine::device::Device;
use glint_engine::input::{Key, MouseTracker};
use glint_engine::shader::ShaderProgram;
use glint_engine::texture::Texture;

use crate::geometry::QuadMesh;

const CAMERA_SPEED: f32 = 1.5;
const MOUSE_SENSITIVITY: f32 = 0.2;

/// Spin accumulator rate, in degrees of model rotation per second.
const SPIN_RATE_DEG: f32 = 4.0;

const CLEAR_COLOR: (f32, f32, f32, f32) = (0.2, 0.3, 0.3, 1.0);

fn resource(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("res").join(name)
}

/// Resources and state that exist only between load and unload.
struct Scene {
    device: Rc<dyn Device>,
    mesh: QuadMesh,
    shader: ShaderProgram,
    texture: Texture,
    camera: Camera,
    mouse: MouseTracker,
    spin_deg: f32,
}

/// Renders a spinning textured quad with fly-camera controls.
pub struct QuadApp {
    scene: Option<Scene>,
}

impl QuadApp {
    pub fn new() -> Self {
        Self { scene: None }
    }
}

impl App for QuadApp {
    fn on_load(&mut self, device: Rc<dyn Device>, width: u32, height: u32) -> Result<()> {
        device.set_clear_color(CLEAR_COLOR.0, CLEAR_COLOR.1, CLEAR_COLOR.2, CLEAR_COLOR.3);
        device.enable_depth_test();

        let mesh = QuadMesh::upload(device.clone())?;

        let shader = ShaderProgram::from_path(device.clone(), &resource("default.shader"))
            .context("failed to build shader program")?;
        shader.bind();
        mesh.configure_attributes(&shader);

        let texture = Texture::from_path(device.clone(), &resource("container.png"))?;
        texture.bind(0);
        shader.set_int("u_tex", 0)?;

        let camera = Camera::new(Vec3::Z * 3.0, width as f32 / height as f32);

        log::info!("scene loaded ({width}x{height})");
        self.scene = Some(Scene {
            device,
            mesh,
            shader,
            texture,
            camera,
            mouse: MouseTracker::default(),
            spin_deg: 0.0,
        });
        Ok(())
    }

    fn on_update(&mut self, ctx: &FrameCtx<'_>) -> AppControl {
        let Some(scene) = self.scene.as_mut() else {
            return AppControl::Continue;
        };

        let input = ctx.input;
        if input.key_down(Key::Escape) {
            return AppControl::Exit;
        }

        let camera = &mut scene.camera;
        let step = CAMERA_SPEED * ctx.dt;
        if input.key_down(Key::W) {
            camera.position += camera.front() * step;
        }
        if input.key_down(Key::S) {
            camera.position -= camera.front() * step;
        }
        if input.key_down(Key::A) {
            camera.position -= camera.right() * step;
        }
        if input.key_down(Key::D) {
            camera.position += camera.right() * step;
        }
        if input.key_down(Key::Space) {
            camera.position += camera.up() * step;
        }
        if input.key_down(Key::Shift) {
            camera.position -= camera.up() * step;
        }

        if let Some((x, y)) = input.pointer_pos {
            if let Some((dx, dy)) = scene.mouse.delta(x, y) {
                camera.apply_mouse_delta(dx, dy, MOUSE_SENSITIVITY);
            }
        }

        AppControl::Continue
    }

    fn on_render(&mut self, ctx: &FrameCtx<'_>) -> Result<()> {
        let Some(scene) = self.scene.as_mut() else {
            return Ok(());
        };

        scene.spin_deg += SPIN_RATE_DEG * ctx.dt;
        scene.device.clear();

        let model = Mat4::from_rotation_x(scene.spin_deg.to_radians());

        scene.mesh.bind();
        scene.texture.bind(0);
        scene.shader.bind();
        scene.shader.set_mat4("u_model", &model)?;
        scene.shader.set_mat4("u_view", &scene.camera.view_matrix())?;
        scene
            .shader
            .set_mat4("u_projection", &scene.camera.projection_matrix())?;

        scene.mesh.draw();
        Ok(())
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        if let Some(scene) = self.scene.as_mut() {
            scene.device.set_viewport(width, height);
            scene.camera.set_aspect(width as f32 / height as f32);
        }
    }

    fn on_unload(&mut self) {
        if let Some(scene) = self.scene.take() {
            // Unbind before releasing; drops release the program, buffers,
            // and texture exactly once.
            scene.device.bind_vertex_array(None);
            scene.device.use_program(None);
            log::info!("scene unloaded");
        }
    }
}
