//! Graphics device boundary.
//!
//! This module is responsible for:
//! - defining the narrow [`Device`] contract the rest of the engine renders through
//! - backing that contract with a real OpenGL context ([`GlowDevice`])
//!
//! The device is deliberately opaque: it accepts shader sources, bound buffers,
//! and draw commands, and reports compile/link outcomes as status plus log text.
//! Everything above this module is testable without a GL context.

mod gl;

#[cfg(test)]
pub(crate) mod fake;

pub use gl::GlowDevice;

use std::fmt;
use std::num::NonZeroU32;

use glam::{Mat4, Vec3};

/// One shader pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Buffer binding target.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferKind {
    /// Vertex data.
    Array,
    /// Index data.
    ElementArray,
}

/// Device shader object handle.
///
/// Handles are `NonZeroU32` so conversion back to native GL names is
/// infallible; zero is not a valid GL object name.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ShaderId(pub(crate) NonZeroU32);

/// Device program object handle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ProgramId(pub(crate) NonZeroU32);

/// Device buffer object handle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BufferId(pub(crate) NonZeroU32);

/// Device vertex array object handle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct VertexArrayId(pub(crate) NonZeroU32);

/// Device texture object handle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub(crate) NonZeroU32);

/// Link-assigned uniform slot within a program.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UniformSlot(pub(crate) u32);

/// Vertex attribute slot within a program.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AttribSlot(pub(crate) u32);

/// Failure to create a device object.
///
/// Object creation essentially never fails on a healthy context; this exists
/// so the failure is surfaced instead of panicking inside the device layer.
#[derive(Debug, Clone)]
pub struct DeviceError {
    pub message: String,
}

impl DeviceError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "device error: {}", self.message)
    }
}

impl std::error::Error for DeviceError {}

/// Contract between the engine and the underlying graphics API.
///
/// All operations are synchronous and must be issued on the thread that owns
/// the GL context. The engine holds the device behind `Rc<dyn Device>`; there
/// is exactly one rendering context and no cross-thread sharing.
pub trait Device {
    // ── shader objects ────────────────────────────────────────────────────

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, DeviceError>;
    fn shader_source(&self, shader: ShaderId, source: &str);
    /// Compiles the shader; returns the compile status.
    fn compile_shader(&self, shader: ShaderId) -> bool;
    fn shader_info_log(&self, shader: ShaderId) -> String;
    fn delete_shader(&self, shader: ShaderId);

    // ── program objects ───────────────────────────────────────────────────

    fn create_program(&self) -> Result<ProgramId, DeviceError>;
    fn attach_shader(&self, program: ProgramId, shader: ShaderId);
    fn detach_shader(&self, program: ProgramId, shader: ShaderId);
    /// Links the program; returns the link status.
    fn link_program(&self, program: ProgramId) -> bool;
    fn program_info_log(&self, program: ProgramId) -> String;
    /// Binds `program` as the active program, or unbinds with `None`.
    fn use_program(&self, program: Option<ProgramId>);
    fn delete_program(&self, program: ProgramId);
    /// Names of the program's active (post-link, non-optimized-away) uniforms.
    fn active_uniform_names(&self, program: ProgramId) -> Vec<String>;
    fn uniform_slot(&self, program: ProgramId, name: &str) -> Option<UniformSlot>;
    fn attrib_slot(&self, program: ProgramId, name: &str) -> Option<AttribSlot>;

    // ── uniform writes (target the currently bound program) ───────────────

    fn set_uniform_i32(&self, slot: UniformSlot, value: i32);
    fn set_uniform_f32(&self, slot: UniformSlot, value: f32);
    fn set_uniform_vec3(&self, slot: UniformSlot, value: Vec3);
    fn set_uniform_mat4(&self, slot: UniformSlot, value: &Mat4);

    // ── geometry ──────────────────────────────────────────────────────────

    /// Creates a buffer, binds it to `kind`, and uploads `data` (static draw).
    fn create_buffer(&self, kind: BufferKind, data: &[u8]) -> Result<BufferId, DeviceError>;
    fn bind_buffer(&self, kind: BufferKind, buffer: Option<BufferId>);
    fn delete_buffer(&self, buffer: BufferId);
    fn create_vertex_array(&self) -> Result<VertexArrayId, DeviceError>;
    fn bind_vertex_array(&self, array: Option<VertexArrayId>);
    fn delete_vertex_array(&self, array: VertexArrayId);
    /// Configures and enables a float vertex attribute on the bound vertex array.
    ///
    /// `stride` and `offset` are in bytes.
    fn vertex_attrib_f32(&self, slot: AttribSlot, components: i32, stride: i32, offset: i32);

    // ── textures ──────────────────────────────────────────────────────────

    /// Creates a 2D texture from tightly packed RGBA8 pixels and builds mipmaps.
    fn create_texture_rgba8(
        &self,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<TextureId, DeviceError>;
    /// Binds `texture` for sampling on texture unit `unit`.
    fn bind_texture(&self, unit: u32, texture: Option<TextureId>);
    fn delete_texture(&self, texture: TextureId);

    // ── per-frame state ───────────────────────────────────────────────────

    fn set_clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn enable_depth_test(&self);
    /// Clears the color and depth buffers.
    fn clear(&self);
    fn set_viewport(&self, width: u32, height: u32);
    /// Issues an indexed triangle draw using the bound vertex array.
    fn draw_indexed(&self, index_count: i32);
}
