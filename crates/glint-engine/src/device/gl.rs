use glam::{Mat4, Vec3};
use glow::HasContext;

use super::{
    AttribSlot, BufferId, BufferKind, Device, DeviceError, ProgramId, ShaderId, ShaderStage,
    TextureId, UniformSlot, VertexArrayId,
};

/// [`Device`] implementation over a real OpenGL 3.3 context via `glow`.
///
/// The context must be current on the calling thread for the whole lifetime
/// of this value; the window runtime guarantees that by construction.
pub struct GlowDevice {
    gl: glow::Context,
}

impl GlowDevice {
    /// Wraps an already-current `glow` context.
    pub fn new(gl: glow::Context) -> Self {
        Self { gl }
    }
}

fn stage_kind(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn buffer_target(kind: BufferKind) -> u32 {
    match kind {
        BufferKind::Array => glow::ARRAY_BUFFER,
        BufferKind::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
    }
}

impl Device for GlowDevice {
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, DeviceError> {
        unsafe { self.gl.create_shader(stage_kind(stage)) }
            .map(|s| ShaderId(s.0))
            .map_err(DeviceError::new)
    }

    fn shader_source(&self, shader: ShaderId, source: &str) {
        unsafe { self.gl.shader_source(glow::NativeShader(shader.0), source) }
    }

    fn compile_shader(&self, shader: ShaderId) -> bool {
        let shader = glow::NativeShader(shader.0);
        unsafe {
            self.gl.compile_shader(shader);
            self.gl.get_shader_compile_status(shader)
        }
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        unsafe { self.gl.get_shader_info_log(glow::NativeShader(shader.0)) }
    }

    fn delete_shader(&self, shader: ShaderId) {
        unsafe { self.gl.delete_shader(glow::NativeShader(shader.0)) }
    }

    fn create_program(&self) -> Result<ProgramId, DeviceError> {
        unsafe { self.gl.create_program() }
            .map(|p| ProgramId(p.0))
            .map_err(DeviceError::new)
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        unsafe {
            self.gl
                .attach_shader(glow::NativeProgram(program.0), glow::NativeShader(shader.0))
        }
    }

    fn detach_shader(&self, program: ProgramId, shader: ShaderId) {
        unsafe {
            self.gl
                .detach_shader(glow::NativeProgram(program.0), glow::NativeShader(shader.0))
        }
    }

    fn link_program(&self, program: ProgramId) -> bool {
        let program = glow::NativeProgram(program.0);
        unsafe {
            self.gl.link_program(program);
            self.gl.get_program_link_status(program)
        }
    }

    fn program_info_log(&self, program: ProgramId) -> String {
        unsafe { self.gl.get_program_info_log(glow::NativeProgram(program.0)) }
    }

    fn use_program(&self, program: Option<ProgramId>) {
        unsafe { self.gl.use_program(program.map(|p| glow::NativeProgram(p.0))) }
    }

    fn delete_program(&self, program: ProgramId) {
        unsafe { self.gl.delete_program(glow::NativeProgram(program.0)) }
    }

    fn active_uniform_names(&self, program: ProgramId) -> Vec<String> {
        let program = glow::NativeProgram(program.0);
        let count = unsafe { self.gl.get_active_uniforms(program) };
        (0..count)
            .filter_map(|i| unsafe { self.gl.get_active_uniform(program, i) })
            .map(|u| u.name)
            .collect()
    }

    fn uniform_slot(&self, program: ProgramId, name: &str) -> Option<UniformSlot> {
        unsafe { self.gl.get_uniform_location(glow::NativeProgram(program.0), name) }
            .map(|loc| UniformSlot(loc.0))
    }

    fn attrib_slot(&self, program: ProgramId, name: &str) -> Option<AttribSlot> {
        unsafe { self.gl.get_attrib_location(glow::NativeProgram(program.0), name) }
            .map(AttribSlot)
    }

    fn set_uniform_i32(&self, slot: UniformSlot, value: i32) {
        unsafe {
            self.gl
                .uniform_1_i32(Some(&glow::NativeUniformLocation(slot.0)), value)
        }
    }

    fn set_uniform_f32(&self, slot: UniformSlot, value: f32) {
        unsafe {
            self.gl
                .uniform_1_f32(Some(&glow::NativeUniformLocation(slot.0)), value)
        }
    }

    fn set_uniform_vec3(&self, slot: UniformSlot, value: Vec3) {
        unsafe {
            self.gl.uniform_3_f32(
                Some(&glow::NativeUniformLocation(slot.0)),
                value.x,
                value.y,
                value.z,
            )
        }
    }

    fn set_uniform_mat4(&self, slot: UniformSlot, value: &Mat4) {
        // glam matrices are column-major, which is GL's native layout, so no
        // transpose is requested. Callers author matrices in natural glam form.
        unsafe {
            self.gl.uniform_matrix_4_f32_slice(
                Some(&glow::NativeUniformLocation(slot.0)),
                false,
                &value.to_cols_array(),
            )
        }
    }

    fn create_buffer(&self, kind: BufferKind, data: &[u8]) -> Result<BufferId, DeviceError> {
        let target = buffer_target(kind);
        unsafe {
            let buffer = self.gl.create_buffer().map_err(DeviceError::new)?;
            self.gl.bind_buffer(target, Some(buffer));
            self.gl
                .buffer_data_u8_slice(target, data, glow::STATIC_DRAW);
            Ok(BufferId(buffer.0))
        }
    }

    fn bind_buffer(&self, kind: BufferKind, buffer: Option<BufferId>) {
        unsafe {
            self.gl
                .bind_buffer(buffer_target(kind), buffer.map(|b| glow::NativeBuffer(b.0)))
        }
    }

    fn delete_buffer(&self, buffer: BufferId) {
        unsafe { self.gl.delete_buffer(glow::NativeBuffer(buffer.0)) }
    }

    fn create_vertex_array(&self) -> Result<VertexArrayId, DeviceError> {
        unsafe { self.gl.create_vertex_array() }
            .map(|v| VertexArrayId(v.0))
            .map_err(DeviceError::new)
    }

    fn bind_vertex_array(&self, array: Option<VertexArrayId>) {
        unsafe {
            self.gl
                .bind_vertex_array(array.map(|v| glow::NativeVertexArray(v.0)))
        }
    }

    fn delete_vertex_array(&self, array: VertexArrayId) {
        unsafe { self.gl.delete_vertex_array(glow::NativeVertexArray(array.0)) }
    }

    fn vertex_attrib_f32(&self, slot: AttribSlot, components: i32, stride: i32, offset: i32) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(slot.0, components, glow::FLOAT, false, stride, offset);
            self.gl.enable_vertex_attrib_array(slot.0);
        }
    }

    fn create_texture_rgba8(
        &self,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<TextureId, DeviceError> {
        unsafe {
            let texture = self.gl.create_texture().map_err(DeviceError::new)?;
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::REPEAT as i32,
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::REPEAT as i32,
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(pixels)),
            );
            self.gl.generate_mipmap(glow::TEXTURE_2D);
            Ok(TextureId(texture.0))
        }
    }

    fn bind_texture(&self, unit: u32, texture: Option<TextureId>) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl
                .bind_texture(glow::TEXTURE_2D, texture.map(|t| glow::NativeTexture(t.0)));
        }
    }

    fn delete_texture(&self, texture: TextureId) {
        unsafe { self.gl.delete_texture(glow::NativeTexture(texture.0)) }
    }

    fn set_clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { self.gl.clear_color(r, g, b, a) }
    }

    fn enable_depth_test(&self) {
        unsafe { self.gl.enable(glow::DEPTH_TEST) }
    }

    fn clear(&self) {
        unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT) }
    }

    fn set_viewport(&self, width: u32, height: u32) {
        unsafe { self.gl.viewport(0, 0, width as i32, height as i32) }
    }

    fn draw_indexed(&self, index_count: i32) {
        unsafe {
            self.gl
                .draw_elements(glow::TRIANGLES, index_count, glow::UNSIGNED_INT, 0)
        }
    }
}
