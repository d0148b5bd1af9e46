//! Recording fake device for tests.
//!
//! Implements [`Device`] without any GL context: object creation hands out
//! sequential ids, compile/link outcomes are scripted per test, and deletions
//! plus uniform writes are recorded for assertions.

use std::cell::RefCell;
use std::collections::HashMap;
use std::num::NonZeroU32;

use glam::{Mat4, Vec3};

use super::{
    AttribSlot, BufferId, BufferKind, Device, DeviceError, ProgramId, ShaderId, ShaderStage,
    TextureId, UniformSlot, VertexArrayId,
};

/// A recorded uniform write.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformWrite {
    I32(i32),
    F32(f32),
    Vec3(Vec3),
    Mat4(Mat4),
}

#[derive(Default)]
struct State {
    next_id: u32,
    shader_stages: HashMap<u32, ShaderStage>,
    sources: HashMap<u32, String>,
    created_shaders: Vec<ShaderId>,
    deleted_shaders: Vec<ShaderId>,
    created_programs: Vec<ProgramId>,
    deleted_programs: Vec<ProgramId>,
    detached: Vec<(ProgramId, ShaderId)>,
    bound_program: Option<ProgramId>,
    writes: Vec<(UniformSlot, UniformWrite)>,
}

impl State {
    fn alloc(&mut self) -> NonZeroU32 {
        self.next_id += 1;
        NonZeroU32::new(self.next_id).unwrap()
    }
}

pub struct FakeDevice {
    fail_compile: Option<(ShaderStage, String)>,
    fail_link: Option<String>,
    uniforms: Vec<String>,
    attribs: Vec<String>,
    state: RefCell<State>,
}

impl FakeDevice {
    pub fn new() -> Self {
        Self {
            fail_compile: None,
            fail_link: None,
            uniforms: Vec::new(),
            attribs: Vec::new(),
            state: RefCell::new(State::default()),
        }
    }

    /// Declares the active uniforms a linked program will report, in slot order.
    pub fn with_uniforms(mut self, names: &[&str]) -> Self {
        self.uniforms = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Declares the attributes a linked program will report, in slot order.
    pub fn with_attribs(mut self, names: &[&str]) -> Self {
        self.attribs = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Scripts a compile failure for `stage` with the given info log.
    pub fn with_compile_failure(mut self, stage: ShaderStage, log: &str) -> Self {
        self.fail_compile = Some((stage, log.to_string()));
        self
    }

    /// Scripts a link failure with the given info log.
    pub fn with_link_failure(mut self, log: &str) -> Self {
        self.fail_link = Some(log.to_string());
        self
    }

    // ── inspection ────────────────────────────────────────────────────────

    pub fn created_shaders(&self) -> Vec<ShaderId> {
        self.state.borrow().created_shaders.clone()
    }

    /// Shader objects created but not yet deleted.
    pub fn live_shader_count(&self) -> usize {
        let s = self.state.borrow();
        s.created_shaders.len() - s.deleted_shaders.len()
    }

    /// Program objects created but not yet deleted.
    pub fn live_program_count(&self) -> usize {
        let s = self.state.borrow();
        s.created_programs.len() - s.deleted_programs.len()
    }

    pub fn deleted_program_count(&self) -> usize {
        self.state.borrow().deleted_programs.len()
    }

    pub fn detach_count(&self) -> usize {
        self.state.borrow().detached.len()
    }

    pub fn bound_program(&self) -> Option<ProgramId> {
        self.state.borrow().bound_program
    }

    pub fn writes(&self) -> Vec<(UniformSlot, UniformWrite)> {
        self.state.borrow().writes.clone()
    }

    pub fn source_for(&self, shader: ShaderId) -> Option<String> {
        self.state.borrow().sources.get(&shader.0.get()).cloned()
    }
}

impl Device for FakeDevice {
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, DeviceError> {
        let mut s = self.state.borrow_mut();
        let id = ShaderId(s.alloc());
        s.shader_stages.insert(id.0.get(), stage);
        s.created_shaders.push(id);
        Ok(id)
    }

    fn shader_source(&self, shader: ShaderId, source: &str) {
        self.state
            .borrow_mut()
            .sources
            .insert(shader.0.get(), source.to_string());
    }

    fn compile_shader(&self, shader: ShaderId) -> bool {
        let stage = self.state.borrow().shader_stages.get(&shader.0.get()).copied();
        match (&self.fail_compile, stage) {
            (Some((failing, _)), Some(stage)) => stage != *failing,
            _ => true,
        }
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        let stage = self.state.borrow().shader_stages.get(&shader.0.get()).copied();
        match (&self.fail_compile, stage) {
            (Some((failing, log)), Some(stage)) if stage == *failing => log.clone(),
            _ => String::new(),
        }
    }

    fn delete_shader(&self, shader: ShaderId) {
        self.state.borrow_mut().deleted_shaders.push(shader);
    }

    fn create_program(&self) -> Result<ProgramId, DeviceError> {
        let mut s = self.state.borrow_mut();
        let id = ProgramId(s.alloc());
        s.created_programs.push(id);
        Ok(id)
    }

    fn attach_shader(&self, _program: ProgramId, _shader: ShaderId) {}

    fn detach_shader(&self, program: ProgramId, shader: ShaderId) {
        self.state.borrow_mut().detached.push((program, shader));
    }

    fn link_program(&self, _program: ProgramId) -> bool {
        self.fail_link.is_none()
    }

    fn program_info_log(&self, _program: ProgramId) -> String {
        self.fail_link.clone().unwrap_or_default()
    }

    fn use_program(&self, program: Option<ProgramId>) {
        self.state.borrow_mut().bound_program = program;
    }

    fn delete_program(&self, program: ProgramId) {
        self.state.borrow_mut().deleted_programs.push(program);
    }

    fn active_uniform_names(&self, _program: ProgramId) -> Vec<String> {
        self.uniforms.clone()
    }

    fn uniform_slot(&self, _program: ProgramId, name: &str) -> Option<UniformSlot> {
        self.uniforms
            .iter()
            .position(|n| n == name)
            .map(|i| UniformSlot(i as u32))
    }

    fn attrib_slot(&self, _program: ProgramId, name: &str) -> Option<AttribSlot> {
        self.attribs
            .iter()
            .position(|n| n == name)
            .map(|i| AttribSlot(i as u32))
    }

    fn set_uniform_i32(&self, slot: UniformSlot, value: i32) {
        self.state
            .borrow_mut()
            .writes
            .push((slot, UniformWrite::I32(value)));
    }

    fn set_uniform_f32(&self, slot: UniformSlot, value: f32) {
        self.state
            .borrow_mut()
            .writes
            .push((slot, UniformWrite::F32(value)));
    }

    fn set_uniform_vec3(&self, slot: UniformSlot, value: Vec3) {
        self.state
            .borrow_mut()
            .writes
            .push((slot, UniformWrite::Vec3(value)));
    }

    fn set_uniform_mat4(&self, slot: UniformSlot, value: &Mat4) {
        self.state
            .borrow_mut()
            .writes
            .push((slot, UniformWrite::Mat4(*value)));
    }

    fn create_buffer(&self, _kind: BufferKind, _data: &[u8]) -> Result<BufferId, DeviceError> {
        Ok(BufferId(self.state.borrow_mut().alloc()))
    }

    fn bind_buffer(&self, _kind: BufferKind, _buffer: Option<BufferId>) {}

    fn delete_buffer(&self, _buffer: BufferId) {}

    fn create_vertex_array(&self) -> Result<VertexArrayId, DeviceError> {
        Ok(VertexArrayId(self.state.borrow_mut().alloc()))
    }

    fn bind_vertex_array(&self, _array: Option<VertexArrayId>) {}

    fn delete_vertex_array(&self, _array: VertexArrayId) {}

    fn vertex_attrib_f32(&self, _slot: AttribSlot, _components: i32, _stride: i32, _offset: i32) {}

    fn create_texture_rgba8(
        &self,
        _width: u32,
        _height: u32,
        _pixels: &[u8],
    ) -> Result<TextureId, DeviceError> {
        Ok(TextureId(self.state.borrow_mut().alloc()))
    }

    fn bind_texture(&self, _unit: u32, _texture: Option<TextureId>) {}

    fn delete_texture(&self, _texture: TextureId) {}

    fn set_clear_color(&self, _r: f32, _g: f32, _b: f32, _a: f32) {}

    fn enable_depth_test(&self) {}

    fn clear(&self) {}

    fn set_viewport(&self, _width: u32, _height: u32) {}

    fn draw_indexed(&self, _index_count: i32) {}
}
