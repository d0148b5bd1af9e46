use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use glam::{Mat4, Vec3};

use crate::device::{AttribSlot, Device, ProgramId, ShaderId, ShaderStage, UniformSlot};

use super::error::ShaderError;
use super::split::split_stages;

/// A linked shader program together with its uniform slot map.
///
/// The uniform map is built exactly once, immediately after a successful
/// link: slot assignment is link-dependent and the set of *active* uniforms
/// (those the compiler did not optimize away) is only knowable post-link.
/// The map is immutable afterwards; one map per program, no global registry.
///
/// The device program handle is owned exclusively and released exactly once,
/// either through [`ShaderProgram::release`] or on drop.
pub struct ShaderProgram {
    device: Rc<dyn Device>,
    handle: Option<ProgramId>,
    uniforms: HashMap<String, UniformSlot>,
}

impl ShaderProgram {
    /// Reads a combined shader source file and builds a program from it.
    pub fn from_path(device: Rc<dyn Device>, path: &Path) -> Result<Self, ShaderError> {
        let text = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_source(device, &text)
    }

    /// Builds a program from combined shader source text.
    ///
    /// On any failure every device object created so far is released before
    /// the error propagates; no partial program is ever produced.
    pub fn from_source(device: Rc<dyn Device>, text: &str) -> Result<Self, ShaderError> {
        let sources = split_stages(text);

        let vertex = compile_stage(&*device, ShaderStage::Vertex, &sources.vertex)?;
        let fragment = match compile_stage(&*device, ShaderStage::Fragment, &sources.fragment) {
            Ok(shader) => shader,
            Err(err) => {
                device.delete_shader(vertex);
                return Err(err);
            }
        };

        let handle = match device.create_program() {
            Ok(handle) => handle,
            Err(err) => {
                device.delete_shader(vertex);
                device.delete_shader(fragment);
                return Err(ShaderError::Link {
                    log: err.to_string(),
                });
            }
        };

        device.attach_shader(handle, vertex);
        device.attach_shader(handle, fragment);

        if !device.link_program(handle) {
            let log = device.program_info_log(handle);
            device.delete_program(handle);
            device.delete_shader(vertex);
            device.delete_shader(fragment);
            return Err(ShaderError::Link { log });
        }

        // Stage objects are not needed once linked; reclaim them now rather
        // than at program destruction.
        device.detach_shader(handle, vertex);
        device.detach_shader(handle, fragment);
        device.delete_shader(vertex);
        device.delete_shader(fragment);

        let uniforms = device
            .active_uniform_names(handle)
            .into_iter()
            .filter_map(|name| {
                device
                    .uniform_slot(handle, &name)
                    .map(|slot| (name, slot))
            })
            .collect();

        Ok(Self {
            device,
            handle: Some(handle),
            uniforms,
        })
    }

    /// Makes this program the active program on the device.
    pub fn bind(&self) {
        self.device.use_program(self.handle);
    }

    /// Queries the attribute slot for `name`.
    ///
    /// `None` means the attribute is absent (or optimized away); that is not
    /// an error, but callers must check before configuring a vertex layout.
    pub fn attrib_location(&self, name: &str) -> Option<AttribSlot> {
        self.handle
            .and_then(|handle| self.device.attrib_slot(handle, name))
    }

    pub fn set_int(&self, name: &str, value: i32) -> Result<(), ShaderError> {
        let slot = self.uniform(name)?;
        self.bind();
        self.device.set_uniform_i32(slot, value);
        Ok(())
    }

    pub fn set_float(&self, name: &str, value: f32) -> Result<(), ShaderError> {
        let slot = self.uniform(name)?;
        self.bind();
        self.device.set_uniform_f32(slot, value);
        Ok(())
    }

    pub fn set_vec3(&self, name: &str, value: Vec3) -> Result<(), ShaderError> {
        let slot = self.uniform(name)?;
        self.bind();
        self.device.set_uniform_vec3(slot, value);
        Ok(())
    }

    pub fn set_mat4(&self, name: &str, value: &Mat4) -> Result<(), ShaderError> {
        let slot = self.uniform(name)?;
        self.bind();
        self.device.set_uniform_mat4(slot, value);
        Ok(())
    }

    /// Releases the device program handle. Idempotent.
    pub fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.device.delete_program(handle);
        }
    }

    fn uniform(&self, name: &str) -> Result<UniformSlot, ShaderError> {
        // A miss here means the uniform was misspelled or optimized out;
        // silently ignoring it would produce confusing visual bugs.
        self.uniforms
            .get(name)
            .copied()
            .ok_or_else(|| ShaderError::UnknownUniform {
                name: name.to_string(),
            })
    }
}

impl std::fmt::Debug for ShaderProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("handle", &self.handle)
            .field("uniforms", &self.uniforms)
            .finish_non_exhaustive()
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        self.release();
    }
}

fn compile_stage(
    device: &dyn Device,
    stage: ShaderStage,
    source: &str,
) -> Result<ShaderId, ShaderError> {
    let shader = device.create_shader(stage).map_err(|err| ShaderError::Compile {
        stage,
        log: err.to_string(),
    })?;

    device.shader_source(shader, source);
    if !device.compile_shader(shader) {
        let log = device.shader_info_log(shader);
        device.delete_shader(shader);
        return Err(ShaderError::Compile { stage, log });
    }

    Ok(shader)
}
