//! Static quad geometry.

use std::rc::Rc;

use anyhow::{Context, Result};

use glint_engine::device::{BufferId, BufferKind, Device, VertexArrayId};
use glint_engine::shader::ShaderProgram;

/// Interleaved position + texture coordinate vertex.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    uv: [f32; 2],
}

const QUAD_VERTICES: [Vertex; 4] = [
    Vertex { position: [0.5, 0.5, 0.0], uv: [1.0, 1.0] },
    Vertex { position: [0.5, -0.5, 0.0], uv: [1.0, 0.0] },
    Vertex { position: [-0.5, -0.5, 0.0], uv: [0.0, 0.0] },
    Vertex { position: [-0.5, 0.5, 0.0], uv: [0.0, 1.0] },
];

const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

const STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;

/// The textured unit quad: vertex array, vertex buffer, and index buffer.
pub struct QuadMesh {
    device: Rc<dyn Device>,
    vertex_array: Option<VertexArrayId>,
    vertex_buffer: Option<BufferId>,
    index_buffer: Option<BufferId>,
}

impl QuadMesh {
    /// Uploads the quad's static geometry. The vertex array is left bound.
    pub fn upload(device: Rc<dyn Device>) -> Result<Self> {
        let vertex_array = device
            .create_vertex_array()
            .context("failed to create vertex array")?;
        device.bind_vertex_array(Some(vertex_array));

        let vertex_buffer = device
            .create_buffer(BufferKind::Array, bytemuck::cast_slice(&QUAD_VERTICES))
            .context("failed to upload vertex buffer")?;
        let index_buffer = device
            .create_buffer(BufferKind::ElementArray, bytemuck::cast_slice(&QUAD_INDICES))
            .context("failed to upload index buffer")?;

        Ok(Self {
            device,
            vertex_array: Some(vertex_array),
            vertex_buffer: Some(vertex_buffer),
            index_buffer: Some(index_buffer),
        })
    }

    /// Configures the vertex layout against the shader's attribute slots.
    ///
    /// Attribute locations are queried by name; an absent attribute (e.g.
    /// optimized away) is skipped with a warning rather than treated as an
    /// error.
    pub fn configure_attributes(&self, shader: &ShaderProgram) {
        let uv_offset = std::mem::size_of::<[f32; 3]>() as i32;
        for (name, components, offset) in [("a_pos", 3, 0), ("a_uv", 2, uv_offset)] {
            match shader.attrib_location(name) {
                Some(slot) => self.device.vertex_attrib_f32(slot, components, STRIDE, offset),
                None => log::warn!("vertex attribute {name:?} not found in shader"),
            }
        }
    }

    /// Binds the vertex array for drawing.
    pub fn bind(&self) {
        self.device.bind_vertex_array(self.vertex_array);
    }

    /// Issues the indexed draw for the quad.
    pub fn draw(&self) {
        self.device.draw_indexed(QUAD_INDICES.len() as i32);
    }

    /// Releases the device objects. Idempotent.
    pub fn release(&mut self) {
        if let Some(buffer) = self.vertex_buffer.take() {
            self.device.delete_buffer(buffer);
        }
        if let Some(buffer) = self.index_buffer.take() {
            self.device.delete_buffer(buffer);
        }
        if let Some(array) = self.vertex_array.take() {
            self.device.delete_vertex_array(array);
        }
    }
}

impl Drop for QuadMesh {
    fn drop(&mut self) {
        self.release();
    }
}
