//! Vertex, index and uniform buffer creation.

use moonvis_mesh::SphereVertex;
use wgpu::util::DeviceExt;

/// Vertex attributes as the sphere shader sees them: position at location 0,
/// normal at 1, uv at 2.
const SPHERE_ATTRIBUTES: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

/// Buffer layout matching [`SphereVertex`].
pub fn sphere_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<SphereVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &SPHERE_ATTRIBUTES,
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("buffer '{label}' needs {bytes} bytes, device limit is {limit}")]
    TooLarge { label: String, bytes: u64, limit: u64 },

    #[error("buffer '{label}' holds {count} elements, more than a u32 count")]
    TooManyElements { label: String, count: usize },
}

/// Rejects a buffer the device cannot allocate.
pub fn check_buffer_size(label: &str, bytes: u64, limit: u64) -> Result<(), BufferError> {
    if bytes > limit {
        return Err(BufferError::TooLarge {
            label: label.to_string(),
            bytes,
            limit,
        });
    }
    Ok(())
}

fn element_count(label: &str, count: usize) -> Result<u32, BufferError> {
    u32::try_from(count).map_err(|_| BufferError::TooManyElements {
        label: label.to_string(),
        count,
    })
}

/// An uploaded indexed triangle list.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    pub index_count: u32,
}

impl MeshBuffer {
    pub const INDEX_FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint32;

    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), Self::INDEX_FORMAT);
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

pub struct BufferAllocator<'a> {
    device: &'a wgpu::Device,
}

impl<'a> BufferAllocator<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }

    /// Uploads a sphere mesh. Labels become `{label}-vertices` and
    /// `{label}-indices` in GPU debuggers.
    ///
    /// Fails without touching the GPU when either buffer exceeds the
    /// device's `max_buffer_size` or its element count does not fit a `u32`.
    pub fn create_mesh(
        &self,
        label: &str,
        vertices: &[SphereVertex],
        indices: &[u32],
    ) -> Result<MeshBuffer, BufferError> {
        let vertex_label = format!("{label}-vertices");
        let index_label = format!("{label}-indices");
        let vertex_count = element_count(&vertex_label, vertices.len())?;
        let index_count = element_count(&index_label, indices.len())?;

        let limit = self.device.limits().max_buffer_size;
        check_buffer_size(&vertex_label, std::mem::size_of_val(vertices) as u64, limit)?;
        check_buffer_size(&index_label, std::mem::size_of_val(indices) as u64, limit)?;

        let vertex_buffer = self.create_buffer(
            &vertex_label,
            bytemuck::cast_slice(vertices),
            wgpu::BufferUsages::VERTEX,
        );
        let index_buffer = self.create_buffer(
            &index_label,
            bytemuck::cast_slice(indices),
            wgpu::BufferUsages::INDEX,
        );
        log::debug!("Uploaded mesh '{label}': {vertex_count} vertices, {index_count} indices");
        Ok(MeshBuffer {
            vertex_buffer,
            index_buffer,
            vertex_count,
            index_count,
        })
    }

    /// Uniform buffer initialized with `value`, writable through the queue.
    pub fn create_uniform<T: bytemuck::Pod>(&self, label: &str, value: &T) -> wgpu::Buffer {
        self.create_buffer(
            label,
            bytemuck::bytes_of(value),
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        )
    }

    fn create_buffer(&self, label: &str, contents: &[u8], usage: wgpu::BufferUsages) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage,
            })
    }
}
