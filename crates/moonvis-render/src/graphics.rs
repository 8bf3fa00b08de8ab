//! The drawing seam between the viewer loop and the GPU.
//!
//! The app only talks to [`GraphicsSurface`]: upload the mesh once, set the
//! three transform uniforms, draw. [`WgpuSurface`] is the real implementation;
//! tests substitute a recording one.

use glam::Mat4;
use moonvis_mesh::SphereVertex;

use crate::buffer::{BufferAllocator, BufferError, MeshBuffer};
use crate::depth::DepthBuffer;
use crate::gpu::{RenderContext, RenderContextError, SurfaceError};
use crate::pass::{DARK_GREY, FrameEncoder, RenderPassBuilder};
use crate::shader::{ShaderError, ShaderLibrary};
use crate::sphere_pipeline::{SPHERE_SHADER_NAME, SPHERE_SHADER_SOURCE, SceneUniform, SpherePipeline};
use crate::texture::{DecodedImage, PlanetTexture, TextureError};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("unknown uniform '{name}'")]
    UnknownUniform { name: String },

    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Context(#[from] RenderContextError),

    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error("mesh upload failed: {0}")]
    Buffer(#[from] BufferError),

    #[error(transparent)]
    Shader(#[from] ShaderError),
}

pub trait GraphicsSurface {
    type Mesh;

    fn upload_mesh(
        &mut self,
        label: &str,
        vertices: &[SphereVertex],
        indices: &[u32],
    ) -> Result<Self::Mesh, RenderError>;

    /// Sets one of `model`, `view` or `projection` for the next draw.
    fn set_uniform(&mut self, name: &str, value: Mat4) -> Result<(), RenderError>;

    /// Records, submits and presents one frame showing `mesh`.
    fn draw(&mut self, mesh: &Self::Mesh) -> Result<(), RenderError>;
}

#[derive(Debug, Clone, Copy)]
pub struct SurfaceOptions {
    pub clear_color: wgpu::Color,
    pub generate_mipmaps: bool,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            clear_color: DARK_GREY,
            generate_mipmaps: true,
        }
    }
}

pub struct WgpuSurface {
    context: RenderContext,
    depth: DepthBuffer,
    pipeline: SpherePipeline,
    scene: SceneUniform,
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    texture: PlanetTexture,
    // Keeps the compiled module alive alongside the pipeline.
    _shaders: ShaderLibrary,
    clear_color: wgpu::Color,
}

impl WgpuSurface {
    /// Builds every GPU resource the viewer needs. `surface_map` is downsampled
    /// first if it exceeds the device's texture limit.
    pub fn new(
        context: RenderContext,
        surface_map: DecodedImage,
        options: SurfaceOptions,
    ) -> Result<Self, RenderError> {
        let device = &context.device;
        let (width, height) = context.size();

        let mut shaders = ShaderLibrary::new();
        let shader = shaders.load_from_source(device, SPHERE_SHADER_NAME, SPHERE_SHADER_SOURCE)?;

        let texture_layout = PlanetTexture::bind_group_layout(device);
        let surface_map = surface_map.fit_within(context.max_texture_dimension());
        let texture = PlanetTexture::new(
            device,
            &context.queue,
            &texture_layout,
            &surface_map,
            options.generate_mipmaps,
        )?;

        let pipeline = SpherePipeline::new(device, &shader, context.surface_format, &texture_layout);
        let scene = SceneUniform::default();
        let scene_buffer = BufferAllocator::new(device).create_uniform("scene-uniform", &scene);
        let scene_bind_group = pipeline.create_scene_bind_group(device, &scene_buffer);
        let depth = DepthBuffer::new(device, width, height);

        log::info!("Sphere renderer ready ({width}x{height}, {:?})", context.surface_format);
        Ok(Self {
            context,
            depth,
            pipeline,
            scene,
            scene_buffer,
            scene_bind_group,
            texture,
            _shaders: shaders,
            clear_color: options.clear_color,
        })
    }

    /// Reconfigures the swapchain and depth buffer.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        let (width, height) = self.context.size();
        self.depth.resize(&self.context.device, width, height);
        log::debug!("Surface resized to {width}x{height}");
    }

    pub fn size(&self) -> (u32, u32) {
        self.context.size()
    }
}

impl GraphicsSurface for WgpuSurface {
    type Mesh = MeshBuffer;

    fn upload_mesh(
        &mut self,
        label: &str,
        vertices: &[SphereVertex],
        indices: &[u32],
    ) -> Result<MeshBuffer, RenderError> {
        Ok(BufferAllocator::new(&self.context.device).create_mesh(label, vertices, indices)?)
    }

    fn set_uniform(&mut self, name: &str, value: Mat4) -> Result<(), RenderError> {
        if self.scene.set(name, value) {
            Ok(())
        } else {
            Err(RenderError::UnknownUniform {
                name: name.to_string(),
            })
        }
    }

    fn draw(&mut self, mesh: &MeshBuffer) -> Result<(), RenderError> {
        let surface_texture = match self.context.get_current_texture() {
            Ok(texture) => texture,
            Err(SurfaceError::Timeout) => {
                log::warn!("Surface timeout, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        self.context
            .queue
            .write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&self.scene));

        let mut frame = FrameEncoder::new(&self.context.device, &self.context.queue, surface_texture);
        {
            let builder = RenderPassBuilder::new()
                .clear_color(self.clear_color)
                .depth(&self.depth)
                .label("sphere-pass");
            let mut pass = frame.begin_render_pass(&builder);
            self.pipeline
                .draw(&mut pass, &self.scene_bind_group, &self.texture.bind_group, mesh);
        }
        frame.submit();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_uniform_message() {
        let err = RenderError::UnknownUniform {
            name: "mvp".to_string(),
        };
        assert_eq!(err.to_string(), "unknown uniform 'mvp'");
    }

    #[test]
    fn test_surface_error_converts() {
        let err: RenderError = SurfaceError::Lost.into();
        assert!(matches!(err, RenderError::Surface(SurfaceError::Lost)));
    }

    #[test]
    fn test_texture_error_is_transparent() {
        let err: RenderError = TextureError::ZeroDimensions { width: 0, height: 4 }.into();
        assert_eq!(err.to_string(), "texture dimensions must be non-zero, got 0x4");
    }

    #[test]
    fn test_oversized_mesh_is_a_render_error() {
        let err: RenderError = BufferError::TooLarge {
            label: "sphere-vertices".to_string(),
            bytes: 512 << 20,
            limit: 256 << 20,
        }
        .into();
        assert!(matches!(err, RenderError::Buffer(BufferError::TooLarge { .. })));
        assert!(err.to_string().starts_with("mesh upload failed"));
    }

    #[test]
    fn test_default_options() {
        let options = SurfaceOptions::default();
        assert_eq!(options.clear_color, DARK_GREY);
        assert!(options.generate_mipmaps);
    }
}
