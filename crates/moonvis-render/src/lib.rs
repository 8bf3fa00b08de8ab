//! wgpu rendering for the sphere viewer: device and swapchain, depth, shader
//! and texture loading, the sphere pipeline and the [`GraphicsSurface`] seam.

pub mod buffer;
pub mod camera;
pub mod depth;
pub mod gpu;
pub mod graphics;
pub mod pass;
pub mod shader;
pub mod sphere_pipeline;
pub mod surface;
pub mod texture;

pub use buffer::{BufferAllocator, BufferError, MeshBuffer, check_buffer_size, sphere_vertex_layout};
pub use camera::PerspectiveProjection;
pub use depth::DepthBuffer;
pub use gpu::{
    RenderContext, RenderContextError, SurfaceError, init_render_context_blocking,
    select_present_mode, select_surface_format,
};
pub use graphics::{GraphicsSurface, RenderError, SurfaceOptions, WgpuSurface};
pub use pass::{DARK_GREY, FrameEncoder, RenderPassBuilder};
pub use shader::{ShaderError, ShaderLibrary};
pub use sphere_pipeline::{SPHERE_SHADER_SOURCE, SceneUniform, SpherePipeline};
pub use surface::{PhysicalSize, ViewportTracker};
pub use texture::{DecodedImage, PlanetTexture, TextureError, mip_level_count};
