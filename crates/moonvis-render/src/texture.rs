//! Surface map loading: decode from disk, fit to device limits, upload with a
//! full mip chain, and expose a ready-to-bind texture + sampler group.

use std::path::{Path, PathBuf};

/// Errors raised while loading or uploading the surface map.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to read texture {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode texture: {0}")]
    Decode(#[from] image::ImageError),

    #[error(
        "texture data size ({actual}) does not match expected ({expected}) for {width}x{height}"
    )]
    DataSizeMismatch {
        actual: usize,
        expected: usize,
        width: u32,
        height: u32,
    },

    #[error("texture dimensions must be non-zero, got {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },
}

/// Number of mip levels down to 1×1 for the given base size.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// An RGBA8 image in CPU memory, rows top to bottom.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pixels: image::RgbaImage,
}

impl DecodedImage {
    /// Decodes PNG, JPEG or TIFF from disk. The format is sniffed from the
    /// file contents, and decoder size limits are lifted since planetary
    /// maps routinely exceed them.
    pub fn open(path: &Path) -> Result<Self, TextureError> {
        let io_err = |source| TextureError::Io {
            path: path.to_path_buf(),
            source,
        };
        let mut reader = image::ImageReader::open(path)
            .map_err(io_err)?
            .with_guessed_format()
            .map_err(io_err)?;
        reader.no_limits();
        let image = Self::from_dynamic(reader.decode()?)?;
        log::info!(
            "Decoded texture {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(image)
    }

    /// Decodes an in-memory encoded image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TextureError> {
        let mut reader = image::ImageReader::new(std::io::Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|source| TextureError::Io {
                path: PathBuf::from("<memory>"),
                source,
            })?;
        reader.no_limits();
        Self::from_dynamic(reader.decode()?)
    }

    /// Wraps raw RGBA8 pixels.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, TextureError> {
        validate_dimensions(width, height)?;
        let expected = width as usize * height as usize * 4;
        let actual = data.len();
        let pixels = image::RgbaImage::from_raw(width, height, data).filter(|_| actual == expected);
        pixels.map(|pixels| Self { pixels }).ok_or(TextureError::DataSizeMismatch {
            actual,
            expected,
            width,
            height,
        })
    }

    fn from_dynamic(image: image::DynamicImage) -> Result<Self, TextureError> {
        validate_dimensions(image.width(), image.height())?;
        Ok(Self {
            pixels: image.to_rgba8(),
        })
    }

    /// Downsamples so neither edge exceeds `max_dim`, keeping the aspect
    /// ratio. Images that already fit are returned unchanged.
    pub fn fit_within(self, max_dim: u32) -> Self {
        let (w, h) = (self.width(), self.height());
        let max_dim = max_dim.max(1);
        if w <= max_dim && h <= max_dim {
            return self;
        }
        let scale = max_dim as f64 / w.max(h) as f64;
        let nw = ((w as f64 * scale).round() as u32).clamp(1, max_dim);
        let nh = ((h as f64 * scale).round() as u32).clamp(1, max_dim);
        log::warn!("Texture {w}x{h} exceeds device limit {max_dim}, downsampling to {nw}x{nh}");
        Self {
            pixels: image::imageops::resize(
                &self.pixels,
                nw,
                nh,
                image::imageops::FilterType::Triangle,
            ),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}

fn validate_dimensions(width: u32, height: u32) -> Result<(), TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::ZeroDimensions { width, height });
    }
    Ok(())
}

/// The body's surface map on the GPU, bound at group 1 of the sphere pipeline.
pub struct PlanetTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub bind_group: wgpu::BindGroup,
    pub dimensions: (u32, u32),
    pub mip_level_count: u32,
}

impl PlanetTexture {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    /// Layout of the texture (binding 0) and sampler (binding 1).
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("planet-texture-bind-group-layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        })
    }

    /// Uploads `image` and builds the bind group against `layout`.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        image: &DecodedImage,
        generate_mipmaps: bool,
    ) -> Result<Self, TextureError> {
        let (width, height) = (image.width(), image.height());
        validate_dimensions(width, height)?;

        let mip_levels = if generate_mipmaps {
            mip_level_count(width, height)
        } else {
            1
        };
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("planet-texture"),
            size,
            mip_level_count: mip_levels,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            size,
        );

        if mip_levels > 1 {
            MipmapGenerator::new(device).generate(device, queue, &texture, mip_levels);
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        // Clamp keeps the poles and the seam from bleeding across the edges.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("planet-sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("planet-texture-bind-group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        log::info!("Uploaded planet texture ({width}x{height}, {mip_levels} mips)");
        Ok(Self {
            texture,
            view,
            sampler,
            bind_group,
            dimensions: (width, height),
            mip_level_count: mip_levels,
        })
    }
}

/// Fills mip levels 1.. by repeatedly drawing each level into the next with
/// a linear-filtered fullscreen triangle.
struct MipmapGenerator {
    shader: wgpu::ShaderModule,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    sampler: wgpu::Sampler,
}

const BLIT_SHADER_SOURCE: &str = r#"
@group(0) @binding(0) var src_texture: texture_2d<f32>;
@group(0) @binding(1) var src_sampler: sampler;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) idx: u32) -> VertexOutput {
    let uv = vec2<f32>(f32((idx << 1u) & 2u), f32(idx & 2u));
    var out: VertexOutput;
    out.position = vec4<f32>(uv * 2.0 - 1.0, 0.0, 1.0);
    out.uv = vec2<f32>(uv.x, 1.0 - uv.y);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(src_texture, src_sampler, in.uv);
}
"#;

impl MipmapGenerator {
    fn new(device: &wgpu::Device) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mipmap-blit-shader"),
            source: wgpu::ShaderSource::Wgsl(BLIT_SHADER_SOURCE.into()),
        });
        let bind_group_layout = PlanetTexture::bind_group_layout(device);
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mipmap-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("mipmap-sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        Self {
            shader,
            bind_group_layout,
            pipeline_layout,
            sampler,
        }
    }

    fn generate(&self, device: &wgpu::Device, queue: &wgpu::Queue, texture: &wgpu::Texture, mip_count: u32) {
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mipmap-pipeline"),
            layout: Some(&self.pipeline_layout),
            vertex: wgpu::VertexState {
                module: &self.shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &self.shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: texture.format(),
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("mipmap-encoder"),
        });

        let level_view = |level: u32| {
            texture.create_view(&wgpu::TextureViewDescriptor {
                base_mip_level: level,
                mip_level_count: Some(1),
                ..Default::default()
            })
        };

        for level in 1..mip_count {
            let src_view = level_view(level - 1);
            let dst_view = level_view(level);

            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("mipmap-bind-group"),
                layout: &self.bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&src_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&self.sampler),
                    },
                ],
            });

            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("mipmap-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &dst_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            pass.set_pipeline(&pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.draw(0..3, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}
