//! Textured sphere pipeline: one scene uniform at group 0, the surface map at
//! group 1.

use std::num::NonZeroU64;

use glam::Mat4;

use crate::buffer::{MeshBuffer, sphere_vertex_layout};
use crate::depth::DepthBuffer;

/// Per-frame transforms, laid out as the WGSL `SceneUniform` struct.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

static_assertions::assert_eq_size!(SceneUniform, [u8; 192]);

impl Default for SceneUniform {
    fn default() -> Self {
        let identity = Mat4::IDENTITY.to_cols_array_2d();
        Self {
            model: identity,
            view: identity,
            projection: identity,
        }
    }
}

impl SceneUniform {
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    /// Stores `matrix` under a shader-visible name. Returns `false` for names
    /// the shader does not declare.
    pub fn set(&mut self, name: &str, matrix: Mat4) -> bool {
        let slot = match name {
            "model" => &mut self.model,
            "view" => &mut self.view,
            "projection" => &mut self.projection,
            _ => return false,
        };
        *slot = matrix.to_cols_array_2d();
        true
    }
}

pub struct SpherePipeline {
    pub pipeline: wgpu::RenderPipeline,
    /// Scene uniform layout (group 0).
    pub scene_bind_group_layout: wgpu::BindGroupLayout,
}

impl SpherePipeline {
    /// `texture_bind_group_layout` is the group 1 layout from
    /// [`PlanetTexture::bind_group_layout`](crate::texture::PlanetTexture::bind_group_layout).
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        texture_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let scene_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("sphere-scene-bind-group-layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(SceneUniform::SIZE),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sphere-pipeline-layout"),
            bind_group_layouts: &[&scene_bind_group_layout, texture_bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sphere-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[sphere_vertex_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: front_face(),
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(DepthBuffer::stencil_state()),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            scene_bind_group_layout,
        }
    }

    pub fn create_scene_bind_group(&self, device: &wgpu::Device, buffer: &wgpu::Buffer) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sphere-scene-bind-group"),
            layout: &self.scene_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        })
    }

    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        scene_bind_group: &wgpu::BindGroup,
        texture_bind_group: &wgpu::BindGroup,
        mesh: &MeshBuffer,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, scene_bind_group, &[]);
        render_pass.set_bind_group(1, texture_bind_group, &[]);
        mesh.bind(render_pass);
        mesh.draw(render_pass);
    }
}

/// Sphere triangles wind clockwise seen from outside.
fn front_face() -> wgpu::FrontFace {
    if moonvis_mesh::SPHERE_FRONT_FACE_CLOCKWISE {
        wgpu::FrontFace::Cw
    } else {
        wgpu::FrontFace::Ccw
    }
}

pub const SPHERE_SHADER_NAME: &str = "sphere";

pub const SPHERE_SHADER_SOURCE: &str = r#"
struct SceneUniform {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> scene: SceneUniform;

@group(1) @binding(0)
var t_surface: texture_2d<f32>;
@group(1) @binding(1)
var s_surface: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = scene.projection * scene.view * scene.model * vec4<f32>(in.position, 1.0);
    out.uv = in.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(t_surface, s_surface, in.uv);
}
"#;
