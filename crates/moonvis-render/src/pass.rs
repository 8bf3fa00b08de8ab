//! Render pass setup and per-frame command submission.

use crate::depth::DepthBuffer;

/// Background behind the body.
pub const DARK_GREY: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.1,
    a: 1.0,
};

/// Describes the single colour + depth pass the viewer draws each frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderPassBuilder<'a> {
    clear_color: wgpu::Color,
    depth: Option<&'a DepthBuffer>,
    label: Option<&'static str>,
}

impl Default for RenderPassBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> RenderPassBuilder<'a> {
    pub fn new() -> Self {
        Self {
            clear_color: DARK_GREY,
            depth: None,
            label: None,
        }
    }

    pub fn clear_color(mut self, color: wgpu::Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Clear and test against `depth` using its reverse-Z settings.
    pub fn depth(mut self, depth: &'a DepthBuffer) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn begin<'e>(
        &self,
        encoder: &'e mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
    ) -> wgpu::RenderPass<'e> {
        let color_attachment = wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(self.clear_color),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        };

        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: self.label,
            color_attachments: &[Some(color_attachment)],
            depth_stencil_attachment: self.depth.map(DepthBuffer::attachment),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}

/// One frame's command encoder bound to an acquired swapchain image.
///
/// [`submit`](Self::submit) consumes the encoder, so a frame can be submitted
/// and presented only once. Dropping it unsubmitted discards the frame.
pub struct FrameEncoder {
    encoder: wgpu::CommandEncoder,
    queue: wgpu::Queue,
    surface_texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
}

impl FrameEncoder {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, surface_texture: wgpu::SurfaceTexture) -> Self {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame-encoder"),
        });
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            encoder,
            queue: queue.clone(),
            surface_texture,
            view,
        }
    }

    pub fn begin_render_pass(&mut self, builder: &RenderPassBuilder<'_>) -> wgpu::RenderPass<'_> {
        builder.begin(&mut self.encoder, &self.view)
    }

    pub fn submit(self) {
        self.queue.submit([self.encoder.finish()]);
        self.surface_texture.present();
    }
}
