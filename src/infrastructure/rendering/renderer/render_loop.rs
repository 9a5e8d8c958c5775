use super::*;
use crate::domain::chart::Color;
use std::hash::{Hash, Hasher};

impl WebGpuRenderer {
    fn geometry_hash(vertices: &[CandleVertex], uniforms: &ChartUniforms) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        bytemuck::cast_slice::<CandleVertex, u8>(vertices).hash(&mut hasher);
        bytemuck::bytes_of(uniforms).hash(&mut hasher);
        hasher.finish()
    }

    /// Full repaint of the candle layer: clear, upload changed geometry, draw.
    ///
    /// Always a complete redraw; the vertical mapping is range-dependent, so
    /// frames are never patched incrementally.
    pub fn render(&mut self, chart: &Chart) -> TerminalResult<()> {
        let (vertices, uniforms) = create_geometry(chart);

        let new_hash = Self::geometry_hash(&vertices, &uniforms);
        if new_hash != self.cached_hash {
            self.cached_hash = new_hash;
            self.vertex_count = vertices.len() as u32;
            if !vertices.is_empty() {
                self.queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
            }
            self.queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        }

        let output = self.surface.get_current_texture().map_err(|e| {
            let message = format!("Failed to get surface texture: {:?}", e);
            get_logger().error(LogComponent::Infrastructure("WebGpuRenderer"), &message);
            TerminalError::Rendering(message)
        })?;

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Candle Encoder") });

        {
            let background = Color::BACKGROUND;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Candle Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: background.r as f64,
                            g: background.g as f64,
                            b: background.b as f64,
                            a: background.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if self.vertex_count > 0 {
                render_pass.set_pipeline(&self.render_pipeline);
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.draw(0..self.vertex_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
