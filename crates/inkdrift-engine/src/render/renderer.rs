use glam::{Mat4, Vec3};

use crate::coords::{Rect, Viewport};
use crate::motion::LayerPlan;

use super::geometry::{GeometryBuffer, QuadVertex};
use super::layer::{texture_rotation, Layer, UniformSlot};
use super::shader::{AttribLocation, BindingInfo, BindingKind, ShaderProgram, UniformLocation};
use super::texture::Texture;
use super::uniforms::UniformBlock;
use super::{RenderCtx, RenderTarget};

/// Attribute names the layer program is expected to declare.
pub const LAYER_ATTRIBUTES: [&str; 2] = ["position", "texCoord"];

/// Uniform names the layer program is expected to declare.
pub const LAYER_UNIFORMS: [&str; 4] = ["matrix", "image", "velocity", "image_matrix"];

/// Draws textured layer quads with a linked [`ShaderProgram`].
///
/// Pipeline state is fixed: triangle list, no depth test, straight alpha-over
/// blending (`src_alpha`, `1 - src_alpha`).
pub struct LayerRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bindings: Vec<BindingInfo>,

    matrix: Option<UniformLocation>,
    image_matrix: Option<UniformLocation>,
    velocity: Option<UniformLocation>,
}

impl LayerRenderer {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat, program: &ShaderProgram) -> Self {
        let iface = program.interface();

        let attrs = program.resolve_attributes(&LAYER_ATTRIBUTES);
        let unis = program.resolve_uniforms(&LAYER_UNIFORMS);
        let uniform = |name: &str| unis.get(name).copied().flatten();

        if attrs.get("position").copied().flatten().is_none() {
            log::warn!("shader program {} has no `position` attribute; layers will not be visible", program.label());
        }

        let vertex_attributes = vertex_attributes(
            attrs.get("position").copied().flatten(),
            attrs.get("texCoord").copied().flatten(),
        );

        let layout_entries: Vec<wgpu::BindGroupLayoutEntry> = iface
            .bindings()
            .iter()
            .map(|b| wgpu::BindGroupLayoutEntry {
                binding: b.binding,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: match b.kind {
                    BindingKind::UniformBuffer { size } => wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: std::num::NonZeroU64::new(size as u64),
                    },
                    BindingKind::Texture => wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    BindingKind::Sampler => {
                        wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering)
                    }
                },
                count: None,
            })
            .collect();

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("inkdrift layer bgl"),
            entries: &layout_entries,
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("inkdrift layer pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("inkdrift layer pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: program.vertex_module(),
                entry_point: Some(iface.vertex_entry()),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: QuadVertex::STRIDE,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &vertex_attributes,
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: program.fragment_module(),
                entry_point: Some(iface.fragment_entry()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(alpha_over_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group_layout,
            bindings: iface.bindings().to_vec(),
            matrix: uniform("matrix"),
            image_matrix: uniform("image_matrix"),
            velocity: uniform("velocity"),
        }
    }

    /// Builds a layer around `texture` with its own quad and uniform buffers.
    pub fn create_layer(&self, device: &wgpu::Device, label: &str, texture: Texture) -> Layer {
        let geometry = GeometryBuffer::build(device, &format!("{label} quad"), Rect::unit());

        let uniforms: Vec<UniformSlot> = self
            .bindings
            .iter()
            .filter_map(|b| match b.kind {
                BindingKind::UniformBuffer { size } => Some(UniformSlot {
                    block: UniformBlock::new(b.binding, size),
                    buffer: device.create_buffer(&wgpu::BufferDescriptor {
                        label: Some(&format!("{label} ubo {}", b.binding)),
                        size: size as u64,
                        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                        mapped_at_creation: false,
                    }),
                }),
                _ => None,
            })
            .collect();

        let bind_group = self.bind_group(device, label, &texture, &uniforms);

        Layer {
            label: label.to_string(),
            texture,
            geometry,
            uniforms,
            bind_group,
        }
    }

    /// Swaps the layer's texture and rebinds it.
    pub fn set_texture(&self, device: &wgpu::Device, layer: &mut Layer, texture: Texture) {
        log::debug!(
            "layer {}: texture {}x{} -> {}x{}",
            layer.label,
            layer.texture.width(),
            layer.texture.height(),
            texture.width(),
            texture.height()
        );
        layer.bind_group = self.bind_group(device, &layer.label, &texture, &layer.uniforms);
        layer.texture = texture;
    }

    /// Draws one layer quad at `plan.rect` over the current target contents.
    pub fn draw_layer(
        &self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        layer: &mut Layer,
        plan: &LayerPlan,
    ) {
        let matrix = quad_matrix(plan.rect, ctx.viewport);
        let image_matrix = texture_rotation(plan.spin);

        for slot in &mut layer.uniforms {
            slot.block.set_mat4(self.matrix, &matrix);
            slot.block.set_mat4(self.image_matrix, &image_matrix);
            slot.block.set_vec2(self.velocity, plan.velocity.to_array());
            ctx.queue.write_buffer(&slot.buffer, 0, slot.block.bytes());
        }

        let mut rpass = target.load_pass("inkdrift layer pass");
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &layer.bind_group, &[]);
        rpass.set_vertex_buffer(0, layer.geometry.slice());
        rpass.draw(0..layer.geometry.vertex_count(), 0..1);
    }

    fn bind_group(
        &self,
        device: &wgpu::Device,
        label: &str,
        texture: &Texture,
        uniforms: &[UniformSlot],
    ) -> wgpu::BindGroup {
        let entries: Vec<wgpu::BindGroupEntry<'_>> = self
            .bindings
            .iter()
            .filter_map(|b| {
                let resource = match b.kind {
                    BindingKind::UniformBuffer { .. } => uniforms
                        .iter()
                        .find(|s| s.block.binding() == b.binding)?
                        .buffer
                        .as_entire_binding(),
                    BindingKind::Texture => wgpu::BindingResource::TextureView(texture.view()),
                    BindingKind::Sampler => wgpu::BindingResource::Sampler(texture.sampler()),
                };
                Some(wgpu::BindGroupEntry {
                    binding: b.binding,
                    resource,
                })
            })
            .collect();

        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} bind group")),
            layout: &self.bind_group_layout,
            entries: &entries,
        })
    }
}

fn vertex_attributes(
    position: Option<AttribLocation>,
    tex_coord: Option<AttribLocation>,
) -> Vec<wgpu::VertexAttribute> {
    let mut out = Vec::with_capacity(2);
    if let Some(AttribLocation(loc)) = position {
        out.push(wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x2,
            offset: QuadVertex::POSITION_OFFSET,
            shader_location: loc,
        });
    }
    if let Some(AttribLocation(loc)) = tex_coord {
        out.push(wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x2,
            offset: QuadVertex::TEX_COORD_OFFSET,
            shader_location: loc,
        });
    }
    out
}

fn alpha_over_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

/// Maps the unit quad onto `rect` (logical pixels, +Y down) in clip space.
///
/// Recomputed per draw; the viewport may change between frames.
pub fn quad_matrix(rect: Rect, viewport: Viewport) -> Mat4 {
    let w = viewport.width.max(1.0);
    let h = viewport.height.max(1.0);

    Mat4::orthographic_rh(0.0, w, h, 0.0, -1.0, 1.0)
        * Mat4::from_translation(Vec3::new(rect.origin.x, rect.origin.y, 0.0))
        * Mat4::from_scale(Vec3::new(rect.size.x, rect.size.y, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(m: Mat4, x: f32, y: f32) -> (f32, f32) {
        let p = m.project_point3(Vec3::new(x, y, 0.0));
        (p.x, p.y)
    }

    fn close(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-5 && (a.1 - b.1).abs() < 1e-5
    }

    // ── quad matrix ───────────────────────────────────────────────────────

    #[test]
    fn full_viewport_quad_fills_clip_space() {
        let m = quad_matrix(Rect::new(0.0, 0.0, 800.0, 600.0), Viewport::new(800.0, 600.0));
        assert!(close(clip(m, 0.0, 0.0), (-1.0, 1.0)));
        assert!(close(clip(m, 1.0, 0.0), (1.0, 1.0)));
        assert!(close(clip(m, 0.0, 1.0), (-1.0, -1.0)));
        assert!(close(clip(m, 1.0, 1.0), (1.0, -1.0)));
    }

    #[test]
    fn quad_corners_map_to_expected_bounds() {
        let (x, y, w, h) = (100.0, 150.0, 200.0, 50.0);
        let (vw, vh) = (800.0, 600.0);
        let m = quad_matrix(Rect::new(x, y, w, h), Viewport::new(vw, vh));

        let expect = |px: f32, py: f32| (2.0 * px / vw - 1.0, 1.0 - 2.0 * py / vh);
        assert!(close(clip(m, 0.0, 0.0), expect(x, y)));
        assert!(close(clip(m, 1.0, 0.0), expect(x + w, y)));
        assert!(close(clip(m, 0.0, 1.0), expect(x, y + h)));
        assert!(close(clip(m, 1.0, 1.0), expect(x + w, y + h)));
    }

    #[test]
    fn matrix_tracks_viewport_resize() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        let a = quad_matrix(r, Viewport::new(200.0, 200.0));
        let b = quad_matrix(r, Viewport::new(400.0, 400.0));
        assert!(close(clip(a, 1.0, 1.0), (0.0, 0.0)));
        assert!(close(clip(b, 1.0, 1.0), (-0.5, 0.5)));
    }

    // ── vertex layout ─────────────────────────────────────────────────────

    #[test]
    fn attributes_use_interleaved_offsets() {
        let attrs = vertex_attributes(Some(AttribLocation(0)), Some(AttribLocation(1)));
        assert_eq!(attrs.len(), 2);
        assert_eq!((attrs[0].offset, attrs[0].shader_location), (0, 0));
        assert_eq!((attrs[1].offset, attrs[1].shader_location), (8, 1));
    }

    #[test]
    fn missing_attribute_is_left_out() {
        let attrs = vertex_attributes(Some(AttribLocation(2)), None);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].shader_location, 2);
    }
}
