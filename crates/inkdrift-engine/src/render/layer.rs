use glam::{Mat4, Vec3};

use super::geometry::GeometryBuffer;
use super::texture::Texture;
use super::uniforms::UniformBlock;

/// One drawable quad: its texture, its own vertex buffer, and its own copy of
/// the program's uniform buffers.
///
/// Created through [`LayerRenderer::create_layer`](super::LayerRenderer::create_layer),
/// which builds the bind group against the renderer's layout.
pub struct Layer {
    pub(super) label: String,
    pub(super) texture: Texture,
    pub(super) geometry: GeometryBuffer,
    pub(super) uniforms: Vec<UniformSlot>,
    pub(super) bind_group: wgpu::BindGroup,
}

pub(super) struct UniformSlot {
    pub block: UniformBlock,
    pub buffer: wgpu::Buffer,
}

/// Texture coordinate transform rotating by `angle` radians about the
/// texture center `(0.5, 0.5)`.
pub fn texture_rotation(angle: f32) -> Mat4 {
    let center = Vec3::new(0.5, 0.5, 0.0);
    Mat4::from_translation(center) * Mat4::from_rotation_z(angle) * Mat4::from_translation(-center)
}
