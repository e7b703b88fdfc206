//! GPU rendering.
//!
//! - [`ShaderProgram`] compiles and links the layer program and resolves names
//! - [`LayerRenderer`] draws textured [`Layer`] quads, background then glyph
//! - [`RingRenderer`] draws the pointer ring on top
//!
//! Convention: CPU geometry is in logical pixels (top-left origin, +Y down);
//! matrices or a viewport uniform convert to clip space.

mod ctx;
mod geometry;
mod layer;
mod renderer;
mod ring;
mod shader;
mod texture;
mod uniforms;

pub use ctx::{RenderCtx, RenderTarget};
pub use geometry::{quad_vertices, GeometryBuffer, QuadVertex, QUAD_VERTEX_COUNT};
pub use layer::{texture_rotation, Layer};
pub use renderer::{quad_matrix, LayerRenderer, LAYER_ATTRIBUTES, LAYER_UNIFORMS};
pub use ring::{RingRenderer, RING_LINE_WIDTH};
pub use shader::{
    AttribLocation, BindingInfo, BindingKind, ShaderError, ShaderInterface, ShaderProgram,
    ShaderStage, UniformLocation,
};
pub use texture::{Texture, TextureSource};
pub use uniforms::UniformBlock;
