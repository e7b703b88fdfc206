use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Rect;

/// Interleaved quad vertex: position in pixel space, then texture coordinate.
///
/// Layout (16 bytes):
///
///  offset 0  position   [f32; 2]
///  offset 8  tex_coord  [f32; 2]
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub tex_coord: [f32; 2],
}

impl QuadVertex {
    pub const STRIDE: u64 = std::mem::size_of::<QuadVertex>() as u64;
    pub const POSITION_OFFSET: u64 = 0;
    pub const TEX_COORD_OFFSET: u64 = 8;
}

/// Vertices per quad: two triangles, no index buffer.
pub const QUAD_VERTEX_COUNT: u32 = 6;

/// Two triangles covering `rect`, with the unit square as texture coordinates.
///
/// Winding is (tl, tr, bl) then (bl, tr, br). Negative sizes are not rejected.
pub fn quad_vertices(rect: Rect) -> [QuadVertex; 6] {
    let (x0, y0) = (rect.origin.x, rect.origin.y);
    let (x1, y1) = (x0 + rect.size.x, y0 + rect.size.y);

    let v = |x: f32, y: f32, u: f32, t: f32| QuadVertex {
        position: [x, y],
        tex_coord: [u, t],
    };

    [
        v(x0, y0, 0.0, 0.0),
        v(x1, y0, 1.0, 0.0),
        v(x0, y1, 0.0, 1.0),
        v(x0, y1, 0.0, 1.0),
        v(x1, y0, 1.0, 0.0),
        v(x1, y1, 1.0, 1.0),
    ]
}

/// GPU vertex buffer holding one quad.
///
/// Sized exactly for six vertices. Position and texture coordinate share the
/// buffer and are read at different offsets.
pub struct GeometryBuffer {
    buffer: wgpu::Buffer,
}

impl GeometryBuffer {
    pub fn build(device: &wgpu::Device, label: &str, rect: Rect) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&quad_vertices(rect)),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self { buffer }
    }

    pub fn vertex_count(&self) -> u32 {
        QUAD_VERTEX_COUNT
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_covers_rect_corners() {
        let verts = quad_vertices(Rect::new(10.0, 20.0, 30.0, 40.0));
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs, [10.0, 40.0, 10.0, 10.0, 40.0, 40.0]);
        assert_eq!(ys, [20.0, 20.0, 60.0, 60.0, 20.0, 60.0]);
    }

    #[test]
    fn tex_coords_follow_positions() {
        for v in quad_vertices(Rect::new(5.0, 5.0, 2.0, 2.0)) {
            assert_eq!(v.tex_coord[0], (v.position[0] - 5.0) / 2.0);
            assert_eq!(v.tex_coord[1], (v.position[1] - 5.0) / 2.0);
        }
    }

    #[test]
    fn unit_quad_positions_equal_tex_coords() {
        for v in quad_vertices(Rect::unit()) {
            assert_eq!(v.position, v.tex_coord);
        }
    }

    #[test]
    fn stride_matches_interleaved_layout() {
        assert_eq!(QuadVertex::STRIDE, 16);
        assert_eq!(QuadVertex::TEX_COORD_OFFSET, 8);
        assert_eq!(quad_vertices(Rect::unit()).len() as u32, QUAD_VERTEX_COUNT);
    }
}
