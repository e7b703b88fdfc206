use glam::Mat4;

use super::shader::UniformLocation;

/// CPU staging bytes for one uniform buffer binding.
///
/// Writes go through [`UniformLocation`]s resolved from the shader. A `None`
/// location, a location in another binding, or one that does not fit is
/// ignored, so callers can set every uniform unconditionally.
#[derive(Debug, Clone)]
pub struct UniformBlock {
    binding: u32,
    data: Vec<u8>,
}

impl UniformBlock {
    pub fn new(binding: u32, size: u32) -> Self {
        Self {
            binding,
            data: vec![0; size as usize],
        }
    }

    pub fn binding(&self) -> u32 {
        self.binding
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn set_mat4(&mut self, loc: Option<UniformLocation>, m: &Mat4) {
        self.write(loc, bytemuck::cast_slice(&m.to_cols_array()));
    }

    pub fn set_vec2(&mut self, loc: Option<UniformLocation>, v: [f32; 2]) {
        self.write(loc, bytemuck::cast_slice(&v));
    }

    fn write(&mut self, loc: Option<UniformLocation>, bytes: &[u8]) {
        let Some(UniformLocation::Field {
            binding,
            offset,
            size,
            ..
        }) = loc
        else {
            return;
        };
        if binding != self.binding || (size as usize) < bytes.len() {
            return;
        }

        let start = offset as usize;
        if let Some(dst) = self.data.get_mut(start..start + bytes.len()) {
            dst.copy_from_slice(bytes);
        }
    }
}
