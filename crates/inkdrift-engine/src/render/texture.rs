/// A finished RGBA8 pixel source that can become a GPU texture.
///
/// Rows are tightly packed, top row first, straight (non-premultiplied) alpha.
pub trait TextureSource {
    fn dimensions(&self) -> (u32, u32);
    fn rgba(&self) -> &[u8];
}

impl TextureSource for image::RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        image::RgbaImage::dimensions(self)
    }

    fn rgba(&self) -> &[u8] {
        self.as_raw()
    }
}

impl TextureSource for crate::raster::Surface {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn rgba(&self) -> &[u8] {
        self.pixels()
    }
}

/// Sampleable 2D texture: linear filtering, clamped at the edges.
pub struct Texture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

impl Texture {
    /// Creates the texture and uploads `source` in one write.
    ///
    /// Empty sources, short pixel data and sources larger than the device's
    /// texture limit produce a 1x1 transparent texture.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        source: &impl TextureSource,
    ) -> Self {
        let (w, h) = source.dimensions();
        let max_side = device.limits().max_texture_dimension_2d;

        let blank = [0u8; 4];
        let (width, height, pixels) = match check_source(w, h, source.rgba().len(), max_side) {
            Ok(expected) => (w, h, &source.rgba()[..expected]),
            Err(reason) => {
                if let Some(reason) = reason {
                    log::warn!("texture {label}: {reason}, uploading blank");
                }
                (1, 1, &blank[..])
            }
        };

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        log::debug!("uploaded texture {label} ({width}x{height})");

        Self { texture, view, sampler }
    }

    /// Texture from a decoded raster image.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        image: &image::RgbaImage,
    ) -> Self {
        Self::upload(device, queue, label, image)
    }

    /// Texture from an off-screen drawing surface.
    pub fn from_surface(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        surface: &crate::raster::Surface,
    ) -> Self {
        Self::upload(device, queue, label, surface)
    }

    pub fn width(&self) -> u32 {
        self.texture.width()
    }

    pub fn height(&self) -> u32 {
        self.texture.height()
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }
}

/// Byte length to upload for a `w` x `h` source holding `len` bytes, or why it
/// cannot be uploaded. Empty sources carry no reason.
fn check_source(w: u32, h: u32, len: usize, max_side: u32) -> Result<usize, Option<String>> {
    if w == 0 || h == 0 {
        return Err(None);
    }
    if w > max_side || h > max_side {
        return Err(Some(format!("{w}x{h} exceeds the {max_side}px texture limit")));
    }
    let expected = (w as usize) * (h as usize) * 4;
    if len < expected {
        return Err(Some(format!("pixel data shorter than {w}x{h}")));
    }
    Ok(expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::raster::Surface;

    #[test]
    fn rgba_image_reports_its_pixels() {
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 4]));
        assert_eq!(TextureSource::dimensions(&img), (3, 2));
        assert_eq!(img.rgba().len(), 24);
        assert_eq!(&img.rgba()[..4], &[1, 2, 3, 4]);
    }

    #[test]
    fn surface_reports_its_pixels() {
        let mut s = Surface::new(2, 2);
        s.clear(Color::from_srgb_u8(0x34, 0x34, 0xff, 0xff));
        assert_eq!(TextureSource::dimensions(&s), (2, 2));
        assert_eq!(&s.rgba()[..4], &[0x34, 0x34, 0xff, 0xff]);
    }

    #[test]
    fn source_within_limit_uploads_exact_bytes() {
        assert_eq!(check_source(3, 2, 30, 8192), Ok(24));
        assert_eq!(check_source(8192, 1, 8192 * 4, 8192), Ok(8192 * 4));
    }

    #[test]
    fn oversized_source_is_refused() {
        let err = check_source(9000, 100, 9000 * 100 * 4, 8192).unwrap_err();
        assert!(err.unwrap().contains("8192px"));
        assert!(check_source(10, 8193, 10 * 8193 * 4, 8192).is_err());
    }

    #[test]
    fn empty_and_short_sources_are_refused() {
        assert_eq!(check_source(0, 5, 0, 8192), Err(None));
        assert!(check_source(2, 2, 15, 8192).unwrap_err().is_some());
    }
}
