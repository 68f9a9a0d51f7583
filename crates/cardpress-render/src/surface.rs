//! Rendered output.

/// A composited image: RGBA8 with straight alpha, row major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Surface {
    /// Wrap pixel data. Returns None if the buffer does not match the size.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        if rgba.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self { width, height, rgba })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA pixel data (4 bytes per pixel).
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Pixel at (x, y), if inside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.rgba[i..i + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// RGB data with alpha composited onto white.
    pub fn to_rgb_on_white(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.width as usize * self.height as usize * 3);
        for p in self.rgba.chunks_exact(4) {
            let a = p[3] as u32;
            for &c in &p[..3] {
                rgb.push(((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8);
            }
        }
        rgb
    }

    /// Encode the surface as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, png::EncodingError> {
        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.rgba)?;
        }
        Ok(png_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_mismatched_buffer() {
        assert!(Surface::from_rgba(2, 2, vec![0; 15]).is_none());
        assert!(Surface::from_rgba(2, 2, vec![0; 16]).is_some());
    }

    #[test]
    fn test_pixel_lookup() {
        let mut rgba = vec![0; 16];
        rgba[12..16].copy_from_slice(&[1, 2, 3, 4]);
        let surface = Surface::from_rgba(2, 2, rgba).unwrap();
        assert_eq!(surface.pixel(1, 1), Some([1, 2, 3, 4]));
        assert_eq!(surface.pixel(2, 0), None);
    }

    #[test]
    fn test_flatten_onto_white() {
        let surface = Surface::from_rgba(2, 1, vec![0, 0, 0, 0, 200, 100, 0, 255]).unwrap();
        assert_eq!(surface.to_rgb_on_white(), vec![255, 255, 255, 200, 100, 0]);
    }

    #[test]
    fn test_png_signature() {
        let surface = Surface::from_rgba(3, 2, vec![128; 24]).unwrap();
        let png = surface.to_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
