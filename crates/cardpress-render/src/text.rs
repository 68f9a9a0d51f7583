//! Bitmap text using the bundled Spleen fonts.
//!
//! Glyphs are scaled nearest-neighbour from the closest Spleen cell size, so
//! the same string at the same size always covers the same pixels.

use spleen_font::{FONT_6X12, FONT_8X16, FONT_12X24, PSF2Font};
use tiny_skia::{PathBuilder, Rect};

/// A Spleen face and its cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpleenFace {
    Small,
    Medium,
    Large,
}

impl SpleenFace {
    /// Smallest face at least as tall as `size`, else the largest.
    pub fn for_size(size: f64) -> Self {
        if size <= 12.0 {
            SpleenFace::Small
        } else if size <= 16.0 {
            SpleenFace::Medium
        } else {
            SpleenFace::Large
        }
    }

    fn data(self) -> &'static [u8] {
        match self {
            SpleenFace::Small => FONT_6X12,
            SpleenFace::Medium => FONT_8X16,
            SpleenFace::Large => FONT_12X24,
        }
    }

    /// Cell (width, height) in font pixels.
    pub fn cell(self) -> (u32, u32) {
        match self {
            SpleenFace::Small => (6, 12),
            SpleenFace::Medium => (8, 16),
            SpleenFace::Large => (12, 24),
        }
    }
}

/// Line height of `size` mapped onto a face: image pixels per font pixel.
fn scale_for(face: SpleenFace, size: f64) -> f32 {
    (size / face.cell().1 as f64) as f32
}

/// Build a path covering the lit pixels of `text` with its top-left at (x, y).
///
/// Returns `None` for text with no lit pixels (blank or unsupported glyphs).
pub fn text_path(text: &str, x: f32, y: f32, size: f64) -> Option<tiny_skia::Path> {
    let face = SpleenFace::for_size(size);
    let mut font = match PSF2Font::new(face.data()) {
        Ok(font) => font,
        Err(_) => {
            log::warn!("Failed to load Spleen font {:?}", face);
            return None;
        }
    };
    let scale = scale_for(face, size);
    let advance = face.cell().0 as f32 * scale;

    let mut pb = PathBuilder::new();
    let mut cursor_x = x;
    let mut utf8 = [0u8; 4];
    for ch in text.chars() {
        if let Some(glyph) = font.glyph_for_utf8(ch.encode_utf8(&mut utf8).as_bytes()) {
            for (row_y, row) in glyph.enumerate() {
                for (col_x, on) in row.enumerate() {
                    if !on {
                        continue;
                    }
                    let px = cursor_x + col_x as f32 * scale;
                    let py = y + row_y as f32 * scale;
                    if let Some(rect) = Rect::from_xywh(px, py, scale, scale) {
                        pb.push_rect(rect);
                    }
                }
            }
        }
        cursor_x += advance;
    }
    pb.finish()
}
