//! One-page PDF export of a rendered surface.

use crate::surface::Surface;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref};
use std::io::Write;
use thiserror::Error;

/// Default name of the exported document.
pub const DEFAULT_FILE_NAME: &str = "carteirinha-oab.pdf";

/// PDF points per surface pixel.
///
/// A surface pixel is a CSS pixel (1/96 in) and a PDF point is 1/72 in, so
/// a 300x200 px surface gives a 225x150 pt page. Printed, the page has the
/// size the surface has on a 96 dpi screen, and the image still covers it
/// one surface pixel per image sample.
const POINTS_PER_PIXEL: f32 = 72.0 / 96.0;

/// Page size in points for a surface of `width` x `height` pixels.
fn page_size_points(width: u32, height: u32) -> (f32, f32) {
    (width as f32 * POINTS_PER_PIXEL, height as f32 * POINTS_PER_PIXEL)
}

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: no rendered surface")]
    NoSurface,
    #[error("Failed to encode document: {0}")]
    Encode(#[from] std::io::Error),
}

/// Page orientation, chosen from the surface's aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Landscape when at least as wide as tall.
    pub fn for_size(width: u32, height: u32) -> Self {
        if width >= height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// A finished document ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
    pub orientation: Orientation,
}

/// Wrap a surface as a single-page PDF whose page has the surface's pixel size.
pub fn export_pdf(surface: Option<&Surface>) -> Result<ExportedDocument, ExportError> {
    let Some(surface) = surface else {
        log::warn!("Export requested without a rendered surface");
        return Err(ExportError::NoSurface);
    };
    let (width, height) = (surface.width(), surface.height());
    let orientation = Orientation::for_size(width, height);

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&surface.to_rgb_on_white())?;
    let image_data = encoder.finish()?;

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let content_id = Ref::new(5);
    let image_name = Name(b"Im1");

    let (page_width, page_height) = page_size_points(width, height);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, page_width, page_height));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().x_objects().pair(image_name, image_id);
    page.finish();

    let mut image = pdf.image_xobject(image_id, &image_data);
    image.filter(Filter::FlateDecode);
    image.width(width as i32);
    image.height(height as i32);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    image.finish();

    let mut content = Content::new();
    content.save_state();
    content.transform([page_width, 0.0, 0.0, page_height, 0.0, 0.0]);
    content.x_object(image_name);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    let bytes = pdf.finish();
    log::info!(
        "Exported {}x{} {} page ({} bytes)",
        width,
        height,
        orientation.name(),
        bytes.len()
    );

    Ok(ExportedDocument {
        file_name: DEFAULT_FILE_NAME.to_string(),
        bytes,
        width_px: width,
        height_px: height,
        orientation,
    })
}
