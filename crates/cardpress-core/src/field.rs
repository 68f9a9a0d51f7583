//! Field definitions: geometry anchored in background-image pixels.

use kurbo::{Point, Rect, Size};
use uuid::Uuid;

/// Unique identifier for a field.
pub type FieldId = Uuid;

/// Smallest width/height a committed resize may produce. A configured
/// minimum can raise this floor but never lower it.
pub const MIN_FIELD_SIZE: f64 = 5.0;

/// Clamp a size to `min` on both axes.
pub fn clamp_size(width: f64, height: f64, min: f64) -> (f64, f64) {
    (width.max(min), height.max(min))
}

/// Check whether a size respects the given minimum on both axes.
pub fn meets_minimum(size: Size, min: f64) -> bool {
    size.width >= min && size.height >= min
}

/// What a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A single line of text looked up by label at fill time.
    Text,
    /// A slot the fill-mode photo is scaled into.
    Photo,
}

impl FieldKind {
    /// Get display name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Text => "Text",
            FieldKind::Photo => "Photo",
        }
    }

    /// Whether the field's size defines what is drawn.
    pub fn is_resizable(self) -> bool {
        matches!(self, FieldKind::Photo)
    }
}

/// Position and size of a field; the unit a gesture commits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldGeometry {
    /// Top-left anchor.
    pub position: Point,
    /// Width and height.
    pub size: Size,
}

impl FieldGeometry {
    pub fn new(position: Point, size: Size) -> Self {
        Self { position, size }
    }

    /// The geometry as a rectangle.
    pub fn as_rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }
}

/// A named region over the background image.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub(crate) id: FieldId,
    pub(crate) kind: FieldKind,
    /// Display name; for text fields also the fill value key.
    pub label: String,
    /// Top-left anchor in image pixels.
    pub position: Point,
    /// Size in image pixels. Advisory for text fields.
    pub size: Size,
    /// Font size of text fields; zero for photo fields.
    pub font_size: f64,
}

impl Field {
    /// Create a new text field.
    pub fn text(label: impl Into<String>, position: Point, font_size: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: FieldKind::Text,
            label: label.into(),
            position,
            size: Size::ZERO,
            font_size,
        }
    }

    /// Create a new photo field.
    pub fn photo(label: impl Into<String>, position: Point, size: Size) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: FieldKind::Photo,
            label: label.into(),
            position,
            size,
            font_size: 0.0,
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Current geometry.
    pub fn geometry(&self) -> FieldGeometry {
        FieldGeometry::new(self.position, self.size)
    }

    /// Replace the geometry.
    pub fn set_geometry(&mut self, geometry: FieldGeometry) {
        self.position = geometry.position;
        self.size = geometry.size;
    }

    /// Bounds of the field's own geometry.
    pub fn bounds(&self) -> Rect {
        self.geometry().as_rect()
    }

    /// Rectangle used for the selection highlight.
    ///
    /// Text fields do not clip to their size, so they get a synthetic box
    /// `highlight_width` wide and one line tall, inset by 2px around the anchor.
    pub fn selection_bounds(&self, highlight_width: f64) -> Rect {
        match self.kind {
            FieldKind::Photo => self.bounds(),
            FieldKind::Text => Rect::from_origin_size(
                Point::new(self.position.x - 2.0, self.position.y - 2.0),
                Size::new(highlight_width, self.font_size + 4.0),
            ),
        }
    }

    /// Region that selects the field when clicked.
    pub fn hit_region(&self, highlight_width: f64) -> Rect {
        self.selection_bounds(highlight_width)
    }

    /// Check if a point (in image pixels) hits this field.
    pub fn hit_test(&self, point: Point, highlight_width: f64) -> bool {
        // Rect::contains excludes the far edges; fields include them.
        let region = self.hit_region(highlight_width);
        point.x >= region.x0 && point.x <= region.x1 && point.y >= region.y0 && point.y <= region.y1
    }
}
