//! Resize handles around a selected field.

use kurbo::{Point, Rect, Vec2};

/// The kind of handle, which also determines which edges it moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl HandleKind {
    /// All handles, clockwise from the top-left corner.
    pub const ALL: [HandleKind; 8] = [
        HandleKind::TopLeft,
        HandleKind::Top,
        HandleKind::TopRight,
        HandleKind::Right,
        HandleKind::BottomRight,
        HandleKind::Bottom,
        HandleKind::BottomLeft,
        HandleKind::Left,
    ];

    /// Where this handle sits on a rectangle.
    pub fn anchor(self, bounds: Rect) -> Point {
        let center = bounds.center();
        match self {
            HandleKind::TopLeft => Point::new(bounds.x0, bounds.y0),
            HandleKind::Top => Point::new(center.x, bounds.y0),
            HandleKind::TopRight => Point::new(bounds.x1, bounds.y0),
            HandleKind::Right => Point::new(bounds.x1, center.y),
            HandleKind::BottomRight => Point::new(bounds.x1, bounds.y1),
            HandleKind::Bottom => Point::new(center.x, bounds.y1),
            HandleKind::BottomLeft => Point::new(bounds.x0, bounds.y1),
            HandleKind::Left => Point::new(bounds.x0, center.y),
        }
    }

    /// Move the edges this handle controls by `delta`.
    ///
    /// Returns raw `(x0, y0, x1, y1)` edges without normalizing, so a drag
    /// past the opposite edge yields a negative extent the caller can reject.
    pub fn drag_edges(self, bounds: Rect, delta: Vec2) -> (f64, f64, f64, f64) {
        let Rect { x0, y0, x1, y1 } = bounds;
        match self {
            HandleKind::TopLeft => (x0 + delta.x, y0 + delta.y, x1, y1),
            HandleKind::Top => (x0, y0 + delta.y, x1, y1),
            HandleKind::TopRight => (x0, y0 + delta.y, x1 + delta.x, y1),
            HandleKind::Right => (x0, y0, x1 + delta.x, y1),
            HandleKind::BottomRight => (x0, y0, x1 + delta.x, y1 + delta.y),
            HandleKind::Bottom => (x0, y0, x1, y1 + delta.y),
            HandleKind::BottomLeft => (x0 + delta.x, y0, x1, y1 + delta.y),
            HandleKind::Left => (x0 + delta.x, y0, x1, y1),
        }
    }
}

/// A resize handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Handle type.
    pub kind: HandleKind,
    /// Position in image pixels.
    pub position: Point,
}

impl Handle {
    /// Create a new handle.
    pub fn new(kind: HandleKind, position: Point) -> Self {
        Self { kind, position }
    }

    /// Check if a point hits this handle (square hit box).
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point.x - self.position.x).abs() <= tolerance && (point.y - self.position.y).abs() <= tolerance
    }

    /// The square drawn for this handle.
    pub fn rect(&self, size: f64) -> Rect {
        let half = size / 2.0;
        Rect::new(
            self.position.x - half,
            self.position.y - half,
            self.position.x + half,
            self.position.y + half,
        )
    }
}

/// Get the eight resize handles for a rectangle.
pub fn handles_for(bounds: Rect) -> Vec<Handle> {
    HandleKind::ALL
        .iter()
        .map(|&kind| Handle::new(kind, kind.anchor(bounds)))
        .collect()
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(bounds: Rect, point: Point, tolerance: f64) -> Option<HandleKind> {
    handles_for(bounds)
        .into_iter()
        .find(|h| h.hit_test(point, tolerance))
        .map(|h| h.kind)
}
