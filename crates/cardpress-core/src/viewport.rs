//! Mapping between the hosting view and background-image pixels.
//!
//! Fields are stored in background-image pixels. The host shows the image
//! scaled to fit its view, so pointer positions go through the viewport
//! before they reach the interaction machine and layout never depends on
//! the window size.

use kurbo::{Affine, Point, Size, Vec2};

/// Placement of the background image inside the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Screen position of the image origin.
    pub offset: Vec2,
    /// Screen pixels per image pixel.
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// Identity viewport: one screen pixel per image pixel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scale `image` to fit inside `view`, keeping its aspect ratio, and
    /// centre it. Empty sizes give the identity viewport.
    pub fn fit(image: Size, view: Size) -> Self {
        if image.is_zero_area() || view.is_zero_area() {
            return Self::new();
        }
        let zoom = (view.width / image.width).min(view.height / image.height);
        let offset = Vec2::new(
            (view.width - image.width * zoom) / 2.0,
            (view.height - image.height * zoom) / 2.0,
        );
        Self { offset, zoom }
    }

    /// Convert a screen point to image pixels.
    pub fn screen_to_image(&self, screen_point: Point) -> Point {
        (Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)) * screen_point
    }
}
