//! Scene building: the ordered draw list for one render.
//!
//! Everything mode-dependent is decided here, so the rasterizer only has to
//! know how to draw rectangles, images and text.

use crate::renderer::{RenderContext, RenderStyle};
use cardpress_core::asset::RasterAsset;
use cardpress_core::field::{Field, FieldGeometry, FieldKind};
use cardpress_core::fill::FillSession;
use cardpress_core::interaction::{Handle, Mode, handles_for};
use kurbo::{Point, Rect};
use peniko::Color;

/// Which layer an image item comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLayer {
    Background,
    Photo,
}

/// A single draw operation, in image pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneItem {
    /// A raster scaled to exactly fill `rect`.
    Image {
        layer: ImageLayer,
        asset: RasterAsset,
        rect: Rect,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f64,
        dash: Option<[f64; 2]>,
    },
    /// One line of text with its top-left corner at `origin`.
    Text {
        text: String,
        origin: Point,
        size: f64,
        color: Color,
    },
}

/// Ordered draw items over a surface of fixed pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    width: u32,
    height: u32,
    items: Vec<SceneItem>,
}

impl Scene {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Items in paint order.
    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    /// Text strings drawn, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            SceneItem::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Builds a [`Scene`] from a render context.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    items: Vec<SceneItem>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the scene, or `None` while the background has not resolved.
    pub fn build(mut self, ctx: &RenderContext) -> Option<Scene> {
        let Some(background) = ctx.background.ready() else {
            log::debug!("Background not ready, skipping render");
            return None;
        };
        let (width, height) = (background.width(), background.height());

        self.items.push(SceneItem::Image {
            layer: ImageLayer::Background,
            asset: background.clone(),
            rect: Rect::new(0.0, 0.0, width as f64, height as f64),
        });

        for field in ctx.fields {
            let geometry = geometry_for(field, ctx);
            let selected = ctx.decorations_visible() && ctx.selected == Some(field.id());
            match (field.kind(), ctx.mode) {
                (FieldKind::Photo, Mode::Fill) => self.photo_fill(geometry, ctx),
                (FieldKind::Photo, Mode::Design) => self.photo_design(field, geometry, selected, &ctx.style),
                (FieldKind::Text, Mode::Fill) => self.text(ctx.value(&field.label), field, geometry, &ctx.style),
                (FieldKind::Text, Mode::Design) => {
                    self.text(&field.label, field, geometry, &ctx.style);
                    if selected {
                        self.text_highlight(field, geometry, &ctx.style);
                    }
                }
            }
        }

        if ctx.decorations_visible() {
            self.handles(ctx);
        }

        Some(Scene {
            width,
            height,
            items: self.items,
        })
    }

    fn photo_fill(&mut self, geometry: FieldGeometry, ctx: &RenderContext) {
        let Some(slot) = ctx.fill.map(FillSession::photo) else {
            return;
        };
        let Some(photo) = slot.ready() else {
            if slot.is_pending() {
                log::debug!("Photo not ready, omitting photo layer");
            }
            return;
        };
        self.items.push(SceneItem::Image {
            layer: ImageLayer::Photo,
            asset: photo.clone(),
            rect: geometry.as_rect(),
        });
    }

    fn photo_design(&mut self, field: &Field, geometry: FieldGeometry, selected: bool, style: &RenderStyle) {
        let rect = geometry.as_rect();
        self.items.push(SceneItem::FillRect {
            rect,
            color: style.photo_fill,
        });
        self.items.push(SceneItem::StrokeRect {
            rect,
            color: style.photo_stroke,
            width: if selected { 2.0 } else { 1.0 },
            dash: None,
        });
        self.items.push(SceneItem::Text {
            text: field.label.clone(),
            origin: Point::new(rect.x0, rect.y0 - style.caption_offset),
            size: style.caption_size,
            color: style.photo_stroke,
        });
    }

    fn text(&mut self, text: &str, field: &Field, geometry: FieldGeometry, style: &RenderStyle) {
        if text.is_empty() {
            return;
        }
        self.items.push(SceneItem::Text {
            text: text.to_string(),
            origin: geometry.position,
            size: field.font_size,
            color: style.text_color,
        });
    }

    fn text_highlight(&mut self, field: &Field, geometry: FieldGeometry, style: &RenderStyle) {
        let mut shown = field.clone();
        shown.set_geometry(geometry);
        self.items.push(SceneItem::StrokeRect {
            rect: shown.selection_bounds(style.highlight_width),
            color: style.selection_color,
            width: 1.0,
            dash: Some(style.dash),
        });
    }

    /// Handles around the selected photo field, on top of everything.
    fn handles(&mut self, ctx: &RenderContext) {
        let Some(field) = ctx
            .selected
            .and_then(|id| ctx.fields.iter().find(|f| f.id() == id))
            .filter(|f| f.kind().is_resizable())
        else {
            return;
        };
        let bounds = geometry_for(field, ctx).as_rect();
        for handle in handles_for(bounds) {
            self.handle(&handle, &ctx.style);
        }
    }

    fn handle(&mut self, handle: &Handle, style: &RenderStyle) {
        let rect = handle.rect(style.handle_size);
        self.items.push(SceneItem::FillRect {
            rect,
            color: style.handle_fill,
        });
        self.items.push(SceneItem::StrokeRect {
            rect,
            color: style.selection_color,
            width: 1.5,
            dash: None,
        });
    }
}

/// Geometry a field is drawn with: the gesture preview if one targets it.
fn geometry_for(field: &Field, ctx: &RenderContext) -> FieldGeometry {
    match ctx.preview {
        Some(preview) if ctx.decorations_visible() && preview.id == field.id() => preview.geometry,
        _ => field.geometry(),
    }
}
