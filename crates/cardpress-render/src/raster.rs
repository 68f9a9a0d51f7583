//! CPU rasterizer built on tiny-skia.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use crate::scene::{Scene, SceneBuilder, SceneItem};
use crate::surface::Surface;
use crate::text;
use cardpress_core::asset::RasterAsset;
use kurbo::Rect;
use peniko::Color;
use std::collections::{HashMap, HashSet};
use tiny_skia::{
    ColorU8, FillRule, FilterQuality, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, StrokeDash, Transform,
};
use uuid::Uuid;

/// Rasterizes scenes into [`Surface`]s.
///
/// Decoded assets are converted to premultiplied pixmaps once and cached by
/// asset id; entries not drawn in the latest frame are dropped.
#[derive(Default)]
pub struct RasterRenderer {
    pixmap_cache: HashMap<Uuid, Pixmap>,
}

impl RasterRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached asset pixmaps.
    pub fn cached_assets(&self) -> usize {
        self.pixmap_cache.len()
    }

    /// Rasterize a scene.
    pub fn rasterize(&mut self, scene: &Scene) -> RenderResult<Surface> {
        let mut pixmap = Pixmap::new(scene.width(), scene.height())
            .ok_or_else(|| RendererError::Surface(format!("invalid size {}x{}", scene.width(), scene.height())))?;

        let mut used = HashSet::new();
        for item in scene.items() {
            match item {
                SceneItem::Image { asset, rect, .. } => {
                    used.insert(asset.id());
                    self.draw_image(&mut pixmap, asset, *rect)?;
                }
                SceneItem::FillRect { rect, color } => fill_rect(&mut pixmap, *rect, *color),
                SceneItem::StrokeRect {
                    rect,
                    color,
                    width,
                    dash,
                } => stroke_rect(&mut pixmap, *rect, *color, *width, *dash),
                SceneItem::Text {
                    text,
                    origin,
                    size,
                    color,
                } => {
                    if let Some(path) = text::text_path(text, origin.x as f32, origin.y as f32, *size) {
                        let mut paint = paint(*color);
                        paint.anti_alias = false;
                        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
                    }
                }
            }
        }
        self.pixmap_cache.retain(|id, _| used.contains(id));

        let rgba = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        Surface::from_rgba(scene.width(), scene.height(), rgba)
            .ok_or_else(|| RendererError::RenderFailed("pixel buffer size mismatch".to_string()))
    }

    fn draw_image(&mut self, target: &mut Pixmap, asset: &RasterAsset, rect: Rect) -> RenderResult<()> {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Ok(());
        }
        let source = match self.pixmap_cache.entry(asset.id()) {
            std::collections::hash_map::Entry::Occupied(entry) => entry.into_mut(),
            std::collections::hash_map::Entry::Vacant(entry) => entry.insert(to_pixmap(asset)?),
        };

        let sx = rect.width() / asset.width() as f64;
        let sy = rect.height() / asset.height() as f64;
        let transform = Transform::from_row(sx as f32, 0.0, 0.0, sy as f32, rect.x0 as f32, rect.y0 as f32);
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..Default::default()
        };
        target.draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
        Ok(())
    }
}

impl Renderer for RasterRenderer {
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<Option<Surface>> {
        let Some(scene) = SceneBuilder::new().build(ctx) else {
            return Ok(None);
        };
        self.rasterize(&scene).map(Some)
    }
}

/// Premultiply a straight-alpha asset into a pixmap.
fn to_pixmap(asset: &RasterAsset) -> RenderResult<Pixmap> {
    let size = IntSize::from_wh(asset.width(), asset.height())
        .ok_or_else(|| RendererError::Surface("empty asset".to_string()))?;
    let mut data = Vec::with_capacity(asset.pixels().len());
    for p in asset.pixels().chunks_exact(4) {
        let c = ColorU8::from_rgba(p[0], p[1], p[2], p[3]).premultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Pixmap::from_vec(data, size).ok_or_else(|| RendererError::Surface("asset buffer size mismatch".to_string()))
}

fn paint(color: Color) -> Paint<'static> {
    let rgba = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
    paint.anti_alias = true;
    paint
}

fn to_skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(rect.x0 as f32, rect.y0 as f32, rect.width() as f32, rect.height() as f32)
}

fn fill_rect(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    if let Some(rect) = to_skia_rect(rect) {
        pixmap.fill_rect(rect, &paint(color), Transform::identity(), None);
    }
}

fn stroke_rect(pixmap: &mut Pixmap, rect: Rect, color: Color, width: f64, dash: Option<[f64; 2]>) {
    let Some(rect) = to_skia_rect(rect) else {
        return;
    };
    let path = PathBuilder::from_rect(rect);
    let stroke = Stroke {
        width: width as f32,
        dash: dash.and_then(|[on, off]| StrokeDash::new(vec![on as f32, off as f32], 0.0)),
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint(color), &stroke, Transform::identity(), None);
}
