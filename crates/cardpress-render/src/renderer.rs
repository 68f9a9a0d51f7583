//! Renderer trait abstraction.

use crate::surface::Surface;
use cardpress_core::asset::AssetSlot;
use cardpress_core::canvas::Canvas;
use cardpress_core::config::EditorConfig;
use cardpress_core::field::{Field, FieldId};
use cardpress_core::fill::FillSession;
use cardpress_core::interaction::{GeometryPreview, Mode};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Colours and metrics used to draw fields and design-mode decorations.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    /// Text colour in both modes.
    pub text_color: Color,
    /// Fill of the design-mode photo placeholder.
    pub photo_fill: Color,
    /// Outline and caption colour of the photo placeholder.
    pub photo_stroke: Color,
    /// Dashed highlight around a selected text field.
    pub selection_color: Color,
    /// Fill of resize handles.
    pub handle_fill: Color,
    /// Dash pattern (on, off) of the text highlight.
    pub dash: [f64; 2],
    /// Width of the synthetic text highlight box.
    pub highlight_width: f64,
    pub caption_size: f64,
    pub caption_offset: f64,
    pub handle_size: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl RenderStyle {
    /// Style with metrics taken from the editor configuration.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            text_color: Color::from_rgba8(0, 0, 0, 255),
            photo_fill: Color::from_rgba8(239, 68, 68, 77),
            photo_stroke: Color::from_rgba8(255, 0, 0, 255),
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            handle_fill: Color::WHITE,
            dash: [4.0, 4.0],
            highlight_width: config.text_highlight_width,
            caption_size: config.caption_font_size,
            caption_offset: config.caption_offset,
            handle_size: config.handle_size,
        }
    }
}

/// Everything a single render reads.
pub struct RenderContext<'a> {
    /// The background image; nothing renders until it is ready.
    pub background: &'a AssetSlot,
    /// Fields in draw order.
    pub fields: &'a [Field],
    /// Render mode.
    pub mode: Mode,
    /// Fill values and photo. Absent means every value is empty.
    pub fill: Option<&'a FillSession>,
    /// Selected field (design mode only).
    pub selected: Option<FieldId>,
    /// Geometry override for the field under an active gesture.
    pub preview: Option<GeometryPreview>,
    pub style: RenderStyle,
}

impl<'a> RenderContext<'a> {
    /// Create a new design-mode render context.
    pub fn new(background: &'a AssetSlot, fields: &'a [Field]) -> Self {
        Self {
            background,
            fields,
            mode: Mode::Design,
            fill: None,
            selected: None,
            preview: None,
            style: RenderStyle::default(),
        }
    }

    /// Context reflecting a canvas's fields, mode, selection and gesture.
    pub fn from_canvas(canvas: &'a Canvas, background: &'a AssetSlot) -> Self {
        Self::new(background, canvas.fields())
            .with_mode(canvas.mode())
            .with_selection(canvas.selected())
            .with_preview(canvas.preview())
            .with_style(RenderStyle::from_config(canvas.config()))
    }

    /// Set the render mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the fill session.
    pub fn with_fill(mut self, fill: &'a FillSession) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Set the selected field.
    pub fn with_selection(mut self, selected: Option<FieldId>) -> Self {
        self.selected = selected;
        self
    }

    /// Set the gesture preview.
    pub fn with_preview(mut self, preview: Option<GeometryPreview>) -> Self {
        self.preview = preview;
        self
    }

    /// Set the style.
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    /// Value entered for a label, empty if none.
    pub fn value(&self, label: &str) -> &'a str {
        self.fill.map(|fill| fill.value(label)).unwrap_or("")
    }

    /// Whether design-mode decorations are drawn.
    pub fn decorations_visible(&self) -> bool {
        self.mode == Mode::Design
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Composite background and fields.
    ///
    /// Returns `Ok(None)` while the background is not ready: there is
    /// nothing to draw fields over yet.
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<Option<Surface>>;
}
