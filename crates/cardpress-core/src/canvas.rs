//! Canvas: the field registry together with its interaction state.
//!
//! This is the only mutation surface callers get. Registry commands and
//! pointer gestures both go through it, which keeps selection consistent
//! with the fields that actually exist.

use crate::config::EditorConfig;
use crate::field::{Field, FieldId, FieldKind};
use crate::interaction::{GeometryPreview, GestureOutcome, Handle, InteractionMachine, InteractionState, Mode};
use crate::registry::{FieldError, FieldPatch, FieldRegistry};
use crate::viewport::Viewport;
use kurbo::{Point, Size};

/// A template being designed or filled.
#[derive(Debug, Clone)]
pub struct Canvas {
    registry: FieldRegistry,
    interaction: InteractionMachine,
    /// View transform for pointer input.
    pub viewport: Viewport,
    config: EditorConfig,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create an empty canvas with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create an empty canvas with a specific configuration.
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            registry: FieldRegistry::new(),
            interaction: InteractionMachine::new(&config),
            viewport: Viewport::new(),
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Fields in draw order.
    pub fn fields(&self) -> &[Field] {
        self.registry.list()
    }

    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.registry.get(id)
    }

    fn editable(&self) -> bool {
        self.interaction.mode() == Mode::Design
    }

    /// Add a field with kind defaults. Fails in fill mode.
    pub fn add_field(&mut self, kind: FieldKind, label: Option<&str>) -> Result<FieldId, FieldError> {
        if !self.editable() {
            return Err(FieldError::ReadOnly);
        }
        self.registry.add(kind, label, &self.config)
    }

    /// Add a text field with the given label.
    pub fn add_text_field(&mut self, label: &str) -> Result<FieldId, FieldError> {
        self.add_field(FieldKind::Text, Some(label))
    }

    /// Add a photo field.
    pub fn add_photo_field(&mut self) -> Result<FieldId, FieldError> {
        if !self.editable() {
            return Err(FieldError::ReadOnly);
        }
        Ok(self.registry.add_photo(&self.config))
    }

    /// Remove a field. Clears the selection if it pointed at the field.
    /// Nothing is removed in fill mode.
    pub fn remove_field(&mut self, id: FieldId) -> Option<Field> {
        if !self.editable() {
            return None;
        }
        let removed = self.registry.remove(id)?;
        self.interaction.forget(id);
        Some(removed)
    }

    /// Apply a geometry patch directly (outside of a gesture).
    /// Returns false in fill mode.
    pub fn update_field(&mut self, id: FieldId, patch: FieldPatch) -> bool {
        self.editable() && self.registry.update(id, patch)
    }

    pub fn mode(&self) -> Mode {
        self.interaction.mode()
    }

    /// Switch between design and fill mode.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.interaction.mode() != mode {
            log::info!("Switching to {} mode", mode.name());
        }
        self.interaction.set_mode(mode);
    }

    pub fn interaction(&self) -> &InteractionState {
        self.interaction.state()
    }

    /// Select a field (design mode only).
    pub fn select(&mut self, id: FieldId) -> bool {
        self.interaction.select(id, &self.registry)
    }

    pub fn clear_selection(&mut self) {
        self.interaction.clear_selection();
    }

    pub fn selected(&self) -> Option<FieldId> {
        self.interaction.selected()
    }

    pub fn is_selected(&self, id: FieldId) -> bool {
        self.interaction.is_selected(id)
    }

    /// Preview geometry of a field under an active gesture.
    pub fn preview(&self) -> Option<GeometryPreview> {
        self.interaction.preview()
    }

    /// Resize handles of the selected field.
    pub fn handles(&self) -> Vec<Handle> {
        self.interaction.handles(&self.registry)
    }

    /// Fit a background of `image` pixels into a view of `view` pixels.
    pub fn fit_viewport(&mut self, image: Size, view: Size) {
        self.viewport = Viewport::fit(image, view);
    }

    /// Pointer press in screen coordinates.
    pub fn pointer_down(&mut self, screen_point: Point) {
        let point = self.viewport.screen_to_image(screen_point);
        self.interaction.pointer_down(point, &self.registry);
    }

    /// Pointer move in screen coordinates.
    pub fn pointer_move(&mut self, screen_point: Point) {
        let point = self.viewport.screen_to_image(screen_point);
        self.interaction.pointer_move(point);
    }

    /// Pointer release: commits the active gesture.
    pub fn pointer_up(&mut self) -> GestureOutcome {
        self.interaction.pointer_up(&mut self.registry)
    }

    /// Abort the active gesture.
    pub fn cancel_gesture(&mut self) {
        self.interaction.cancel();
    }
}
