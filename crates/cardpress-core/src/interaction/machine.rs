//! The selection / drag / resize state machine.

use super::handles::{Handle, HandleKind, handles_for, hit_test_handles};
use super::state::{DragGesture, InteractionState, Mode, ResizeGesture};
use crate::config::EditorConfig;
use crate::field::{FieldGeometry, FieldId, MIN_FIELD_SIZE};
use crate::registry::{FieldPatch, FieldRegistry};
use kurbo::Point;

/// Result of ending a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// No gesture was in flight, or it changed nothing.
    Unchanged,
    /// The field's position was committed.
    Moved(FieldId),
    /// The field's geometry was committed.
    Resized(FieldId),
    /// The resize fell under the minimum size and was discarded.
    Rejected(FieldId),
}

/// Geometry to draw for a field while a gesture is in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryPreview {
    pub id: FieldId,
    pub geometry: FieldGeometry,
}

/// Translates pointer input into registry commands.
///
/// The machine never holds on to field data: gestures snapshot the start
/// geometry, previews are computed from it, and the registry is written
/// once when the gesture ends.
#[derive(Debug, Clone)]
pub struct InteractionMachine {
    state: InteractionState,
    mode: Mode,
    highlight_width: f64,
    handle_tolerance: f64,
    min_size: f64,
}

impl InteractionMachine {
    /// Create a new idle machine in design mode.
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            state: InteractionState::Idle,
            mode: Mode::Design,
            highlight_width: config.text_highlight_width,
            handle_tolerance: config.handle_tolerance,
            min_size: config.min_field_size.max(MIN_FIELD_SIZE),
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch mode. Entering fill mode drops the selection and any gesture.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == Mode::Fill {
            self.state = InteractionState::Idle;
        }
        self.mode = mode;
    }

    fn enabled(&self) -> bool {
        self.mode == Mode::Design
    }

    /// The selected field, if any.
    pub fn selected(&self) -> Option<FieldId> {
        self.state.field()
    }

    /// Check if a field is selected.
    pub fn is_selected(&self, id: FieldId) -> bool {
        self.selected() == Some(id)
    }

    /// Select a field, replacing any prior selection.
    /// Returns false in fill mode or if the field does not exist.
    pub fn select(&mut self, id: FieldId, registry: &FieldRegistry) -> bool {
        if !self.enabled() || !registry.contains(id) {
            return false;
        }
        self.state = InteractionState::Selected(id);
        true
    }

    /// Clear the selection (and abandon any gesture).
    pub fn clear_selection(&mut self) {
        self.state = InteractionState::Idle;
    }

    /// Drop any reference to a field that no longer exists.
    pub fn forget(&mut self, id: FieldId) {
        if self.selected() == Some(id) {
            self.state = InteractionState::Idle;
        }
    }

    /// Resize handles of the selected field. Only photo fields have handles.
    pub fn handles(&self, registry: &FieldRegistry) -> Vec<Handle> {
        if !self.enabled() {
            return Vec::new();
        }
        match self.selected_geometry(registry) {
            Some(geometry) => handles_for(geometry.as_rect()),
            None => Vec::new(),
        }
    }

    /// Geometry the selected resizable field is currently shown with.
    fn selected_geometry(&self, registry: &FieldRegistry) -> Option<FieldGeometry> {
        let id = self.selected()?;
        let field = registry.get(id)?;
        if !field.kind().is_resizable() {
            return None;
        }
        match self.preview() {
            Some(preview) if preview.id == id => Some(preview.geometry),
            _ => Some(field.geometry()),
        }
    }

    /// Route a pointer press (image pixels).
    ///
    /// Order: a handle of the selected field starts a resize, a field body
    /// selects that field and arms a drag, empty canvas deselects.
    pub fn pointer_down(&mut self, point: Point, registry: &FieldRegistry) {
        if !self.enabled() {
            return;
        }
        if let Some(geometry) = self.selected_geometry(registry) {
            if let Some(handle) = hit_test_handles(geometry.as_rect(), point, self.handle_tolerance) {
                self.begin_resize(handle, point, registry);
                return;
            }
        }
        match registry.hit_test(point, self.highlight_width) {
            Some(id) => {
                self.begin_drag(id, point, registry);
            }
            None => self.clear_selection(),
        }
    }

    /// Route a pointer move (image pixels) to the active gesture.
    pub fn pointer_move(&mut self, point: Point) {
        match &mut self.state {
            InteractionState::Dragging(drag) => drag.current_pointer = point,
            InteractionState::Resizing(resize) => resize.current_pointer = point,
            _ => {}
        }
    }

    /// Route a pointer release: ends the active gesture.
    pub fn pointer_up(&mut self, registry: &mut FieldRegistry) -> GestureOutcome {
        match self.state {
            InteractionState::Dragging(_) => self.end_drag(registry),
            InteractionState::Resizing(_) => self.end_resize(registry),
            _ => GestureOutcome::Unchanged,
        }
    }

    /// Start moving a field; selects it.
    pub fn begin_drag(&mut self, id: FieldId, pointer: Point, registry: &FieldRegistry) -> bool {
        if !self.enabled() {
            return false;
        }
        let Some(field) = registry.get(id) else {
            return false;
        };
        self.state = InteractionState::Dragging(DragGesture::new(id, pointer, field.geometry()));
        true
    }

    /// Commit the drag's final anchor and return to `Selected`.
    pub fn end_drag(&mut self, registry: &mut FieldRegistry) -> GestureOutcome {
        let InteractionState::Dragging(drag) = &self.state else {
            return GestureOutcome::Unchanged;
        };
        let drag = drag.clone();
        self.state = InteractionState::Selected(drag.id);

        if !drag.has_moved() {
            return GestureOutcome::Unchanged;
        }
        let position = drag.position();
        if !registry.update(drag.id, FieldPatch::position(position)) {
            self.state = InteractionState::Idle;
            return GestureOutcome::Unchanged;
        }
        log::debug!("Moved field {} to ({}, {})", drag.id, position.x, position.y);
        GestureOutcome::Moved(drag.id)
    }

    /// Start resizing the selected field through a handle.
    /// Returns false unless a resizable field is selected.
    pub fn begin_resize(&mut self, handle: HandleKind, pointer: Point, registry: &FieldRegistry) -> bool {
        if !self.enabled() {
            return false;
        }
        let Some(id) = self.selected() else {
            return false;
        };
        let Some(field) = registry.get(id).filter(|f| f.kind().is_resizable()) else {
            return false;
        };
        self.state = InteractionState::Resizing(ResizeGesture::new(
            id,
            handle,
            pointer,
            field.geometry(),
            self.min_size,
        ));
        true
    }

    /// Commit the resize and return to `Selected`.
    ///
    /// A gesture that ends under the minimum size commits nothing; the field
    /// keeps the geometry it had before the gesture.
    pub fn end_resize(&mut self, registry: &mut FieldRegistry) -> GestureOutcome {
        let InteractionState::Resizing(resize) = &self.state else {
            return GestureOutcome::Unchanged;
        };
        let resize = resize.clone();
        self.state = InteractionState::Selected(resize.id);

        if !resize.is_acceptable() {
            log::debug!("Rejected resize of field {} below minimum size", resize.id);
            return GestureOutcome::Rejected(resize.id);
        }
        let geometry = resize.resolved();
        if geometry == resize.start_geometry {
            return GestureOutcome::Unchanged;
        }
        if !registry.update(resize.id, FieldPatch::geometry(geometry.position, geometry.size)) {
            self.state = InteractionState::Idle;
            return GestureOutcome::Unchanged;
        }
        log::debug!(
            "Resized field {} to {}x{}",
            resize.id,
            geometry.size.width,
            geometry.size.height
        );
        GestureOutcome::Resized(resize.id)
    }

    /// Abort the active gesture without committing.
    pub fn cancel(&mut self) {
        if let Some(id) = self.state.field() {
            if self.state.is_gesture() {
                self.state = InteractionState::Selected(id);
            }
        }
    }

    /// Preview geometry of the field under an active gesture.
    pub fn preview(&self) -> Option<GeometryPreview> {
        match &self.state {
            InteractionState::Dragging(drag) => Some(GeometryPreview {
                id: drag.id,
                geometry: drag.preview(),
            }),
            InteractionState::Resizing(resize) => Some(GeometryPreview {
                id: resize.id,
                geometry: resize.resolved(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;
    use kurbo::Size;

    fn setup() -> (InteractionMachine, FieldRegistry, EditorConfig) {
        let _ = env_logger::builder().is_test(true).try_init();
        let config = EditorConfig::default();
        (InteractionMachine::new(&config), FieldRegistry::new(), config)
    }

    #[test]
    fn test_click_selects_and_empty_click_deselects() {
        let (mut machine, mut registry, config) = setup();
        let id = registry.add(FieldKind::Photo, None, &config).unwrap();

        machine.pointer_down(Point::new(100.0, 100.0), &registry);
        assert_eq!(machine.pointer_up(&mut registry), GestureOutcome::Unchanged);
        assert_eq!(machine.state(), &InteractionState::Selected(id));

        machine.pointer_down(Point::new(400.0, 400.0), &registry);
        assert_eq!(machine.state(), &InteractionState::Idle);
    }

    #[test]
    fn test_click_replaces_selection() {
        let (mut machine, mut registry, config) = setup();
        let a = registry.add(FieldKind::Photo, None, &config).unwrap();
        let b = registry.add(FieldKind::Photo, None, &config).unwrap();
        registry.update(b, FieldPatch::position(Point::new(300.0, 300.0)));

        machine.select(a, &registry);
        machine.pointer_down(Point::new(310.0, 310.0), &registry);
        machine.pointer_up(&mut registry);
        assert!(machine.is_selected(b));
        assert!(!machine.is_selected(a));
    }

    #[test]
    fn test_drag_commits_once_at_end() {
        let (mut machine, mut registry, config) = setup();
        let id = registry.add(FieldKind::Text, Some("CPF"), &config).unwrap();

        machine.pointer_down(Point::new(60.0, 60.0), &registry);
        machine.pointer_move(Point::new(100.0, 70.0));
        machine.pointer_move(Point::new(130.0, 90.0));

        // Registry untouched mid-drag; only the preview moves.
        assert_eq!(registry.get(id).unwrap().position, Point::new(50.0, 50.0));
        assert_eq!(machine.preview().unwrap().geometry.position, Point::new(120.0, 80.0));

        assert_eq!(machine.pointer_up(&mut registry), GestureOutcome::Moved(id));
        let field = registry.get(id).unwrap();
        assert_eq!(field.position, Point::new(120.0, 80.0));
        assert_eq!(field.size, Size::ZERO);
        assert_eq!(machine.state(), &InteractionState::Selected(id));
        assert!(machine.preview().is_none());
    }

    #[test]
    fn test_resize_commits_and_resets() {
        let (mut machine, mut registry, config) = setup();
        let id = registry.add(FieldKind::Photo, None, &config).unwrap();
        machine.select(id, &registry);

        machine.pointer_down(Point::new(150.0, 180.0), &registry);
        assert!(matches!(machine.state(), InteractionState::Resizing(_)));
        machine.pointer_move(Point::new(170.0, 200.0));
        assert_eq!(machine.pointer_up(&mut registry), GestureOutcome::Resized(id));
        assert_eq!(registry.get(id).unwrap().size, Size::new(120.0, 150.0));

        // The second gesture starts from the committed geometry.
        machine.pointer_down(Point::new(170.0, 200.0), &registry);
        machine.pointer_move(Point::new(180.0, 210.0));
        machine.pointer_up(&mut registry);
        assert_eq!(registry.get(id).unwrap().size, Size::new(130.0, 160.0));
    }

    #[test]
    fn test_resize_to_three_pixels_is_rejected() {
        let (mut machine, mut registry, config) = setup();
        let id = registry.add(FieldKind::Photo, None, &config).unwrap();
        machine.select(id, &registry);

        assert!(machine.begin_resize(HandleKind::BottomRight, Point::new(150.0, 180.0), &registry));
        machine.pointer_move(Point::new(53.0, 53.0));
        assert_eq!(machine.end_resize(&mut registry), GestureOutcome::Rejected(id));

        let field = registry.get(id).unwrap();
        assert_eq!(field.position, Point::new(50.0, 50.0));
        assert_eq!(field.size, Size::new(100.0, 130.0));
        assert_eq!(machine.state(), &InteractionState::Selected(id));
    }

    #[test]
    fn test_configured_minimum_never_undercuts_floor() {
        let _ = env_logger::builder().is_test(true).try_init();
        let config = EditorConfig {
            min_field_size: 2.0,
            ..EditorConfig::default()
        };
        let mut machine = InteractionMachine::new(&config);
        let mut registry = FieldRegistry::new();
        let id = registry.add(FieldKind::Photo, None, &config).unwrap();
        machine.select(id, &registry);

        assert!(machine.begin_resize(HandleKind::BottomRight, Point::new(150.0, 180.0), &registry));
        machine.pointer_move(Point::new(53.0, 53.0));
        assert_eq!(machine.end_resize(&mut registry), GestureOutcome::Rejected(id));
        assert_eq!(registry.get(id).unwrap().size, Size::new(100.0, 130.0));
    }

    #[test]
    fn test_configured_minimum_above_floor_applies() {
        let _ = env_logger::builder().is_test(true).try_init();
        let config = EditorConfig {
            min_field_size: 20.0,
            ..EditorConfig::default()
        };
        let mut machine = InteractionMachine::new(&config);
        let mut registry = FieldRegistry::new();
        let id = registry.add(FieldKind::Photo, None, &config).unwrap();
        machine.select(id, &registry);

        // 10x10 is above the built-in floor but under the configured one.
        assert!(machine.begin_resize(HandleKind::BottomRight, Point::new(150.0, 180.0), &registry));
        machine.pointer_move(Point::new(60.0, 60.0));
        assert_eq!(machine.end_resize(&mut registry), GestureOutcome::Rejected(id));
        assert_eq!(registry.get(id).unwrap().size, Size::new(100.0, 130.0));
    }

    #[test]
    fn test_preview_under_minimum_shows_start_geometry() {
        let (mut machine, mut registry, config) = setup();
        let id = registry.add(FieldKind::Photo, None, &config).unwrap();
        machine.select(id, &registry);
        let start = registry.get(id).unwrap().geometry();

        assert!(machine.begin_resize(HandleKind::BottomRight, Point::new(150.0, 180.0), &registry));
        machine.pointer_move(Point::new(53.0, 53.0));
        let preview = machine.preview().unwrap();
        assert_eq!(preview.id, id);
        assert_eq!(preview.geometry, start);
        // Handles follow the preview, so they stay on the start geometry too.
        assert_eq!(machine.handles(&registry), handles_for(start.as_rect()));

        machine.pointer_move(Point::new(170.0, 200.0));
        assert_eq!(machine.preview().unwrap().geometry.size, Size::new(120.0, 150.0));
    }

    #[test]
    fn test_fill_mode_mid_drag_commits_nothing() {
        let (mut machine, mut registry, config) = setup();
        let id = registry.add(FieldKind::Photo, None, &config).unwrap();

        machine.pointer_down(Point::new(100.0, 100.0), &registry);
        machine.pointer_move(Point::new(200.0, 200.0));
        assert!(matches!(machine.state(), InteractionState::Dragging(_)));

        machine.set_mode(Mode::Fill);
        assert_eq!(machine.state(), &InteractionState::Idle);
        assert!(machine.preview().is_none());
        assert_eq!(machine.pointer_up(&mut registry), GestureOutcome::Unchanged);
        assert_eq!(registry.get(id).unwrap().position, Point::new(50.0, 50.0));
    }

    #[test]
    fn test_fill_mode_mid_resize_commits_nothing() {
        let (mut machine, mut registry, config) = setup();
        let id = registry.add(FieldKind::Photo, None, &config).unwrap();
        machine.select(id, &registry);

        assert!(machine.begin_resize(HandleKind::BottomRight, Point::new(150.0, 180.0), &registry));
        machine.pointer_move(Point::new(250.0, 280.0));

        machine.set_mode(Mode::Fill);
        assert_eq!(machine.state(), &InteractionState::Idle);
        assert_eq!(machine.end_resize(&mut registry), GestureOutcome::Unchanged);
        machine.set_mode(Mode::Design);
        assert_eq!(machine.pointer_up(&mut registry), GestureOutcome::Unchanged);

        let field = registry.get(id).unwrap();
        assert_eq!(field.position, Point::new(50.0, 50.0));
        assert_eq!(field.size, Size::new(100.0, 130.0));
        assert_eq!(machine.state(), &InteractionState::Idle);
    }

    #[test]
    fn test_text_fields_have_no_handles() {
        let (mut machine, mut registry, config) = setup();
        let id = registry.add(FieldKind::Text, Some("NOME"), &config).unwrap();
        machine.select(id, &registry);
        assert!(machine.handles(&registry).is_empty());
        assert!(!machine.begin_resize(HandleKind::Right, Point::new(50.0, 50.0), &registry));
    }

    #[test]
    fn test_fill_mode_disables_everything() {
        let (mut machine, mut registry, config) = setup();
        let id = registry.add(FieldKind::Photo, None, &config).unwrap();
        machine.select(id, &registry);

        machine.set_mode(Mode::Fill);
        assert_eq!(machine.state(), &InteractionState::Idle);
        assert!(!machine.select(id, &registry));

        machine.pointer_down(Point::new(100.0, 100.0), &registry);
        machine.pointer_move(Point::new(200.0, 200.0));
        assert_eq!(machine.pointer_up(&mut registry), GestureOutcome::Unchanged);
        assert_eq!(registry.get(id).unwrap().position, Point::new(50.0, 50.0));
        assert!(machine.selected().is_none());
        assert!(machine.handles(&registry).is_empty());
    }

    #[test]
    fn test_cancel_discards_gesture() {
        let (mut machine, mut registry, config) = setup();
        let id = registry.add(FieldKind::Photo, None, &config).unwrap();

        machine.pointer_down(Point::new(100.0, 100.0), &registry);
        machine.pointer_move(Point::new(200.0, 200.0));
        machine.cancel();
        assert_eq!(machine.state(), &InteractionState::Selected(id));
        assert_eq!(machine.pointer_up(&mut registry), GestureOutcome::Unchanged);
        assert_eq!(registry.get(id).unwrap().position, Point::new(50.0, 50.0));
    }

    #[test]
    fn test_forget_clears_selection() {
        let (mut machine, mut registry, config) = setup();
        let id = registry.add(FieldKind::Photo, None, &config).unwrap();
        machine.select(id, &registry);
        machine.forget(FieldId::new_v4());
        assert!(machine.is_selected(id));
        machine.forget(id);
        assert_eq!(machine.state(), &InteractionState::Idle);
    }
}
