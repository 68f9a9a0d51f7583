//! Interaction states and in-flight gestures.

use super::handles::HandleKind;
use crate::field::{FieldGeometry, FieldId, clamp_size, meets_minimum};
use kurbo::{Point, Size, Vec2};

/// Editing mode of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Fields are created, selected, moved and resized; labels are shown.
    #[default]
    Design,
    /// Fill values replace labels; geometry is read-only.
    Fill,
}

impl Mode {
    /// Get display name for this mode.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Design => "Design",
            Mode::Fill => "Fill",
        }
    }
}

/// The state of the interaction state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    /// Nothing selected.
    #[default]
    Idle,
    /// A field is selected and shows its decorations.
    Selected(FieldId),
    /// The selected field is being moved.
    Dragging(DragGesture),
    /// The selected field is being resized through a handle.
    Resizing(ResizeGesture),
}

impl InteractionState {
    /// The field this state refers to, if any. Gestures imply selection.
    pub fn field(&self) -> Option<FieldId> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Selected(id) => Some(*id),
            InteractionState::Dragging(drag) => Some(drag.id),
            InteractionState::Resizing(resize) => Some(resize.id),
        }
    }

    /// Check if a gesture is in flight.
    pub fn is_gesture(&self) -> bool {
        matches!(self, InteractionState::Dragging(_) | InteractionState::Resizing(_))
    }
}

/// A move gesture. Only the preview moves until the gesture ends.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    /// The field being moved.
    pub id: FieldId,
    /// Pointer position when the gesture started.
    pub start_pointer: Point,
    /// Field anchor when the gesture started.
    pub start_position: Point,
    /// Field size, carried along for the preview.
    pub size: Size,
    /// Latest pointer position.
    pub current_pointer: Point,
}

impl DragGesture {
    pub fn new(id: FieldId, start_pointer: Point, start: FieldGeometry) -> Self {
        Self {
            id,
            start_pointer,
            start_position: start.position,
            size: start.size,
            current_pointer: start_pointer,
        }
    }

    /// Get the drag delta.
    pub fn delta(&self) -> Vec2 {
        self.current_pointer - self.start_pointer
    }

    /// Check if the pointer moved since the gesture started.
    pub fn has_moved(&self) -> bool {
        self.delta() != Vec2::ZERO
    }

    /// Anchor the field would be committed at.
    pub fn position(&self) -> Point {
        self.start_position + self.delta()
    }

    /// Preview geometry for rendering.
    pub fn preview(&self) -> FieldGeometry {
        FieldGeometry::new(self.position(), self.size)
    }
}

/// A resize gesture driven by one handle.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeGesture {
    /// The field being resized.
    pub id: FieldId,
    /// Handle being dragged.
    pub handle: HandleKind,
    /// Pointer position when the gesture started.
    pub start_pointer: Point,
    /// Committed geometry when the gesture started.
    pub start_geometry: FieldGeometry,
    /// Latest pointer position.
    pub current_pointer: Point,
    /// Smallest acceptable width/height.
    pub min_size: f64,
}

impl ResizeGesture {
    pub fn new(id: FieldId, handle: HandleKind, start_pointer: Point, start_geometry: FieldGeometry, min_size: f64) -> Self {
        Self {
            id,
            handle,
            start_pointer,
            start_geometry,
            current_pointer: start_pointer,
            min_size,
        }
    }

    /// Get the drag delta.
    pub fn delta(&self) -> Vec2 {
        self.current_pointer - self.start_pointer
    }

    /// Geometry the pointer is asking for, before the minimum-size guard.
    /// Width/height are negative when a handle was dragged past the opposite edge.
    pub fn attempted(&self) -> (Point, Size) {
        let (x0, y0, x1, y1) = self.handle.drag_edges(self.start_geometry.as_rect(), self.delta());
        (Point::new(x0, y0), Size::new(x1 - x0, y1 - y0))
    }

    /// Check if the attempted geometry respects the minimum size.
    pub fn is_acceptable(&self) -> bool {
        let (_, size) = self.attempted();
        meets_minimum(size, self.min_size)
    }

    /// Geometry the gesture resolves to.
    ///
    /// The guard discards the whole gesture when either axis falls under the
    /// minimum: the start geometry comes back untouched, neither axis is clamped.
    pub fn resolved(&self) -> FieldGeometry {
        if !self.is_acceptable() {
            return self.start_geometry;
        }
        let (position, size) = self.attempted();
        let (width, height) = clamp_size(size.width, size.height, self.min_size);
        FieldGeometry::new(position, Size::new(width, height))
    }
}
