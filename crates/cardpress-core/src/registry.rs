//! Ordered field collection and its mutation operations.

use crate::config::EditorConfig;
use crate::field::{Field, FieldId, FieldKind};
use kurbo::{Point, Size};
use thiserror::Error;

/// Field registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Text fields need a non-empty label")]
    InvalidFieldCreation,
    #[error("Fields are read-only in fill mode")]
    ReadOnly,
}

/// Partial geometry update for a single field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldPatch {
    pub position: Option<Point>,
    pub size: Option<Size>,
}

impl FieldPatch {
    /// Patch only the position.
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            size: None,
        }
    }

    /// Patch only the size.
    pub fn size(size: Size) -> Self {
        Self {
            position: None,
            size: Some(size),
        }
    }

    /// Patch position and size together.
    pub fn geometry(position: Point, size: Size) -> Self {
        Self {
            position: Some(position),
            size: Some(size),
        }
    }
}

/// Ordered sequence of fields. Later fields draw on top.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: Vec<Field>,
}

impl FieldRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a field with kind-specific defaults and append it.
    ///
    /// Text labels are trimmed and upper-cased; a text field without a
    /// label is rejected and the registry is left unchanged. Photo fields
    /// ignore `label` and carry the configured photo label.
    pub fn add(&mut self, kind: FieldKind, label: Option<&str>, config: &EditorConfig) -> Result<FieldId, FieldError> {
        match kind {
            FieldKind::Text => {
                let label = label
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .ok_or(FieldError::InvalidFieldCreation)?;
                Ok(self.add_text(label, config))
            }
            FieldKind::Photo => Ok(self.add_photo(config)),
        }
    }

    fn add_text(&mut self, label: &str, config: &EditorConfig) -> FieldId {
        let (x, y) = config.default_position;
        self.push(Field::text(label.to_uppercase(), Point::new(x, y), config.font_size))
    }

    /// Create a photo field with the configured defaults and append it.
    pub fn add_photo(&mut self, config: &EditorConfig) -> FieldId {
        let (x, y) = config.default_position;
        let (w, h) = config.photo_size;
        self.push(Field::photo(config.photo_label.clone(), Point::new(x, y), Size::new(w, h)))
    }

    fn push(&mut self, field: Field) -> FieldId {
        let id = field.id();
        // v4 ids do not collide in practice; this keeps the invariant checkable.
        debug_assert!(!self.contains(id));
        log::debug!("Added {} field '{}' ({})", field.kind().name(), field.label, id);
        self.fields.push(field);
        id
    }

    /// Remove a field. No-op if the id is unknown.
    pub fn remove(&mut self, id: FieldId) -> Option<Field> {
        let index = self.fields.iter().position(|f| f.id() == id)?;
        let field = self.fields.remove(index);
        log::debug!("Removed field '{}' ({})", field.label, id);
        Some(field)
    }

    /// Apply a partial geometry update to exactly one field.
    /// Returns false if no field has this id.
    pub fn update(&mut self, id: FieldId, patch: FieldPatch) -> bool {
        let Some(field) = self.fields.iter_mut().find(|f| f.id() == id) else {
            return false;
        };
        if let Some(position) = patch.position {
            field.position = position;
        }
        if let Some(size) = patch.size {
            field.size = size;
        }
        true
    }

    /// Fields in draw order.
    pub fn list(&self) -> &[Field] {
        &self.fields
    }

    /// Get a field by id.
    pub fn get(&self, id: FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| f.id() == id)
    }

    pub fn contains(&self, id: FieldId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Find the topmost field at a point (in image pixels).
    pub fn hit_test(&self, point: Point, highlight_width: f64) -> Option<FieldId> {
        self.fields
            .iter()
            .rev()
            .find(|f| f.hit_test(point, highlight_width))
            .map(Field::id)
    }

    /// Labels of text fields, in draw order. These are the keys a fill form asks for.
    pub fn text_labels(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.kind() == FieldKind::Text)
            .map(|f| f.label.as_str())
            .collect()
    }

    /// Check if any photo field exists.
    pub fn has_photo_field(&self) -> bool {
        self.fields.iter().any(|f| f.kind() == FieldKind::Photo)
    }
}
