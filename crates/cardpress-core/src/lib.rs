//! CardPress Core Library
//!
//! Field layout model and interaction engine for ID-card templates:
//! fields anchored in background-image pixels, the registry that owns
//! them, and the selection / drag / resize state machine that edits them.

pub mod asset;
pub mod canvas;
pub mod config;
pub mod field;
pub mod fill;
pub mod interaction;
pub mod registry;
pub mod viewport;

pub use asset::{AssetSlot, RasterAsset};
pub use canvas::Canvas;
pub use config::{ConfigError, EditorConfig};
pub use field::{Field, FieldGeometry, FieldId, FieldKind, MIN_FIELD_SIZE, clamp_size};
pub use fill::FillSession;
pub use interaction::{GeometryPreview, GestureOutcome, Handle, HandleKind, InteractionState, Mode};
pub use registry::{FieldError, FieldPatch, FieldRegistry};
pub use viewport::Viewport;
