//! CardPress Application
//!
//! The session shell that ties the template model to its inputs (background
//! image, fill values, photo) and its output (the exported document).

mod session;

pub use session::{Session, SessionError, SessionResult};

pub use cardpress_core::{EditorConfig, FieldId, FieldKind, GestureOutcome, Mode};
pub use cardpress_render::{ExportedDocument, Orientation, Surface};
