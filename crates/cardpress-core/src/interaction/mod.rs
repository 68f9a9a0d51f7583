//! Interaction system for selecting, moving and resizing fields.
//!
//! Fields remain pure data in the registry. The state machine here only
//! tracks which field is selected and the gesture in flight, and writes to
//! the registry through its commands when a gesture ends.

mod handles;
mod machine;
mod state;

pub use handles::{Handle, HandleKind, handles_for, hit_test_handles};
pub use machine::{GeometryPreview, GestureOutcome, InteractionMachine};
pub use state::{DragGesture, InteractionState, Mode, ResizeGesture};
