//! Per-card interaction: the local edit buffer, its debounced commit, and
//! pointer gestures.

mod buffer;
mod capture;
mod debounce;
mod draft;
mod gesture;

pub use buffer::{Cursor, Direction, NoteBuffer, normalize_line_breaks};
pub use capture::{PointerCapture, release_motion_tracking};
pub use debounce::{DEFAULT_EDIT_DEBOUNCE_MS, EditDebouncer};
pub use draft::{Draft, Drafts};
pub use gesture::{Interaction, Point, drag_position, resize_extent};
