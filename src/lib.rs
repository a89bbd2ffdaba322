// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. note::NoteId)
    clippy::module_name_repetitions
)]

//! # Stickies
//!
//! A sticky-notes board for the terminal.
//!
//! Notes are free-floating cards with a color, text and timestamps. They can
//! be dragged, resized, pinned, searched and edited in place, and the whole
//! board is saved to disk after every change.
//!
//! ## Architecture
//!
//! Stickies uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`note`]: The note record and its value types
//! - [`board`]: The ordered note collection and its filtered view
//! - [`store`]: Key-value persistence of the collection
//! - [`card`]: Per-card editing buffers, debounce and pointer gestures
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`watcher`]: Storage file watching

pub mod app;
pub mod board;
pub mod card;
pub mod config;
pub mod note;
pub mod perf;
pub mod store;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::board::{Board, Filter};
    pub use crate::note::{Note, NoteColor, NoteId, NotePatch, Timestamp};
    pub use crate::store::{FileStorage, MemoryStorage, Storage};
}
