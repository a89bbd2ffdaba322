//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Clock, InputMode, Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::card::DEFAULT_EDIT_DEBOUNCE_MS;
use crate::store::Storage;
use crate::ui::CellScale;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    storage: Box<dyn Storage>,
    watch_enabled: bool,
    pinned_only: bool,
    debounce_ms: u64,
    scale: CellScale,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application persisting to `storage`.
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self {
            storage,
            watch_enabled: false,
            pinned_only: false,
            debounce_ms: DEFAULT_EDIT_DEBOUNCE_MS,
            scale: CellScale::default(),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Enable or disable watching the storage file for external changes.
    pub const fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    /// Start with the pinned-only filter on.
    pub const fn with_pinned_only(mut self, enabled: bool) -> Self {
        self.pinned_only = enabled;
        self
    }

    /// Quiet period before card edits are committed.
    pub const fn with_debounce_ms(mut self, delay_ms: u64) -> Self {
        self.debounce_ms = delay_ms;
        self
    }

    /// Pixels represented by one terminal cell.
    pub const fn with_scale(mut self, scale: CellScale) -> Self {
        self.scale = scale;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}

#[cfg(test)]
mod tests;
