use std::path::Path;
use std::time::Duration;

use tracing::warn;

use crate::app::{App, Message, Model, ToastLevel};
use crate::store::Storage;
use crate::watcher::FileWatcher;

impl App {
    pub(super) fn make_file_watcher(path: &Path) -> notify::Result<FileWatcher> {
        FileWatcher::new(path, Duration::from_millis(200))
    }

    /// Run the side effects that follow `msg` once `update` has applied it.
    ///
    /// Every board mutation is followed by a full write of the collection.
    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        storage: &mut dyn Storage,
        msg: &Message,
    ) {
        if matches!(msg, Message::StoreChanged) {
            if model.reload_from_store(storage) {
                model.show_toast(ToastLevel::Info, "Notes reloaded from disk");
                crate::perf::log_event("store.reload", format!("notes={}", model.board.len()));
            }
            return;
        }

        if model.needs_persist() {
            Self::persist(model, storage);
        }
    }

    pub(super) fn persist(model: &mut Model, storage: &mut dyn Storage) {
        let _scope = crate::perf::scope("store.save");
        match model.persist(storage) {
            Ok(()) => {
                crate::perf::log_event("store.save", format!("notes={}", model.board.len()));
            }
            Err(err) => {
                warn!(error = %err, "failed to save notes");
                model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
                crate::perf::log_event("store.error", format!("{err}"));
            }
        }
    }
}
