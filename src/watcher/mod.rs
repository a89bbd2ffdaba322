//! Watching the storage file for changes made by other processes.
//!
//! Uses notify crate for cross-platform file system events. The directory is
//! watched rather than the file itself: storage writes replace the file by
//! rename, and the file may not exist yet when the board starts empty.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches a single file and emits debounced change notifications.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watch_root: PathBuf,
    target_path: PathBuf,
    target_name: Option<OsString>,
    debounce: Duration,
    pending_since: Option<Instant>,
}

impl FileWatcher {
    /// Create a watcher for `path`. The file itself need not exist, but its
    /// directory must.
    ///
    /// # Errors
    /// Returns an error if the file watcher cannot be created or the
    /// directory cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        let path = path.as_ref();
        // Event paths from the OS are canonical; match them against a
        // canonical directory even when the file is missing.
        let root = watch_root_for(path);
        let watch_root = root.canonicalize().unwrap_or(root);
        let target_name = path.file_name().map(std::ffi::OsStr::to_os_string);
        let target_path = target_name
            .as_ref()
            .map_or_else(|| watch_root.clone(), |name| watch_root.join(name));

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            rx,
            watch_root,
            target_path,
            target_name,
            debounce,
            pending_since: None,
        })
    }

    /// The canonical path of the file being watched.
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Returns true once a debounced change to the file is ready.
    pub fn take_change_ready(&mut self) -> bool {
        let mut saw_relevant_event = false;
        let mut total_events = 0u32;
        while let Ok(event) = self.rx.try_recv() {
            total_events += 1;
            match event {
                Ok(ev) if self.is_relevant(&ev) => saw_relevant_event = true,
                Ok(_) => {}
                Err(err) => {
                    crate::perf::log_event("watcher.error", format!("{err}"));
                }
            }
        }

        if total_events > 0 {
            crate::perf::log_event(
                "watcher.poll",
                format!(
                    "total={total_events} relevant={} target={}",
                    if saw_relevant_event { "yes" } else { "no" },
                    self.target_path.display(),
                ),
            );
        }

        if saw_relevant_event {
            self.pending_since = Some(Instant::now());
        }

        let Some(pending_since) = self.pending_since else {
            return false;
        };
        if pending_since.elapsed() >= self.debounce {
            self.pending_since = None;
            return true;
        }
        false
    }

    fn is_relevant(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.watch_root
                || path == &self.target_path
                || self
                    .target_name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
