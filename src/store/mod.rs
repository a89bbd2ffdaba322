//! Durable key/value storage for the board.
//!
//! The whole collection is one JSON value under [`STORAGE_KEY`]; every
//! mutation rewrites it in full.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};

use crate::note::Note;

/// Key the board is persisted under.
pub const STORAGE_KEY: &str = "sticky-notes";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize notes: {0}")]
    Json(#[from] serde_json::Error),
}

/// A string key/value store in the spirit of browser local storage.
pub trait Storage {
    /// Read the value stored under `key`, or `None` when absent.
    ///
    /// # Errors
    /// Returns an error if the backend exists but cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be written.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Filesystem location of `key`, when the backend has one.
    fn location(&self, _key: &str) -> Option<PathBuf> {
        None
    }
}

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let io_err = |source| StoreError::Io {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        // Write beside the target and rename so readers never see a torn file.
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        let mut file = fs::File::create(&tmp).map_err(io_err)?;
        file.write_all(value.as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }

    fn location(&self, key: &str) -> Option<PathBuf> {
        Some(self.path_for(key))
    }
}

/// Volatile storage, used by tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Parse a persisted collection. Malformed input yields `None`.
pub fn parse_notes(raw: &str) -> Option<Vec<Note>> {
    match serde_json::from_str::<Vec<Note>>(raw) {
        Ok(notes) => Some(notes),
        Err(err) => {
            warn!(error = %err, "stored notes are malformed; ignoring them");
            None
        }
    }
}

/// A loaded collection and the stored value it was parsed from.
#[derive(Debug, Default)]
pub struct StoredNotes {
    pub notes: Vec<Note>,
    /// `None` when nothing was stored or the backend could not be read.
    pub raw: Option<String>,
}

/// Load the board and its raw stored value from `storage`.
///
/// A missing key, unreadable backend, or malformed value all produce an
/// empty collection.
pub fn load_stored(storage: &dyn Storage) -> StoredNotes {
    match storage.get_item(STORAGE_KEY) {
        Ok(Some(raw)) => {
            let notes = parse_notes(&raw).unwrap_or_default();
            debug!(count = notes.len(), "notes loaded");
            StoredNotes {
                notes,
                raw: Some(raw),
            }
        }
        Ok(None) => StoredNotes::default(),
        Err(err) => {
            warn!(error = %err, "failed to read stored notes; starting empty");
            StoredNotes::default()
        }
    }
}

/// Load the board from `storage`, falling back to an empty collection.
pub fn load_notes(storage: &dyn Storage) -> Vec<Note> {
    load_stored(storage).notes
}

/// Serialize and write the whole collection. Returns the JSON written.
///
/// # Errors
/// Returns an error if serialization or the storage write fails.
pub fn save_notes(storage: &mut dyn Storage, notes: &[Note]) -> Result<String, StoreError> {
    let json = serde_json::to_string(notes)?;
    storage.set_item(STORAGE_KEY, &json)?;
    debug!(count = notes.len(), bytes = json.len(), "notes saved");
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::note::{NoteColor, NotePatch, Timestamp};
    use tempfile::tempdir;

    fn sample_board() -> Board {
        let mut board = Board::new();
        let a = board.add(Timestamp::from_millis(1_000), NoteColor::Pink);
        board.add(Timestamp::from_millis(2_000), NoteColor::Teal);
        board.update(a, &NotePatch::text("groceries\nmilk"), Timestamp::from_millis(3_000));
        board.update(a, &NotePatch::position(-12.5, 340.0), Timestamp::from_millis(4_000));
        board.toggle_pin(a);
        board
    }

    #[test]
    fn test_round_trip_reproduces_collection() {
        let board = sample_board();
        let mut storage = MemoryStorage::new();
        save_notes(&mut storage, board.notes()).unwrap();
        let loaded = load_notes(&storage);
        assert_eq!(loaded, board.notes());
    }

    #[test]
    fn test_missing_key_loads_empty() {
        let storage = MemoryStorage::new();
        assert!(load_notes(&storage).is_empty());
    }

    #[test]
    fn test_malformed_value_loads_empty() {
        let mut storage = MemoryStorage::new();
        storage.set_item(STORAGE_KEY, "{not json").unwrap();
        assert!(load_notes(&storage).is_empty());

        storage.set_item(STORAGE_KEY, r#"{"id": 1}"#).unwrap();
        assert!(load_notes(&storage).is_empty());
    }

    #[test]
    fn test_load_stored_keeps_raw_value() {
        let board = sample_board();
        let mut storage = MemoryStorage::new();
        assert!(load_stored(&storage).raw.is_none());

        let written = save_notes(&mut storage, board.notes()).unwrap();
        let stored = load_stored(&storage);
        assert_eq!(stored.notes, board.notes());
        assert_eq!(stored.raw, Some(written));

        storage.set_item(STORAGE_KEY, "{not json").unwrap();
        let stored = load_stored(&storage);
        assert!(stored.notes.is_empty());
        assert_eq!(stored.raw.as_deref(), Some("{not json"));
    }

    #[test]
    fn test_file_storage_writes_key_file() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("data"));
        assert_eq!(storage.get_item(STORAGE_KEY).unwrap(), None);

        let board = sample_board();
        let written = save_notes(&mut storage, board.notes()).unwrap();

        let path = storage.path_for(STORAGE_KEY);
        assert!(path.ends_with("sticky-notes.json"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), written);
        assert_eq!(load_notes(&storage), board.notes());
        assert_eq!(storage.location(STORAGE_KEY), Some(path));
    }

    #[test]
    fn test_file_storage_overwrites_previous_value() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        storage.set_item(STORAGE_KEY, "[]").unwrap();
        storage.set_item(STORAGE_KEY, "[ ]").unwrap();
        assert_eq!(storage.get_item(STORAGE_KEY).unwrap().as_deref(), Some("[ ]"));
    }
}
