use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::layout::Rect;

use crate::board::{Board, Filter};
use crate::card::{Drafts, Interaction, normalize_line_breaks};
use crate::note::{Note, NoteId, Timestamp};
use crate::store::{self, Storage, StoreError};
use crate::ui::CellScale;

/// Hash a byte slice for content comparison.
pub(super) fn hash_bytes(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Where keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys are board commands.
    #[default]
    Normal,
    /// Keys edit the search query.
    Search,
    /// Keys edit the draft of a note.
    Editing(NoteId),
}

/// Source of wall-clock time for timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(Timestamp),
}

impl Clock {
    pub fn now(&self) -> Timestamp {
        match self {
            Self::System => Timestamp::now(),
            Self::Fixed(ts) => *ts,
        }
    }
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The canonical note collection
    pub board: Board,
    /// Current search text and pinned-only toggle
    pub filter: Filter,
    pub mode: InputMode,
    /// Note targeted by keyboard commands
    pub focused: Option<NoteId>,
    /// Active pointer gesture
    pub interaction: Interaction,
    /// Local edit buffers of cards
    pub drafts: Drafts,
    /// Pixels per terminal cell
    pub scale: CellScale,
    /// Terminal size in cells
    pub terminal_size: (u16, u16),
    /// Whether the storage file is watched for external changes
    pub watch_enabled: bool,
    /// Where the board is persisted, shown in help
    pub store_path: Option<PathBuf>,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    pub clock: Clock,
    /// Picks colors for new notes
    pub rng: StdRng,
    toast: Option<Toast>,
    /// Bumped on every board mutation
    revision: u64,
    /// Revision last written to storage
    persisted_revision: u64,
    /// Hash of the JSON last written or read, to recognise our own writes
    last_store_hash: Option<u64>,
    /// Note whose draft text changed during the last update
    last_edit: Option<NoteId>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("notes", &self.board.len())
            .field("filter", &self.filter)
            .field("mode", &self.mode)
            .field("interaction", &self.interaction)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model over `notes` for a terminal of `terminal_size` cells.
    pub fn new(notes: Vec<Note>, terminal_size: (u16, u16)) -> Self {
        Self {
            board: Board::from_notes(notes),
            terminal_size,
            ..Self::default()
        }
    }

    /// The board's screen area.
    pub fn board_area(&self) -> Rect {
        crate::ui::board_area(self.terminal_size.0, self.terminal_size.1)
    }

    /// Notes as currently displayed: filtered, pinned first.
    pub fn visible_notes(&self) -> Vec<&Note> {
        self.board.view(&self.filter)
    }

    /// Text a card shows: its draft if one exists, else the committed text.
    pub fn display_text(&self, note: &Note) -> String {
        self.drafts
            .get(note.id)
            .map_or_else(|| normalize_line_breaks(&note.text), |draft| draft.buffer().text())
    }

    pub const fn editing(&self) -> Option<NoteId> {
        match self.mode {
            InputMode::Editing(id) => Some(id),
            _ => None,
        }
    }

    pub(super) const fn mark_changed(&mut self) {
        self.revision += 1;
    }

    /// Whether the board has mutations not yet written to storage.
    pub const fn needs_persist(&self) -> bool {
        self.revision != self.persisted_revision
    }

    pub(super) const fn set_last_edit(&mut self, id: NoteId) {
        self.last_edit = Some(id);
    }

    /// The note whose draft changed in the last update, if any.
    pub const fn take_last_edit(&mut self) -> Option<NoteId> {
        self.last_edit.take()
    }

    /// Write the whole collection to `storage`.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails; the board stays
    /// marked as needing a write.
    pub fn persist(&mut self, storage: &mut dyn Storage) -> Result<(), StoreError> {
        let json = store::save_notes(storage, self.board.notes())?;
        self.last_store_hash = Some(hash_bytes(json.as_bytes()));
        self.persisted_revision = self.revision;
        Ok(())
    }

    /// Reload the board after the stored value changed outside this process.
    ///
    /// Returns `false` when the stored value is what we last wrote or read,
    /// or when it is malformed (the current board is kept in that case).
    pub fn reload_from_store(&mut self, storage: &dyn Storage) -> bool {
        let raw = match storage.get_item(store::STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => String::from("[]"),
            Err(err) => {
                tracing::warn!(error = %err, "failed to reread stored notes");
                return false;
            }
        };
        let hash = hash_bytes(raw.as_bytes());
        if self.last_store_hash == Some(hash) {
            return false;
        }
        let Some(notes) = store::parse_notes(&raw) else {
            return false;
        };
        self.last_store_hash = Some(hash);
        self.board.replace(notes);
        self.forget_missing_notes();
        true
    }

    /// Record the stored value the board was seeded from.
    pub fn remember_store_content(&mut self, raw: &str) {
        self.last_store_hash = Some(hash_bytes(raw.as_bytes()));
    }

    /// Drop references to notes that no longer exist and resync drafts.
    pub(super) fn forget_missing_notes(&mut self) {
        if self.focused.is_some_and(|id| !self.board.contains(id)) {
            self.focused = None;
        }
        if self.editing().is_some_and(|id| !self.board.contains(id)) {
            self.mode = InputMode::Normal;
        }
        if self
            .interaction
            .note_id()
            .is_some_and(|id| !self.board.contains(id))
        {
            self.interaction = Interaction::Idle;
        }
        self.drafts.sync(&self.board);
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self {
            board: Board::new(),
            filter: Filter::default(),
            mode: InputMode::Normal,
            focused: None,
            interaction: Interaction::Idle,
            drafts: Drafts::new(),
            scale: CellScale::default(),
            terminal_size: (80, 24),
            watch_enabled: false,
            store_path: None,
            config_global_path: None,
            config_local_path: None,
            help_visible: false,
            should_quit: false,
            clock: Clock::System,
            rng: StdRng::from_entropy(),
            toast: None,
            revision: 0,
            persisted_revision: 0,
            last_store_hash: None,
            last_edit: None,
        }
    }
}
