use std::collections::HashMap;

use crate::board::Board;
use crate::note::{Note, NoteId};

use super::buffer::{NoteBuffer, normalize_line_breaks};

/// The local copy of a card's text.
///
/// Keystrokes land here immediately; the board only sees the text once the
/// edit debounce settles.
#[derive(Debug)]
pub struct Draft {
    buffer: NoteBuffer,
    pending: bool,
}

impl Draft {
    fn new(text: &str) -> Self {
        Self {
            buffer: NoteBuffer::from_text(text),
            pending: false,
        }
    }

    pub const fn buffer(&self) -> &NoteBuffer {
        &self.buffer
    }

    /// Whether the draft holds keystrokes the board has not seen yet.
    pub const fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Drafts for every card that has been edited, keyed by note.
#[derive(Debug, Default)]
pub struct Drafts {
    drafts: HashMap<NoteId, Draft>,
}

impl Drafts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: NoteId) -> Option<&Draft> {
        self.drafts.get(&id)
    }

    /// Make sure a draft exists for `note`, seeded from its committed text.
    pub fn open(&mut self, note: &Note) -> &Draft {
        self.drafts
            .entry(note.id)
            .or_insert_with(|| Draft::new(&note.text))
    }

    /// Apply `edit` to the draft of `note`.
    ///
    /// Returns `true` when the text changed, which marks the draft pending.
    /// Cursor-only edits leave the pending state alone.
    pub fn edit(&mut self, note: &Note, edit: impl FnOnce(&mut NoteBuffer)) -> bool {
        let draft = self
            .drafts
            .entry(note.id)
            .or_insert_with(|| Draft::new(&note.text));
        let before = draft.buffer.text();
        edit(&mut draft.buffer);
        let changed = draft.buffer.text() != before;
        if changed {
            draft.pending = true;
        }
        changed
    }

    /// Settle the pending edit of `id`.
    ///
    /// Returns the draft text when it differs from `committed`, i.e. when the
    /// board needs an update.
    pub fn take_commit(&mut self, id: NoteId, committed: &str) -> Option<String> {
        let draft = self.drafts.get_mut(&id)?;
        draft.pending = false;
        let text = draft.buffer.text();
        (text != committed).then_some(text)
    }

    /// Ids of drafts with unsettled edits.
    pub fn pending_ids(&self) -> Vec<NoteId> {
        let mut ids: Vec<NoteId> = self
            .drafts
            .iter()
            .filter(|(_, draft)| draft.pending)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Reconcile drafts with the committed board.
    ///
    /// Drafts of deleted notes are dropped. Drafts with no pending edit take
    /// the committed text with the cursor at its end, so external changes
    /// show up in the card and typing continues after them.
    pub fn sync(&mut self, board: &Board) {
        self.drafts.retain(|id, _| board.contains(*id));
        for note in board.notes() {
            if let Some(draft) = self.drafts.get_mut(&note.id)
                && !draft.pending
                && draft.buffer.text() != normalize_line_breaks(&note.text)
            {
                draft.buffer = NoteBuffer::from_text(&note.text);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}
