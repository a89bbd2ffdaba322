//! The canonical note collection and the filtered view derived from it.
//!
//! The collection is kept in insertion order. Display order is never stored:
//! [`Board::view`] derives it on demand, pinned notes first.

use tracing::debug;

use crate::note::{Note, NoteColor, NoteId, NotePatch, Timestamp};

/// What the user is currently filtering by.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// Case-insensitive substring the note text must contain.
    pub search: String,
    /// Only show pinned notes.
    pub pinned_only: bool,
}

impl Filter {
    pub fn matches(&self, note: &Note) -> bool {
        if self.pinned_only && !note.pinned {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        note.text
            .to_lowercase()
            .contains(&self.search.to_lowercase())
    }

    pub fn is_active(&self) -> bool {
        self.pinned_only || !self.search.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    notes: Vec<Note>,
}

impl Board {
    pub const fn new() -> Self {
        Self { notes: Vec::new() }
    }

    /// Seed a board from a previously persisted collection.
    pub const fn from_notes(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.get(id).is_some()
    }

    /// Append a note with default geometry and return its id.
    ///
    /// The id is the creation time in milliseconds unless that value is
    /// already taken, in which case the next free id above the current
    /// maximum is used.
    pub fn add(&mut self, now: Timestamp, color: NoteColor) -> NoteId {
        let mut id = NoteId(now.as_millis());
        if self.contains(id) {
            let max = self.notes.iter().map(|note| note.id.0).max().unwrap_or(id.0);
            id = NoteId(max.saturating_add(1));
        }
        self.notes.push(Note::new(id, color, now));
        debug!(%id, color = color.hex(), "note added");
        id
    }

    /// Merge `patch` into the note with `id` and refresh its `updated_at`.
    ///
    /// Returns `false` when no such note exists.
    pub fn update(&mut self, id: NoteId, patch: &NotePatch, now: Timestamp) -> bool {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            return false;
        };
        note.apply(patch);
        note.updated_at = now;
        true
    }

    /// Remove the note with `id`. Returns `false` when no such note exists.
    pub fn delete(&mut self, id: NoteId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        let removed = self.notes.len() != before;
        if removed {
            debug!(%id, "note deleted");
        }
        removed
    }

    /// Flip the pinned flag. `updated_at` is left alone.
    pub fn toggle_pin(&mut self, id: NoteId) -> bool {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            return false;
        };
        note.pinned = !note.pinned;
        debug!(%id, pinned = note.pinned, "note pin toggled");
        true
    }

    /// Replace the whole collection, e.g. after the store changed on disk.
    pub fn replace(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    /// Notes matching `filter`, pinned first, otherwise in insertion order.
    pub fn view(&self, filter: &Filter) -> Vec<&Note> {
        let mut visible: Vec<&Note> = self
            .notes
            .iter()
            .filter(|note| filter.matches(note))
            .collect();
        // sort_by_key is stable
        visible.sort_by_key(|note| !note.pinned);
        visible
    }

    pub fn pinned_count(&self) -> usize {
        self.notes.iter().filter(|note| note.pinned).count()
    }
}
