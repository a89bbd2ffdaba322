use std::collections::HashMap;

use crate::note::NoteId;

/// Default quiet period before a card's text is committed.
pub const DEFAULT_EDIT_DEBOUNCE_MS: u64 = 1000;

/// One pending commit per note; every keystroke re-arms it.
#[derive(Debug)]
pub struct EditDebouncer {
    delay_ms: u64,
    pending: HashMap<NoteId, u64>,
}

impl EditDebouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: HashMap::new(),
        }
    }

    /// (Re)arm the timer for `id`, cancelling any earlier deadline.
    pub fn queue(&mut self, id: NoteId, now_ms: u64) {
        self.pending.insert(id, now_ms);
    }

    /// Notes whose quiet period has elapsed. They are no longer pending.
    pub fn take_ready(&mut self, now_ms: u64) -> Vec<NoteId> {
        let delay = self.delay_ms;
        let mut ready: Vec<NoteId> = self
            .pending
            .iter()
            .filter(|(_, queued_at)| now_ms.saturating_sub(**queued_at) >= delay)
            .map(|(id, _)| *id)
            .collect();
        ready.sort_unstable();
        for id in &ready {
            self.pending.remove(id);
        }
        ready
    }

    pub fn cancel(&mut self, id: NoteId) {
        self.pending.remove(&id);
    }

    /// Drain every pending note regardless of its deadline.
    pub fn flush(&mut self) -> Vec<NoteId> {
        let mut ids: Vec<NoteId> = self.pending.drain().map(|(id, _)| id).collect();
        ids.sort_unstable();
        ids
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Milliseconds until the earliest deadline, if any.
    pub fn next_due_in(&self, now_ms: u64) -> Option<u64> {
        self.pending
            .values()
            .map(|queued_at| (queued_at + self.delay_ms).saturating_sub(now_ms))
            .min()
    }
}

impl Default for EditDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_EDIT_DEBOUNCE_MS)
    }
}
