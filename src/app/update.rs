use tracing::debug;

use crate::app::Model;
use crate::app::model::InputMode;
use crate::card::{Direction, Interaction, NoteBuffer};
use crate::note::{NoteColor, NoteId, NotePatch};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
/// Pointer positions are screen cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Board
    /// Append a note with default geometry and a random color
    AddNote,
    /// Remove a note
    DeleteNote(NoteId),
    /// Flip a note's pinned flag
    TogglePin(NoteId),
    /// Toggle the pinned-only filter
    TogglePinnedOnly,

    // Search
    /// Start search mode
    StartSearch,
    /// Replace the search query
    SearchInput(String),
    /// Leave search mode keeping the query
    SubmitSearch,
    /// Clear the query and leave search mode
    ClearSearch,

    // Focus
    /// Focus the next card in display order
    FocusNext,
    /// Focus the previous card in display order
    FocusPrev,
    /// Drop keyboard focus
    ClearFocus,

    // Editing
    /// Start editing a note's text
    StartEditing(NoteId),
    /// Leave edit mode; a pending commit still fires
    StopEditing,
    /// Insert a character at the cursor
    EditorInsertChar(char),
    /// Delete character before cursor (Backspace)
    EditorDeleteBack,
    /// Delete character at cursor (Delete)
    EditorDeleteForward,
    /// Split line at cursor (Enter)
    EditorSplitLine,
    /// Move cursor in a direction
    EditorMoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    EditorMoveHome,
    /// Move cursor to end of line (End)
    EditorMoveEnd,
    /// Debounce settled: push a card's draft to the board
    CommitDraft(NoteId),

    // Gestures
    /// Pointer pressed on a card's body at (col, row)
    StartDrag(NoteId, u16, u16),
    /// Pointer pressed on a card's resize handle
    StartResize(NoteId),
    /// Pointer moved to (col, row) during a gesture
    PointerMove(u16, u16),
    /// Pointer released
    PointerUp,
    /// Gesture aborted (focus loss, Esc)
    CancelGesture,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Storage changed outside this process
    StoreChanged,
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here. Reading the
/// model's clock and RNG is the only impurity; persistence and timers are
/// handled by the event loop afterwards.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Board
        Message::AddNote => {
            let now = model.clock.now();
            let color = NoteColor::random(&mut model.rng);
            let id = model.board.add(now, color);
            model.focused = Some(id);
            model.mark_changed();
        }
        Message::DeleteNote(id) => {
            if model.board.delete(id) {
                model.mark_changed();
            }
        }
        Message::TogglePin(id) => {
            if model.board.toggle_pin(id) {
                model.mark_changed();
            }
        }
        Message::TogglePinnedOnly => {
            model.filter.pinned_only = !model.filter.pinned_only;
        }

        // Search
        Message::StartSearch => {
            model.mode = InputMode::Search;
        }
        Message::SearchInput(query) => {
            model.filter.search = query;
        }
        Message::SubmitSearch => {
            model.mode = InputMode::Normal;
        }
        Message::ClearSearch => {
            model.filter.search.clear();
            model.mode = InputMode::Normal;
        }

        // Focus
        Message::FocusNext => cycle_focus(&mut model, true),
        Message::FocusPrev => cycle_focus(&mut model, false),
        Message::ClearFocus => {
            model.focused = None;
            if model.editing().is_some() {
                model.mode = InputMode::Normal;
            }
        }

        // Editing
        Message::StartEditing(id) => {
            if let Some(note) = model.board.get(id) {
                model.drafts.open(note);
                model.focused = Some(id);
                model.mode = InputMode::Editing(id);
            }
        }
        Message::StopEditing => {
            if model.editing().is_some() {
                model.mode = InputMode::Normal;
            }
        }
        Message::EditorInsertChar(ch) => edit_draft(&mut model, |buf| buf.insert_char(ch)),
        Message::EditorDeleteBack => edit_draft(&mut model, |buf| {
            buf.delete_back();
        }),
        Message::EditorDeleteForward => edit_draft(&mut model, |buf| {
            buf.delete_forward();
        }),
        Message::EditorSplitLine => edit_draft(&mut model, NoteBuffer::split_line),
        Message::EditorMoveCursor(direction) => {
            edit_draft(&mut model, |buf| buf.move_cursor(direction));
        }
        Message::EditorMoveHome => edit_draft(&mut model, NoteBuffer::move_home),
        Message::EditorMoveEnd => edit_draft(&mut model, NoteBuffer::move_end),
        Message::CommitDraft(id) => {
            let committed = model.board.get(id).map(|note| note.text.clone());
            if let Some(committed) = committed
                && let Some(text) = model.drafts.take_commit(id, &committed)
            {
                let now = model.clock.now();
                model.board.update(id, &NotePatch::text(text), now);
                model.mark_changed();
                debug!(%id, "draft committed");
            }
        }

        // Gestures
        Message::StartDrag(id, col, row) => {
            let pointer = model.scale.cell_origin(model.board_area(), col, row);
            if let Some(note) = model.board.get(id) {
                model.interaction = Interaction::start_drag(note, pointer);
                model.focused = Some(id);
            }
        }
        Message::StartResize(id) => {
            if model.board.contains(id) {
                model.interaction = Interaction::start_resize(id);
                model.focused = Some(id);
            }
        }
        Message::PointerMove(col, row) => {
            let area = model.board_area();
            let pointer = match model.interaction {
                Interaction::Resizing { .. } => model.scale.cell_far_corner(area, col, row),
                _ => model.scale.cell_origin(area, col, row),
            };
            if let Some((id, patch)) = model.interaction.pointer_moved(&model.board, pointer) {
                let now = model.clock.now();
                if model.board.update(id, &patch, now) {
                    model.mark_changed();
                }
            }
        }
        Message::PointerUp | Message::CancelGesture => {
            model.interaction = Interaction::Idle;
        }

        // Window
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            model.interaction = Interaction::Idle;
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        Message::StoreChanged | Message::Redraw => {}

        // Application
        Message::Quit => {
            model.should_quit = true;
            model.interaction = Interaction::Idle;
        }
    }

    model.forget_missing_notes();
    model
}

fn edit_draft(model: &mut Model, edit: impl FnOnce(&mut NoteBuffer)) {
    // Text editing is suspended while a gesture owns the pointer.
    if model.interaction.is_active() {
        return;
    }
    let Some(id) = model.editing() else {
        return;
    };
    let Some(note) = model.board.get(id) else {
        return;
    };
    if model.drafts.edit(note, edit) {
        model.set_last_edit(id);
    }
}

fn cycle_focus(model: &mut Model, forward: bool) {
    let ids: Vec<NoteId> = model.visible_notes().iter().map(|note| note.id).collect();
    if ids.is_empty() {
        model.focused = None;
        return;
    }
    let current = model
        .focused
        .and_then(|id| ids.iter().position(|other| *other == id));
    let next = match (current, forward) {
        (None, true) => 0,
        (None, false) => ids.len() - 1,
        (Some(idx), true) => (idx + 1) % ids.len(),
        (Some(idx), false) => (idx + ids.len() - 1) % ids.len(),
    };
    model.focused = Some(ids[next]);
}
