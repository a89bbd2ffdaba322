use std::path::PathBuf;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::card::{EditDebouncer, Interaction};
use crate::note::{DEFAULT_POSITION, DEFAULT_SIZE, Note, NoteColor, NoteId, PLACEHOLDER_TEXT, Timestamp};
use crate::store::{self, MemoryStorage, STORAGE_KEY, Storage, StoreError};

use super::{App, Clock, InputMode, Message, Model, ToastLevel, update};

const NOW: i64 = 1_700_000_000_000;

fn create_test_model(notes: Vec<Note>) -> Model {
    let mut model = Model::new(notes, (80, 24));
    model.clock = Clock::Fixed(Timestamp::from_millis(NOW));
    model.rng = StdRng::seed_from_u64(7);
    model
}

fn note(id: i64, text: &str) -> Note {
    let mut note = Note::new(NoteId(id), NoteColor::Yellow, Timestamp::from_millis(id));
    note.text = text.to_string();
    note
}

/// Apply `msg` the way the event loop does: update, then side effects.
fn step(model: Model, storage: &mut dyn Storage, msg: Message) -> Model {
    let side_msg = msg.clone();
    let mut model = update(model, msg);
    App::handle_message_side_effects(&mut model, storage, &side_msg);
    model
}

fn stored_notes(storage: &dyn Storage) -> Vec<Note> {
    store::load_notes(storage)
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn click(col: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: col,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn mouse(kind: MouseEventKind, col: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column: col,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

struct FailingStorage;

impl Storage for FailingStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Io {
            path: PathBuf::from("/read-only/sticky-notes.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

// Board operations

#[test]
fn test_add_note_uses_defaults_and_persists() {
    let mut storage = MemoryStorage::new();
    let model = step(create_test_model(Vec::new()), &mut storage, Message::AddNote);

    assert_eq!(model.board.len(), 1);
    let added = &model.board.notes()[0];
    assert_eq!(added.id, NoteId(NOW));
    assert_eq!((added.x, added.y), DEFAULT_POSITION);
    assert_eq!((added.width, added.height), DEFAULT_SIZE);
    assert_eq!(added.text, PLACEHOLDER_TEXT);
    assert!(!added.pinned);
    assert_eq!(added.created_at, added.updated_at);
    assert!(NoteColor::PALETTE.contains(&added.color));
    assert_eq!(model.focused, Some(added.id));

    assert_eq!(stored_notes(&storage), model.board.notes());
    assert!(!model.needs_persist());
}

#[test]
fn test_adding_twice_in_same_millisecond_keeps_ids_unique() {
    let mut storage = MemoryStorage::new();
    let model = step(create_test_model(Vec::new()), &mut storage, Message::AddNote);
    let model = step(model, &mut storage, Message::AddNote);

    let ids: Vec<NoteId> = model.board.notes().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![NoteId(NOW), NoteId(NOW + 1)]);
}

#[test]
fn test_delete_removes_note_and_persists() {
    let mut storage = MemoryStorage::new();
    let model = create_test_model(vec![note(1, "a"), note(2, "b")]);
    let model = step(model, &mut storage, Message::DeleteNote(NoteId(1)));

    assert_eq!(model.board.len(), 1);
    assert_eq!(stored_notes(&storage).len(), 1);
    assert_eq!(stored_notes(&storage)[0].id, NoteId(2));
}

#[test]
fn test_delete_unknown_note_is_noop_without_write() {
    let mut storage = MemoryStorage::new();
    let model = create_test_model(vec![note(1, "a")]);
    let model = step(model, &mut storage, Message::DeleteNote(NoteId(99)));

    assert_eq!(model.board.len(), 1);
    assert_eq!(storage.get_item(STORAGE_KEY).unwrap(), None);
}

#[test]
fn test_toggle_pin_keeps_updated_at_and_round_trips() {
    let mut storage = MemoryStorage::new();
    let model = create_test_model(vec![note(1, "a")]);
    let before = model.board.get(NoteId(1)).unwrap().updated_at;

    let model = step(model, &mut storage, Message::TogglePin(NoteId(1)));
    let pinned = model.board.get(NoteId(1)).unwrap();
    assert!(pinned.pinned);
    assert_eq!(pinned.updated_at, before);
    assert!(stored_notes(&storage)[0].pinned);

    let model = step(model, &mut storage, Message::TogglePin(NoteId(1)));
    assert!(!model.board.get(NoteId(1)).unwrap().pinned);
}

#[test]
fn test_add_pin_then_filter_pinned_only() {
    let mut storage = MemoryStorage::new();
    let model = create_test_model(Vec::new());
    let model = step(model, &mut storage, Message::TogglePinnedOnly);
    assert!(model.visible_notes().is_empty());

    let model = step(model, &mut storage, Message::AddNote);
    let id = model.board.notes()[0].id;
    assert!(model.visible_notes().is_empty());

    let model = step(model, &mut storage, Message::TogglePin(id));
    let visible: Vec<NoteId> = model.visible_notes().iter().map(|n| n.id).collect();
    assert_eq!(visible, vec![id]);
}

#[test]
fn test_search_input_filters_case_insensitively() {
    let model = create_test_model(vec![note(1, "Buy MILK"), note(2, "call mom"), note(3, "milkshake")]);
    let model = update(model, Message::StartSearch);
    assert_eq!(model.mode, InputMode::Search);
    let model = update(model, Message::SearchInput("milk".to_string()));

    let visible: Vec<NoteId> = model.visible_notes().iter().map(|n| n.id).collect();
    assert_eq!(visible, vec![NoteId(1), NoteId(3)]);

    let model = update(model, Message::SubmitSearch);
    assert_eq!(model.mode, InputMode::Normal);
    assert_eq!(model.filter.search, "milk");

    let model = update(model, Message::ClearSearch);
    assert!(model.filter.search.is_empty());
    assert_eq!(model.visible_notes().len(), 3);
}

#[test]
fn test_focus_cycles_in_display_order() {
    let mut pinned = note(3, "c");
    pinned.pinned = true;
    let model = create_test_model(vec![note(1, "a"), note(2, "b"), pinned]);

    let model = update(model, Message::FocusNext);
    assert_eq!(model.focused, Some(NoteId(3)));
    let model = update(model, Message::FocusNext);
    assert_eq!(model.focused, Some(NoteId(1)));
    let model = update(model, Message::FocusPrev);
    assert_eq!(model.focused, Some(NoteId(3)));
    let model = update(model, Message::FocusPrev);
    assert_eq!(model.focused, Some(NoteId(2)));
}

// Gestures

#[test]
fn test_drag_moves_note_by_pointer_offset() {
    let mut storage = MemoryStorage::new();
    let model = create_test_model(vec![note(1, "a")]);

    // Card top-left is (100, 100) px; cell (10, 8) is (100, 140) px.
    let model = step(model, &mut storage, Message::StartDrag(NoteId(1), 10, 8));
    assert!(model.interaction.is_active());

    let model = step(model, &mut storage, Message::PointerMove(20, 10));
    let moved = model.board.get(NoteId(1)).unwrap();
    assert_eq!((moved.x, moved.y), (200.0, 140.0));
    assert_eq!(moved.updated_at, Timestamp::from_millis(NOW));
    assert_eq!(stored_notes(&storage)[0].x, 200.0);

    let model = step(model, &mut storage, Message::PointerUp);
    assert_eq!(model.interaction, Interaction::Idle);

    let model = step(model, &mut storage, Message::PointerMove(40, 15));
    assert_eq!(model.board.get(NoteId(1)).unwrap().x, 200.0);
}

#[test]
fn test_every_drag_frame_is_persisted() {
    let mut storage = MemoryStorage::new();
    let mut model = create_test_model(vec![note(1, "a")]);
    model = step(model, &mut storage, Message::StartDrag(NoteId(1), 10, 6));
    for col in 11..15 {
        model = step(model, &mut storage, Message::PointerMove(col, 6));
        let expected = f64::from(col) * 10.0;
        assert_eq!(stored_notes(&storage)[0].x, expected);
    }
}

#[test]
fn test_resize_follows_pointer_and_floors_at_minimum() {
    let mut storage = MemoryStorage::new();
    let model = create_test_model(vec![note(1, "a")]);
    let model = step(model, &mut storage, Message::StartResize(NoteId(1)));

    // Far corner of cell (32, 13) is (330, 260) px.
    let model = step(model, &mut storage, Message::PointerMove(32, 13));
    let resized = model.board.get(NoteId(1)).unwrap();
    assert_eq!((resized.width, resized.height), (230.0, 160.0));

    let model = step(model, &mut storage, Message::PointerMove(0, 1));
    let resized = model.board.get(NoteId(1)).unwrap();
    assert_eq!((resized.width, resized.height), (100.0, 100.0));
    assert_eq!((resized.x, resized.y), DEFAULT_POSITION);
}

#[test]
fn test_gesture_ends_on_every_abort_path() {
    let aborts = [
        Message::PointerUp,
        Message::CancelGesture,
        Message::Resize(100, 40),
        Message::DeleteNote(NoteId(1)),
        Message::Quit,
    ];
    for abort in aborts {
        let model = create_test_model(vec![note(1, "a")]);
        let model = update(model, Message::StartResize(NoteId(1)));
        assert!(model.interaction.is_active());
        let model = update(model, abort.clone());
        assert_eq!(model.interaction, Interaction::Idle, "after {abort:?}");
    }
}

#[test]
fn test_gesture_on_missing_note_does_not_start() {
    let model = create_test_model(vec![note(1, "a")]);
    let model = update(model, Message::StartDrag(NoteId(9), 0, 1));
    assert_eq!(model.interaction, Interaction::Idle);
    let model = update(model, Message::StartResize(NoteId(9)));
    assert_eq!(model.interaction, Interaction::Idle);
}

// Editing

#[test]
fn test_keystrokes_stay_local_until_commit() {
    let mut storage = MemoryStorage::new();
    let model = create_test_model(vec![note(1, "hi")]);
    let model = step(model, &mut storage, Message::StartEditing(NoteId(1)));
    assert_eq!(model.editing(), Some(NoteId(1)));

    let mut model = step(model, &mut storage, Message::EditorInsertChar('!'));
    assert_eq!(model.board.get(NoteId(1)).unwrap().text, "hi");
    assert_eq!(model.display_text(model.board.get(NoteId(1)).unwrap()), "hi!");
    assert_eq!(model.take_last_edit(), Some(NoteId(1)));
    assert_eq!(storage.get_item(STORAGE_KEY).unwrap(), None);

    model.clock = Clock::Fixed(Timestamp::from_millis(NOW + 5_000));
    let model = step(model, &mut storage, Message::CommitDraft(NoteId(1)));
    let committed = model.board.get(NoteId(1)).unwrap();
    assert_eq!(committed.text, "hi!");
    assert_eq!(committed.updated_at, Timestamp::from_millis(NOW + 5_000));
    assert_eq!(stored_notes(&storage)[0].text, "hi!");
}

#[test]
fn test_update_text_changes_only_text_and_updated_at() {
    let mut storage = MemoryStorage::new();
    let model = create_test_model(vec![note(1, "one"), note(2, "two")]);
    let before = model.board.notes().to_vec();

    let model = step(model, &mut storage, Message::StartEditing(NoteId(1)));
    let model = step(model, &mut storage, Message::EditorDeleteBack);
    let model = step(model, &mut storage, Message::EditorDeleteBack);
    let model = step(model, &mut storage, Message::EditorDeleteBack);
    let model = step(model, &mut storage, Message::EditorInsertChar('h'));
    let model = step(model, &mut storage, Message::EditorInsertChar('i'));
    let model = step(model, &mut storage, Message::CommitDraft(NoteId(1)));

    let after = model.board.notes();
    assert_eq!(after[1], before[1]);
    let mut expected = before[0].clone();
    expected.text = "hi".to_string();
    expected.updated_at = Timestamp::from_millis(NOW);
    assert_eq!(after[0], expected);
}

#[test]
fn test_commit_without_changes_does_not_write() {
    let mut storage = MemoryStorage::new();
    let model = create_test_model(vec![note(1, "same")]);
    let model = step(model, &mut storage, Message::StartEditing(NoteId(1)));
    let model = step(model, &mut storage, Message::EditorMoveHome);
    let model = step(model, &mut storage, Message::CommitDraft(NoteId(1)));

    assert_eq!(model.board.get(NoteId(1)).unwrap().updated_at, Timestamp::from_millis(1));
    assert_eq!(storage.get_item(STORAGE_KEY).unwrap(), None);
}

#[test]
fn test_stop_editing_keeps_pending_draft_for_commit() {
    let model = create_test_model(vec![note(1, "a")]);
    let model = update(model, Message::StartEditing(NoteId(1)));
    let model = update(model, Message::EditorInsertChar('b'));
    let model = update(model, Message::StopEditing);
    assert_eq!(model.mode, InputMode::Normal);
    assert_eq!(model.drafts.pending_ids(), vec![NoteId(1)]);

    let model = update(model, Message::CommitDraft(NoteId(1)));
    assert_eq!(model.board.get(NoteId(1)).unwrap().text, "ab");
}

#[test]
fn test_editing_is_ignored_during_gesture() {
    let model = create_test_model(vec![note(1, "a")]);
    let model = update(model, Message::StartEditing(NoteId(1)));
    let model = update(model, Message::StartDrag(NoteId(1), 10, 6));
    let mut model = update(model, Message::EditorInsertChar('z'));
    assert_eq!(model.take_last_edit(), None);
    assert_eq!(model.display_text(model.board.get(NoteId(1)).unwrap()), "a");
}

#[test]
fn test_deleting_edited_note_leaves_edit_mode() {
    let model = create_test_model(vec![note(1, "a")]);
    let model = update(model, Message::StartEditing(NoteId(1)));
    let model = update(model, Message::EditorInsertChar('b'));
    let model = update(model, Message::DeleteNote(NoteId(1)));
    assert_eq!(model.mode, InputMode::Normal);
    assert_eq!(model.focused, None);
    assert!(model.drafts.is_empty());
}

#[test]
fn test_edit_debouncer_is_armed_and_cancelled() {
    let mut debouncer = EditDebouncer::new(1_000);
    let model = create_test_model(vec![note(1, "a")]);
    let model = update(model, Message::StartEditing(NoteId(1)));

    let msg = Message::EditorInsertChar('b');
    let mut model = update(model, msg.clone());
    App::update_edit_debouncer(&mut model, &msg, 100, &mut debouncer);
    assert!(debouncer.is_pending());
    assert!(debouncer.take_ready(1_099).is_empty());

    let msg = Message::DeleteNote(NoteId(1));
    let mut model = update(model, msg.clone());
    App::update_edit_debouncer(&mut model, &msg, 200, &mut debouncer);
    assert!(!debouncer.is_pending());
}

// Store

#[test]
fn test_own_writes_are_not_reloaded() {
    let mut storage = MemoryStorage::new();
    let model = step(create_test_model(Vec::new()), &mut storage, Message::AddNote);
    let model = step(model, &mut storage, Message::StoreChanged);
    assert!(model.active_toast().is_none());
}

#[test]
fn test_external_change_reloads_board_and_resyncs_idle_drafts() {
    let mut storage = MemoryStorage::new();
    let model = create_test_model(vec![note(1, "old"), note(2, "two")]);
    let model = step(model, &mut storage, Message::StartEditing(NoteId(1)));
    assert!(model.drafts.get(NoteId(1)).is_some());

    let external = vec![note(1, "changed elsewhere")];
    store::save_notes(&mut storage, &external).unwrap();
    let model = step(model, &mut storage, Message::StoreChanged);

    assert_eq!(model.board.notes(), external.as_slice());
    assert_eq!(
        model.display_text(model.board.get(NoteId(1)).unwrap()),
        "changed elsewhere"
    );
    assert_eq!(
        model.active_toast(),
        Some(("Notes reloaded from disk", ToastLevel::Info))
    );
}

#[test]
fn test_external_change_keeps_pending_draft() {
    let mut storage = MemoryStorage::new();
    let model = create_test_model(vec![note(1, "old")]);
    let model = step(model, &mut storage, Message::StartEditing(NoteId(1)));
    let model = step(model, &mut storage, Message::EditorInsertChar('!'));

    store::save_notes(&mut storage, &[note(1, "external")]).unwrap();
    let model = step(model, &mut storage, Message::StoreChanged);
    assert_eq!(model.display_text(model.board.get(NoteId(1)).unwrap()), "old!");
}

#[test]
fn test_malformed_external_change_keeps_board() {
    let mut storage = MemoryStorage::new();
    storage.set_item(STORAGE_KEY, "{not json").unwrap();
    let model = create_test_model(vec![note(1, "keep me")]);
    let model = step(model, &mut storage, Message::StoreChanged);
    assert_eq!(model.board.len(), 1);
    assert!(model.active_toast().is_none());
}

#[test]
fn test_failed_write_shows_error_and_retries_later() {
    let mut failing = FailingStorage;
    let model = step(create_test_model(Vec::new()), &mut failing, Message::AddNote);
    let (message, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Error);
    assert!(message.starts_with("Save failed"));
    assert!(model.needs_persist());

    let mut storage = MemoryStorage::new();
    let model = step(model, &mut storage, Message::Redraw);
    assert!(!model.needs_persist());
    assert_eq!(stored_notes(&storage).len(), 1);
}

// Input mapping

#[test]
fn test_board_keys_map_to_messages() {
    let model = create_test_model(vec![note(1, "a")]);
    assert_eq!(App::handle_event(&key(KeyCode::Char('a')), &model), Some(Message::AddNote));
    assert_eq!(
        App::handle_event(&key(KeyCode::Char('p')), &model),
        Some(Message::TogglePinnedOnly)
    );
    assert_eq!(App::handle_event(&key(KeyCode::Char('/')), &model), Some(Message::StartSearch));
    assert_eq!(App::handle_event(&key(KeyCode::Char(' ')), &model), None);

    let model = update(model, Message::FocusNext);
    assert_eq!(
        App::handle_event(&key(KeyCode::Char(' ')), &model),
        Some(Message::TogglePin(NoteId(1)))
    );
    assert_eq!(
        App::handle_event(&key(KeyCode::Enter), &model),
        Some(Message::StartEditing(NoteId(1)))
    );
    assert_eq!(
        App::handle_event(&key(KeyCode::Char('x')), &model),
        Some(Message::DeleteNote(NoteId(1)))
    );
}

#[test]
fn test_ctrl_c_quits_from_any_mode() {
    let model = create_test_model(vec![note(1, "a")]);
    let model = update(model, Message::StartEditing(NoteId(1)));
    let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert_eq!(App::handle_event(&ctrl_c, &model), Some(Message::Quit));
}

#[test]
fn test_search_keys_edit_query() {
    let model = create_test_model(Vec::new());
    let model = update(model, Message::SearchInput("mil".to_string()));
    let model = update(model, Message::StartSearch);
    assert_eq!(
        App::handle_event(&key(KeyCode::Char('k')), &model),
        Some(Message::SearchInput("milk".to_string()))
    );
    assert_eq!(
        App::handle_event(&key(KeyCode::Backspace), &model),
        Some(Message::SearchInput("mi".to_string()))
    );
    assert_eq!(App::handle_event(&key(KeyCode::Esc), &model), Some(Message::ClearSearch));
}

#[test]
fn test_modified_chars_are_not_typed() {
    let alt_k = Event::Key(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::ALT));
    let ctrl_s = Event::Key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
    let shift_k = Event::Key(KeyEvent::new(KeyCode::Char('K'), KeyModifiers::SHIFT));

    let model = create_test_model(vec![note(1, "a")]);
    let searching = update(model, Message::StartSearch);
    assert_eq!(App::handle_event(&alt_k, &searching), None);
    assert_eq!(App::handle_event(&ctrl_s, &searching), None);
    assert_eq!(
        App::handle_event(&shift_k, &searching),
        Some(Message::SearchInput("K".to_string()))
    );

    let editing = update(searching, Message::StartEditing(NoteId(1)));
    assert_eq!(App::handle_event(&alt_k, &editing), None);
    assert_eq!(App::handle_event(&ctrl_s, &editing), None);
    assert_eq!(
        App::handle_event(&shift_k, &editing),
        Some(Message::EditorInsertChar('K'))
    );
}

#[test]
fn test_editor_keys_edit_draft() {
    let model = create_test_model(vec![note(1, "a")]);
    let model = update(model, Message::StartEditing(NoteId(1)));
    assert_eq!(
        App::handle_event(&key(KeyCode::Char('q')), &model),
        Some(Message::EditorInsertChar('q'))
    );
    assert_eq!(App::handle_event(&key(KeyCode::Enter), &model), Some(Message::EditorSplitLine));
    assert_eq!(App::handle_event(&key(KeyCode::Esc), &model), Some(Message::StopEditing));
}

#[test]
fn test_clicks_map_to_card_parts() {
    // Default card covers columns 10..=32 and rows 6..=13.
    let model = create_test_model(vec![note(1, "a")]);
    let id = NoteId(1);
    assert_eq!(App::handle_event(&click(11, 6), &model), Some(Message::TogglePin(id)));
    assert_eq!(App::handle_event(&click(31, 6), &model), Some(Message::DeleteNote(id)));
    assert_eq!(App::handle_event(&click(32, 13), &model), Some(Message::StartResize(id)));
    assert_eq!(App::handle_event(&click(15, 10), &model), Some(Message::StartEditing(id)));
    assert_eq!(App::handle_event(&click(10, 8), &model), Some(Message::StartDrag(id, 10, 8)));
    assert_eq!(App::handle_event(&click(60, 18), &model), Some(Message::ClearFocus));
}

#[test]
fn test_clicks_on_toolbar() {
    let model = create_test_model(Vec::new());
    assert_eq!(App::handle_event(&click(2, 0), &model), Some(Message::AddNote));
    assert_eq!(App::handle_event(&click(15, 0), &model), Some(Message::TogglePinnedOnly));
    assert_eq!(App::handle_event(&click(40, 0), &model), Some(Message::StartSearch));
}

#[test]
fn test_pointer_events_during_gesture() {
    let model = create_test_model(vec![note(1, "a")]);
    let model = update(model, Message::StartDrag(NoteId(1), 10, 8));

    assert_eq!(
        App::handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 12, 9), &model),
        Some(Message::PointerMove(12, 9))
    );
    assert_eq!(
        App::handle_event(&mouse(MouseEventKind::Moved, 13, 9), &model),
        Some(Message::PointerMove(13, 9))
    );
    assert_eq!(
        App::handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 13, 9), &model),
        Some(Message::PointerUp)
    );
    assert_eq!(App::handle_event(&Event::FocusLost, &model), Some(Message::CancelGesture));
    assert_eq!(App::handle_event(&key(KeyCode::Esc), &model), Some(Message::CancelGesture));
    assert_eq!(App::handle_event(&key(KeyCode::Char('a')), &model), None);
}

#[test]
fn test_focus_lost_while_idle_is_ignored() {
    let model = create_test_model(vec![note(1, "a")]);
    assert_eq!(App::handle_event(&Event::FocusLost, &model), None);
}

#[test]
fn test_help_swallows_next_key() {
    let model = create_test_model(Vec::new());
    let model = update(model, Message::ToggleHelp);
    assert!(model.help_visible);
    assert_eq!(App::handle_event(&key(KeyCode::Char('a')), &model), Some(Message::HideHelp));
    assert_eq!(App::handle_event(&click(2, 0), &model), Some(Message::HideHelp));
}
