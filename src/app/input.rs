use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::model::InputMode;
use crate::app::{App, Message, Model};
use crate::card::Direction;
use crate::ui::{CardPart, ToolbarItem, hit_test, toolbar_hit};

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            Event::FocusLost if model.interaction.is_active() => Some(Message::CancelGesture),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Message::Quit);
        }
        if key.code == KeyCode::Char('l') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Message::Redraw);
        }

        if model.help_visible {
            return match key.code {
                KeyCode::Char('q') => Some(Message::Quit),
                _ => Some(Message::HideHelp),
            };
        }

        if model.interaction.is_active() {
            // Keys other than Esc are ignored until the gesture ends.
            return (key.code == KeyCode::Esc).then_some(Message::CancelGesture);
        }

        match model.mode {
            InputMode::Search => Self::handle_search_key(key, model),
            InputMode::Editing(_) => Self::handle_editor_key(key),
            InputMode::Normal => Self::handle_board_key(key, model),
        }
    }

    fn handle_board_key(key: KeyEvent, model: &Model) -> Option<Message> {
        match key.code {
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Char('a' | 'n') => Some(Message::AddNote),
            KeyCode::Char('p') => Some(Message::TogglePinnedOnly),
            KeyCode::Char('/') => Some(Message::StartSearch),
            KeyCode::Char('?') => Some(Message::ToggleHelp),
            KeyCode::Tab => Some(Message::FocusNext),
            KeyCode::BackTab => Some(Message::FocusPrev),
            KeyCode::Esc => model.focused.map(|_| Message::ClearFocus),
            KeyCode::Enter | KeyCode::Char('e') => model.focused.map(Message::StartEditing),
            KeyCode::Char(' ') => model.focused.map(Message::TogglePin),
            KeyCode::Char('x') | KeyCode::Delete => model.focused.map(Message::DeleteNote),
            _ => None,
        }
    }

    fn handle_search_key(key: KeyEvent, model: &Model) -> Option<Message> {
        match key.code {
            KeyCode::Esc => Some(Message::ClearSearch),
            KeyCode::Enter => Some(Message::SubmitSearch),
            KeyCode::Backspace => {
                let mut query = model.filter.search.clone();
                query.pop();
                Some(Message::SearchInput(query))
            }
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                let mut query = model.filter.search.clone();
                query.push(c);
                Some(Message::SearchInput(query))
            }
            _ => None,
        }
    }

    fn handle_editor_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Esc => Some(Message::StopEditing),
            KeyCode::Enter => Some(Message::EditorSplitLine),
            KeyCode::Backspace => Some(Message::EditorDeleteBack),
            KeyCode::Delete => Some(Message::EditorDeleteForward),
            KeyCode::Left => Some(Message::EditorMoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::EditorMoveCursor(Direction::Right)),
            KeyCode::Up => Some(Message::EditorMoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::EditorMoveCursor(Direction::Down)),
            KeyCode::Home => Some(Message::EditorMoveHome),
            KeyCode::End => Some(Message::EditorMoveEnd),
            KeyCode::Tab => Some(Message::EditorInsertChar('\t')),
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                Some(Message::EditorInsertChar(c))
            }
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return matches!(mouse.kind, MouseEventKind::Down(_)).then_some(Message::HideHelp);
        }

        if model.interaction.is_active() {
            return match mouse.kind {
                MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                    Some(Message::PointerMove(mouse.column, mouse.row))
                }
                MouseEventKind::Up(_) => Some(Message::PointerUp),
                // A press while a gesture is live means we missed its release.
                MouseEventKind::Down(_) => Some(Message::CancelGesture),
                _ => None,
            };
        }

        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return None;
        }

        if let Some(item) = toolbar_hit(
            model.terminal_size.0,
            model.filter.pinned_only,
            mouse.column,
            mouse.row,
        ) {
            return Some(match item {
                ToolbarItem::AddNote => Message::AddNote,
                ToolbarItem::PinnedOnly => Message::TogglePinnedOnly,
                ToolbarItem::Search => Message::StartSearch,
            });
        }

        let view = model.visible_notes();
        let area = model.board_area();
        let Some((id, part)) = hit_test(&view, &model.scale, area, mouse.column, mouse.row) else {
            return area
                .contains(ratatui::layout::Position::new(mouse.column, mouse.row))
                .then_some(Message::ClearFocus);
        };
        Some(match part {
            CardPart::Pin => Message::TogglePin(id),
            CardPart::Delete => Message::DeleteNote(id),
            CardPart::Text => Message::StartEditing(id),
            CardPart::ResizeHandle => Message::StartResize(id),
            CardPart::Body => Message::StartDrag(id, mouse.column, mouse.row),
        })
    }
}
