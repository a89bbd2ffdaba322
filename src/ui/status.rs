use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{InputMode, Model};
use crate::card::Interaction;

use super::style;

fn mode_label(model: &Model) -> &'static str {
    match (model.interaction, model.mode) {
        (Interaction::Dragging { .. }, _) => "DRAG",
        (Interaction::Resizing { .. }, _) => "RESIZE",
        (_, InputMode::Editing(_)) => "EDIT",
        (_, InputMode::Search) => "SEARCH",
        (_, InputMode::Normal) => "BOARD",
    }
}

pub(super) fn status_text(model: &Model) -> String {
    let total = model.board.len();
    let shown = model.visible_notes().len();
    let pinned = model.board.pinned_count();
    let filter_indicator = if model.filter.is_active() {
        format!("  showing {shown}/{total}")
    } else {
        String::new()
    };
    let unsaved = model.drafts.pending_ids().len();
    let unsaved_indicator = if unsaved > 0 {
        format!("  [{unsaved} unsaved]")
    } else {
        String::new()
    };
    let watch_indicator = if model.watch_enabled {
        " [watching]"
    } else {
        ""
    };
    let hint = match model.mode {
        InputMode::Editing(_) => "Esc: done",
        InputMode::Search => "Enter: keep  Esc: clear",
        InputMode::Normal => "?:help",
    };

    format!(
        " {}  {total} notes ({pinned} pinned){filter_indicator}{unsaved_indicator}{watch_indicator}  {hint}",
        mode_label(model)
    )
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let status_bar = Paragraph::new(status_text(model)).style(style::status_bar());
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = style::toast(level);
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
