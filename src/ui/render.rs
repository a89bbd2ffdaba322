use ratatui::buffer::Buffer;
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{InputMode, Model};
use crate::note::Note;

use super::layout::{
    ADD_LABEL, CardGeometry, PINNED_OFF_LABEL, PINNED_ON_LABEL, SEARCH_LABEL, STATUS_HEIGHT,
    TITLE_LABEL, ToolbarItem, toolbar_segments,
};
use super::{overlays, status, style};

const PIN_ON: &str = "●";
const PIN_OFF: &str = "○";
const DELETE_MARK: &str = "×";
const RESIZE_MARK: &str = "◢";

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();

    render_toolbar(model, frame, Rect { height: 1, ..area });

    let board = model.board_area().intersection(area);
    let view = model.visible_notes();
    if view.is_empty() {
        render_empty_board(model, frame, board);
    }
    for note in &view {
        render_card(model, note, frame, board);
    }

    let status_area = Rect {
        y: area.y + area.height.saturating_sub(STATUS_HEIGHT),
        height: STATUS_HEIGHT.min(area.height),
        ..area
    };
    status::render_status_bar(model, frame, status_area);
    if model.active_toast().is_some() && board.height > 0 {
        let toast_area = Rect {
            y: board.bottom() - 1,
            height: 1,
            ..board
        };
        status::render_toast_bar(model, frame, toast_area);
    }

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_toolbar(model: &Model, frame: &mut Frame, area: Rect) {
    frame.render_widget(Paragraph::new("").style(style::toolbar()), area);
    let searching = model.mode == InputMode::Search;

    for (item, rect) in toolbar_segments(area.width, model.filter.pinned_only) {
        let rect = rect.intersection(area);
        if rect.is_empty() {
            continue;
        }
        let widget = match item {
            ToolbarItem::AddNote => Paragraph::new(ADD_LABEL).style(style::toolbar_button(false)),
            ToolbarItem::PinnedOnly => {
                let label = if model.filter.pinned_only {
                    PINNED_ON_LABEL
                } else {
                    PINNED_OFF_LABEL
                };
                Paragraph::new(label).style(style::toolbar_button(model.filter.pinned_only))
            }
            ToolbarItem::Search => {
                let field = format!("{SEARCH_LABEL}{}", model.filter.search);
                if searching {
                    let query_width = display_width(&field) as u16;
                    let x = (rect.x + query_width).min(rect.right().saturating_sub(1));
                    frame.set_cursor_position(Position::new(x, rect.y));
                }
                Paragraph::new(field).style(style::search_field(searching))
            }
        };
        frame.render_widget(widget, rect);
    }

    let title_width = TITLE_LABEL.len() as u16;
    if area.width > title_width + 1 {
        let title = Rect::new(area.right() - title_width - 1, area.y, title_width, 1);
        frame.render_widget(
            Paragraph::new(TITLE_LABEL).style(style::toolbar().add_modifier(Modifier::BOLD)),
            title,
        );
    }
}

fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn render_empty_board(model: &Model, frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let message = if model.board.is_empty() {
        "No notes yet. Press a or click [+ Add Note]."
    } else {
        "No notes match the current filter."
    };
    let row = Rect {
        y: area.y + area.height / 2,
        height: 1,
        ..area
    };
    frame.render_widget(
        Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Indexed(245))),
        row,
    );
}

/// Draws into a card's cells, clipped to the board.
struct CardCanvas<'a> {
    buf: &'a mut Buffer,
    clip: Rect,
    left: i32,
    top: i32,
}

impl CardCanvas<'_> {
    fn screen_pos(&self, dx: u16, dy: u16) -> Option<(u16, u16)> {
        let x = u16::try_from(self.left.saturating_add(i32::from(dx))).ok()?;
        let y = u16::try_from(self.top.saturating_add(i32::from(dy))).ok()?;
        self.clip.contains(Position::new(x, y)).then_some((x, y))
    }

    fn put(&mut self, dx: u16, dy: u16, symbol: &str, style: Style) {
        if let Some(pos) = self.screen_pos(dx, dy)
            && let Some(cell) = self.buf.cell_mut(pos)
        {
            cell.set_symbol(symbol).set_style(style);
        }
    }

    /// Write `text` from `dx`, stopping before `max_width` columns.
    fn put_str(&mut self, dx: u16, dy: u16, text: &str, max_width: u16, style: Style) {
        let mut used = 0u16;
        let mut tmp = [0u8; 4];
        for ch in text.chars() {
            let ch = if ch == '\t' { ' ' } else { ch };
            let width = ch.width().unwrap_or(0) as u16;
            if width == 0 {
                continue;
            }
            if used + width > max_width {
                break;
            }
            self.put(dx + used, dy, ch.encode_utf8(&mut tmp), style);
            if width == 2 {
                // The right half of a wide char must be blank for the diff.
                if let Some(pos) = self.screen_pos(dx + used + 1, dy)
                    && let Some(cell) = self.buf.cell_mut(pos)
                {
                    cell.reset();
                    cell.set_style(style);
                }
            }
            used += width;
        }
    }
}

fn render_card(model: &Model, note: &Note, frame: &mut Frame, board: Rect) {
    let geometry = model.scale.geometry(note, board);
    let Some(visible) = geometry.visible(board) else {
        return;
    };
    let focused = model.focused == Some(note.id);
    let editing = model.editing() == Some(note.id);

    frame.render_widget(Clear, visible);
    frame.buffer_mut().set_style(visible, style::card_text(note.color));

    let mut canvas = CardCanvas {
        buf: frame.buffer_mut(),
        clip: visible,
        left: geometry.left,
        top: geometry.top,
    };
    draw_frame(&mut canvas, &geometry, note, focused || editing);
    draw_timestamps(&mut canvas, &geometry, note);
    let cursor = draw_text(&mut canvas, &geometry, model, note, editing);

    if let Some((x, y)) = cursor {
        frame.set_cursor_position(Position::new(x, y));
    }
}

fn draw_frame(canvas: &mut CardCanvas<'_>, geometry: &CardGeometry, note: &Note, focused: bool) {
    let border = style::card_border(note.color, focused);
    let (horizontal, vertical, corners) = if focused {
        ("━", "┃", ["┏", "┓", "┗"])
    } else {
        ("─", "│", ["┌", "┐", "└"])
    };
    let last_col = geometry.width - 1;
    let last_row = geometry.height - 1;

    for dx in 1..last_col {
        canvas.put(dx, 0, horizontal, border);
        canvas.put(dx, last_row, horizontal, border);
    }
    for dy in 1..last_row {
        canvas.put(0, dy, vertical, border);
        canvas.put(last_col, dy, vertical, border);
    }
    canvas.put(0, 0, corners[0], border);
    canvas.put(last_col, 0, corners[1], border);
    canvas.put(0, last_row, corners[2], border);
    canvas.put(last_col, last_row, RESIZE_MARK, border);

    let pin = if note.pinned { PIN_ON } else { PIN_OFF };
    canvas.put(1, 0, pin, style::pin_marker(note.color, note.pinned));
    if last_col > 2 {
        canvas.put(last_col - 1, 0, DELETE_MARK, border);
    }
}

fn draw_timestamps(canvas: &mut CardCanvas<'_>, geometry: &CardGeometry, note: &Note) {
    let inner = geometry.width.saturating_sub(2);
    let meta = style::card_meta(note.color);
    let lines = [
        format!("Created: {}", note.created_at.to_local_string()),
        format!("Edited: {}", note.updated_at.to_local_string()),
    ];
    for (dy, line) in (1..=geometry.timestamp_rows()).zip(lines.iter()) {
        canvas.put_str(1, dy, line, inner, meta);
    }
}

/// Draw the card body. Returns the screen cursor when the card is edited.
fn draw_text(
    canvas: &mut CardCanvas<'_>,
    geometry: &CardGeometry,
    model: &Model,
    note: &Note,
    editing: bool,
) -> Option<(u16, u16)> {
    let inner_width = geometry.width.saturating_sub(2);
    let text_top = geometry.text_top();
    let rows = geometry.height.saturating_sub(1).saturating_sub(text_top);
    if inner_width == 0 || rows == 0 {
        return None;
    }

    let draft = model.drafts.get(note.id);
    let cursor = draft
        .filter(|_| editing)
        .map(|draft| {
            let cursor = draft.buffer().cursor();
            (cursor.line, cursor.col)
        });
    let text = model.display_text(note);
    let (lines, cursor) = wrap_text(&text, usize::from(inner_width), cursor);

    let rows = usize::from(rows);
    let scroll = cursor.map_or(0, |(row, _)| (row + 1).saturating_sub(rows));
    let body = style::card_text(note.color);
    for (offset, line) in lines.iter().skip(scroll).take(rows).enumerate() {
        canvas.put_str(1, text_top + offset as u16, line, inner_width, body);
    }

    let (row, col) = cursor?;
    let dy = text_top + (row - scroll) as u16;
    let dx = 1 + (col as u16).min(inner_width - 1);
    canvas.screen_pos(dx, dy)
}

/// Hard-wrap `text` to `width` columns.
///
/// `cursor` is a (line, byte column) position in `text`; the result maps it
/// to a (row, display column) position in the wrapped lines.
pub(super) fn wrap_text(
    text: &str,
    width: usize,
    cursor: Option<(usize, usize)>,
) -> (Vec<String>, Option<(usize, usize)>) {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut mapped = None;

    for (line_idx, line) in text.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let cursor_col = cursor
            .filter(|(cursor_line, _)| *cursor_line == line_idx)
            .map(|(_, col)| col.min(line.len()));

        let mut row = String::new();
        let mut row_width = 0usize;
        for (byte_idx, ch) in line.char_indices() {
            let ch_width = if ch == '\t' { 1 } else { ch.width().unwrap_or(0) };
            if row_width + ch_width > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            if cursor_col == Some(byte_idx) {
                mapped = Some((rows.len(), row_width));
            }
            row.push(ch);
            row_width += ch_width;
        }
        if cursor_col == Some(line.len()) {
            mapped = Some((rows.len(), row_width.min(width - 1)));
        }
        rows.push(row);
    }

    (rows, mapped)
}
