use ratatui::layout::Rect;

use crate::card::Point;
use crate::note::{Note, NoteId};

/// Rows taken by the toolbar above the board.
pub const TOOLBAR_HEIGHT: u16 = 1;
/// Rows taken by the status bar below the board.
pub const STATUS_HEIGHT: u16 = 1;

pub const ADD_LABEL: &str = "[+ Add Note]";
pub const PINNED_ON_LABEL: &str = "[Showing Pinned]";
pub const PINNED_OFF_LABEL: &str = "[Show Only Pinned]";
pub const SEARCH_LABEL: &str = "Search: ";
pub const TITLE_LABEL: &str = "Sticky Notes";

/// How many pixels one terminal cell stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellScale {
    pub col_px: f64,
    pub row_px: f64,
}

impl Default for CellScale {
    fn default() -> Self {
        Self {
            col_px: 10.0,
            row_px: 20.0,
        }
    }
}

impl CellScale {
    pub fn new(col_px: f64, row_px: f64) -> Self {
        Self {
            col_px: col_px.max(1.0),
            row_px: row_px.max(1.0),
        }
    }

    /// Pixel position of the top-left corner of a screen cell.
    pub fn cell_origin(&self, area: Rect, col: u16, row: u16) -> Point {
        Point::new(
            f64::from(col.saturating_sub(area.x)) * self.col_px,
            f64::from(row.saturating_sub(area.y)) * self.row_px,
        )
    }

    /// Pixel position of the bottom-right corner of a screen cell, so a
    /// resize handle under the pointer stays inside the card.
    pub fn cell_far_corner(&self, area: Rect, col: u16, row: u16) -> Point {
        let origin = self.cell_origin(area, col, row);
        Point::new(origin.x + self.col_px, origin.y + self.row_px)
    }

    pub fn geometry(&self, note: &Note, area: Rect) -> CardGeometry {
        let left = clamp_cells(note.x / self.col_px) + i32::from(area.x);
        let top = clamp_cells(note.y / self.row_px) + i32::from(area.y);
        let width = (note.width / self.col_px).round().clamp(3.0, f64::from(u16::MAX)) as u16;
        let height = (note.height / self.row_px).round().clamp(3.0, f64::from(u16::MAX)) as u16;
        CardGeometry {
            id: note.id,
            left,
            top,
            width,
            height,
        }
    }
}

/// Card origins are kept within this many cells of the board so edge math
/// cannot overflow.
const MAX_CARD_OFFSET: f64 = 1_000_000.0;

fn clamp_cells(cells: f64) -> i32 {
    if cells.is_nan() {
        return 0;
    }
    cells.floor().clamp(-MAX_CARD_OFFSET, MAX_CARD_OFFSET) as i32
}

/// The part of a card under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPart {
    Pin,
    Delete,
    Text,
    ResizeHandle,
    /// Border and header: pressing here starts a drag.
    Body,
}

/// A card's footprint in screen cells. May extend past the board edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardGeometry {
    pub id: NoteId,
    pub left: i32,
    pub top: i32,
    pub width: u16,
    pub height: u16,
}

impl CardGeometry {
    const fn right(&self) -> i32 {
        self.left.saturating_add(self.width as i32)
    }

    const fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height as i32)
    }

    /// Rows inside the border used by the created/edited lines.
    pub const fn timestamp_rows(&self) -> u16 {
        let inner = self.height.saturating_sub(2);
        let rows = inner.saturating_sub(1);
        if rows < 2 { rows } else { 2 }
    }

    /// First row, relative to the card, of the text area.
    pub const fn text_top(&self) -> u16 {
        1 + self.timestamp_rows()
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        let (col, row) = (i32::from(col), i32::from(row));
        col >= self.left && col < self.right() && row >= self.top && row < self.bottom()
    }

    /// The on-screen part of the card, clipped to `area`.
    pub fn visible(&self, area: Rect) -> Option<Rect> {
        let left = self.left.max(i32::from(area.x));
        let top = self.top.max(i32::from(area.y));
        let right = self.right().min(i32::from(area.x) + i32::from(area.width));
        let bottom = self.bottom().min(i32::from(area.y) + i32::from(area.height));
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect::new(
            left as u16,
            top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        ))
    }

    pub fn part_at(&self, col: u16, row: u16) -> Option<CardPart> {
        if !self.contains(col, row) {
            return None;
        }
        let dx = (i32::from(col) - self.left) as u16;
        let dy = (i32::from(row) - self.top) as u16;
        let last_col = self.width - 1;
        let last_row = self.height - 1;
        let part = if dx == last_col && dy == last_row {
            CardPart::ResizeHandle
        } else if dy == 0 && dx == 1 {
            CardPart::Pin
        } else if dy == 0 && dx + 1 == last_col {
            CardPart::Delete
        } else if dy >= self.text_top() && dy < last_row && dx > 0 && dx < last_col {
            CardPart::Text
        } else {
            CardPart::Body
        };
        Some(part)
    }
}

/// Screen geometry of the board between the toolbar and the status bar.
pub fn board_area(width: u16, height: u16) -> Rect {
    Rect::new(
        0,
        TOOLBAR_HEIGHT,
        width,
        height.saturating_sub(TOOLBAR_HEIGHT + STATUS_HEIGHT),
    )
}

/// Topmost card under a cell. Cards later in `view` are drawn on top.
pub fn hit_test(
    view: &[&Note],
    scale: &CellScale,
    area: Rect,
    col: u16,
    row: u16,
) -> Option<(NoteId, CardPart)> {
    if !area.contains(ratatui::layout::Position::new(col, row)) {
        return None;
    }
    view.iter().rev().find_map(|note| {
        let geometry = scale.geometry(note, area);
        geometry.part_at(col, row).map(|part| (note.id, part))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarItem {
    AddNote,
    PinnedOnly,
    Search,
}

/// Clickable toolbar segments for a terminal of `width` columns.
pub fn toolbar_segments(width: u16, pinned_only: bool) -> Vec<(ToolbarItem, Rect)> {
    let pinned_label = if pinned_only {
        PINNED_ON_LABEL
    } else {
        PINNED_OFF_LABEL
    };
    let add_w = ADD_LABEL.len() as u16;
    let pinned_w = pinned_label.len() as u16;
    let add = Rect::new(1, 0, add_w, 1);
    let pinned = Rect::new(add.right() + 1, 0, pinned_w, 1);
    let title_w = TITLE_LABEL.len() as u16 + 2;
    let search_x = pinned.right() + 1;
    let search_w = width.saturating_sub(search_x + title_w).max(SEARCH_LABEL.len() as u16 + 4);
    let search = Rect::new(search_x, 0, search_w, 1);
    vec![
        (ToolbarItem::AddNote, add),
        (ToolbarItem::PinnedOnly, pinned),
        (ToolbarItem::Search, search),
    ]
}

pub fn toolbar_hit(width: u16, pinned_only: bool, col: u16, row: u16) -> Option<ToolbarItem> {
    if row != 0 {
        return None;
    }
    toolbar_segments(width, pinned_only)
        .into_iter()
        .find(|(_, rect)| col >= rect.x && col < rect.right())
        .map(|(item, _)| item)
}
