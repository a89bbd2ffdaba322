use crate::board::Board;
use crate::note::{MIN_NOTE_SIZE, Note, NoteId, NotePatch};

/// A pointer position on the board, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// What the pointer is currently doing to a card.
///
/// Only one gesture is live at a time. Anything other than a pointer move
/// while a gesture is active (release, focus loss, Esc, terminal resize,
/// deletion of the note) returns the board to [`Interaction::Idle`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// Moving a card; `offset` is the pointer position minus the card's
    /// top-left at press time.
    Dragging { id: NoteId, offset: Point },
    /// Resizing a card from its bottom-right handle.
    Resizing { id: NoteId },
}

impl Interaction {
    pub fn start_drag(note: &Note, pointer: Point) -> Self {
        Self::Dragging {
            id: note.id,
            offset: Point::new(pointer.x - note.x, pointer.y - note.y),
        }
    }

    pub const fn start_resize(id: NoteId) -> Self {
        Self::Resizing { id }
    }

    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    pub const fn note_id(&self) -> Option<NoteId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Resizing { id } => Some(*id),
        }
    }

    /// The update a pointer move produces, if a gesture is active and its
    /// note still exists.
    pub fn pointer_moved(&self, board: &Board, pointer: Point) -> Option<(NoteId, NotePatch)> {
        match *self {
            Self::Idle => None,
            Self::Dragging { id, offset } => {
                board.get(id)?;
                let pos = drag_position(pointer, offset);
                Some((id, NotePatch::position(pos.x, pos.y)))
            }
            Self::Resizing { id } => {
                let note = board.get(id)?;
                let (width, height) = resize_extent(pointer, Point::new(note.x, note.y));
                Some((id, NotePatch::size(width, height)))
            }
        }
    }
}

/// New top-left of a dragged card.
pub fn drag_position(pointer: Point, offset: Point) -> Point {
    Point::new(pointer.x - offset.x, pointer.y - offset.y)
}

/// Size of a card whose top-left is `origin` when the handle is at
/// `pointer`. Both axes are floored at [`MIN_NOTE_SIZE`]; there is no ceiling.
pub fn resize_extent(pointer: Point, origin: Point) -> (f64, f64) {
    (
        (pointer.x - origin.x).max(MIN_NOTE_SIZE),
        (pointer.y - origin.y).max(MIN_NOTE_SIZE),
    )
}
