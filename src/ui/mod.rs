//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`layout`]: Pixel to cell mapping, card geometry and hit testing
//! - [`style`]: Card and chrome colors

pub mod layout;
pub mod style;

mod overlays;
mod render;
mod status;

pub use layout::{
    CardGeometry, CardPart, CellScale, ToolbarItem, board_area, hit_test, toolbar_hit,
    toolbar_segments,
};
pub use render::render;
