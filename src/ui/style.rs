//! Colors for cards and chrome.
//!
//! Card backgrounds are the note's palette entry as true color. Card text is
//! always dark since every palette entry is a light pastel.

use ratatui::style::{Color, Modifier, Style};

use crate::app::ToastLevel;
use crate::note::NoteColor;

pub fn card_background(color: NoteColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

pub fn card_text(color: NoteColor) -> Style {
    Style::default().bg(card_background(color)).fg(Color::Black)
}

pub fn card_border(color: NoteColor, focused: bool) -> Style {
    let style = Style::default().bg(card_background(color));
    if focused {
        style.fg(Color::Black).add_modifier(Modifier::BOLD)
    } else {
        style.fg(Color::Indexed(243))
    }
}

/// Timestamps and other secondary card text.
pub fn card_meta(color: NoteColor) -> Style {
    Style::default()
        .bg(card_background(color))
        .fg(Color::Indexed(240))
        .add_modifier(Modifier::ITALIC)
}

pub fn pin_marker(color: NoteColor, pinned: bool) -> Style {
    let style = Style::default().bg(card_background(color));
    if pinned {
        style.fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        style.fg(Color::Indexed(243))
    }
}

pub fn toolbar() -> Style {
    Style::default().bg(Color::Indexed(236)).fg(Color::White)
}

pub fn toolbar_button(active: bool) -> Style {
    if active {
        Style::default()
            .bg(Color::Yellow)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        toolbar().add_modifier(Modifier::BOLD)
    }
}

pub fn search_field(focused: bool) -> Style {
    if focused {
        Style::default().bg(Color::White).fg(Color::Black)
    } else {
        Style::default().bg(Color::Indexed(239)).fg(Color::White)
    }
}

pub fn status_bar() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

pub fn toast(level: ToastLevel) -> (&'static str, Style) {
    match level {
        ToastLevel::Info => ("[info]", status_bar()),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    }
}
