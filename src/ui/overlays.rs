use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

const KEY_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Board",
        &[
            ("a / n", "Add note"),
            ("p", "Toggle pinned only"),
            ("/", "Search"),
            ("Tab / Shift-Tab", "Focus next / previous card"),
            ("Esc", "Clear focus"),
        ],
    ),
    (
        "Focused card",
        &[
            ("Enter / e", "Edit text"),
            ("Space", "Pin / unpin"),
            ("x / Delete", "Delete"),
        ],
    ),
    (
        "Editing",
        &[
            ("Arrows, Home/End", "Move cursor"),
            ("Enter", "New line"),
            ("Esc", "Done"),
        ],
    ),
    (
        "Mouse",
        &[
            ("Drag card border", "Move"),
            ("Drag ◢", "Resize"),
            ("Click ○ / ×", "Pin / delete"),
            ("Click text", "Edit"),
        ],
    ),
    (
        "Other",
        &[
            ("Ctrl-l", "Redraw"),
            ("q / Ctrl-c", "Quit"),
            ("?", "Toggle help"),
        ],
    ),
];

pub(super) fn help_lines(model: &Model) -> Vec<Line<'static>> {
    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines = Vec::new();
    for (title, keys) in KEY_SECTIONS {
        lines.push(Line::styled(*title, section_style));
        for (key, action) in *keys {
            lines.push(Line::raw(format!("  {key:<20}{action}")));
        }
        lines.push(Line::raw(""));
    }

    let show = |path: Option<&std::path::PathBuf>, missing: &str| {
        path.map_or_else(|| missing.to_string(), |p| p.display().to_string())
    };
    lines.push(Line::styled("Files", section_style));
    lines.push(Line::raw(format!(
        "  Notes: {}",
        show(model.store_path.as_ref(), "<memory>")
    )));
    lines.push(Line::raw(format!(
        "  Global config: {}",
        show(model.config_global_path.as_ref(), "<unknown>")
    )));
    lines.push(Line::raw(format!(
        "  Local override: {}",
        show(model.config_local_path.as_ref(), "<none>")
    )));
    lines
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Inner area: border(1) + padding(1) on each side = 4
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );
    let content_height = inner.height.saturating_sub(1);
    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height);
    frame.render_widget(Paragraph::new(help_lines(model)), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height, inner.width, 1);
    let footer = Line::styled("any key or click closes", dim_style);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
