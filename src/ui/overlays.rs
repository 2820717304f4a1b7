use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

fn help_lines(model: &Model) -> Vec<Line<'static>> {
    let section = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let path_or = |path: Option<&std::path::PathBuf>, missing: &str| {
        path.map_or_else(|| missing.to_string(), |p| p.display().to_string())
    };

    vec![
        Line::styled("Editor", section),
        Line::raw("  Type                Edit markdown"),
        Line::raw("  Arrows, Home/End    Move cursor"),
        Line::raw("  Ctrl+Left/Right     Word movement"),
        Line::raw("  Ctrl+Home/End       Buffer start / end"),
        Line::raw("  PageUp/PageDown     Page"),
        Line::raw(""),
        Line::styled("Preview", section),
        Line::raw("  j/k or Up/Down      Scroll"),
        Line::raw("  Space / b           Page down / up"),
        Line::raw("  g / G               Top / bottom"),
        Line::raw("  F2                  Toggle HTML source"),
        Line::raw(""),
        Line::styled("Layout", section),
        Line::raw("  Tab                 Switch pane"),
        Line::raw("  Alt+Left/Right      Move divider"),
        Line::raw("  Alt+=               Center divider"),
        Line::raw("  Drag divider        Resize panes"),
        Line::raw(""),
        Line::styled("Other", section),
        Line::raw("  F1                  Toggle help"),
        Line::raw("  Ctrl+Q / Ctrl+C     Quit"),
        Line::raw(""),
        Line::styled("Config", section),
        Line::raw(format!(
            "  Global: {}",
            path_or(model.config_global_path.as_ref(), "<unknown>")
        )),
        Line::raw(format!(
            "  Local override: {}",
            path_or(model.config_local_path.as_ref(), "<none>")
        )),
    ]
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let block = Block::default()
        .title("Help")
        .title_bottom(Line::styled(
            " any key closes ",
            Style::default().fg(Color::Indexed(245)),
        ))
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(help_lines(model)).block(block), popup);
}

/// Rectangle of at most `width` x `height` centered in `area`.
pub fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
