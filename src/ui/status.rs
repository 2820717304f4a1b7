use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Focus, Model, PreviewMode};

/// One-line summary of the layout, cursor and preview state.
pub fn status_text(model: &Model) -> String {
    let mode = model.layout_mode().label();
    let width = model.controller.viewport_width();
    let cursor = model.buffer.cursor();
    let focus = match model.focus {
        Focus::Editor => "editor",
        Focus::Preview => "preview",
    };
    let html = if model.preview_mode == PreviewMode::Html {
        " [HTML]"
    } else {
        ""
    };
    let fallback = if model.preview_fallback { " [plain]" } else { "" };
    let section = model
        .document
        .heading_before(model.preview_viewport.offset())
        .map_or_else(String::new, |heading| format!("  \u{a7} {}", heading.text));

    let percent = model.preview_viewport.scroll_percent();

    format!(
        " {mode} {width}px  Ln {}, Col {}  [{focus}]{html}{fallback}  {percent}%{section}  F1:help  Ctrl+Q:quit",
        cursor.line + 1,
        model.buffer.display_col() + 1,
    )
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    if area.is_empty() {
        return;
    }
    let bar = Paragraph::new(status_text(model))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(bar, area);
}
