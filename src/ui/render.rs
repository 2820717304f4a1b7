use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Padding, Paragraph};

use crate::app::{Focus, Model};
use crate::preview::{EDITOR_LABEL, LayoutMode};

use super::style::{
    PanePalette, PreviewTheme, pane_palette, style_for_inline, style_for_line_type,
};
use super::{PREVIEW_PADDING, PaneLayout, overlays, status};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let layout = model.pane_layout();
    let palette = pane_palette(layout.mode);
    let theme = PreviewTheme::detect();

    render_editor_label(frame, &layout, &palette);
    render_editor_text(model, frame, &layout, &palette);
    render_separator(model, frame, &layout, &palette);
    render_preview(model, frame, layout.preview, theme);
    status::render_status_bar(model, frame, layout.status);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_editor_label(frame: &mut Frame, layout: &PaneLayout, palette: &PanePalette) {
    let label = Paragraph::new(format!(" {}", EDITOR_LABEL.to_uppercase())).style(palette.label);
    frame.render_widget(label, layout.editor_label);
}

fn render_editor_text(model: &Model, frame: &mut Frame, layout: &PaneLayout, palette: &PanePalette) {
    let area = layout.editor_text;
    let buffer = &model.buffer;
    let cursor = buffer.cursor();
    let show_cursor = model.focus == Focus::Editor && !model.help_visible;

    let rows = model.editor_viewport.visible_range();
    let mut content: Vec<Line> = Vec::with_capacity(rows.len());
    for line_idx in rows {
        let text = buffer.line_at(line_idx).unwrap_or_default();
        if show_cursor && line_idx == cursor.line {
            content.push(cursor_line(&text, cursor.col, palette.cursor));
        } else {
            content.push(Line::raw(text));
        }
    }

    let editor = Paragraph::new(content)
        .style(palette.text)
        .scroll((0, model.editor_scroll_x()));
    frame.render_widget(Clear, area);
    frame.render_widget(editor, area);
}

/// Split `text` around the byte offset `col` and paint the cell under it.
fn cursor_line(text: &str, col: usize, cursor_style: Style) -> Line<'static> {
    let mut col = col.min(text.len());
    while !text.is_char_boundary(col) {
        col -= 1;
    }
    let (before, rest) = text.split_at(col);
    let mut chars = rest.chars();
    let under = chars.next().map_or_else(|| " ".to_string(), String::from);
    let after = chars.as_str();

    let mut spans = Vec::with_capacity(3);
    if !before.is_empty() {
        spans.push(Span::raw(before.to_string()));
    }
    spans.push(Span::styled(under, cursor_style));
    if !after.is_empty() {
        spans.push(Span::raw(after.to_string()));
    }
    Line::from(spans)
}

fn render_separator(model: &Model, frame: &mut Frame, layout: &PaneLayout, palette: &PanePalette) {
    let area = layout.separator;
    if area.is_empty() {
        return;
    }
    match layout.mode {
        LayoutMode::Split => {
            let style = if model.splitter.is_dragging() {
                palette.resizer.fg(Color::White)
            } else {
                palette.resizer
            };
            let bar: Vec<Line> = (0..area.height).map(|_| Line::raw("\u{2502}")).collect();
            frame.render_widget(Paragraph::new(bar).style(style), area);
        }
        LayoutMode::Stacked => {
            frame.render_widget(Paragraph::new("").style(palette.resizer), area);
        }
    }
}

fn render_preview(model: &Model, frame: &mut Frame, area: Rect, theme: PreviewTheme) {
    let rows = model.preview_viewport.visible_range();
    let visible = model.document.visible_lines(rows.start, rows.len());

    let content: Vec<Line> = visible
        .iter()
        .map(|line| {
            let line_style = style_for_line_type(line.line_type(), theme);
            line.spans().map_or_else(
                || Line::styled(line.content().to_string(), line_style),
                |spans| {
                    Line::from(
                        spans
                            .iter()
                            .map(|span| {
                                Span::styled(
                                    span.text().to_string(),
                                    style_for_inline(line_style, span.style(), theme),
                                )
                            })
                            .collect::<Vec<_>>(),
                    )
                },
            )
        })
        .collect();

    let block = Block::default().padding(Padding::horizontal(PREVIEW_PADDING));
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content).block(block), area);
}
