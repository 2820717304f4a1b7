use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::style::{Color, Modifier};

use super::*;
use crate::app::{Focus, Message, Model, update};
use crate::document::ComrakConverter;
use crate::preview::layout::DEFAULT_CELL_WIDTH_PX;
use crate::preview::{EditorState, PreviewController};

const SOURCE: &str = "# Hello\n\nThis is **bold** text.";

fn model_with(text: &str, columns: u16, rows: u16) -> Model {
    let units = u32::from(columns) * DEFAULT_CELL_WIDTH_PX;
    let controller = PreviewController::with_converter(
        EditorState::with_text(text, units),
        ComrakConverter::new(),
    );
    Model::new(controller, (columns, rows))
}

fn draw(model: &Model) -> Buffer {
    let (columns, rows) = model.terminal_size;
    let mut terminal = Terminal::new(TestBackend::new(columns, rows)).unwrap();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal.backend().buffer().clone()
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect()
}

/// Column where `needle` starts on row `y`, counting cells rather than bytes.
fn find_column(buffer: &Buffer, y: u16, needle: &str) -> Option<u16> {
    let len = u16::try_from(needle.chars().count()).ok()?;
    (0..buffer.area.width.saturating_sub(len)).find(|&x| {
        (x..x + len)
            .map(|cx| buffer[(cx, y)].symbol())
            .collect::<String>()
            == needle
    })
}

fn screen_text(buffer: &Buffer) -> String {
    (0..buffer.area.height)
        .map(|y| row_text(buffer, y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_split_layout_draws_label_divider_and_preview() {
    let model = model_with(SOURCE, 100, 30);
    let buffer = draw(&model);

    assert!(row_text(&buffer, 0).starts_with(" MARKDOWN"));
    for y in 0..29 {
        assert_eq!(buffer[(50, y)].symbol(), "\u{2502}", "divider row {y}");
    }
    // Preview starts after the divider and one column of padding.
    assert_eq!(find_column(&buffer, 0, "Hello"), Some(52));
}

#[test]
fn test_stacked_layout_draws_preview_below_editor() {
    let model = model_with(SOURCE, 60, 24);
    let buffer = draw(&model);

    assert!(row_text(&buffer, 0).starts_with(" MARKDOWN"));
    assert_eq!(row_text(&buffer, 1).trim_end(), "# Hello");
    // Resizer row between the halves carries no divider glyph.
    assert_eq!(row_text(&buffer, 11).trim(), "");
    assert_eq!(buffer[(0, 11)].bg, Color::Rgb(0x30, 0x30, 0x30));
    assert_eq!(buffer[(1, 12)].symbol(), "H");
}

#[test]
fn test_label_and_text_colors_follow_layout_mode() {
    let split = draw(&model_with(SOURCE, 100, 30));
    assert_eq!(split[(3, 0)].bg, Color::Rgb(0x18, 0x18, 0x18));
    assert_eq!(split[(3, 0)].fg, Color::Rgb(0xdd, 0xdd, 0xdd));
    assert_eq!(split[(20, 5)].bg, Color::Rgb(0x23, 0x23, 0x23));
    assert_eq!(split[(2, 1)].fg, Color::Rgb(0x00, 0xff, 0x00));

    let stacked = draw(&model_with(SOURCE, 60, 24));
    assert_eq!(stacked[(3, 0)].bg, Color::Rgb(0x44, 0x44, 0x44));
    assert_eq!(stacked[(20, 5)].bg, Color::Rgb(0x18, 0x18, 0x18));
}

#[test]
fn test_cursor_cell_drawn_only_with_editor_focus() {
    let model = model_with(SOURCE, 100, 30);
    let buffer = draw(&model);
    assert_eq!(buffer[(0, 1)].bg, Color::White);
    assert_eq!(buffer[(0, 1)].symbol(), "#");

    let model = update(model, Message::FocusPane(Focus::Preview));
    let buffer = draw(&model);
    assert_eq!(buffer[(0, 1)].bg, Color::Rgb(0x23, 0x23, 0x23));
}

#[test]
fn test_cursor_at_line_end_draws_blank_cell() {
    let model = update(model_with("abc", 100, 30), Message::EditorMoveEnd);
    let buffer = draw(&model);
    assert_eq!(buffer[(3, 1)].symbol(), " ");
    assert_eq!(buffer[(3, 1)].bg, Color::White);
}

#[test]
fn test_bold_span_keeps_modifier_in_preview() {
    let model = model_with(SOURCE, 100, 30);
    let buffer = draw(&model);
    let y = (0..buffer.area.height)
        .find(|&y| row_text(&buffer, y).contains("This is bold text."))
        .expect("paragraph row");
    let x = find_column(&buffer, y, "bold").expect("bold column");
    assert!(buffer[(x, y)].modifier.contains(Modifier::BOLD));
    assert!(!buffer[(x - 2, y)].modifier.contains(Modifier::BOLD));
}

#[test]
fn test_html_source_mode_shows_converter_output() {
    let model = update(model_with(SOURCE, 100, 30), Message::ToggleHtmlSource);
    let text = screen_text(&draw(&model));
    assert!(text.contains("<h1>Hello</h1>"), "{text}");
    assert!(text.contains("<strong>bold</strong>"), "{text}");
}

#[test]
fn test_status_bar_reports_mode_and_width() {
    let model = model_with(SOURCE, 100, 30);
    let buffer = draw(&model);
    let status = row_text(&buffer, 29);
    assert!(status.contains("SPLIT 800px"), "{status}");
    assert!(status.contains("Ln 1, Col 1"), "{status}");

    let buffer = draw(&model_with(SOURCE, 60, 24));
    assert!(row_text(&buffer, 23).contains("STACKED 480px"));
}

#[test]
fn test_status_bar_names_section_at_preview_top() {
    let model = model_with(SOURCE, 100, 30);
    let buffer = draw(&model);
    assert!(row_text(&buffer, 29).contains("\u{a7} Hello"));
}

#[test]
fn test_status_bar_shows_preview_scroll_percent() {
    let long: String = (1..=80).map(|i| format!("para {i}\n\n")).collect();
    let model = model_with(&long, 100, 30);
    assert!(row_text(&draw(&model), 29).contains("  0%"));

    let model = update(model, Message::PreviewBottom);
    let buffer = draw(&model);
    assert!(row_text(&buffer, 29).contains("100%"));
    assert!(screen_text(&buffer).contains("para 80"));

    let short = model_with(SOURCE, 100, 30);
    assert!(row_text(&draw(&short), 29).contains("100%"));
}

#[test]
fn test_editor_draws_rows_of_scrolled_viewport() {
    let long: String = (1..=60).map(|i| format!("row {i}\n")).collect();
    let model = update(model_with(&long, 100, 30), Message::EditorMoveToEnd);
    let buffer = draw(&model);
    // 61 lines in 28 rows: the cursor on the empty last line sits on row 28.
    assert!(row_text(&buffer, 1).starts_with("row 34 "), "{}", row_text(&buffer, 1));
    assert!(row_text(&buffer, 27).starts_with("row 60 "));
}

#[test]
fn test_status_bar_flags_plain_text_fallback() {
    fn failing(_: &str, _: u16) -> anyhow::Result<crate::document::Document> {
        anyhow::bail!("cannot lay out")
    }
    let model = model_with(SOURCE, 100, 30).with_preview_renderer(failing);
    let buffer = draw(&model);
    assert!(row_text(&buffer, 29).contains("[plain]"));
    assert_eq!(find_column(&buffer, 0, "# Hello"), Some(52));
}

#[test]
fn test_help_overlay_lists_keys_and_config() {
    let mut model = model_with(SOURCE, 100, 40);
    model.config_global_path = Some("/tmp/mdpreview/config".into());
    let model = update(model, Message::ToggleHelp);
    let text = screen_text(&draw(&model));
    assert!(text.contains("Help"));
    assert!(text.contains("Toggle HTML source"));
    assert!(text.contains("Global: /tmp/mdpreview/config"));
    assert!(text.contains("Local override: <none>"));
}

#[test]
fn test_editor_scrolls_horizontally_to_cursor() {
    let long = "x".repeat(120);
    let model = update(model_with(&long, 100, 30), Message::EditorMoveEnd);
    let buffer = draw(&model);
    // Editor pane is 50 columns, cursor sits in its last column.
    assert_eq!(buffer[(49, 1)].bg, Color::White);
    assert_eq!(buffer[(48, 1)].symbol(), "x");
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    for (columns, rows) in [(1, 1), (10, 2), (3, 5)] {
        let model = model_with(SOURCE, columns, rows);
        let _ = draw(&model);
    }
}

#[test]
fn test_centered_popup_rect_clamps_to_area() {
    let area = ratatui::layout::Rect::new(0, 0, 20, 10);
    let popup = centered_popup_rect(30, 4, area);
    assert_eq!(popup, ratatui::layout::Rect::new(0, 3, 20, 4));
}
