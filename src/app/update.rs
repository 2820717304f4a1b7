use crate::app::Model;
use crate::app::model::{Focus, PreviewMode};
use crate::editor::Direction;
use crate::preview::LayoutMode;

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editor
    EditorInsertChar(char),
    /// Split line at cursor (Enter)
    EditorSplitLine,
    /// Backspace
    EditorDeleteBack,
    /// Delete
    EditorDeleteForward,
    EditorMoveCursor(Direction),
    EditorMoveHome,
    EditorMoveEnd,
    EditorMoveWordLeft,
    EditorMoveWordRight,
    /// Ctrl+Home
    EditorMoveToStart,
    /// Ctrl+End
    EditorMoveToEnd,
    EditorPageUp,
    EditorPageDown,
    /// Mouse click in the editor, in text coordinates (line, display column)
    EditorClick(usize, usize),
    EditorScrollUp(usize),
    EditorScrollDown(usize),
    /// Bracketed paste
    Paste(String),

    // Preview
    PreviewScrollUp(usize),
    PreviewScrollDown(usize),
    PreviewPageUp,
    PreviewPageDown,
    PreviewTop,
    PreviewBottom,
    /// Switch between the rendered preview and the HTML source
    ToggleHtmlSource,

    // Layout
    /// Switch keyboard focus between the panes
    SwitchFocus,
    FocusPane(Focus),
    /// Mouse down at (column, row); starts a drag when on the divider
    SplitterDragStart(u16, u16),
    SplitterDragTo(u16),
    SplitterDragEnd,
    /// Move the divider by a signed number of columns
    SplitterNudge(i16),
    /// Return the divider to the middle
    SplitterReset,

    // Window
    Resize {
        columns: u16,
        rows: u16,
        /// Pixel width reported by the terminal, 0 when unknown
        pixel_width: u16,
    },

    // Application
    ToggleHelp,
    HideHelp,
    Quit,
}

impl Message {
    /// Whether the message can change the markdown text.
    pub const fn edits_text(&self) -> bool {
        matches!(
            self,
            Self::EditorInsertChar(_)
                | Self::EditorSplitLine
                | Self::EditorDeleteBack
                | Self::EditorDeleteForward
                | Self::Paste(_)
        )
    }
}

/// Pure function that updates the model based on a message.
///
/// Edits are forwarded to the preview controller before returning, so the
/// next draw never shows a stale preview.
pub fn update(mut model: Model, msg: Message) -> Model {
    let edits_text = msg.edits_text();
    let mut cursor_moved = edits_text;

    match msg {
        Message::EditorInsertChar(ch) => model.buffer.insert_char(ch),
        Message::EditorSplitLine => model.buffer.split_line(),
        Message::EditorDeleteBack => {
            model.buffer.delete_back();
        }
        Message::EditorDeleteForward => {
            model.buffer.delete_forward();
        }
        Message::Paste(text) => {
            model.focus = Focus::Editor;
            model.buffer.insert_str(&text);
        }
        Message::EditorMoveCursor(direction) => {
            model.buffer.move_cursor(direction);
            cursor_moved = true;
        }
        Message::EditorMoveHome => {
            model.buffer.move_home();
            cursor_moved = true;
        }
        Message::EditorMoveEnd => {
            model.buffer.move_end();
            cursor_moved = true;
        }
        Message::EditorMoveWordLeft => {
            model.buffer.move_word_left();
            cursor_moved = true;
        }
        Message::EditorMoveWordRight => {
            model.buffer.move_word_right();
            cursor_moved = true;
        }
        Message::EditorMoveToStart => {
            model.buffer.move_to_start();
            cursor_moved = true;
        }
        Message::EditorMoveToEnd => {
            model.buffer.move_to_end();
            cursor_moved = true;
        }
        Message::EditorPageUp => {
            let rows = model.editor_page_rows();
            model.buffer.page_up(rows);
            cursor_moved = true;
        }
        Message::EditorPageDown => {
            let rows = model.editor_page_rows();
            model.buffer.page_down(rows);
            cursor_moved = true;
        }
        Message::EditorClick(line, display_col) => {
            model.focus = Focus::Editor;
            model.buffer.move_to_display(line, display_col);
            cursor_moved = true;
        }
        Message::EditorScrollUp(n) => model.editor_viewport.scroll_up(n),
        Message::EditorScrollDown(n) => model.editor_viewport.scroll_down(n),

        Message::PreviewScrollUp(n) => model.preview_viewport.scroll_up(n),
        Message::PreviewScrollDown(n) => model.preview_viewport.scroll_down(n),
        Message::PreviewPageUp => model.preview_viewport.page_up(),
        Message::PreviewPageDown => model.preview_viewport.page_down(),
        Message::PreviewTop => model.preview_viewport.go_to_top(),
        Message::PreviewBottom => model.preview_viewport.go_to_bottom(),
        Message::ToggleHtmlSource => {
            model.preview_mode = match model.preview_mode {
                PreviewMode::Rendered => PreviewMode::Html,
                PreviewMode::Html => PreviewMode::Rendered,
            };
            model.preview_viewport.go_to_top();
            model.refresh_preview();
        }

        Message::SwitchFocus => {
            model.focus = match model.focus {
                Focus::Editor => Focus::Preview,
                Focus::Preview => Focus::Editor,
            };
        }
        Message::FocusPane(focus) => model.focus = focus,
        Message::SplitterDragStart(column, row) => {
            if model.layout_mode() == LayoutMode::Split {
                let body = model.pane_layout().split_body();
                model.splitter.start_drag(body, column, row);
            }
        }
        Message::SplitterDragTo(column) => {
            if model.layout_mode() == LayoutMode::Split && model.splitter.is_dragging() {
                let body = model.pane_layout().split_body();
                model.splitter.drag_to(body, column);
                reflow_panes(&mut model);
            }
        }
        Message::SplitterDragEnd => model.splitter.end_drag(),
        Message::SplitterNudge(delta) => {
            if model.layout_mode() == LayoutMode::Split {
                let body = model.pane_layout().split_body();
                model.splitter.nudge(body, delta);
                reflow_panes(&mut model);
            }
        }
        Message::SplitterReset => {
            model.splitter.reset();
            reflow_panes(&mut model);
        }

        Message::Resize {
            columns,
            rows,
            pixel_width,
        } => {
            model.apply_resize(columns, rows, pixel_width);
        }

        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,
        Message::Quit => model.should_quit = true,
    }

    if edits_text {
        model.sync_editor_text();
    }
    if cursor_moved {
        model.ensure_cursor_visible();
    }
    model
}

fn reflow_panes(model: &mut Model) {
    model.refresh_preview();
    model.ensure_cursor_visible();
}
