use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::Frame;

use crate::app::{App, Focus, Message, Model};
use crate::editor::Direction;
use crate::preview::LayoutMode;
use crate::ui::splitter::NUDGE_STEP;
use crate::ui::{contains, render};

const MOUSE_SCROLL_LINES: usize = 3;

impl App {
    /// Translate a terminal event into a message.
    ///
    /// `pixel_width` is queried only for resize events, so callers pass a
    /// closure rather than a value.
    pub(super) fn handle_event(
        &self,
        event: Event,
        model: &Model,
        pixel_width: impl FnOnce() -> u16,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(key, model),
            Event::Mouse(mouse) if self.mouse_enabled => Self::handle_mouse(mouse, model),
            Event::Paste(text) => Some(Message::Paste(text)),
            Event::Resize(columns, rows) => Some(Message::Resize {
                columns,
                rows,
                pixel_width: pixel_width(),
            }),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('q' | 'c') if ctrl => return Some(Message::Quit),
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            _ => {}
        }

        if model.help_visible {
            return Some(Message::HideHelp);
        }

        match key.code {
            KeyCode::F(2) => return Some(Message::ToggleHtmlSource),
            KeyCode::Tab | KeyCode::BackTab => return Some(Message::SwitchFocus),
            KeyCode::Left if alt => return Some(Message::SplitterNudge(-NUDGE_STEP)),
            KeyCode::Right if alt => return Some(Message::SplitterNudge(NUDGE_STEP)),
            KeyCode::Char('=') if alt => return Some(Message::SplitterReset),
            _ => {}
        }

        match model.focus {
            Focus::Editor => Self::editor_key(key, ctrl, alt),
            Focus::Preview => Self::preview_key(key),
        }
    }

    fn editor_key(key: KeyEvent, ctrl: bool, alt: bool) -> Option<Message> {
        match key.code {
            KeyCode::Char(ch) if !ctrl && !alt => Some(Message::EditorInsertChar(ch)),
            KeyCode::Enter => Some(Message::EditorSplitLine),
            KeyCode::Backspace => Some(Message::EditorDeleteBack),
            KeyCode::Delete => Some(Message::EditorDeleteForward),
            KeyCode::Left if ctrl => Some(Message::EditorMoveWordLeft),
            KeyCode::Right if ctrl => Some(Message::EditorMoveWordRight),
            KeyCode::Left => Some(Message::EditorMoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::EditorMoveCursor(Direction::Right)),
            KeyCode::Up => Some(Message::EditorMoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::EditorMoveCursor(Direction::Down)),
            KeyCode::Home if ctrl => Some(Message::EditorMoveToStart),
            KeyCode::End if ctrl => Some(Message::EditorMoveToEnd),
            KeyCode::Home => Some(Message::EditorMoveHome),
            KeyCode::End => Some(Message::EditorMoveEnd),
            KeyCode::PageUp => Some(Message::EditorPageUp),
            KeyCode::PageDown => Some(Message::EditorPageDown),
            _ => None,
        }
    }

    fn preview_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Message::PreviewScrollDown(1)),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::PreviewScrollUp(1)),
            KeyCode::Char(' ') | KeyCode::PageDown => Some(Message::PreviewPageDown),
            KeyCode::Char('b') | KeyCode::PageUp => Some(Message::PreviewPageUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Message::PreviewTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::PreviewBottom),
            KeyCode::Esc => Some(Message::FocusPane(Focus::Editor)),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return None;
        }
        let layout = model.pane_layout();
        let (column, row) = (mouse.column, mouse.row);
        let in_editor = contains(layout.editor_text, column, row)
            || contains(layout.editor_label, column, row);
        let in_preview = contains(layout.preview, column, row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if layout.mode == LayoutMode::Split && contains(layout.separator, column, row) {
                    return Some(Message::SplitterDragStart(column, row));
                }
                if contains(layout.editor_text, column, row) {
                    let line = model.editor_viewport.offset()
                        + usize::from(row - layout.editor_text.y);
                    let col = usize::from(column - layout.editor_text.x)
                        + usize::from(model.editor_scroll_x());
                    return Some(Message::EditorClick(line, col));
                }
                if in_preview {
                    return Some(Message::FocusPane(Focus::Preview));
                }
                None
            }
            MouseEventKind::Drag(MouseButton::Left) if model.splitter.is_dragging() => {
                Some(Message::SplitterDragTo(column))
            }
            MouseEventKind::Up(MouseButton::Left) if model.splitter.is_dragging() => {
                Some(Message::SplitterDragEnd)
            }
            MouseEventKind::ScrollDown if in_preview => {
                Some(Message::PreviewScrollDown(MOUSE_SCROLL_LINES))
            }
            MouseEventKind::ScrollUp if in_preview => {
                Some(Message::PreviewScrollUp(MOUSE_SCROLL_LINES))
            }
            MouseEventKind::ScrollDown if in_editor => {
                Some(Message::EditorScrollDown(MOUSE_SCROLL_LINES))
            }
            MouseEventKind::ScrollUp if in_editor => {
                Some(Message::EditorScrollUp(MOUSE_SCROLL_LINES))
            }
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        render(model, frame);
    }
}

