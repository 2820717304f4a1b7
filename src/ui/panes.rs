//! Screen geometry for the editor and preview panes.

use ratatui::layout::Rect;

use crate::preview::LayoutMode;

use super::splitter::Splitter;

/// Blank columns on each side of the preview text.
pub const PREVIEW_PADDING: u16 = 1;

/// Where each part of the screen goes for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneLayout {
    pub mode: LayoutMode,
    /// Single row holding the editor label.
    pub editor_label: Rect,
    pub editor_text: Rect,
    /// Divider column in the split layout, resizer row in the stacked one.
    pub separator: Rect,
    pub preview: Rect,
    pub status: Rect,
}

impl PaneLayout {
    /// Area the splitter divides. Empty in the stacked layout.
    pub fn split_body(&self) -> Rect {
        match self.mode {
            LayoutMode::Split => Rect {
                x: self.editor_label.x,
                y: self.editor_label.y,
                width: self.editor_label.width + self.separator.width + self.preview.width,
                height: self.separator.height,
            },
            LayoutMode::Stacked => Rect::default(),
        }
    }

    /// Width available to rendered preview lines.
    pub const fn preview_content_width(&self) -> u16 {
        let width = self.preview.width.saturating_sub(2 * PREVIEW_PADDING);
        if width == 0 { 1 } else { width }
    }
}

/// Lay out the panes in `area`. The last row is always the status bar.
pub fn pane_layout(mode: LayoutMode, area: Rect, splitter: &Splitter) -> PaneLayout {
    let body = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let status = Rect {
        y: area.y + body.height,
        height: area.height.min(1),
        ..area
    };

    let (editor, separator, preview) = match mode {
        LayoutMode::Split => splitter.split(body),
        LayoutMode::Stacked => {
            let resizer_height = body.height.min(1);
            let editor_height = body.height.saturating_sub(resizer_height).div_ceil(2);
            let preview_height = body.height - resizer_height - editor_height;
            let editor = Rect {
                height: editor_height,
                ..body
            };
            let separator = Rect {
                y: body.y + editor_height,
                height: resizer_height,
                ..body
            };
            let preview = Rect {
                y: separator.y + resizer_height,
                height: preview_height,
                ..body
            };
            (editor, separator, preview)
        }
    };

    let label_height = editor.height.min(1);
    PaneLayout {
        mode,
        editor_label: Rect {
            height: label_height,
            ..editor
        },
        editor_text: Rect {
            y: editor.y + label_height,
            height: editor.height - label_height,
            ..editor
        },
        separator,
        preview,
        status,
    }
}

/// Whether `(column, row)` lies inside `rect`.
pub const fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_layout_side_by_side() {
        let layout = pane_layout(LayoutMode::Split, Rect::new(0, 0, 100, 30), &Splitter::new(21));
        assert_eq!(layout.editor_label, Rect::new(0, 0, 50, 1));
        assert_eq!(layout.editor_text, Rect::new(0, 1, 50, 28));
        assert_eq!(layout.separator, Rect::new(50, 0, 1, 29));
        assert_eq!(layout.preview, Rect::new(51, 0, 49, 29));
        assert_eq!(layout.status, Rect::new(0, 29, 100, 1));
        assert_eq!(layout.split_body(), Rect::new(0, 0, 100, 29));
        assert_eq!(layout.preview_content_width(), 47);
    }

    #[test]
    fn test_stacked_layout_halves() {
        let layout = pane_layout(LayoutMode::Stacked, Rect::new(0, 0, 60, 24), &Splitter::new(21));
        // body 23 rows: editor 11, resizer 1, preview 11
        assert_eq!(layout.editor_label, Rect::new(0, 0, 60, 1));
        assert_eq!(layout.editor_text, Rect::new(0, 1, 60, 10));
        assert_eq!(layout.separator, Rect::new(0, 11, 60, 1));
        assert_eq!(layout.preview, Rect::new(0, 12, 60, 11));
        assert_eq!(layout.status.y, 23);
        assert_eq!(layout.split_body(), Rect::default());
    }

    #[test]
    fn test_tiny_areas_stay_inside() {
        for height in 0..4 {
            for mode in [LayoutMode::Split, LayoutMode::Stacked] {
                let layout = pane_layout(mode, Rect::new(0, 0, 3, height), &Splitter::new(21));
                for rect in [
                    layout.editor_label,
                    layout.editor_text,
                    layout.separator,
                    layout.preview,
                    layout.status,
                ] {
                    assert!(rect.bottom() <= height, "{mode:?} at height {height}: {rect:?}");
                }
                assert!(layout.preview_content_width() >= 1);
            }
        }
    }

    #[test]
    fn test_contains() {
        let rect = Rect::new(2, 2, 3, 3);
        assert!(contains(rect, 2, 2));
        assert!(contains(rect, 4, 4));
        assert!(!contains(rect, 5, 4));
        assert!(!contains(rect, 1, 2));
    }
}
