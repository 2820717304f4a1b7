use std::path::PathBuf;

use ratatui::layout::Rect;

use crate::document::{ComrakConverter, Document};
use crate::editor::TextBuffer;
use crate::preview::layout::{DEFAULT_CELL_WIDTH_PX, units_to_columns, viewport_units};
use crate::preview::{EditorState, LayoutMode, PreviewController};
use crate::ui::splitter::Splitter;
use crate::ui::viewport::Viewport;
use crate::ui::{PaneLayout, pane_layout};

/// Pane receiving keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Editor,
    Preview,
}

/// What the preview pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewMode {
    /// Styled terminal rendition of the markdown.
    #[default]
    Rendered,
    /// The converter's HTML, verbatim.
    Html,
}

/// Lays out markdown for the preview pane at a width in columns.
pub type PreviewRenderer = fn(&str, u16) -> anyhow::Result<Document>;

/// The complete application state.
///
/// All state lives here. The controller owns the markdown text and the
/// viewport width; everything shown in the preview is derived from it.
#[derive(Debug)]
pub struct Model {
    pub controller: PreviewController<ComrakConverter>,
    pub buffer: TextBuffer,
    /// Preview content laid out for the current preview width
    pub document: Document,
    pub preview_viewport: Viewport,
    pub editor_viewport: Viewport,
    pub splitter: Splitter,
    pub focus: Focus,
    pub preview_mode: PreviewMode,
    /// Set when the preview shows raw text because rendering failed
    pub preview_fallback: bool,
    pub help_visible: bool,
    pub should_quit: bool,
    /// Terminal size in cells
    pub terminal_size: (u16, u16),
    /// Layout units per column when the terminal hides its pixel size
    pub cell_width_px: u32,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    renderer: PreviewRenderer,
    synced_revision: u64,
}

impl Default for Model {
    fn default() -> Self {
        let state = EditorState::with_text(String::new(), 0);
        Self {
            controller: PreviewController::with_converter(state, ComrakConverter::default()),
            buffer: TextBuffer::empty(),
            document: Document::empty(),
            preview_viewport: Viewport::default(),
            editor_viewport: Viewport::default(),
            splitter: Splitter::default(),
            focus: Focus::default(),
            preview_mode: PreviewMode::default(),
            preview_fallback: false,
            help_visible: false,
            should_quit: false,
            terminal_size: (0, 0),
            cell_width_px: DEFAULT_CELL_WIDTH_PX,
            config_global_path: None,
            config_local_path: None,
            renderer: Document::parse_with_layout,
            synced_revision: 0,
        }
    }
}

impl Model {
    /// Build the model around `controller` for a terminal of `size` cells.
    ///
    /// The editor starts with the controller's text and the preview is
    /// rendered before the first draw.
    pub fn new(controller: PreviewController<ComrakConverter>, size: (u16, u16)) -> Self {
        let buffer = TextBuffer::from_text(controller.markdown_text());
        let mut model = Self {
            synced_revision: buffer.revision(),
            controller,
            buffer,
            terminal_size: size,
            ..Self::default()
        };
        model.update_splitter_floor();
        model.refresh_preview();
        model.ensure_cursor_visible();
        model
    }

    #[must_use]
    pub const fn with_cell_width(mut self, cell_width_px: u32) -> Self {
        self.cell_width_px = cell_width_px;
        self
    }

    /// Replace the markdown layout used by the rendered preview.
    #[must_use]
    pub fn with_preview_renderer(mut self, renderer: PreviewRenderer) -> Self {
        self.renderer = renderer;
        self.refresh_preview();
        self
    }

    pub const fn layout_mode(&self) -> LayoutMode {
        self.controller.layout_mode()
    }

    pub const fn screen_area(&self) -> Rect {
        Rect::new(0, 0, self.terminal_size.0, self.terminal_size.1)
    }

    pub fn pane_layout(&self) -> PaneLayout {
        pane_layout(self.layout_mode(), self.screen_area(), &self.splitter)
    }

    /// Forward buffer edits to the controller and re-render the preview.
    ///
    /// Does nothing when the buffer has not changed since the last sync.
    pub fn sync_editor_text(&mut self) {
        if self.buffer.revision() == self.synced_revision {
            return;
        }
        self.synced_revision = self.buffer.revision();
        self.controller.on_text_changed(self.buffer.text());
        self.refresh_preview();
    }

    /// Apply a terminal resize.
    ///
    /// `pixel_width` is the width reported by the terminal, 0 when unknown.
    pub fn apply_resize(&mut self, columns: u16, rows: u16, pixel_width: u16) {
        self.terminal_size = (columns, rows);
        let units = viewport_units(columns, pixel_width, self.cell_width_px);
        self.controller.on_viewport_resized(units);
        self.update_splitter_floor();
        self.refresh_preview();
        self.ensure_cursor_visible();
    }

    /// Re-derive the preview content from the controller.
    ///
    /// Falls back to showing the markdown as plain text if it cannot be
    /// rendered.
    pub fn refresh_preview(&mut self) {
        let layout = self.pane_layout();
        let width = layout.preview_content_width();
        self.document = match self.preview_mode {
            PreviewMode::Html => {
                self.preview_fallback = false;
                Document::from_plain_text(&self.controller.rendered_html())
            }
            PreviewMode::Rendered => {
                match (self.renderer)(self.controller.markdown_text(), width) {
                    Ok(document) => {
                        self.preview_fallback = false;
                        document
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "preview render failed; showing raw text");
                        self.preview_fallback = true;
                        Document::from_plain_text(self.controller.markdown_text())
                    }
                }
            }
        };
        self.preview_viewport
            .resize(layout.preview.width, layout.preview.height);
        self.preview_viewport
            .set_total_lines(self.document.line_count());
        crate::perf::log_event(
            "preview.refresh",
            format!(
                "mode={:?} width={width} lines={}",
                self.preview_mode,
                self.document.line_count()
            ),
        );
    }

    /// Scroll the editor so the cursor line is on screen.
    pub fn ensure_cursor_visible(&mut self) {
        let text = self.pane_layout().editor_text;
        self.editor_viewport.resize(text.width, text.height);
        self.editor_viewport.set_total_lines(self.buffer.line_count());
        self.editor_viewport.ensure_visible(self.buffer.cursor().line);
    }

    /// Columns the editor text is scrolled right to keep the cursor visible.
    pub fn editor_scroll_x(&self) -> u16 {
        let width = usize::from(self.pane_layout().editor_text.width.max(1));
        let col = self.buffer.display_col();
        u16::try_from((col + 1).saturating_sub(width)).unwrap_or(u16::MAX)
    }

    /// Rows in the editor text area, at least one.
    pub fn editor_page_rows(&self) -> usize {
        usize::from(self.pane_layout().editor_text.height.max(1))
    }

    fn update_splitter_floor(&mut self) {
        let floor = units_to_columns(
            self.controller.policy().editor_minimum,
            self.controller.viewport_width(),
            self.terminal_size.0,
        );
        self.splitter.set_min_primary(floor);
    }
}
