use crate::document::{ComrakConverter, Converter};

use super::layout::{LayoutMode, LayoutPolicy};
use super::state::{EditorSnapshot, EditorState};

/// Label shown above the editor pane.
pub const EDITOR_LABEL: &str = "Markdown";

/// Editor pane contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorPane {
    pub label: &'static str,
    pub text: String,
}

/// Preview pane contents: the converter's output, injected as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewPane {
    pub html: String,
}

/// What the screen should show for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewTree {
    /// Editor above preview, each taking half the space.
    Stacked {
        editor: EditorPane,
        preview: PreviewPane,
    },
    /// Editor beside preview inside a resizable splitter.
    Split {
        editor: EditorPane,
        preview: PreviewPane,
        /// Floor for the editor pane, in layout units.
        primary_min_size: u32,
    },
}

impl ViewTree {
    pub const fn layout_mode(&self) -> LayoutMode {
        match self {
            Self::Stacked { .. } => LayoutMode::Stacked,
            Self::Split { .. } => LayoutMode::Split,
        }
    }

    pub const fn editor(&self) -> &EditorPane {
        match self {
            Self::Stacked { editor, .. } | Self::Split { editor, .. } => editor,
        }
    }

    pub const fn preview(&self) -> &PreviewPane {
        match self {
            Self::Stacked { preview, .. } | Self::Split { preview, .. } => preview,
        }
    }
}

/// Binds text input and viewport changes to the preview and layout.
///
/// Derived values (HTML, layout mode) are never stored; every accessor
/// recomputes them from the current [`EditorState`].
#[derive(Debug, Clone)]
pub struct PreviewController<C = ComrakConverter> {
    state: EditorState,
    converter: C,
    policy: LayoutPolicy,
}

impl PreviewController<ComrakConverter> {
    /// Controller seeded with the sample document and the default converter.
    pub fn new(viewport_width: u32) -> Self {
        Self::with_converter(EditorState::new(viewport_width), ComrakConverter::default())
    }
}

impl<C: Converter> PreviewController<C> {
    pub fn with_converter(state: EditorState, converter: C) -> Self {
        Self {
            state,
            converter,
            policy: LayoutPolicy::DEFAULT,
        }
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: LayoutPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn on_text_changed(&mut self, new_text: impl Into<String>) {
        self.state.on_text_changed(new_text);
        tracing::trace!(len = self.state.markdown_text().len(), "markdown text changed");
    }

    pub fn on_viewport_resized(&mut self, new_width: u32) {
        let before = self.layout_mode();
        self.state.on_viewport_resized(new_width);
        let after = self.layout_mode();
        if before != after {
            tracing::debug!(width = new_width, ?before, ?after, "layout mode switched");
        }
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        self.state.snapshot()
    }

    pub fn markdown_text(&self) -> &str {
        self.state.markdown_text()
    }

    pub const fn viewport_width(&self) -> u32 {
        self.state.viewport_width()
    }

    pub const fn policy(&self) -> LayoutPolicy {
        self.policy
    }

    pub const fn layout_mode(&self) -> LayoutMode {
        self.policy.mode_for_width(self.state.viewport_width())
    }

    /// Converter output for the current text.
    pub fn rendered_html(&self) -> String {
        let _scope = crate::perf::scope("preview.convert");
        self.converter.render(self.state.markdown_text())
    }

    /// Project the current state to a view tree. No side effects.
    pub fn render(&self) -> ViewTree {
        let editor = EditorPane {
            label: EDITOR_LABEL,
            text: self.state.markdown_text().to_string(),
        };
        let preview = PreviewPane {
            html: self.rendered_html(),
        };
        match self.layout_mode() {
            LayoutMode::Stacked => ViewTree::Stacked { editor, preview },
            LayoutMode::Split => ViewTree::Split {
                editor,
                preview,
                primary_min_size: self.policy.editor_minimum,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::SAMPLE_DOCUMENT;

    /// Wraps its input verbatim.
    #[derive(Debug, Clone, Copy)]
    struct Echo;

    impl Converter for Echo {
        fn render(&self, markdown: &str) -> String {
            format!("<pre>{markdown}</pre>")
        }
    }

    #[test]
    fn test_initial_preview_is_sample_document() {
        let controller = PreviewController::new(1280);
        assert_eq!(controller.markdown_text(), SAMPLE_DOCUMENT);
        let tree = controller.render();
        assert_eq!(
            tree.preview().html,
            ComrakConverter::default().render(SAMPLE_DOCUMENT)
        );
        assert!(tree.preview().html.contains("<h1>Markdown Previewer</h1>"));
    }

    #[test]
    fn test_heading_input_renders_h1() {
        let mut controller = PreviewController::new(1280);
        controller.on_text_changed("# Hello");
        assert!(controller.render().preview().html.contains("<h1>Hello</h1>"));
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        let mut controller = PreviewController::new(1280);
        controller.on_text_changed("");
        let tree = controller.render();
        assert!(tree.preview().html.trim().is_empty());
        assert_eq!(tree.editor().text, "");
    }

    #[test]
    fn test_resize_switches_split_to_stacked_without_touching_preview() {
        let mut controller = PreviewController::new(800);
        controller.on_text_changed("**bold**");
        let before = controller.render();
        assert_eq!(before.layout_mode(), LayoutMode::Split);

        controller.on_viewport_resized(500);
        let after = controller.render();
        assert_eq!(after.layout_mode(), LayoutMode::Stacked);
        assert_eq!(before.preview(), after.preview());
        assert!(after.preview().html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_split_tree_carries_editor_floor() {
        let controller = PreviewController::new(600);
        match controller.render() {
            ViewTree::Split {
                primary_min_size, ..
            } => assert_eq!(primary_min_size, 162),
            ViewTree::Stacked { .. } => panic!("600 units should be split"),
        }
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut controller = PreviewController::new(700);
        controller.on_text_changed("a\nb");
        assert_eq!(controller.render(), controller.render());
    }

    #[test]
    fn test_custom_converter_is_used() {
        let controller =
            PreviewController::with_converter(EditorState::with_text("x", 100), Echo);
        assert_eq!(controller.render().preview().html, "<pre>x</pre>");
        assert_eq!(controller.layout_mode(), LayoutMode::Stacked);
    }

    #[test]
    fn test_custom_policy_moves_breakpoint() {
        let controller = PreviewController::new(700).with_policy(LayoutPolicy {
            small_screen: 800,
            editor_minimum: 100,
        });
        assert_eq!(controller.layout_mode(), LayoutMode::Stacked);
    }

    #[test]
    fn test_editor_pane_is_labelled() {
        let controller = PreviewController::new(1024);
        assert_eq!(controller.render().editor().label, "Markdown");
    }
}
