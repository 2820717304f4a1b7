use super::sample::SAMPLE_DOCUMENT;

/// The previewer's only mutable state.
///
/// `markdown_text` changes only through [`EditorState::on_text_changed`] and
/// `viewport_width` only through [`EditorState::on_viewport_resized`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    markdown_text: String,
    viewport_width: u32,
}

/// A copy of [`EditorState`] at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSnapshot {
    pub markdown_text: String,
    pub viewport_width: u32,
}

impl EditorState {
    /// State seeded with the sample document.
    pub fn new(viewport_width: u32) -> Self {
        Self::with_text(SAMPLE_DOCUMENT, viewport_width)
    }

    pub fn with_text(text: impl Into<String>, viewport_width: u32) -> Self {
        Self {
            markdown_text: text.into(),
            viewport_width,
        }
    }

    /// Replace the markdown source. Any string is accepted.
    pub fn on_text_changed(&mut self, new_text: impl Into<String>) {
        self.markdown_text = new_text.into();
    }

    /// Record a new viewport width in layout units.
    pub const fn on_viewport_resized(&mut self, new_width: u32) {
        self.viewport_width = new_width;
    }

    pub fn markdown_text(&self) -> &str {
        &self.markdown_text
    }

    pub const fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            markdown_text: self.markdown_text.clone(),
            viewport_width: self.viewport_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_holds_sample_document() {
        let state = EditorState::new(1024);
        assert_eq!(state.markdown_text(), SAMPLE_DOCUMENT);
        assert_eq!(state.viewport_width(), 1024);
    }

    #[test]
    fn test_text_change_accepts_empty_string() {
        let mut state = EditorState::new(1024);
        state.on_text_changed("");
        assert_eq!(state.markdown_text(), "");
    }

    #[test]
    fn test_resize_leaves_text_untouched() {
        let mut state = EditorState::with_text("**bold**", 800);
        state.on_viewport_resized(500);
        let snap = state.snapshot();
        assert_eq!(snap.markdown_text, "**bold**");
        assert_eq!(snap.viewport_width, 500);
    }

    #[test]
    fn test_snapshot_is_detached_from_later_changes() {
        let mut state = EditorState::with_text("before", 640);
        let snap = state.snapshot();
        state.on_text_changed("after");
        assert_eq!(snap.markdown_text, "before");
        assert_eq!(state.markdown_text(), "after");
    }
}
