//! Scroll state for a pane.
//!
//! The preview uses a [`Viewport`] to scroll through rendered lines; the
//! editor uses one to keep the cursor line on screen.

use std::ops::Range;

/// Visible window over `total_lines` lines.
///
/// ```
/// use mdpreview::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(80, 24, 100);
/// assert_eq!(vp.visible_range(), 0..24);
///
/// vp.scroll_down(10);
/// assert_eq!(vp.visible_range(), 10..34);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    pub const fn new(width: u16, height: u16, total_lines: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_lines,
        }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + usize::from(self.height)).min(self.total_lines);
        self.offset.min(end)..end
    }

    /// Scroll position as a percentage, 100 when everything fits.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn scroll_percent(&self) -> u8 {
        let max = self.max_offset();
        if max == 0 {
            return 100;
        }
        ((self.offset as f64 / max as f64) * 100.0).round() as u8
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = self.offset.saturating_add(n).min(self.max_offset());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(usize::from(self.height));
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Scroll the minimum amount that brings `line` into view.
    pub fn ensure_visible(&mut self, line: usize) {
        let height = usize::from(self.height.max(1));
        if line < self.offset {
            self.offset = line;
        } else if line >= self.offset + height {
            self.offset = line + 1 - height;
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_viewport_starts_at_top() {
        let vp = Viewport::new(80, 24, 100);
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.visible_range(), 0..24);
    }

    #[test]
    fn test_short_document_range() {
        let vp = Viewport::new(80, 24, 5);
        assert_eq!(vp.visible_range(), 0..5);
        assert_eq!(vp.scroll_percent(), 100);
    }

    #[test]
    fn test_scroll_clamps_at_bounds() {
        let mut vp = Viewport::new(80, 10, 25);
        vp.scroll_down(100);
        assert_eq!(vp.offset(), 15);
        assert_eq!(vp.scroll_percent(), 100);
        vp.scroll_up(100);
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.scroll_percent(), 0);
    }

    #[test]
    fn test_paging() {
        let mut vp = Viewport::new(80, 10, 100);
        vp.page_down();
        assert_eq!(vp.offset(), 10);
        vp.page_up();
        assert_eq!(vp.offset(), 0);
        vp.go_to_bottom();
        assert_eq!(vp.offset(), 90);
        vp.go_to_top();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_ensure_visible_scrolls_minimally() {
        let mut vp = Viewport::new(80, 5, 50);
        vp.ensure_visible(3);
        assert_eq!(vp.offset(), 0);
        vp.ensure_visible(7);
        assert_eq!(vp.offset(), 3);
        vp.ensure_visible(1);
        assert_eq!(vp.offset(), 1);
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let mut vp = Viewport::new(80, 10, 100);
        vp.go_to_bottom();
        vp.set_total_lines(12);
        assert_eq!(vp.offset(), 2);
        vp.resize(80, 20);
        assert_eq!(vp.offset(), 0);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn ensure_visible_brings_line_on_screen(
                total_lines in 1..5000usize,
                height in 1..100u16,
                start in 0..5000usize,
                target in 0..5000usize,
            ) {
                let mut vp = Viewport::new(80, height, total_lines);
                vp.scroll_down(start);
                let line = target % total_lines;
                vp.ensure_visible(line);
                prop_assert!(vp.visible_range().contains(&line));
            }

            #[test]
            fn offset_stays_in_bounds_after_resize(
                total_lines in 0..5000usize,
                height in 1..100u16,
                new_height in 1..100u16,
                scroll in 0..5000usize,
            ) {
                let mut vp = Viewport::new(80, height, total_lines);
                vp.scroll_down(scroll);
                vp.resize(80, new_height);
                prop_assert!(vp.offset() <= total_lines.saturating_sub(usize::from(new_height)));
                prop_assert!(vp.scroll_percent() <= 100);
            }
        }
    }
}
