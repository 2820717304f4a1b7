//! Two-pane horizontal splitter with a draggable divider.

use ratatui::layout::Rect;

/// Width of the divider column between the panes.
pub const DIVIDER_WIDTH: u16 = 1;

/// Columns moved per Alt+Left / Alt+Right.
pub const NUDGE_STEP: i16 = 2;

/// Divides an area into `primary | divider | secondary`.
///
/// `primary` is the requested width of the first pane; `None` means half
/// the area. The first pane never shrinks below `min_primary` unless the
/// whole area is narrower than that, in which case it takes everything
/// but the divider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Splitter {
    primary: Option<u16>,
    min_primary: u16,
    dragging: bool,
}

impl Splitter {
    pub const fn new(min_primary: u16) -> Self {
        Self {
            primary: None,
            min_primary,
            dragging: false,
        }
    }

    pub const fn min_primary(&self) -> u16 {
        self.min_primary
    }

    pub const fn set_min_primary(&mut self, columns: u16) {
        self.min_primary = columns;
    }

    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Width of the first pane for an area `total` columns wide.
    pub fn primary_width(&self, total: u16) -> u16 {
        let available = total.saturating_sub(DIVIDER_WIDTH);
        if available <= self.min_primary {
            return available;
        }
        self.primary
            .unwrap_or(total / 2)
            .clamp(self.min_primary, available)
    }

    pub fn split(&self, area: Rect) -> (Rect, Rect, Rect) {
        let primary_width = self.primary_width(area.width);
        let divider_width = DIVIDER_WIDTH.min(area.width - primary_width);
        let primary = Rect {
            width: primary_width,
            ..area
        };
        let divider = Rect {
            x: area.x + primary_width,
            width: divider_width,
            ..area
        };
        let secondary_x = divider.x + divider_width;
        let secondary = Rect {
            x: secondary_x,
            width: area.width - primary_width - divider_width,
            ..area
        };
        (primary, divider, secondary)
    }

    /// Begin a drag if `(column, row)` is on the divider. Returns whether it was.
    pub fn start_drag(&mut self, area: Rect, column: u16, row: u16) -> bool {
        let (_, divider, _) = self.split(area);
        let hit = divider.width > 0
            && (divider.x..divider.x + divider.width).contains(&column)
            && (divider.y..divider.y + divider.height).contains(&row);
        self.dragging = hit;
        hit
    }

    /// Move the divider under `column` while dragging.
    pub fn drag_to(&mut self, area: Rect, column: u16) {
        if !self.dragging {
            return;
        }
        let requested = column.saturating_sub(area.x);
        self.primary = Some(requested);
        self.primary = Some(self.primary_width(area.width));
    }

    pub const fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Shift the divider by `delta` columns, clamped to the area.
    pub fn nudge(&mut self, area: Rect, delta: i16) {
        let current = self.primary_width(area.width);
        let moved = current.saturating_add_signed(delta);
        self.primary = Some(moved);
        self.primary = Some(self.primary_width(area.width));
    }

    /// Forget the dragged position and return to an even split.
    pub const fn reset(&mut self) {
        self.primary = None;
        self.dragging = false;
    }
}
