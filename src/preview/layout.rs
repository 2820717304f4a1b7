//! Responsive layout policy.
//!
//! Widths are measured in layout units (pixels). The terminal front end
//! converts between units and columns with [`units_to_columns`].

/// Widest viewport, in layout units, that still uses the stacked layout.
pub const SMALL_SCREEN: u32 = 599;

/// Minimum size of the editor pane in the split layout, in layout units.
pub const EDITOR_MINIMUM: u32 = 162;

/// Fallback width of one terminal cell in layout units, used when the
/// terminal does not report its pixel size.
pub const DEFAULT_CELL_WIDTH_PX: u32 = 8;

/// How the editor and preview panes are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    /// Editor above preview, no drag affordance.
    Stacked,
    /// Editor beside preview inside a resizable splitter.
    Split,
}

impl LayoutMode {
    /// Short label for the status bar.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stacked => "STACKED",
            Self::Split => "SPLIT",
        }
    }
}

/// Breakpoint and pane floor shared by the layout decision and pane styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPolicy {
    pub small_screen: u32,
    pub editor_minimum: u32,
}

impl LayoutPolicy {
    pub const DEFAULT: Self = Self {
        small_screen: SMALL_SCREEN,
        editor_minimum: EDITOR_MINIMUM,
    };

    /// Layout mode for a viewport of `width` layout units.
    pub const fn mode_for_width(&self, width: u32) -> LayoutMode {
        if width <= self.small_screen {
            LayoutMode::Stacked
        } else {
            LayoutMode::Split
        }
    }
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Viewport width in layout units for a terminal `columns` wide.
///
/// Prefers the pixel width reported by the terminal; zero means "unknown".
pub fn viewport_units(columns: u16, reported_px: u16, cell_width_px: u32) -> u32 {
    if reported_px > 0 {
        u32::from(reported_px)
    } else {
        u32::from(columns) * cell_width_px.max(1)
    }
}

/// Convert a size in layout units to whole terminal columns, rounding up.
pub fn units_to_columns(units: u32, viewport_units: u32, columns: u16) -> u16 {
    if columns == 0 || viewport_units == 0 {
        return 0;
    }
    let scaled = u64::from(units) * u64::from(columns);
    let cols = scaled.div_ceil(u64::from(viewport_units));
    u16::try_from(cols).unwrap_or(u16::MAX)
}
