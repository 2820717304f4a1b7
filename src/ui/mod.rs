//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - [`splitter`]: The draggable divider between the panes
//! - [`style`]: Theming and colors

pub mod splitter;
pub mod style;
pub mod viewport;

mod overlays;
mod panes;
mod render;
mod status;

pub use overlays::centered_popup_rect;
pub use panes::{PREVIEW_PADDING, PaneLayout, contains, pane_layout};
pub use render::render;

#[cfg(test)]
mod tests;
