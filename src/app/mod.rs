//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Focus, Model, PreviewMode, PreviewRenderer};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::document::ComrakConverter;
use crate::preview::layout::DEFAULT_CELL_WIDTH_PX;

/// Owns the startup options and runs the event loop.
#[derive(Debug, Clone)]
pub struct App {
    escape_html: bool,
    cell_width_px: u32,
    mouse_enabled: bool,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub const fn new() -> Self {
        Self {
            escape_html: false,
            cell_width_px: DEFAULT_CELL_WIDTH_PX,
            mouse_enabled: true,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Escape raw HTML in the markdown instead of passing it through.
    #[must_use]
    pub const fn with_escape_html(mut self, enabled: bool) -> Self {
        self.escape_html = enabled;
        self
    }

    /// Layout units per column, used when the terminal hides its pixel size.
    #[must_use]
    pub const fn with_cell_width(mut self, cell_width_px: u32) -> Self {
        self.cell_width_px = if cell_width_px == 0 { 1 } else { cell_width_px };
        self
    }

    #[must_use]
    pub const fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    pub const fn converter(&self) -> ComrakConverter {
        if self.escape_html {
            ComrakConverter::escaping_html()
        } else {
            ComrakConverter::new()
        }
    }
}
