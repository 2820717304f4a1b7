// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. preview::PreviewController)
    clippy::module_name_repetitions
)]

//! # mdpreview
//!
//! A live markdown previewer for the terminal.
//!
//! The screen holds an editor pane and a preview pane:
//! - Side by side inside a draggable splitter when the viewport is wider
//!   than 599 layout units, with a 162-unit floor for the editor
//! - Stacked, editor above preview, at 599 units and below
//! - Every keystroke re-renders the preview before the next frame
//!
//! ## Architecture
//!
//! The terminal front end uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`preview`]: Framework-independent state, layout policy and controller
//! - [`document`]: Markdown to HTML and to styled terminal lines
//! - [`editor`]: Text buffer behind the editor pane
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`highlight`]: Syntax highlighting
//! - [`config`]: Saved command-line defaults
//! - [`terminal`]: Terminal queries made before startup

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod highlight;
pub mod perf;
pub mod preview;
pub mod terminal;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{ComrakConverter, Converter, Document};
    pub use crate::preview::{EditorState, LayoutMode, PreviewController};
    pub use crate::ui::viewport::Viewport;
}
