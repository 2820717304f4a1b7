//! Framework-independent previewer core.
//!
//! [`PreviewController`] owns the [`EditorState`] and derives the HTML and
//! layout from it on demand. Nothing here touches the terminal, so the
//! whole module is testable without a rendering backend.

mod controller;
pub mod layout;
mod sample;
mod state;

pub use controller::{EDITOR_LABEL, EditorPane, PreviewController, PreviewPane, ViewTree};
pub use layout::{LayoutMode, LayoutPolicy};
pub use sample::SAMPLE_DOCUMENT;
pub use state::{EditorSnapshot, EditorState};
