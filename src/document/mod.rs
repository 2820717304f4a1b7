//! Markdown conversion and terminal rendering.
//!
//! This module handles:
//! - Converting markdown to HTML ([`Converter`], [`ComrakConverter`])
//! - Rendering the same markdown to styled, wrapped lines for the preview pane

mod convert;
mod parser;
mod types;

pub use convert::{ComrakConverter, Converter};
pub use parser::{parse, parse_with_layout};
pub use types::{
    Document, HeadingRef, InlineColor, InlineSpan, InlineStyle, LineType, RenderedLine,
};
