//! Syntax highlighting for fenced code blocks in the preview.
//!
//! Uses syntect with its bundled syntaxes. The theme follows the terminal
//! background, which is either forced from the command line or detected.

use std::sync::{Mutex, OnceLock};

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;

use crate::document::{InlineColor, InlineSpan, InlineStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightBackground {
    Light,
    Dark,
}

static BACKGROUND_OVERRIDE: OnceLock<Mutex<Option<HighlightBackground>>> = OnceLock::new();

/// Force the background used for theme selection and color adjustment.
pub fn set_background_mode(mode: Option<HighlightBackground>) {
    let lock = BACKGROUND_OVERRIDE.get_or_init(|| Mutex::new(None));
    if let Ok(mut guard) = lock.lock() {
        *guard = mode;
    }
}

/// Effective background: the override if set, else `COLORFGBG`, else dark.
pub fn background_mode() -> HighlightBackground {
    let lock = BACKGROUND_OVERRIDE.get_or_init(|| Mutex::new(None));
    if let Ok(guard) = lock.lock()
        && let Some(mode) = *guard
    {
        return mode;
    }
    background_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

pub fn is_light_background() -> bool {
    background_mode() == HighlightBackground::Light
}

fn background_from_colorfgbg(colorfgbg: Option<&str>) -> HighlightBackground {
    let bg = colorfgbg
        .and_then(|value| value.rsplit(';').next())
        .and_then(|bg| bg.parse::<u8>().ok());
    match bg {
        Some(bg) if bg >= 7 => HighlightBackground::Light,
        _ => HighlightBackground::Dark,
    }
}

/// Highlight `code` line by line.
///
/// Unknown or missing languages produce plain spans with the code style set.
pub fn highlight_code(language: Option<&str>, code: &str) -> Vec<Vec<InlineSpan>> {
    let plain = InlineStyle {
        code: true,
        ..InlineStyle::default()
    };
    let syntax_set = syntax_set();
    let syntax = language.and_then(|lang| {
        syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| syntax_set.find_syntax_by_name(lang))
    });

    let Some(syntax) = syntax else {
        return code
            .lines()
            .map(|line| vec![InlineSpan::new(line.to_string(), plain)])
            .collect();
    };

    let mode = background_mode();
    let mut highlighter = HighlightLines::new(syntax, theme());
    code.lines()
        .map(|line| match highlighter.highlight_line(line, syntax_set) {
            Ok(ranges) => ranges
                .into_iter()
                .map(|(style, text)| {
                    let fg = InlineColor {
                        r: style.foreground.r,
                        g: style.foreground.g,
                        b: style.foreground.b,
                    };
                    let inline = InlineStyle {
                        fg: Some(adjust_fg_for_background(fg, mode)),
                        ..plain
                    };
                    InlineSpan::new(text.to_string(), inline)
                })
                .collect(),
            Err(err) => {
                tracing::debug!(%err, "highlight failed; showing plain line");
                vec![InlineSpan::new(line.to_string(), plain)]
            }
        })
        .collect()
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        let _scope = crate::perf::scope("highlight.syntax_set.load_defaults");
        SyntaxSet::load_defaults_newlines()
    })
}

fn theme() -> &'static Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    THEME.get_or_init(|| {
        let _scope = crate::perf::scope("highlight.theme.load_defaults");
        let theme_set = ThemeSet::load_defaults();
        let preferred: &[&str] = match background_mode() {
            HighlightBackground::Dark => &["base16-mocha.dark", "base16-ocean.dark"],
            HighlightBackground::Light => &["InspiredGitHub", "base16-ocean.light"],
        };
        preferred
            .iter()
            .find_map(|name| theme_set.themes.get(*name).cloned())
            .or_else(|| theme_set.themes.values().next().cloned())
            .unwrap_or_default()
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn adjust_fg_for_background(color: InlineColor, mode: HighlightBackground) -> InlineColor {
    if mode == HighlightBackground::Dark {
        return color;
    }
    let luma =
        0.0722f32.mul_add(f32::from(color.b), 0.2126f32.mul_add(f32::from(color.r), 0.7152 * f32::from(color.g)));
    if luma < 155.0 {
        return color;
    }
    let darken = |v: u8| (f32::from(v) * 0.42).round() as u8;
    InlineColor {
        r: darken(color.r),
        g: darken(color.g),
        b: darken(color.b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_rust_produces_colored_spans() {
        let lines = highlight_code(Some("rust"), "fn main() {\n    let x = 1;\n}\n");
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().flatten().any(|span| span.style().fg.is_some()));
    }

    #[test]
    fn test_unknown_language_is_plain_code() {
        let lines = highlight_code(Some("nope"), "just text");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].iter().all(|span| span.style().fg.is_none()));
        assert!(lines[0].iter().all(|span| span.style().code));
    }

    #[test]
    fn test_missing_language_is_plain_code() {
        let lines = highlight_code(None, "a\nb");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1][0].text(), "b");
    }

    #[test]
    fn test_colorfgbg_detection() {
        assert_eq!(background_from_colorfgbg(Some("15;0")), HighlightBackground::Dark);
        assert_eq!(background_from_colorfgbg(Some("0;15")), HighlightBackground::Light);
        assert_eq!(background_from_colorfgbg(Some("garbage")), HighlightBackground::Dark);
        assert_eq!(background_from_colorfgbg(None), HighlightBackground::Dark);
    }

    #[test]
    fn test_light_mode_darkens_bright_fg() {
        let bright = InlineColor {
            r: 240,
            g: 230,
            b: 120,
        };
        let adjusted = adjust_fg_for_background(bright, HighlightBackground::Light);
        assert!(adjusted.r < bright.r && adjusted.g < bright.g && adjusted.b < bright.b);
        assert_eq!(adjust_fg_for_background(bright, HighlightBackground::Dark), bright);
    }
}
