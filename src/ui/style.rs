//! Colors for the panes and the rendered preview.
//!
//! The editor pane uses fixed colors that change with the layout mode.
//! The preview uses ANSI colors so it follows the terminal palette.

use ratatui::style::{Color, Modifier, Style};

use crate::document::{InlineColor, InlineStyle, LineType};
use crate::preview::LayoutMode;

/// Fixed colors for the editor pane and the bar between panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanePalette {
    pub label: Style,
    pub text: Style,
    pub cursor: Style,
    pub resizer: Style,
}

#[allow(clippy::cast_possible_truncation)]
const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Palette for the current layout. The stacked layout darkens the text
/// area and lightens the label.
pub fn pane_palette(mode: LayoutMode) -> PanePalette {
    let (label_bg, text_bg) = match mode {
        LayoutMode::Split => (rgb(0x18_18_18), rgb(0x23_23_23)),
        LayoutMode::Stacked => (rgb(0x44_44_44), rgb(0x18_18_18)),
    };
    PanePalette {
        label: Style::default()
            .bg(label_bg)
            .fg(rgb(0xdd_dd_dd))
            .add_modifier(Modifier::BOLD),
        text: Style::default().bg(text_bg).fg(rgb(0x00_ff_00)),
        cursor: Style::default().bg(Color::White).fg(Color::Black),
        resizer: Style::default().bg(rgb(0x30_30_30)).fg(rgb(0x80_80_80)),
    }
}

/// Terminal facts the preview colors depend on. Resolved once per draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreviewTheme {
    pub light: bool,
    pub truecolor: bool,
}

impl PreviewTheme {
    pub fn detect() -> Self {
        let colorterm = std::env::var("COLORTERM").ok();
        let term = std::env::var("TERM").ok();
        Self {
            light: crate::highlight::is_light_background(),
            truecolor: supports_truecolor(colorterm.as_deref(), term.as_deref()),
        }
    }
}

/// Base style for a rendered preview line.
pub fn style_for_line_type(line_type: &LineType, theme: PreviewTheme) -> Style {
    let pick = |on_light: Color, on_dark: Color| if theme.light { on_light } else { on_dark };
    match line_type {
        LineType::Heading(level) => {
            let fg = match level {
                1 => pick(Color::Indexed(24), Color::Cyan),
                2 => pick(Color::Indexed(22), Color::Green),
                3 => pick(Color::Indexed(58), Color::Yellow),
                4 => pick(Color::Indexed(24), Color::Blue),
                5 => pick(Color::Indexed(54), Color::Magenta),
                _ => pick(Color::Indexed(24), Color::Cyan),
            };
            let style = Style::default().fg(fg).add_modifier(Modifier::BOLD);
            if *level == 1 {
                style.add_modifier(Modifier::UNDERLINED)
            } else {
                style
            }
        }
        LineType::CodeBlock => Style::default()
            .fg(pick(Color::Indexed(238), Color::Indexed(245)))
            .add_modifier(Modifier::DIM),
        LineType::BlockQuote => Style::default()
            .fg(pick(Color::Indexed(24), Color::Blue))
            .add_modifier(Modifier::ITALIC),
        LineType::HorizontalRule => Style::default()
            .fg(pick(Color::Indexed(241), Color::Indexed(240)))
            .add_modifier(Modifier::DIM),
        LineType::Image => Style::default()
            .fg(pick(Color::Indexed(90), Color::Magenta))
            .add_modifier(Modifier::ITALIC),
        LineType::Html => Style::default().fg(pick(Color::Indexed(94), Color::Indexed(180))),
        LineType::ListItem(_) | LineType::Table | LineType::Paragraph | LineType::Empty => {
            Style::default()
        }
    }
}

/// Merge an inline span style onto its line style.
pub fn style_for_inline(base: Style, inline: InlineStyle, theme: PreviewTheme) -> Style {
    let light = theme.light;
    let mut style = base;
    if let Some(fg) = inline.fg {
        style = style
            .fg(terminal_color(fg, theme.truecolor))
            .remove_modifier(Modifier::DIM);
    }
    if inline.emphasis {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if inline.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if inline.strikethrough {
        style = style.add_modifier(Modifier::CROSSED_OUT);
    }
    if inline.link {
        style = style.add_modifier(Modifier::UNDERLINED);
        if inline.fg.is_none() {
            style = style.fg(if light { Color::Blue } else { Color::LightBlue });
        }
    }
    if inline.code && inline.fg.is_none() {
        style = style
            .fg(if light { Color::Indexed(88) } else { Color::Red })
            .add_modifier(Modifier::BOLD);
    }
    style
}

fn terminal_color(color: InlineColor, truecolor: bool) -> Color {
    if truecolor {
        Color::Rgb(color.r, color.g, color.b)
    } else {
        Color::Indexed(xterm_256_index(color))
    }
}

fn supports_truecolor(colorterm: Option<&str>, term: Option<&str>) -> bool {
    let has = |value: Option<&str>, needles: &[&str]| {
        value.is_some_and(|v| {
            let v = v.to_ascii_lowercase();
            needles.iter().any(|needle| v.contains(needle))
        })
    };
    has(colorterm, &["truecolor", "24bit"]) || has(term, &["direct", "truecolor"])
}

/// Nearest entry in the 6x6x6 color cube.
#[allow(clippy::cast_possible_truncation)]
fn xterm_256_index(color: InlineColor) -> u8 {
    let level = |v: u8| ((u16::from(v) * 5 + 127) / 255) as u8;
    16 + 36 * level(color.r) + 6 * level(color.g) + level(color.b)
}
