// src/ui/style.rs
// Stylize is needed for bold/dim/italic in this scope
use ratatui::style::{Style, Stylize};
use ratatui::style::Color;

use crate::clock::settings::DEFAULT_HIGHLIGHT_COLOR;

/// Colors for one display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub active: Color,
    pub inactive: Color,
    pub text: Color,
}

impl Palette {
    pub const DARK: Palette = Palette {
        background: Color::Rgb(18, 18, 18),
        active: Color::Rgb(224, 224, 224),
        inactive: Color::Rgb(44, 44, 44),
        text: Color::Rgb(158, 158, 158),
    };

    pub const LIGHT: Palette = Palette {
        background: Color::Rgb(245, 245, 245),
        active: Color::Rgb(33, 33, 33),
        inactive: Color::Rgb(214, 214, 214),
        text: Color::Rgb(97, 97, 97),
    };

    pub fn for_theme(light_theme: bool) -> Palette {
        if light_theme { Self::LIGHT } else { Self::DARK }
    }
}

pub fn dim_unless_running(running: bool, style: Style) -> Style {
    if running { style.bold() } else { style.dim().italic() }
}

/// Parse `#rrggbb` or `rgb(r,g,b)` into a terminal color.
pub fn parse_css_color(color: &str) -> Option<Color> {
    let color = color.trim();

    if let Some(hex) = color.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
    }

    let inner = color.strip_prefix("rgb(")?.strip_suffix(')')?;
    let channels = inner
        .split(',')
        .map(|c| c.trim().parse::<u8>().ok())
        .collect::<Option<Vec<_>>>()?;
    match channels[..] {
        [r, g, b] => Some(Color::Rgb(r, g, b)),
        _ => None,
    }
}

/// Highlight color, falling back to the default accent when unparsable.
pub fn highlight_or_default(color: &str) -> Color {
    parse_css_color(color)
        .or_else(|| parse_css_color(DEFAULT_HIGHLIGHT_COLOR))
        .unwrap_or(Color::Rgb(245, 124, 0))
}
