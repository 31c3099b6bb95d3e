// UI Styles
// Color parsing and the styles of the application chrome around the widget tree

use ratatui::style::{Color, Modifier, Style};

use crate::core::ThemeColors;

/// Parse a color name or `#rrggbb` value
///
/// Returns None for anything unrecognised so the caller can report it.
pub fn parse_color(color: &str) -> Option<Color> {
    let color = color.trim();
    if let Some(hex) = color.strip_prefix('#') {
        return hex_color(hex);
    }

    let parsed = match color.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        // ratatui has no Dark* variants for these
        "dark_red" | "darkred" => Color::Rgb(139, 0, 0),
        "dark_green" | "darkgreen" => Color::Rgb(0, 100, 0),
        "dark_yellow" | "darkyellow" => Color::Rgb(184, 134, 11),
        "dark_blue" | "darkblue" => Color::Rgb(0, 0, 139),
        "dark_magenta" | "darkmagenta" => Color::Rgb(139, 0, 139),
        "dark_cyan" | "darkcyan" => Color::Rgb(0, 139, 139),
        _ => return None,
    };
    Some(parsed)
}

fn hex_color(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Styles of the title and status lines
pub struct Styles;

impl Styles {
    pub fn title(colors: &ThemeColors) -> Style {
        Style::default().fg(colors.active_tab).add_modifier(Modifier::BOLD)
    }

    pub fn status(colors: &ThemeColors) -> Style {
        Style::default().fg(colors.inactive_tab)
    }
}
