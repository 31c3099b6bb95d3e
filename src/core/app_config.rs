// Renderer Configuration
// Defaults compiled from config.yaml at build time
// Modify config.yaml and rebuild to change these values

use ratatui::style::Color;

// Include the auto-generated config from build.rs
pub mod compiled {
    include!(concat!(env!("OUT_DIR"), "/compiled_config.rs"));
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

/// Look of the terminal renderer
/// Values are compiled in from config.yaml at build time
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// Enable mouse support
    pub mouse_enabled: bool,

    /// Glyph drawn after the label of closable tabs
    pub close_glyph: String,

    /// Text between two tab headers
    pub tab_separator: String,

    pub colors: ThemeColors,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub active_tab: Color,
    pub inactive_tab: Color,
    pub hovered_tab: Color,
    pub text: Color,
    pub tooltip_bg: Color,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            active_tab: rgb(compiled::ACTIVE_TAB_FG),
            inactive_tab: rgb(compiled::INACTIVE_TAB_FG),
            hovered_tab: rgb(compiled::HOVERED_TAB_FG),
            text: rgb(compiled::TEXT_FG),
            tooltip_bg: rgb(compiled::TOOLTIP_BG),
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            mouse_enabled: compiled::MOUSE_ENABLED,
            close_glyph: compiled::CLOSE_GLYPH.to_string(),
            tab_separator: compiled::TAB_SEPARATOR.to_string(),
            colors: ThemeColors::default(),
        }
    }
}
