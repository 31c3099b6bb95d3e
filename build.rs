// Build script - reads config.yaml at compile time and generates renderer defaults
// This allows changing the look of the terminal renderer without editing source code

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Tell Cargo to rerun if config.yaml changes
    println!("cargo:rerun-if-changed=src/config.yaml");

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("compiled_config.rs");

    // Try to read config.yaml from src/, fall back to hardcoded defaults if not found
    let config = if Path::new("src/config.yaml").exists() {
        let content = fs::read_to_string("src/config.yaml")
            .expect("Failed to read src/config.yaml");
        parse_config(&content)
    } else {
        CompiledConfig::default()
    };

    let generated = format!(
        r#"// Auto-generated from config.yaml at compile time
// Do not edit - modify config.yaml and rebuild instead

pub const MOUSE_ENABLED: bool = {mouse_enabled};
pub const CLOSE_GLYPH: &str = {close_glyph:?};
pub const TAB_SEPARATOR: &str = {tab_separator:?};

// Renderer colors (RGB tuples)
pub const ACTIVE_TAB_FG: (u8, u8, u8) = {active_tab_fg};
pub const INACTIVE_TAB_FG: (u8, u8, u8) = {inactive_tab_fg};
pub const HOVERED_TAB_FG: (u8, u8, u8) = {hovered_tab_fg};
pub const TEXT_FG: (u8, u8, u8) = {text_fg};
pub const TOOLTIP_BG: (u8, u8, u8) = {tooltip_bg};
"#,
        mouse_enabled = config.mouse_enabled,
        close_glyph = config.close_glyph,
        tab_separator = config.tab_separator,
        active_tab_fg = rgb(config.active_tab_fg),
        inactive_tab_fg = rgb(config.inactive_tab_fg),
        hovered_tab_fg = rgb(config.hovered_tab_fg),
        text_fg = rgb(config.text_fg),
        tooltip_bg = rgb(config.tooltip_bg),
    );

    fs::write(&dest_path, generated).expect("Failed to write compiled config");
}

fn rgb(c: (u8, u8, u8)) -> String {
    format!("({}, {}, {})", c.0, c.1, c.2)
}

struct CompiledConfig {
    mouse_enabled: bool,
    close_glyph: String,
    tab_separator: String,
    active_tab_fg: (u8, u8, u8),
    inactive_tab_fg: (u8, u8, u8),
    hovered_tab_fg: (u8, u8, u8),
    text_fg: (u8, u8, u8),
    tooltip_bg: (u8, u8, u8),
}

impl Default for CompiledConfig {
    fn default() -> Self {
        Self {
            mouse_enabled: true,
            close_glyph: "x".to_string(),
            tab_separator: " │ ".to_string(),
            active_tab_fg: (0, 255, 255),    // #00ffff
            inactive_tab_fg: (119, 119, 119), // #777777
            hovered_tab_fg: (255, 255, 255),  // #ffffff
            text_fg: (220, 220, 220),         // #dcdcdc
            tooltip_bg: (26, 42, 42),         // #1a2a2a
        }
    }
}

fn parse_config(content: &str) -> CompiledConfig {
    let mut config = CompiledConfig::default();

    // Simple YAML parsing (avoiding external dependencies in build script)
    let mut in_ui = false;
    let mut in_colors = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("ui:") {
            in_ui = true;
            in_colors = false;
            continue;
        } else if trimmed.starts_with("colors:") {
            in_ui = false;
            in_colors = true;
            continue;
        }

        let Some((key, value)) = parse_kv(trimmed) else {
            continue;
        };

        if in_ui {
            match key {
                "mouse_enabled" => config.mouse_enabled = parse_bool(value),
                "close_glyph" => config.close_glyph = unquote(value).to_string(),
                "tab_separator" => config.tab_separator = unquote(value).to_string(),
                _ => {}
            }
        } else if in_colors {
            match key {
                "active_tab_fg" => config.active_tab_fg = parse_hex_color(value),
                "inactive_tab_fg" => config.inactive_tab_fg = parse_hex_color(value),
                "hovered_tab_fg" => config.hovered_tab_fg = parse_hex_color(value),
                "text_fg" => config.text_fg = parse_hex_color(value),
                "tooltip_bg" => config.tooltip_bg = parse_hex_color(value),
                _ => {}
            }
        }
    }

    config
}

fn parse_kv(line: &str) -> Option<(&str, &str)> {
    // Skip comments and empty lines
    if line.starts_with('#') || line.is_empty() {
        return None;
    }

    let colon_pos = line.find(':')?;
    let key = line[..colon_pos].trim();
    let mut value = line[colon_pos + 1..].trim();

    // Remove inline comments, but keep a leading # (hex color)
    if let Some(comment_pos) = value.find(" #") {
        value = value[..comment_pos].trim();
    }

    // Skip if value is empty (section header)
    if value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn unquote(s: &str) -> &str {
    s.trim().trim_matches('"').trim_matches('\'')
}

fn parse_bool(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "true" | "yes" | "1")
}

fn parse_hex_color(s: &str) -> (u8, u8, u8) {
    let s = unquote(s);
    let s = s.strip_prefix('#').unwrap_or(s);

    if s.len() == 6 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&s[0..2], 16),
            u8::from_str_radix(&s[2..4], 16),
            u8::from_str_radix(&s[4..6], 16),
        ) {
            return (r, g, b);
        }
    }

    // Fallback to black if parsing fails
    (0, 0, 0)
}
