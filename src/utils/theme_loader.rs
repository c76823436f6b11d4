use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use strum_macros::Display;

/// Which variant of a theme file to apply. Ordered so discovery lists sort
/// dark before light for the same file.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeFile {
    #[allow(dead_code)]
    pub name: String,
    pub themes: Vec<ThemeVariant>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeVariant {
    #[allow(dead_code)]
    pub name: String,
    pub mode: ThemeMode,
    pub colors: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub accent: Color,
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::Reset,
            border: Color::White,
            accent: Color::Blue,
            muted: Color::DarkGray,
        }
    }
}

#[tracing::instrument(skip(path, mode), fields(path = ?path, mode = %mode))]
pub fn load_theme(path: &Path, mode: ThemeMode, enable_performance_metrics: bool) -> Result<Theme> {
    let start = std::time::Instant::now();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read theme file {}", path.display()))?;
    let theme_file: ThemeFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

    let variant = theme_file
        .themes
        .iter()
        .find(|t| t.mode == mode)
        .or_else(|| theme_file.themes.first())
        .context("No matching theme variant found")?;

    let theme = Theme {
        background: parse_color(
            variant
                .colors
                .get("background")
                .unwrap_or(&"#000000".to_string()),
        ),
        foreground: parse_color(
            variant
                .colors
                .get("foreground")
                .unwrap_or(&"#ffffff".to_string()),
        ),
        border: parse_color(
            variant
                .colors
                .get("border")
                .unwrap_or(&"#ffffff".to_string()),
        ),
        accent: parse_color(
            variant
                .colors
                .get("accent")
                .or_else(|| variant.colors.get("selection.background"))
                .unwrap_or(&"#0000ff".to_string()),
        ),
        muted: parse_color(
            variant
                .colors
                .get("muted")
                .or_else(|| variant.colors.get("muted.foreground"))
                .unwrap_or(&"#808080".to_string()),
        ),
    };

    if enable_performance_metrics {
        tracing::debug!(elapsed = ?start.elapsed(), "Loaded theme");
    }

    Ok(theme)
}

fn parse_color(hex: &str) -> Color {
    // Color names and hex codes are ASCII. Anything else can never parse,
    // and the byte-indexed slices below would split a multibyte character.
    if !hex.is_ascii() {
        return Color::Reset;
    }

    if let Ok(c) = hex.parse::<Color>() {
        return c;
    }

    let hex = hex.trim_start_matches('#');
    match hex.len() {
        6 | 8 => {
            // For 8-char hex (with alpha), ignore the alpha and use the RGB components.
            let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
            let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
            let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
            Color::Rgb(r, g, b)
        }
        _ => Color::Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_color_hex() {
        assert_eq!(parse_color("#1e1e2e"), Color::Rgb(0x1e, 0x1e, 0x2e));
        assert_eq!(parse_color("#ffffff"), Color::Rgb(255, 255, 255));
        // Alpha channel is ignored
        assert_eq!(parse_color("#ff000080"), Color::Rgb(255, 0, 0));
    }

    #[test]
    fn test_parse_color_named_and_invalid() {
        assert_eq!(parse_color("blue"), Color::Blue);
        assert_eq!(parse_color("not-a-color"), Color::Reset);
        assert_eq!(parse_color("#12"), Color::Reset);
        // Multibyte values must never be byte-sliced as hex digits, whatever
        // length they land on.
        assert_eq!(parse_color("ヘヘ"), Color::Reset);
        assert_eq!(parse_color("#ヘヘ"), Color::Reset);
        assert_eq!(parse_color("#ヘヘab"), Color::Reset);
    }

    #[test]
    fn test_mode_display_and_toggle() {
        assert_eq!(ThemeMode::Dark.to_string(), "dark");
        assert_eq!(ThemeMode::Light.to_string(), "light");
        assert_eq!(ThemeMode::Dark.toggle(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggle(), ThemeMode::Dark);
    }

    #[test]
    fn test_load_shipped_theme_both_modes() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("themes")
            .join("default.json");

        let dark = load_theme(&path, ThemeMode::Dark, false).unwrap();
        let light = load_theme(&path, ThemeMode::Light, false).unwrap();

        assert_ne!(dark.background, light.background);
        assert_ne!(dark.foreground, light.foreground);
    }

    #[test]
    fn test_load_falls_back_to_first_variant() {
        use std::io::Write;

        let path = std::env::temp_dir().join("greeting_theme_dark_only.json");
        let json = r##"{
            "name": "Dark Only",
            "themes": [
                { "name": "Dark Only", "mode": "dark", "colors": { "foreground": "#cdd6f4" } }
            ]
        }"##;
        {
            let mut file = std::fs::File::create(&path).unwrap();
            file.write_all(json.as_bytes()).unwrap();
        }

        // Asking for light still yields the single dark variant.
        let theme = load_theme(&path, ThemeMode::Light, false).unwrap();
        assert_eq!(theme.foreground, Color::Rgb(0xcd, 0xd6, 0xf4));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_multibyte_color_value_falls_back() {
        use std::io::Write;

        let path = std::env::temp_dir().join("greeting_theme_multibyte.json");
        let json = r##"{
            "name": "Multibyte",
            "themes": [
                {
                    "name": "Multibyte",
                    "mode": "dark",
                    "colors": { "background": "ヘヘ", "foreground": "#cdd6f4" }
                }
            ]
        }"##;
        {
            let mut file = std::fs::File::create(&path).unwrap();
            file.write_all(json.as_bytes()).unwrap();
        }

        let theme = load_theme(&path, ThemeMode::Dark, false).unwrap();
        assert_eq!(theme.background, Color::Reset);
        assert_eq!(theme.foreground, Color::Rgb(0xcd, 0xd6, 0xf4));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let err = load_theme(Path::new("./no-such-theme.json"), ThemeMode::Dark, false)
            .unwrap_err()
            .to_string();
        assert!(err.contains("Failed to read theme file"));
        assert!(err.contains("no-such-theme.json"));
    }
}
