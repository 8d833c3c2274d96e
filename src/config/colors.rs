//! Color configuration for the TUI.

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

const BLUSH: Color = Color::Rgb(0xC9, 0xA9, 0xA6);
const DEEP_ROSE: Color = Color::Rgb(0x9E, 0x4C, 0x5A);
const ROSE: Color = Color::Rgb(0xD8, 0xA7, 0xB1);

/// Configuration for all TUI colors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub accent: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub in_stock: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub sold: Color,
    // Summary cards
    #[serde(deserialize_with = "deserialize_color")]
    pub cost: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub revenue: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub sales: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub profit: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_bg: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            border: BLUSH,
            accent: DEEP_ROSE,
            selection_bg: DEEP_ROSE,
            selection_fg: Color::White,
            in_stock: Color::White,
            sold: Color::Green,
            cost: DEEP_ROSE,
            revenue: ROSE,
            sales: Color::Green,
            profit: Color::LightGreen,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
        }
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color_string(&s).map_err(de::Error::custom)
}

/// Parse a color string into a ratatui Color.
///
/// Accepts the sixteen named terminal colors (case-insensitive), `Reset`,
/// and hex codes in `#RRGGBB` or `#RGB` form.
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex).ok_or_else(|| format!("Invalid hex color: {}", s));
    }

    let color = match s.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        "reset" => Color::Reset,
        _ => return Err(format!("Unknown color: {}", s)),
    };
    Ok(color)
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();

    match hex.len() {
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => Some(Color::Rgb(
            channel(&hex[0..1])? * 17,
            channel(&hex[1..2])? * 17,
            channel(&hex[2..3])? * 17,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color_string("Green").unwrap(), Color::Green);
        assert_eq!(parse_color_string("lightgreen").unwrap(), Color::LightGreen);
        assert_eq!(parse_color_string("DARKGREY").unwrap(), Color::DarkGray);
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(parse_color_string("#9E4C5A").unwrap(), DEEP_ROSE);
        assert_eq!(parse_color_string("#c9a9a6").unwrap(), BLUSH);
        assert_eq!(parse_color_string("#F0A").unwrap(), Color::Rgb(255, 0, 170));
    }

    #[test]
    fn test_parse_invalid_colors() {
        assert!(parse_color_string("mauve").is_err());
        assert!(parse_color_string("#GGGGGG").is_err());
        assert!(parse_color_string("#12345").is_err());
        assert!(parse_color_string("#ééé").is_err());
    }
}
