//! Colors and the drawing palette

use std::fmt;

use serde::{Deserialize, Serialize};

/// 8-bit RGBA color, serialized as `#rrggbb` or `#rrggbbaa`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional)
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => {
                let mut nibbles = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
                Some(Self::rgb(nibbles.next()??, nibbles.next()??, nibbles.next()??))
            }
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Normalized components for GPU vertex data
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xff {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color {value:?}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Colors used to paint a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Runner, obstacles, ground and dashes
    pub ink: Color,
    /// Sky fill
    pub background: Color,
    /// What a cleared region shows (the page behind the canvas)
    pub clear: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ink: Color::rgb(0x53, 0x53, 0x53),
            background: Color::rgb(0xf7, 0xf7, 0xf7),
            clear: Color::WHITE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::from_hex("#535353"), Some(Color::rgb(0x53, 0x53, 0x53)));
        assert_eq!(Color::from_hex("f7f7f7"), Some(Color::rgb(0xf7, 0xf7, 0xf7)));
        assert_eq!(Color::from_hex("#fff"), Some(Color::WHITE));
        assert_eq!(Color::from_hex("#00000080"), Some(Color::rgba(0, 0, 0, 0x80)));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_display_round_trips() {
        let c = Color::rgb(0x53, 0x53, 0x53);
        assert_eq!(c.to_string(), "#535353");
        assert_eq!(Color::from_hex(&c.to_string()), Some(c));
    }

    #[test]
    fn test_palette_from_json() {
        let palette: Palette = serde_json::from_str(r##"{"ink": "#000000"}"##).unwrap();
        assert_eq!(palette.ink, Color::rgb(0, 0, 0));
        assert_eq!(palette.background, Palette::default().background);

        let bad = serde_json::from_str::<Palette>(r##"{"ink": "black"}"##);
        assert!(bad.is_err());
    }
}
