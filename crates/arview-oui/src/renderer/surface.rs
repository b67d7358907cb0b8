//! Rendering surface capabilities and color types

use std::str::FromStr;

use thiserror::Error;

/// Rendering surface capabilities
#[derive(Debug, Clone)]
pub struct SurfaceCapabilities {
    /// Width in cells
    pub width: u32,
    /// Height in cells
    pub height: u32,
}

impl Default for SurfaceCapabilities {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
        }
    }
}

/// Color representation supporting ANSI names and true color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Reset to default
    #[default]
    Reset,
    Black,
    DarkGrey,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Yellow,
    DarkYellow,
    Blue,
    DarkBlue,
    Magenta,
    DarkMagenta,
    Cyan,
    DarkCyan,
    White,
    Grey,
    /// True color RGB
    Rgb(u8, u8, u8),
}

/// A color string that is neither a known name nor `#rrggbb`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized color '{0}' (expected a color name or #rrggbb)")]
pub struct ParseColorError(pub String);

impl Color {
    pub const ORANGE: Self = Color::Rgb(255, 140, 0);
    pub const HUD_CYAN: Self = Color::Rgb(0, 255, 255);
    pub const HORIZON: Self = Color::Rgb(70, 90, 110);
    pub const GROUND: Self = Color::Rgb(45, 50, 40);
    pub const FEED_BACKGROUND: Self = Color::Rgb(18, 22, 28);

    /// Convert to crossterm color
    pub fn to_crossterm(&self) -> crossterm::style::Color {
        use crossterm::style::Color as C;
        match *self {
            Color::Reset => C::Reset,
            Color::Black => C::Black,
            Color::DarkGrey => C::DarkGrey,
            Color::Red => C::Red,
            Color::DarkRed => C::DarkRed,
            Color::Green => C::Green,
            Color::DarkGreen => C::DarkGreen,
            Color::Yellow => C::Yellow,
            Color::DarkYellow => C::DarkYellow,
            Color::Blue => C::Blue,
            Color::DarkBlue => C::DarkBlue,
            Color::Magenta => C::Magenta,
            Color::DarkMagenta => C::DarkMagenta,
            Color::Cyan => C::Cyan,
            Color::DarkCyan => C::DarkCyan,
            Color::White => C::White,
            Color::Grey => C::Grey,
            Color::Rgb(r, g, b) => C::Rgb { r, g, b },
        }
    }

    /// Config-file name for the color; true colors render as `#rrggbb`
    pub fn name(&self) -> String {
        let name = match self {
            Color::Reset => "reset",
            Color::Black => "black",
            Color::DarkGrey => "darkgrey",
            Color::Red => "red",
            Color::DarkRed => "darkred",
            Color::Green => "green",
            Color::DarkGreen => "darkgreen",
            Color::Yellow => "yellow",
            Color::DarkYellow => "darkyellow",
            Color::Blue => "blue",
            Color::DarkBlue => "darkblue",
            Color::Magenta => "magenta",
            Color::DarkMagenta => "darkmagenta",
            Color::Cyan => "cyan",
            Color::DarkCyan => "darkcyan",
            Color::White => "white",
            Color::Grey => "grey",
            Color::Rgb(r, g, b) => return format!("#{:02x}{:02x}{:02x}", r, g, b),
        };
        name.to_string()
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            let channel = |i: usize| {
                hex.get(i..i + 2)
                    .and_then(|c| u8::from_str_radix(c, 16).ok())
            };
            return match (hex.len(), channel(0), channel(2), channel(4)) {
                (6, Some(r), Some(g), Some(b)) => Ok(Color::Rgb(r, g, b)),
                _ => Err(ParseColorError(s.to_string())),
            };
        }

        let color = match trimmed.to_ascii_lowercase().as_str() {
            "black" => Color::Black,
            "darkgrey" | "darkgray" => Color::DarkGrey,
            "red" => Color::Red,
            "darkred" => Color::DarkRed,
            "green" => Color::Green,
            "darkgreen" => Color::DarkGreen,
            "yellow" => Color::Yellow,
            "darkyellow" => Color::DarkYellow,
            "blue" => Color::Blue,
            "darkblue" => Color::DarkBlue,
            "magenta" | "purple" => Color::Magenta,
            "darkmagenta" => Color::DarkMagenta,
            "cyan" => Color::Cyan,
            "darkcyan" => Color::DarkCyan,
            "white" => Color::White,
            "reset" | "default" => Color::Reset,
            "grey" | "gray" => Color::Grey,
            "orange" => Color::ORANGE,
            _ => return Err(ParseColorError(s.to_string())),
        };
        Ok(color)
    }
}
