//! Row colour marks

use serde::Deserialize;
use serde::Serialize;

/// Background colour applied to every cell of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl RowColor {
    pub const RED: RowColor = RowColor::rgba(200, 0, 0, 200);
    pub const GREEN: RowColor = RowColor::rgba(0, 200, 0, 200);
    pub const BLUE: RowColor = RowColor::rgba(0, 0, 200, 200);
    /// Fully transparent; setting it removes the mark.
    pub const BASIC: RowColor = RowColor::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Looks up one of the named presets (`red`, `green`, `blue`, `basic`).
    pub fn named(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "red" => Some(Self::RED),
            "green" => Some(Self::GREEN),
            "blue" => Some(Self::BLUE),
            "basic" | "none" => Some(Self::BASIC),
            _ => None,
        }
    }
}

impl std::fmt::Display for RowColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}
