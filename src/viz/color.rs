use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque 24-bit color. Parsed from and printed as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// "No data" color. Never a member of any classification table.
    pub const NEUTRAL: Rgb = Rgb::new(0xcc, 0xcc, 0xcc);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// From a `0xrrggbb` literal
    pub const fn from_u32(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Parse `#rrggbb` (the leading `#` is optional, case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| Error::InvalidColor(hex.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

impl From<Rgb> for ratatui::style::Color {
    fn from(value: Rgb) -> Self {
        ratatui::style::Color::Rgb(value.r, value.g, value.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb::from_hex("#BD0026").unwrap(), Rgb::new(0xbd, 0x00, 0x26));
        assert_eq!(Rgb::from_hex("5aae61").unwrap(), Rgb::new(0x5a, 0xae, 0x61));
    }

    #[test]
    fn test_reject_bad_hex() {
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#zz0000").is_err());
        assert!(Rgb::from_hex("#ééé").is_err());
        assert!(Rgb::from_hex("##aabbcc").is_err());
        assert!(Rgb::from_hex("+f+f+f").is_err());
        assert!(Rgb::from_hex("#-1a2b3").is_err());
    }

    #[test]
    fn test_hex_and_display() {
        let c = Rgb::new(255, 155, 0);
        assert_eq!(c.to_hex(), "#ff9b00");
        assert_eq!(c.to_string(), "rgb(255, 155, 0)");
    }
}
