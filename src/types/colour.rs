//! Colour type and parsing.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Serialize, Serializer};

use crate::error::{BidetError, Result};

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RRGGBB` (6 digits)
    /// - `#RRGGBBAA` (8 digits)
    /// - `#RRRRGGGGBBBB` (12 digits, 16 bits per channel)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        match hex.len() {
            3 => {
                let r = parse_hex_byte(&hex[0..1])?;
                let g = parse_hex_byte(&hex[1..2])?;
                let b = parse_hex_byte(&hex[2..3])?;
                Ok(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            6 => {
                let r = parse_hex_byte(&hex[0..2])?;
                let g = parse_hex_byte(&hex[2..4])?;
                let b = parse_hex_byte(&hex[4..6])?;
                Ok(Self::rgb(r, g, b))
            }
            8 => {
                let r = parse_hex_byte(&hex[0..2])?;
                let g = parse_hex_byte(&hex[2..4])?;
                let b = parse_hex_byte(&hex[4..6])?;
                let a = parse_hex_byte(&hex[6..8])?;
                Ok(Self::new(r, g, b, a))
            }
            12 => Self::from_hex48(hex),
            _ => Err(invalid_hex(s)),
        }
    }

    /// Parse a 48-bit hex colour (`#RRRRGGGGBBBB`), as reported by terminals.
    ///
    /// Each 16-bit channel is scaled down to 8 bits by dividing by 257.
    pub fn from_hex48(s: &str) -> Result<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 12 || !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        let channel = |range: std::ops::Range<usize>| -> Result<u8> {
            let wide = u16::from_str_radix(&hex[range], 16).map_err(|_| invalid_hex(s))?;
            Ok((wide / 257) as u8)
        };

        Ok(Self::rgb(channel(0..4)?, channel(4..8)?, channel(8..12)?))
    }

    /// Format as a 48-bit hex string (`#RRRRGGGGBBBB`).
    pub fn to_hex48(self) -> String {
        format!(
            "#{:04X}{:04X}{:04X}",
            self.r as u16 * 257,
            self.g as u16 * 257,
            self.b as u16 * 257
        )
    }

    /// Format as `#RRGGBB`, ignoring alpha.
    pub fn to_hex_rgb(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Same colour with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Convert to RGBA tuple.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Colour> for Rgba<u8> {
    fn from(colour: Colour) -> Self {
        Rgba(colour.to_rgba())
    }
}

impl From<Rgba<u8>> for Colour {
    fn from(px: Rgba<u8>) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }
}

impl FromStr for Colour {
    type Err = BidetError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for Colour {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

fn invalid_hex(s: &str) -> BidetError {
    BidetError::Config {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB, #RRGGBB, #RRGGBBAA, or #RRRRGGGGBBBB format".to_string()),
    }
}

/// Parse a one- or two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| BidetError::Config {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_6digit() {
        let c = Colour::from_hex("#FF0000").unwrap();
        assert_eq!(c, Colour::rgb(255, 0, 0));

        let c = Colour::from_hex("#1a1a2e").unwrap();
        assert_eq!(c, Colour::rgb(0x1a, 0x1a, 0x2e));
    }

    #[test]
    fn test_from_hex_3digit() {
        let c = Colour::from_hex("#ABC").unwrap();
        assert_eq!(c, Colour::rgb(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_from_hex_8digit() {
        let c = Colour::from_hex("#FF000080").unwrap();
        assert_eq!(c, Colour::new(255, 0, 0, 128));
    }

    #[test]
    fn test_from_hex48() {
        let c = Colour::from_hex48("#FFFF80800000").unwrap();
        assert_eq!(c, Colour::rgb(255, 128, 0));

        // 0x7FFF / 257 = 127.5 -> truncated
        let c = Colour::from_hex("#7FFF7FFF7FFF").unwrap();
        assert_eq!(c, Colour::rgb(127, 127, 127));
    }

    #[test]
    fn test_hex48_round_trip_within_one() {
        for v in [0u8, 1, 2, 63, 127, 128, 200, 254, 255] {
            let c = Colour::rgb(v, 255 - v, v / 2);
            let back = Colour::from_hex48(&c.to_hex48()).unwrap();
            assert!((back.r as i16 - c.r as i16).abs() <= 1);
            assert!((back.g as i16 - c.g as i16).abs() <= 1);
            assert!((back.b as i16 - c.b as i16).abs() <= 1);
        }
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Colour::from_hex("#GGG").is_err());
        assert!(Colour::from_hex("#12345").is_err());
        assert!(Colour::from_hex("").is_err());
        assert!(Colour::from_hex48("#FFFF").is_err());
        assert!(Colour::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Colour::rgb(255, 0, 0)), "#FF0000");
        assert_eq!(format!("{}", Colour::new(255, 0, 0, 128)), "#FF000080");
        assert_eq!(Colour::new(1, 2, 3, 0).to_hex_rgb(), "#010203");
    }

    #[test]
    fn test_rgba_conversion() {
        let px: Rgba<u8> = Colour::new(1, 2, 3, 4).into();
        assert_eq!(px.0, [1, 2, 3, 4]);
        assert_eq!(Colour::from(px), Colour::new(1, 2, 3, 4));
    }
}
