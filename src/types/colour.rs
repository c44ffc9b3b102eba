//! Colour type and parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, RetintError};

/// An opaque RGB colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Create a new colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RRGGBB` (6 digits)
    ///
    /// The leading `#` is optional.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid_hex(s));
        }

        match hex.len() {
            3 => {
                // #RGB -> #RRGGBB
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
            _ => Err(invalid_hex(s)),
        }
    }

    /// Upper-case `#RRGGBB` form.
    pub fn to_hex(self) -> String {
        self.to_string()
    }

    /// Channels as an array.
    pub fn to_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Decimal `r, g, b` form, as used inside `rgb()`/`rgba()`.
    pub fn to_rgb_triple(self) -> String {
        format!("{}, {}, {}", self.r, self.g, self.b)
    }
}

impl FromStr for Colour {
    type Err = RetintError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

fn invalid_hex(s: &str) -> RetintError {
    RetintError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RRGGBB or #RGB format".to_string()),
    }
}

/// Parse a one- or two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| RetintError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_6digit() {
        let c = Colour::from_hex("#E95420").unwrap();
        assert_eq!(c, Colour::rgb(0xE9, 0x54, 0x20));

        let c = Colour::from_hex("#3584e4").unwrap();
        assert_eq!(c, Colour::rgb(0x35, 0x84, 0xE4));
    }

    #[test]
    fn test_from_hex_3digit() {
        let c = Colour::from_hex("#F00").unwrap();
        assert_eq!(c, Colour::rgb(255, 0, 0));

        let c = Colour::from_hex("#ABC").unwrap();
        assert_eq!(c, Colour::rgb(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_from_hex_no_hash() {
        let c = Colour::from_hex("77216F").unwrap();
        assert_eq!(c, Colour::rgb(0x77, 0x21, 0x6F));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Colour::from_hex("#GGG").is_err());
        assert!(Colour::from_hex("#12345").is_err());
        assert!(Colour::from_hex("#FF000080").is_err());
        assert!(Colour::from_hex("").is_err());
        assert!(Colour::from_hex("#+1+2+3").is_err());
    }

    #[test]
    fn test_display_is_uppercase() {
        assert_eq!(Colour::rgb(0xe9, 0x54, 0x20).to_string(), "#E95420");
        assert_eq!(Colour::BLACK.to_hex(), "#000000");
    }

    #[test]
    fn test_rgb_triple() {
        assert_eq!(Colour::rgb(233, 84, 32).to_rgb_triple(), "233, 84, 32");
    }
}
