//! Hex color parsing for the particle fill.

use glam::Vec4;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb`, `#rrggbb`, `rgb` or `rrggbb`.
    ///
    /// Three digit colors are expanded by doubling every digit, so `#0af`
    /// and `#00aaff` are the same color.
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || ConfigError::InvalidColor(hex.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };

        let value = u32::from_str_radix(&expanded, 16).map_err(|_| invalid())?;
        Ok(Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        })
    }

    /// Normalized RGBA with the given alpha, as handed to a [`Surface`](crate::Surface).
    pub fn with_alpha(self, alpha: f32) -> Vec4 {
        Vec4::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            alpha.clamp(0.0, 1.0),
        )
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
