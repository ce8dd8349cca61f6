// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared value types of the command language.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a point's altitude is interpreted against terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AltitudeMode {
    /// Meters above sea level
    #[default]
    Absolute,
    /// Meters above the ground at that point
    RelativeToGround,
    /// Meters above the 3D terrain mesh
    RelativeToMesh,
    /// Altitude ignored, point sits on the ground
    ClampToGround,
}

impl AltitudeMode {
    /// Parse one of the script literals `absolute`, `relativeToGround`,
    /// `relativeToMesh`, or `clampToGround`. Anything else is rejected.
    pub fn from_literal(value: &str) -> Option<Self> {
        match value {
            "absolute" => Some(Self::Absolute),
            "relativeToGround" => Some(Self::RelativeToGround),
            "relativeToMesh" => Some(Self::RelativeToMesh),
            "clampToGround" => Some(Self::ClampToGround),
            _ => None,
        }
    }

    /// The script literal for this mode.
    pub fn literal(&self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
            Self::RelativeToGround => "relativeToGround",
            Self::RelativeToMesh => "relativeToMesh",
            Self::ClampToGround => "clampToGround",
        }
    }
}

impl fmt::Display for AltitudeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

/// An ARGB color parsed from a `#RRGGBB` or `#AARRGGBB` hex literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Alpha channel, 255 is opaque
    pub alpha: u8,
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
}

impl Color {
    /// Opaque blue, the default stroke and line color.
    pub const OPAQUE_BLUE: Color = Color::rgb(0x00, 0x00, 0xFF);

    /// Semi-transparent blue, the default polygon fill.
    pub const TRANSLUCENT_BLUE: Color = Color::argb(0x80, 0x00, 0x00, 0xFF);

    /// Build an opaque color from red, green, and blue channels.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::argb(0xFF, red, green, blue)
    }

    /// Build a color from alpha, red, green, and blue channels.
    pub const fn argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self {
            alpha,
            red,
            green,
            blue,
        }
    }

    /// Parse a `#RRGGBB` or `#AARRGGBB` hex literal. A six-digit literal
    /// is opaque. Anything else is rejected.
    pub fn from_hex(value: &str) -> Option<Self> {
        let digits = value.strip_prefix('#')?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |offset: usize| u8::from_str_radix(&digits[offset..offset + 2], 16).ok();
        match digits.len() {
            6 => Some(Self::argb(0xFF, channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::argb(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.alpha, self.red, self.green, self.blue
        )
    }
}
