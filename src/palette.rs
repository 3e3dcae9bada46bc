//! Fixed colors shared by the screen and print renderers.

use std::fmt;

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch(pub u8, pub u8, pub u8);

impl Swatch {
    /// Channels scaled to 0.0..=1.0, as PDF color operators expect them.
    pub fn unit(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

pub const FEMALE: Swatch = Swatch(0xF5, 0xB7, 0xB1);
pub const MALE: Swatch = Swatch(0xA9, 0xCC, 0xE3);
pub const UNSPECIFIED: Swatch = Swatch(0xE5, 0xE7, 0xEB);

/// Empty seat fill and its dashed outline
pub const EMPTY_FILL: Swatch = Swatch(0xE0, 0xE7, 0xFF);
pub const EMPTY_STROKE: Swatch = Swatch(0xD1, 0xD5, 0xDB);
pub const EMPTY_TEXT: Swatch = Swatch(0x9C, 0xA3, 0xAF);

pub const PODIUM_FILL: Swatch = Swatch(0xEF, 0xF6, 0xFF);
pub const PODIUM_STROKE: Swatch = Swatch(0x25, 0x63, 0xEB);

pub const BLACK: Swatch = Swatch(0, 0, 0);
