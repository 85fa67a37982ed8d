//! Colors used by the widget theme.
//!
//! Colors are stored as normalized RGBA so any display surface can consume
//! them; `to_hex` gives the `#RRGGBB` form for toolkits that want strings.

use serde::{Deserialize, Serialize};

/// Opaque color from 8-bit channels, usable in const items
macro_rules! rgb8 {
    ($r:expr, $g:expr, $b:expr) => {
        Color {
            r: $r as f64 / 255.0,
            g: $g as f64 / 255.0,
            b: $b as f64 / 255.0,
            a: 1.0,
        }
    };
}

/// RGBA color with alpha channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Emerald - under budget
    pub const STATUS_GREEN: Color = rgb8!(0x10, 0xB9, 0x81);
    /// Gold - warning
    pub const STATUS_YELLOW: Color = rgb8!(0xFB, 0xBF, 0x24);
    /// Red - over budget
    pub const STATUS_RED: Color = rgb8!(0xEF, 0x44, 0x44);
    /// Soft glow purple used for the headline cost while spend is normal
    pub const ACCENT: Color = rgb8!(0xC4, 0xB5, 0xFD);

    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        )
    }

    /// Format as `#RRGGBB` (alpha dropped)
    pub fn to_hex(&self) -> String {
        let (r, g, b, _) = self.to_rgba8();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}
