//! Linear RGB colors

use serde::{Deserialize, Serialize};

/// RGB color with channels in `[0, 1]`
///
/// Serialized as a `0xRRGGBB` integer so configuration files can use the
/// familiar hex notation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Color {
    /// White
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    /// Build a color from channel values (clamped into `[0, 1]`)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Build a color from a `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| f32::from(u8::try_from((hex >> shift) & 0xff).unwrap_or(u8::MAX)) / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    /// Pack into a `0xRRGGBB` value (channels rounded to 8 bits)
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_hex(self) -> u32 {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Whether every channel lies in the valid range
    pub fn is_valid(&self) -> bool {
        [self.r, self.g, self.b].iter().all(|c| (0.0..=1.0).contains(c))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hex_conversion_matches_channels() {
        let color = Color::from_hex(0x3498db);
        assert_relative_eq!(color.r, 52.0 / 255.0);
        assert_relative_eq!(color.g, 152.0 / 255.0);
        assert_relative_eq!(color.b, 219.0 / 255.0);
        assert_eq!(color.to_hex(), 0x3498db);
    }

    #[test]
    fn rgb_clamps_out_of_range_channels() {
        let color = Color::rgb(-1.0, 0.5, 2.0);
        assert_eq!(color, Color::rgb(0.0, 0.5, 1.0));
        assert!(color.is_valid());
    }
}
