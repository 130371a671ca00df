use crate::foundation::error::{BadgeError, BadgeResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Opaque 8-bit sRGB color used for background fills and guide strokes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb8 {
    /// `#ffffff`
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// `#000000`
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// A color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(s: &str) -> BadgeResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(BadgeError::validation(format!(
                "color '{s}' must be written as #rrggbb"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| BadgeError::validation(format!("color '{s}' is not valid hex")))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Premultiplied RGBA8 for this color at the given alpha.
    pub fn to_premul_rgba(self, alpha: u8) -> [u8; 4] {
        let a = u16::from(alpha);
        let premul = |c: u8| crate::foundation::math::mul_div255_u8(u16::from(c), a);
        [premul(self.r), premul(self.g), premul(self.b), alpha]
    }
}

impl Default for Rgb8 {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
