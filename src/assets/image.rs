use std::sync::Arc;

use crate::foundation::error::{BadgeError, BadgeResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Borrowed premultiplied RGBA8 pixels, tightly packed, row-major.
#[derive(Clone, Copy, Debug)]
pub struct PixelView<'a> {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: &'a [u8],
}

impl PixelView<'_> {
    /// Premultiplied RGBA at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }
}

/// An immutable decoded bitmap.
///
/// Pixels are stored premultiplied and shared: cloning a `SourceImage` (for example when one
/// photo fills several slots) never copies pixel data.
#[derive(Clone, Debug)]
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Wrap straight-alpha RGBA8 pixels, premultiplying them once.
    pub fn from_rgba8(width: u32, height: u32, mut rgba8: Vec<u8>) -> BadgeResult<Self> {
        check_dims(width, height, rgba8.len())?;
        premultiply_rgba8_in_place(&mut rgba8);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8),
        })
    }

    /// Wrap pixels that are already premultiplied.
    pub fn from_rgba8_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> BadgeResult<Self> {
        check_dims(width, height, rgba8_premul.len())?;
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Take ownership of a straight-alpha `image` buffer.
    pub fn from_rgba_image(img: image::RgbaImage) -> BadgeResult<Self> {
        let (width, height) = img.dimensions();
        Self::from_rgba8(width, height, img.into_raw())
    }

    /// A uniformly colored image, mostly useful for tests and placeholders.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> BadgeResult<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| BadgeError::validation("image size overflow"))?;
        Self::from_rgba8(width, height, rgba.repeat(len))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Borrow the premultiplied pixels.
    pub fn view(&self) -> PixelView<'_> {
        PixelView {
            width: self.width,
            height: self.height,
            data: self.rgba8_premul.as_slice(),
        }
    }

    /// Whether both handles share the same pixel buffer.
    pub fn shares_pixels_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.rgba8_premul, &other.rgba8_premul)
    }
}

fn check_dims(width: u32, height: u32, len: usize) -> BadgeResult<()> {
    if width == 0 || height == 0 {
        return Err(BadgeError::validation(
            "decoded image must have non-zero width and height",
        ));
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| BadgeError::validation("image size overflow"))?;
    if len != expected {
        return Err(BadgeError::validation(format!(
            "image buffer has {len} bytes, expected {expected} for {width}x{height} rgba8"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/image.rs"]
mod tests;
