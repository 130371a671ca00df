use std::path::Path;

use anyhow::Context;

use crate::assets::image::PixelView;
use crate::foundation::error::{BadgeError, BadgeResult};
use crate::foundation::math::{Fnv1a64, unpremultiply_rgba8_in_place};

/// A rendered raster as **premultiplied** RGBA8 pixels, tightly packed, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes.
    pub data: Vec<u8>,
}

impl Raster {
    /// Fully transparent raster.
    pub fn new(width: u32, height: u32) -> BadgeResult<Self> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Raster with every pixel set to `rgba_premul`.
    pub fn filled(width: u32, height: u32, rgba_premul: [u8; 4]) -> BadgeResult<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| BadgeError::render("raster size overflow"))?;
        Ok(Self {
            width,
            height,
            data: rgba_premul.repeat(len),
        })
    }

    /// Wrap premultiplied bytes, checking their length.
    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> BadgeResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| BadgeError::render("raster size overflow"))?;
        if data.len() != expected {
            return Err(BadgeError::render(format!(
                "raster buffer has {} bytes, expected {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Borrow the pixels.
    pub fn view(&self) -> PixelView<'_> {
        PixelView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    /// Premultiplied RGBA at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.view().pixel(x, y)
    }

    /// Stable 64-bit digest of size and pixels.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.width);
        h.write_u32(self.height);
        h.write_bytes(&self.data);
        h.finish()
    }

    /// Straight-alpha copy for encoders.
    pub fn to_rgba_image(&self) -> BadgeResult<image::RgbaImage> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| BadgeError::render("raster buffer does not match its dimensions"))
    }

    /// Write a straight-alpha PNG, creating parent directories.
    pub fn save_png(&self, path: &Path) -> BadgeResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        self.to_rgba_image()?
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
