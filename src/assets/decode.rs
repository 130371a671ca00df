use std::path::Path;

use anyhow::Context;

use crate::assets::image::SourceImage;
use crate::foundation::error::BadgeResult;

/// Decode an encoded image (PNG, JPEG, ...) into a [`SourceImage`].
///
/// Decoding sits outside the compositing core; this helper exists for the CLI and tests.
pub fn decode_image(bytes: &[u8]) -> BadgeResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    SourceImage::from_rgba_image(dyn_img.to_rgba8())
}

/// Read and decode the image file at `path`.
pub fn load_image(path: &Path) -> BadgeResult<SourceImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let img = image::load_from_memory(&bytes)
        .with_context(|| format!("decode image '{}'", path.display()))?;
    SourceImage::from_rgba_image(img.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
