//! Per-pixel brightness, contrast and saturation.
//!
//! Operates on straight (non-premultiplied) RGBA8, alpha untouched. Every step stores its
//! result back into 8-bit channels, so the next step reads clamped, rounded values.
//!
//! Repeated application of neutral adjustments is a no-op; repeated application of nonzero
//! brightness or contrast compounds.

use crate::foundation::math::clamp_channel;
use crate::model::params::Adjustments;

/// Contrast multiplier around mid-gray.
///
/// `contrast == 259` divides by zero; the input range (-100..=100) excludes it.
pub fn contrast_factor(contrast: i32) -> f64 {
    let c = f64::from(contrast);
    (259.0 * (c + 255.0)) / (255.0 * (259.0 - c))
}

/// Adjust `pixels` in place. A trailing partial pixel is left as is.
pub fn apply(pixels: &mut [u8], adjustments: &Adjustments) {
    let brightness = f64::from(adjustments.brightness);
    let factor = contrast_factor(adjustments.contrast);
    let saturation = adjustments.saturation;
    let sat_factor = 1.0 + f64::from(saturation) / 100.0;

    for px in pixels.chunks_exact_mut(4) {
        for c in &mut px[..3] {
            *c = clamp_channel(f64::from(*c) + brightness);
        }

        for c in &mut px[..3] {
            *c = clamp_channel(factor * (f64::from(*c) - 128.0) + 128.0);
        }

        if saturation != 0 {
            let gray =
                0.299 * f64::from(px[0]) + 0.587 * f64::from(px[1]) + 0.114 * f64::from(px[2]);
            for c in &mut px[..3] {
                *c = clamp_channel(gray + sat_factor * (f64::from(*c) - gray));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/adjust.rs"]
mod tests;
