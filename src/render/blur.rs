//! Separable Gaussian blur over premultiplied rasters.

use crate::foundation::error::BadgeResult;
use crate::render::raster::Raster;

/// Fixed-point scale of kernel taps.
const Q16_ONE: u32 = 1 << 16;

/// Normalized Gaussian taps in Q16, `2 * radius + 1` long.
#[derive(Clone, Debug, PartialEq, Eq)]
struct GaussianKernel {
    radius: usize,
    taps: Vec<u32>,
}

impl GaussianKernel {
    /// Kernel for `sigma > 0` with radius `ceil(3 * sigma)`. Taps sum to exactly one.
    fn new(sigma: f64) -> Self {
        let radius = (3.0 * sigma).ceil() as usize;
        let denom = 2.0 * sigma * sigma;
        let weights: Vec<f64> = (0..=2 * radius)
            .map(|i| {
                let d = i as f64 - radius as f64;
                (-d * d / denom).exp()
            })
            .collect();
        let total: f64 = weights.iter().sum();

        let mut taps: Vec<u32> = weights
            .iter()
            .map(|w| ((w / total) * f64::from(Q16_ONE)).round() as u32)
            .collect();
        // Rounding drift goes to the center tap.
        let drift = i64::from(Q16_ONE) - taps.iter().map(|&t| i64::from(t)).sum::<i64>();
        taps[radius] = (i64::from(taps[radius]) + drift).max(0) as u32;
        Self { radius, taps }
    }
}

#[derive(Clone, Copy, Debug)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Gaussian blur with standard deviation `sigma`, kernel radius `ceil(3 * sigma)`.
///
/// Edges clamp. `sigma <= 0` (or NaN) returns an unchanged copy.
pub fn blur_raster(src: &Raster, sigma: f64) -> BadgeResult<Raster> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Ok(src.clone());
    }
    let kernel = GaussianKernel::new(sigma);
    let rows = convolve(src, &kernel, Axis::Horizontal);
    let rows = Raster::from_premul(src.width, src.height, rows)?;
    let data = convolve(&rows, &kernel, Axis::Vertical);
    Raster::from_premul(src.width, src.height, data)
}

/// One 1-D pass along `axis`, clamping sample positions to the raster.
fn convolve(src: &Raster, kernel: &GaussianKernel, axis: Axis) -> Vec<u8> {
    let (w, h) = (src.width as usize, src.height as usize);
    let (len, step) = match axis {
        Axis::Horizontal => (w, 4),
        Axis::Vertical => (h, w * 4),
    };
    let r = kernel.radius as isize;
    let mut out = vec![0u8; src.data.len()];

    for y in 0..h {
        for x in 0..w {
            let (pos, line_start) = match axis {
                Axis::Horizontal => (x, y * w * 4),
                Axis::Vertical => (y, x * 4),
            };
            let mut acc = [0u64; 4];
            for (k, &tap) in kernel.taps.iter().enumerate() {
                let s = (pos as isize + k as isize - r).clamp(0, len as isize - 1) as usize;
                let px = &src.data[line_start + s * step..][..4];
                for (a, &c) in acc.iter_mut().zip(px) {
                    *a += u64::from(tap) * u64::from(c);
                }
            }
            let o = (y * w + x) * 4;
            for (dst, a) in out[o..o + 4].iter_mut().zip(acc) {
                *dst = ((a + u64::from(Q16_ONE / 2)) >> 16).min(255) as u8;
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
