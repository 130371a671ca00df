//! Source-crop and destination placement for one image inside a square image area.
//!
//! The base scale comes from the *uncropped* image against the area, so cropping changes
//! which pixels are sampled but never the apparent zoom.
//!
//! ```
//! use badgekit::{CropFraction, ResolveInput, resolve};
//!
//! let placement = resolve(&ResolveInput {
//!     crop: CropFraction { top: 50.0, ..CropFraction::NONE },
//!     ..ResolveInput::new(200.0, 200.0, 100.0)
//! });
//! assert_eq!(placement.src.height(), 100.0);
//! assert_eq!(placement.total_scale, 0.5);
//! assert_eq!(placement.dest.height(), 50.0);
//! ```

use crate::foundation::core::Rect;
use crate::model::params::{CropFraction, FitMode, Transform};

/// Inputs of [`resolve`].
///
/// Preconditions: `image_w > 0`, `image_h > 0`, `area_size > 0` and a valid crop. Other
/// values are used as given; range clamping happens at the input boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolveInput {
    /// Source image width in pixels.
    pub image_w: f64,
    /// Source image height in pixels.
    pub image_h: f64,
    /// Edge crop applied before fitting.
    pub crop: CropFraction,
    /// How the crop is fitted into the area before zooming.
    pub fit_mode: FitMode,
    /// User zoom multiplied onto the fit scale, see [`Transform::zoom_factor`].
    pub zoom: f64,
    /// Side of the square image area in pixels.
    pub area_size: f64,
    /// Horizontal shift as a percentage of `area_size`.
    pub offset_x_percent: f64,
    /// Vertical shift as a percentage of `area_size`.
    pub offset_y_percent: f64,
}

impl ResolveInput {
    /// Uncropped cover fit at 100% with no offset.
    pub fn new(image_w: f64, image_h: f64, area_size: f64) -> Self {
        Self {
            image_w,
            image_h,
            crop: CropFraction::NONE,
            fit_mode: FitMode::Cover,
            zoom: 1.0,
            area_size,
            offset_x_percent: 0.0,
            offset_y_percent: 0.0,
        }
    }

    /// Geometry of `t` for an `image_w x image_h` image in an `area_size` square.
    pub fn from_transform(image_w: f64, image_h: f64, t: &Transform, area_size: f64) -> Self {
        Self {
            image_w,
            image_h,
            crop: t.crop,
            fit_mode: t.fit_mode,
            zoom: t.zoom_factor(),
            area_size,
            offset_x_percent: t.offset_x,
            offset_y_percent: t.offset_y,
        }
    }
}

/// Where to sample from and where to draw, relative to the image-area origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Rectangle in source pixels.
    pub src: Rect,
    /// Rectangle in image-area pixels; may extend past the area.
    pub dest: Rect,
    /// Fit-mode base scale times the user zoom.
    pub total_scale: f64,
}

impl Placement {
    /// Whether `dest` covers the whole `[0, area_size]` square, up to float noise.
    pub fn covers_area(&self, area_size: f64) -> bool {
        const EPS: f64 = 1e-9;
        self.dest.x0 <= EPS
            && self.dest.y0 <= EPS
            && self.dest.x1 >= area_size - EPS
            && self.dest.y1 >= area_size - EPS
    }

    /// The same placement shifted into canvas coordinates.
    pub fn dest_at(&self, origin_x: f64, origin_y: f64) -> Rect {
        self.dest + kurbo::Vec2::new(origin_x, origin_y)
    }
}

/// Compute the source crop and destination rectangle.
pub fn resolve(input: &ResolveInput) -> Placement {
    let src = input.crop.crop_rect(input.image_w, input.image_h);

    let base = input
        .fit_mode
        .base_scale(input.image_w, input.image_h, input.area_size);
    let total_scale = base * input.zoom;

    let dest_w = src.width() * total_scale;
    let dest_h = src.height() * total_scale;

    let x = (input.area_size - dest_w) / 2.0 + input.offset_x_percent / 100.0 * input.area_size;
    let y = (input.area_size - dest_h) / 2.0 + input.offset_y_percent / 100.0 * input.area_size;

    Placement {
        src,
        dest: Rect::new(x, y, x + dest_w, y + dest_h),
        total_scale,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/resolver.rs"]
mod tests;
