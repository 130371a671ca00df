//! Per-slot parameters chosen by the user.
//!
//! These are plain values. Range checks live in the `clamped`/`validate` helpers used at
//! the input boundary; the geometry and color math assume already-valid values.

use crate::foundation::core::{Rect, Rgb8};
use crate::foundation::error::{BadgeError, BadgeResult};

/// Policy for reconciling the source aspect ratio with the square image area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Scale until the area is fully covered; overflow is clipped.
    #[default]
    Cover,
    /// Scale until the whole image fits; background may show.
    Contain,
    /// Width-driven scale: the image width matches the area width.
    Fill,
}

impl FitMode {
    /// Base scale of an uncropped `image_w x image_h` image against a square `area`.
    pub fn base_scale(self, image_w: f64, image_h: f64, area: f64) -> f64 {
        match self {
            Self::Cover => (area / image_w).max(area / image_h),
            Self::Contain => (area / image_w).min(area / image_h),
            Self::Fill => area / image_w,
        }
    }
}

/// What is painted behind an image that does not cover its area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    /// Flat [`Transform::background_color`].
    #[default]
    Color,
    /// A blurred, cover-fitted copy of the image itself.
    Blur,
}

/// Percent of each source dimension removed from the named edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CropFraction {
    /// Top edge.
    pub top: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Left edge.
    pub left: f64,
    /// Right edge.
    pub right: f64,
}

impl CropFraction {
    /// No crop.
    pub const NONE: Self = Self {
        top: 0.0,
        bottom: 0.0,
        left: 0.0,
        right: 0.0,
    };

    /// Whether every edge is zero.
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Each edge in `[0, 100)` and opposite edges summing below 100.
    pub fn is_valid(&self) -> bool {
        let edge_ok = |v: f64| v.is_finite() && (0.0..100.0).contains(&v);
        edge_ok(self.top)
            && edge_ok(self.bottom)
            && edge_ok(self.left)
            && edge_ok(self.right)
            && self.top + self.bottom < 100.0
            && self.left + self.right < 100.0
    }

    /// The source-space rectangle to sample.
    pub fn crop_rect(&self, image_w: f64, image_h: f64) -> Rect {
        let x = self.left / 100.0 * image_w;
        let y = self.top / 100.0 * image_h;
        let w = image_w - x - self.right / 100.0 * image_w;
        let h = image_h - y - self.bottom / 100.0 * image_h;
        Rect::new(x, y, x + w, y + h)
    }
}

/// Geometric and background state of one slot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Transform {
    /// Percent, 10..=500.
    pub scale: f64,
    /// Percent, 10..=500; multiplies with `scale`.
    pub fine_zoom: f64,
    /// Base scale policy.
    pub fit_mode: FitMode,
    /// Percent of the image-area size, -50..=50.
    pub offset_x: f64,
    /// Percent of the image-area size, -50..=50.
    pub offset_y: f64,
    /// Degrees, -180..=180.
    pub rotation: f64,
    /// Mirror left to right, applied after rotation.
    pub flip_horizontal: bool,
    /// Mirror top to bottom, applied after rotation.
    pub flip_vertical: bool,
    /// Edge crop of the source.
    pub crop: CropFraction,
    /// Fill behind an image that leaves gaps.
    pub background_mode: BackgroundMode,
    /// Used by [`BackgroundMode::Color`].
    pub background_color: Rgb8,
    /// Blur radius in pixels at the reference area size.
    pub background_blur: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 100.0,
            fine_zoom: 100.0,
            fit_mode: FitMode::Cover,
            offset_x: 0.0,
            offset_y: 0.0,
            rotation: 0.0,
            flip_horizontal: false,
            flip_vertical: false,
            crop: CropFraction::NONE,
            background_mode: BackgroundMode::Color,
            background_color: Rgb8::WHITE,
            background_blur: 10.0,
        }
    }
}

impl Transform {
    /// Accepted `scale` and `fine_zoom`, in percent.
    pub const SCALE_RANGE: (f64, f64) = (10.0, 500.0);
    /// Accepted offsets, in percent.
    pub const OFFSET_RANGE: (f64, f64) = (-50.0, 50.0);
    /// Accepted rotation, in degrees.
    pub const ROTATION_RANGE: (f64, f64) = (-180.0, 180.0);
    /// Accepted background blur.
    pub const BLUR_RANGE: (f64, f64) = (0.0, 50.0);

    /// User zoom on top of the fit-mode base scale.
    pub fn zoom_factor(&self) -> f64 {
        (self.scale / 100.0) * (self.fine_zoom / 100.0)
    }

    /// Copy with every field pulled into its input range. An invalid crop resets to none.
    pub fn clamped(&self) -> Self {
        let clamp = |v: f64, (lo, hi): (f64, f64), fallback: f64| {
            if v.is_finite() { v.clamp(lo, hi) } else { fallback }
        };
        Self {
            scale: clamp(self.scale, Self::SCALE_RANGE, 100.0),
            fine_zoom: clamp(self.fine_zoom, Self::SCALE_RANGE, 100.0),
            offset_x: clamp(self.offset_x, Self::OFFSET_RANGE, 0.0),
            offset_y: clamp(self.offset_y, Self::OFFSET_RANGE, 0.0),
            rotation: clamp(self.rotation, Self::ROTATION_RANGE, 0.0),
            background_blur: clamp(self.background_blur, Self::BLUR_RANGE, 0.0),
            crop: if self.crop.is_valid() {
                self.crop
            } else {
                CropFraction::NONE
            },
            ..*self
        }
    }

    /// Fail on the first out-of-range field or an invalid crop.
    pub fn validate(&self) -> BadgeResult<()> {
        check_range("scale", self.scale, Self::SCALE_RANGE)?;
        check_range("fine_zoom", self.fine_zoom, Self::SCALE_RANGE)?;
        check_range("offset_x", self.offset_x, Self::OFFSET_RANGE)?;
        check_range("offset_y", self.offset_y, Self::OFFSET_RANGE)?;
        check_range("rotation", self.rotation, Self::ROTATION_RANGE)?;
        check_range("background_blur", self.background_blur, Self::BLUR_RANGE)?;
        if !self.crop.is_valid() {
            return Err(BadgeError::validation(
                "crop edges must be in [0, 100) with top+bottom and left+right below 100",
            ));
        }
        Ok(())
    }
}

/// Color adjustments and corner rounding of one slot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Adjustments {
    /// Additive, -100..=100.
    pub brightness: i32,
    /// -100..=100, see [`crate::contrast_factor`].
    pub contrast: i32,
    /// -100..=100; -100 is grayscale.
    pub saturation: i32,
    /// Radius in pixels at the reference area size.
    pub corner_radius: f64,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            brightness: 0,
            contrast: 0,
            saturation: 0,
            corner_radius: Self::DEFAULT_CORNER_RADIUS,
        }
    }
}

impl Adjustments {
    /// Corner radius of a fresh slot.
    pub const DEFAULT_CORNER_RADIUS: f64 = 8.0;
    /// Accepted brightness, contrast and saturation.
    pub const COLOR_RANGE: (i32, i32) = (-100, 100);
    /// Accepted corner radius.
    pub const CORNER_RADIUS_RANGE: (f64, f64) = (0.0, 75.0);

    /// True when brightness, contrast and saturation are all zero.
    pub fn is_color_neutral(&self) -> bool {
        self.brightness == 0 && self.contrast == 0 && self.saturation == 0
    }

    /// Copy with every field pulled into range. A non-finite radius resets to the default.
    pub fn clamped(&self) -> Self {
        let (lo, hi) = Self::COLOR_RANGE;
        let (rlo, rhi) = Self::CORNER_RADIUS_RANGE;
        Self {
            brightness: self.brightness.clamp(lo, hi),
            contrast: self.contrast.clamp(lo, hi),
            saturation: self.saturation.clamp(lo, hi),
            corner_radius: if self.corner_radius.is_finite() {
                self.corner_radius.clamp(rlo, rhi)
            } else {
                Self::DEFAULT_CORNER_RADIUS
            },
        }
    }

    /// Fail on the first out-of-range field.
    pub fn validate(&self) -> BadgeResult<()> {
        let (lo, hi) = Self::COLOR_RANGE;
        for (name, v) in [
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("saturation", self.saturation),
        ] {
            if !(lo..=hi).contains(&v) {
                return Err(BadgeError::validation(format!(
                    "{name} {v} outside [{lo}, {hi}]"
                )));
            }
        }
        check_range(
            "corner_radius",
            self.corner_radius,
            Self::CORNER_RADIUS_RANGE,
        )
    }
}

/// Everything needed to render one badge, built once per render call.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderParameters {
    /// Geometry and background.
    pub transform: Transform,
    /// Color and corner radius.
    pub adjustments: Adjustments,
    /// Inset of the image area from the badge edge.
    pub margin_mm: f64,
}

impl RenderParameters {
    /// Accepted margins.
    pub const MARGIN_RANGE_MM: (f64, f64) = (0.0, 20.0);
    /// Margin of grid badges.
    pub const DEFAULT_MARGIN_MM: f64 = 8.0;

    /// Bundle the three parts.
    pub fn new(transform: Transform, adjustments: Adjustments, margin_mm: f64) -> Self {
        Self {
            transform,
            adjustments,
            margin_mm,
        }
    }

    /// Validate every part.
    pub fn validate(&self) -> BadgeResult<()> {
        self.transform.validate()?;
        self.adjustments.validate()?;
        check_range("margin_mm", self.margin_mm, Self::MARGIN_RANGE_MM)
    }
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self::new(
            Transform::default(),
            Adjustments::default(),
            Self::DEFAULT_MARGIN_MM,
        )
    }
}

fn check_range(name: &str, v: f64, (lo, hi): (f64, f64)) -> BadgeResult<()> {
    if !v.is_finite() || v < lo || v > hi {
        return Err(BadgeError::validation(format!(
            "{name} {v} outside [{lo}, {hi}]"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/model/params.rs"]
mod tests;
