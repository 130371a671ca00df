//! Physical sizes of the badge template and their pixel equivalents.
//!
//! The print resolution is fixed at 11.811 px/mm (300 DPI). Badge-scale lengths are
//! truncated to whole pixels, so a 66mm badge is 779 px, a 61mm die-cut 720 px and the
//! 50mm design area 590 px.

use crate::foundation::error::{BadgeError, BadgeResult};

/// Pixels per millimeter at print resolution.
pub const PX_PER_MM: f64 = 11.811;

/// Outer badge (rotary cut) size.
pub const BADGE_MM: f64 = 66.0;
/// Die-cut size.
pub const DIE_CUT_MM: f64 = 61.0;
/// Design-safe size.
pub const DESIGN_MM: f64 = 50.0;

/// A4 page width.
pub const A4_WIDTH_MM: f64 = 210.0;
/// A4 page height.
pub const A4_HEIGHT_MM: f64 = 297.0;

/// Grid columns on an A4 sheet.
pub const GRID_COLS: usize = 3;
/// Grid rows on an A4 sheet.
pub const GRID_ROWS: usize = 4;
/// Number of slots in the grid.
pub const SLOT_COUNT: usize = GRID_COLS * GRID_ROWS;

/// Image-area size at which corner radius and blur radius are authored.
pub const REFERENCE_AREA_PX: f64 = 150.0;

/// Convert millimeters to print pixels.
#[inline]
pub fn mm_to_px(mm: f64) -> f64 {
    mm * PX_PER_MM
}

/// Whole print pixels covering a badge-scale length (truncating).
#[inline]
pub fn mm_to_whole_px(mm: f64) -> u32 {
    mm_to_px(mm).max(0.0) as u32
}

/// A square working resolution for one badge cell.
///
/// The same composition is rendered at thumbnail, preview and print resolution by varying
/// only this value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BadgeFrame {
    /// Side length of the badge raster in pixels.
    pub size_px: u32,
    /// Pixels per millimeter of badge.
    pub px_per_mm: f64,
}

impl BadgeFrame {
    /// Print resolution: 779 px at 11.811 px/mm.
    pub fn print() -> Self {
        Self {
            size_px: mm_to_whole_px(BADGE_MM),
            px_per_mm: PX_PER_MM,
        }
    }

    /// A frame whose badge spans `size_px` pixels.
    pub fn with_size_px(size_px: u32) -> Self {
        Self {
            size_px,
            px_per_mm: f64::from(size_px) / BADGE_MM,
        }
    }

    /// Grid-cell thumbnail resolution.
    pub fn thumbnail() -> Self {
        Self::with_size_px(150)
    }

    /// On-screen single badge preview resolution.
    pub fn preview() -> Self {
        Self::with_size_px(400)
    }

    /// `margin_mm` in this frame's pixels.
    pub fn margin_px(&self, margin_mm: f64) -> f64 {
        margin_mm * self.px_per_mm
    }

    /// Side of the inset image area: badge minus the margin on both sides.
    pub fn area_px(&self, margin_mm: f64) -> f64 {
        f64::from(self.size_px) - 2.0 * self.margin_px(margin_mm)
    }

    /// Reject empty frames and non-positive densities.
    pub fn validate(&self) -> BadgeResult<()> {
        if self.size_px == 0 {
            return Err(BadgeError::validation("badge frame size must be > 0"));
        }
        if !self.px_per_mm.is_finite() || self.px_per_mm <= 0.0 {
            return Err(BadgeError::validation("badge frame px/mm must be > 0"));
        }
        Ok(())
    }
}

impl Default for BadgeFrame {
    fn default() -> Self {
        Self::print()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/units.rs"]
mod tests;
