//! Page and guide geometry, independent of image content.
//!
//! All functions are pure. Units are whatever the caller passes (millimeters for export,
//! pixels for on-screen overlays); nothing here rejects a layout that overflows its page.

use crate::foundation::core::{Point, Rect, Rgb8};
use crate::foundation::units::{
    A4_HEIGHT_MM, A4_WIDTH_MM, BADGE_MM, DESIGN_MM, DIE_CUT_MM, GRID_COLS, GRID_ROWS,
};

/// Top-left corners of a `cols` x `rows` block of `badge` squares centered on the page,
/// row-major, index 0 top-left.
pub fn grid_cells(page_w: f64, page_h: f64, badge: f64, cols: usize, rows: usize) -> Vec<Point> {
    let start_x = (page_w - cols as f64 * badge) / 2.0;
    let start_y = (page_h - rows as f64 * badge) / 2.0;
    (0..rows)
        .flat_map(|row| {
            (0..cols).map(move |col| {
                Point::new(
                    start_x + col as f64 * badge,
                    start_y + row as f64 * badge,
                )
            })
        })
        .collect()
}

/// The 3x4 A4 sheet in millimeters.
pub fn a4_grid_cells() -> Vec<Point> {
    grid_cells(A4_WIDTH_MM, A4_HEIGHT_MM, BADGE_MM, GRID_COLS, GRID_ROWS)
}

/// The three squares printed around each badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideKind {
    /// Safe area for important content.
    Design,
    /// Where the die cuts the paper.
    DieCut,
    /// Outer edge of the badge.
    Rotary,
}

impl GuideKind {
    /// Innermost first.
    pub const ALL: [Self; 3] = [Self::Design, Self::DieCut, Self::Rotary];

    /// Side length of the square.
    pub fn size_mm(self) -> f64 {
        match self {
            Self::Design => DESIGN_MM,
            Self::DieCut => DIE_CUT_MM,
            Self::Rotary => BADGE_MM,
        }
    }

    /// Stroke color of the on-screen template overlay.
    pub fn overlay_rgb(self) -> Rgb8 {
        match self {
            Self::Design => Rgb8::new(0xe5, 0x3e, 0x3e),
            Self::DieCut => Rgb8::new(0x38, 0xa1, 0x69),
            Self::Rotary => Rgb8::new(0x31, 0x82, 0xce),
        }
    }
}

/// Concentric guide squares of one badge, relative to the badge's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BadgeGuides {
    /// [`GuideKind::Design`] square.
    pub design: Rect,
    /// [`GuideKind::DieCut`] square.
    pub die_cut: Rect,
    /// [`GuideKind::Rotary`] square.
    pub rotary: Rect,
}

impl BadgeGuides {
    /// The square of `kind`.
    pub fn get(&self, kind: GuideKind) -> Rect {
        match kind {
            GuideKind::Design => self.design,
            GuideKind::DieCut => self.die_cut,
            GuideKind::Rotary => self.rotary,
        }
    }

    /// The same squares for a badge whose corner sits at `origin`.
    pub fn translated(&self, origin: Point) -> Self {
        let v = origin.to_vec2();
        Self {
            design: self.design + v,
            die_cut: self.die_cut + v,
            rotary: self.rotary + v,
        }
    }
}

/// Guide squares for a badge drawn `badge_size` units wide.
pub fn single_badge_guides(badge_size: f64) -> BadgeGuides {
    let unit = badge_size / BADGE_MM;
    let square = |mm: f64| {
        let side = mm * unit;
        let inset = (badge_size - side) / 2.0;
        Rect::new(inset, inset, inset + side, inset + side)
    };
    BadgeGuides {
        design: square(DESIGN_MM),
        die_cut: square(DIE_CUT_MM),
        rotary: square(BADGE_MM),
    }
}

/// Page size in millimeters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageSpec {
    /// Page width.
    pub width_mm: f64,
    /// Page height.
    pub height_mm: f64,
}

impl PageSpec {
    /// ISO A4 portrait, 210 x 297 mm.
    pub const A4: Self = Self {
        width_mm: A4_WIDTH_MM,
        height_mm: A4_HEIGHT_MM,
    };

    /// A page exactly one badge in size.
    pub const SINGLE_BADGE: Self = Self {
        width_mm: BADGE_MM,
        height_mm: BADGE_MM,
    };
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
