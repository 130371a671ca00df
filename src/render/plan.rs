use crate::foundation::core::{Point, Rect, Rgb8};
use crate::foundation::error::{BadgeError, BadgeResult};
use crate::foundation::units::{BadgeFrame, REFERENCE_AREA_PX};
use crate::geometry::resolver::{Placement, ResolveInput, resolve};
use crate::model::params::{Adjustments, BackgroundMode, RenderParameters};

/// Pixel geometry of one badge cell at a given working resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellTarget {
    /// Side of the square canvas.
    pub canvas_px: u32,
    /// Inset of the image area from every canvas edge.
    pub margin_px: f64,
    /// Side of the square image area.
    pub area_px: f64,
}

impl CellTarget {
    /// Cell geometry of `frame` with `margin_mm`. Fails when the margin leaves no image area.
    pub fn for_frame(frame: &BadgeFrame, margin_mm: f64) -> BadgeResult<Self> {
        frame.validate()?;
        let area_px = frame.area_px(margin_mm);
        if !(area_px > 0.0) {
            return Err(BadgeError::validation(format!(
                "margin {margin_mm}mm leaves no image area on a {} px badge",
                frame.size_px
            )));
        }
        Ok(Self {
            canvas_px: frame.size_px,
            margin_px: frame.margin_px(margin_mm),
            area_px,
        })
    }

    /// The image area in canvas pixels.
    pub fn area_rect(&self) -> Rect {
        Rect::new(
            self.margin_px,
            self.margin_px,
            self.margin_px + self.area_px,
            self.margin_px + self.area_px,
        )
    }

    /// Pivot for rotation and flips.
    pub fn area_center(&self) -> Point {
        let c = self.margin_px + self.area_px / 2.0;
        Point::new(c, c)
    }

    /// Factor applied to radii authored against a 150 px image area.
    pub fn resolution_scale(&self) -> f64 {
        self.area_px / REFERENCE_AREA_PX
    }
}

/// How the image area is filled behind an image that does not cover it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BackgroundFill {
    /// Solid color.
    Color(Rgb8),
    /// Cover-scaled, blurred copy of the whole source image.
    Blur {
        /// Gaussian sigma in canvas pixels.
        sigma_px: f64,
    },
}

/// One step of a cell composite. Stages run strictly in order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stage {
    /// Restrict drawing to the rounded image area.
    ClipRoundedRect {
        /// Device-space rectangle.
        rect: Rect,
        /// Corner radius in canvas pixels.
        radius: f64,
    },
    /// Rotate everything drawn afterwards, clockwise for positive degrees.
    Rotate {
        /// Center of rotation.
        pivot: Point,
        /// Angle in degrees.
        degrees: f64,
    },
    /// Fill the area behind the image.
    Background {
        /// The image area.
        rect: Rect,
        /// What to fill it with.
        fill: BackgroundFill,
    },
    /// Mirror everything drawn afterwards around `pivot`.
    Flip {
        /// Mirror center.
        pivot: Point,
        /// Mirror left to right.
        horizontal: bool,
        /// Mirror top to bottom.
        vertical: bool,
    },
    /// `dest` is already mirrored for any active flip.
    DrawImage {
        /// Source pixels to sample.
        src: Rect,
        /// Where they land.
        dest: Rect,
        /// Color adjustment, `None` when neutral.
        adjust: Option<Adjustments>,
    },
    /// Drop the rounded clip.
    ReleaseClip,
}

/// Ordered stages for one cell, plus the resolved placement they were built from.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositePlan {
    /// Canvas side.
    pub canvas_px: u32,
    /// Stages in execution order.
    pub stages: Vec<Stage>,
    /// Placement relative to the image-area origin, before mirroring.
    pub placement: Placement,
}

/// Build the stage list for an `image_w` x `image_h` image.
pub fn plan_cell(
    image_w: u32,
    image_h: u32,
    params: &RenderParameters,
    target: &CellTarget,
) -> CompositePlan {
    let t = &params.transform;
    let adj = &params.adjustments;
    let area = target.area_rect();
    let pivot = target.area_center();
    let scale = target.resolution_scale();

    let placement = resolve(&ResolveInput::from_transform(
        f64::from(image_w),
        f64::from(image_h),
        t,
        target.area_px,
    ));

    let mut stages = Vec::with_capacity(6);
    stages.push(Stage::ClipRoundedRect {
        rect: area,
        radius: adj.corner_radius * scale,
    });

    if t.rotation != 0.0 {
        stages.push(Stage::Rotate {
            pivot,
            degrees: t.rotation,
        });
    }

    if placement.total_scale < 1.0 || !placement.covers_area(target.area_px) {
        let fill = match t.background_mode {
            BackgroundMode::Color => BackgroundFill::Color(t.background_color),
            BackgroundMode::Blur => BackgroundFill::Blur {
                sigma_px: t.background_blur * scale,
            },
        };
        stages.push(Stage::Background { rect: area, fill });
    }

    let mut dest = placement.dest_at(target.margin_px, target.margin_px);
    if t.flip_horizontal || t.flip_vertical {
        stages.push(Stage::Flip {
            pivot,
            horizontal: t.flip_horizontal,
            vertical: t.flip_vertical,
        });
        dest = mirror_rect(dest, pivot, t.flip_horizontal, t.flip_vertical);
    }

    stages.push(Stage::DrawImage {
        src: placement.src,
        dest,
        adjust: (!adj.is_color_neutral()).then_some(*adj),
    });
    stages.push(Stage::ReleaseClip);

    CompositePlan {
        canvas_px: target.canvas_px,
        stages,
        placement,
    }
}

/// Mirror `r` about `pivot` on the flipped axes, so the reflection maps it back onto itself.
fn mirror_rect(r: Rect, pivot: Point, horizontal: bool, vertical: bool) -> Rect {
    let (mut x, mut y) = (r.x0, r.y0);
    if horizontal {
        x = 2.0 * pivot.x - r.x0 - r.width();
    }
    if vertical {
        y = 2.0 * pivot.y - r.y0 - r.height();
    }
    Rect::new(x, y, x + r.width(), y + r.height())
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
