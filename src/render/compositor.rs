//! Single-cell compositing shared by thumbnails, previews and print export.
//!
//! [`SlotCompositor::render`] turns one image plus its [`RenderParameters`] into a square
//! raster at any [`BadgeFrame`]. Only the frame changes between consumers, so the same
//! composition comes out at every sampling density.

use crate::assets::image::{PixelView, SourceImage};
use crate::color::adjust;
use crate::foundation::core::{Affine, Rect, Vec2};
use crate::foundation::error::{BadgeError, BadgeResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};
use crate::foundation::units::BadgeFrame;
use crate::geometry::resolver::{ResolveInput, resolve};
use crate::model::params::{Adjustments, FitMode, RenderParameters};
use crate::render::blur::blur_raster;
use crate::render::painter::Painter;
use crate::render::plan::{BackgroundFill, CellTarget, CompositePlan, Stage, plan_cell};
use crate::render::raster::Raster;

/// Below this dest/src ratio the source is prefiltered before bilinear sampling.
const PREFILTER_BELOW: f64 = 0.5;

/// Blurred backgrounds are rendered offscreen at a reduced size so the blur sigma stays
/// near this many pixels.
const BLUR_WORKING_SIGMA: f64 = 8.0;

/// Options for [`SlotCompositor`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositorOpts {
    /// Premultiplied RGBA8 the canvas is cleared to before the first stage. `None` leaves it
    /// transparent.
    pub clear_rgba: Option<[u8; 4]>,
}

impl CompositorOpts {
    /// Opaque white canvas, as printed.
    pub fn print() -> Self {
        Self {
            clear_rgba: Some([255, 255, 255, 255]),
        }
    }

    /// Set the clear color.
    pub fn with_clear_rgba(mut self, clear_rgba: Option<[u8; 4]>) -> Self {
        self.clear_rgba = clear_rgba;
        self
    }
}

/// Renders badge cells. Stateless apart from its options, so one instance can be shared.
#[derive(Clone, Debug, Default)]
pub struct SlotCompositor {
    opts: CompositorOpts,
}

impl SlotCompositor {
    /// A compositor with `opts`.
    pub fn new(opts: CompositorOpts) -> Self {
        Self { opts }
    }

    /// Options in use.
    pub fn opts(&self) -> &CompositorOpts {
        &self.opts
    }

    /// Render `image` with `params` into a `frame.size_px` square.
    #[tracing::instrument(skip(self, image, params), fields(image_w = image.width(), image_h = image.height()))]
    pub fn render(
        &self,
        image: &SourceImage,
        params: &RenderParameters,
        frame: &BadgeFrame,
    ) -> BadgeResult<Raster> {
        let target = CellTarget::for_frame(frame, params.margin_mm)?;
        self.render_target(image, params, &target)
    }

    /// Render into an explicit cell target instead of a frame.
    pub fn render_target(
        &self,
        image: &SourceImage,
        params: &RenderParameters,
        target: &CellTarget,
    ) -> BadgeResult<Raster> {
        let plan = plan_cell(image.width(), image.height(), params, target);
        tracing::debug!(
            dest = ?plan.placement.dest,
            total_scale = plan.placement.total_scale,
            stages = plan.stages.len(),
            "cell planned"
        );
        self.execute_plan(image, &plan)
    }

    /// Like [`Self::render`], but an empty slot renders nothing.
    pub fn render_slot(
        &self,
        image: Option<&SourceImage>,
        params: &RenderParameters,
        frame: &BadgeFrame,
    ) -> BadgeResult<Option<Raster>> {
        image.map(|img| self.render(img, params, frame)).transpose()
    }

    /// Run the stages of `plan` over `image` in order.
    pub fn execute_plan(&self, image: &SourceImage, plan: &CompositePlan) -> BadgeResult<Raster> {
        let mut painter = Painter::new(plan.canvas_px, plan.canvas_px)?;
        if let Some(rgba) = self.opts.clear_rgba {
            painter.clear(rgba);
        }

        for stage in &plan.stages {
            match stage {
                Stage::ClipRoundedRect { rect, radius } => {
                    painter.clip_rounded_rect(*rect, *radius);
                }
                Stage::Rotate { pivot, degrees } => {
                    painter.concat(Affine::rotate_about(degrees.to_radians(), *pivot));
                }
                Stage::Background { rect, fill } => match fill {
                    BackgroundFill::Color(rgb) => {
                        painter.fill_rect(*rect, rgb.to_premul_rgba(255));
                    }
                    BackgroundFill::Blur { sigma_px } => {
                        paint_blurred_background(&mut painter, image, *rect, *sigma_px)?;
                    }
                },
                Stage::Flip {
                    pivot,
                    horizontal,
                    vertical,
                } => {
                    let sx = if *horizontal { -1.0 } else { 1.0 };
                    let sy = if *vertical { -1.0 } else { 1.0 };
                    let p = pivot.to_vec2();
                    painter.concat(
                        Affine::translate(p)
                            * Affine::scale_non_uniform(sx, sy)
                            * Affine::translate(-p),
                    );
                }
                Stage::DrawImage { src, dest, adjust } => {
                    draw_source(&mut painter, image.view(), *src, *dest, adjust.as_ref())?;
                }
                Stage::ReleaseClip => painter.release_clip(),
            }
        }

        let raster = painter.into_raster()?;
        tracing::debug!(fingerprint = raster.fingerprint(), "cell rendered");
        Ok(raster)
    }
}

/// Sample `src` of `view` onto `dest`, through an intermediate buffer when the draw needs
/// color adjustment or prefiltering. Adjustment runs on the native-resolution crop, before
/// any resize.
fn draw_source(
    painter: &mut Painter,
    view: PixelView<'_>,
    src: Rect,
    dest: Rect,
    adjust: Option<&Adjustments>,
) -> BadgeResult<()> {
    if !(src.width() > 0.0 && src.height() > 0.0 && dest.width() > 0.0 && dest.height() > 0.0) {
        return Ok(());
    }
    let ratio = (dest.width() / src.width()).min(dest.height() / src.height());
    let downscale = ratio < PREFILTER_BELOW;
    if adjust.is_none() && !downscale {
        return painter.draw_image(view, src, dest);
    }

    let (mut buffer, mut local) = crop_source(view, src)?;
    if let Some(adjustments) = adjust {
        unpremultiply_rgba8_in_place(&mut buffer.data);
        adjust::apply(&mut buffer.data, adjustments);
        premultiply_rgba8_in_place(&mut buffer.data);
    }
    if downscale {
        (buffer, local) = prefilter(buffer, local, dest)?;
    }
    painter.draw_image(buffer.view(), local, dest)
}

/// Copy the whole-pixel bounds of `src`. Returns the buffer and `src` in buffer coordinates.
fn crop_source(view: PixelView<'_>, src: Rect) -> BadgeResult<(Raster, Rect)> {
    let x0 = src.x0.floor().clamp(0.0, f64::from(view.width - 1)) as u32;
    let y0 = src.y0.floor().clamp(0.0, f64::from(view.height - 1)) as u32;
    let x1 = (src.x1.ceil().max(0.0) as u32).clamp(x0 + 1, view.width);
    let y1 = (src.y1.ceil().max(0.0) as u32).clamp(y0 + 1, view.height);
    let (cw, ch) = (x1 - x0, y1 - y0);

    let row = view.width as usize * 4;
    let mut data = Vec::with_capacity(cw as usize * ch as usize * 4);
    for y in y0..y1 {
        let start = y as usize * row + x0 as usize * 4;
        data.extend_from_slice(&view.data[start..start + cw as usize * 4]);
    }
    let local = src - Vec2::new(f64::from(x0), f64::from(y0));
    Ok((Raster::from_premul(cw, ch, data)?, local))
}

/// Shrink `buffer` toward `dest`'s size with a triangle filter, rescaling `local` with it.
fn prefilter(buffer: Raster, local: Rect, dest: Rect) -> BadgeResult<(Raster, Rect)> {
    let (cw, ch) = (buffer.width, buffer.height);
    let bw = (dest.width().ceil() as u32).clamp(1, cw);
    let bh = (dest.height().ceil() as u32).clamp(1, ch);
    let crop = image::RgbaImage::from_raw(cw, ch, buffer.data)
        .ok_or_else(|| BadgeError::render("source crop does not match its dimensions"))?;
    let resized = image::imageops::resize(&crop, bw, bh, image::imageops::FilterType::Triangle);

    let fx = f64::from(bw) / f64::from(cw);
    let fy = f64::from(bh) / f64::from(ch);
    let local = Rect::new(local.x0 * fx, local.y0 * fy, local.x1 * fx, local.y1 * fy);
    Ok((Raster::from_premul(bw, bh, resized.into_raw())?, local))
}

/// Fill `rect` with a cover-scaled, blurred copy of the whole image.
fn paint_blurred_background(
    painter: &mut Painter,
    image: &SourceImage,
    rect: Rect,
    sigma_px: f64,
) -> BadgeResult<()> {
    let k = if sigma_px > BLUR_WORKING_SIGMA {
        BLUR_WORKING_SIGMA / sigma_px
    } else {
        1.0
    };
    let side = (rect.width() * k).ceil().max(1.0);

    let placement = resolve(&ResolveInput {
        fit_mode: FitMode::Cover,
        ..ResolveInput::new(f64::from(image.width()), f64::from(image.height()), side)
    });
    let mut offscreen = Painter::new(side as u32, side as u32)?;
    draw_source(
        &mut offscreen,
        image.view(),
        placement.src,
        placement.dest,
        None,
    )?;
    let blurred = blur_raster(&offscreen.into_raster()?, sigma_px * k)?;

    painter.draw_image(
        blurred.view(),
        Rect::new(0.0, 0.0, rect.width() * k, rect.height() * k),
        rect,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
