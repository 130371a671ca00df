//! Immediate-mode painter backed by a `vello_cpu` render context.
//!
//! Keeps the canvas state the compositing stages need: the current user-to-device transform
//! and a stack of rounded-rect clip layers. Drawing calls are recorded into the context and
//! rasterized (anti-aliased) by [`Painter::into_raster`].

use std::sync::Arc;

use vello_cpu::kurbo::Shape as _;

use crate::assets::image::PixelView;
use crate::foundation::core::{Affine, Rect, Vec2};
use crate::foundation::error::{BadgeError, BadgeResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::raster::Raster;

/// Flattening tolerance for curved clip outlines, in device pixels.
const PATH_TOLERANCE: f64 = 0.1;

/// Canvas-like painter over one `width x height` surface.
pub struct Painter {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
    transform: Affine,
    clip_layers: usize,
}

impl std::fmt::Debug for Painter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Painter")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("transform", &self.transform)
            .field("clip_layers", &self.clip_layers)
            .finish_non_exhaustive()
    }
}

impl Painter {
    /// A transparent surface. Both sides must fit in `u16`.
    pub fn new(width: u32, height: u32) -> BadgeResult<Self> {
        let width: u16 = width
            .try_into()
            .map_err(|_| BadgeError::render("painter width exceeds u16"))?;
        let height: u16 = height
            .try_into()
            .map_err(|_| BadgeError::render("painter height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(BadgeError::render("painter size must be non-zero"));
        }
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
            transform: Affine::IDENTITY,
            clip_layers: 0,
        })
    }

    /// A surface that starts out as a copy of `raster`.
    pub fn from_raster(raster: &Raster) -> BadgeResult<Self> {
        let mut painter = Self::new(raster.width, raster.height)?;
        let full = Rect::new(0.0, 0.0, f64::from(raster.width), f64::from(raster.height));
        painter.draw_image(raster.view(), full, full)?;
        Ok(painter)
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Discard everything drawn so far and fill the surface with a premultiplied color.
    ///
    /// Transform and clip are reset as well.
    pub fn clear(&mut self, rgba_premul: [u8; 4]) {
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
        self.transform = Affine::IDENTITY;
        self.clip_layers = 0;
        if rgba_premul[3] == 0 {
            return;
        }
        let full = Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height));
        self.fill_rect(full, rgba_premul);
    }

    /// Current user-to-device transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Post-multiply the current transform, like a canvas `transform()` call.
    pub fn concat(&mut self, affine: Affine) {
        self.transform = self.transform * affine;
    }

    /// Intersect the clip with a rounded rectangle given in device space.
    pub fn clip_rounded_rect(&mut self, rect: Rect, radius: f64) {
        let r = radius.max(0.0).min(rect.width().min(rect.height()) / 2.0);
        let shape = vello_cpu::kurbo::RoundedRect::new(rect.x0, rect.y0, rect.x1, rect.y1, r);
        // Clip paths are flattened with the transform current at push time.
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.push_clip_layer(&shape.to_path(PATH_TOLERANCE));
        self.clip_layers += 1;
    }

    /// Drop every clip pushed since the last release.
    pub fn release_clip(&mut self) {
        for _ in 0..self.clip_layers {
            self.ctx.pop_layer();
        }
        self.clip_layers = 0;
    }

    /// Whether a clip is active.
    pub fn has_clip(&self) -> bool {
        self.clip_layers > 0
    }

    /// Fill `rect` (user space) with a premultiplied color.
    pub fn fill_rect(&mut self, rect: Rect, rgba_premul: [u8; 4]) {
        if !(rect.width() > 0.0 && rect.height() > 0.0) {
            return;
        }
        let mut straight = rgba_premul;
        unpremultiply_rgba8_in_place(&mut straight);
        let [r, g, b, a] = straight;
        self.ctx.set_transform(to_cpu_affine(self.transform));
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        self.ctx.fill_rect(&to_cpu_rect(rect));
    }

    /// Four bands of `width` centered on the edges of `rect`.
    pub fn stroke_rect(&mut self, rect: Rect, width: f64, rgba_premul: [u8; 4]) {
        let hw = width / 2.0;
        let bands = [
            Rect::new(rect.x0 - hw, rect.y0 - hw, rect.x1 + hw, rect.y0 + hw),
            Rect::new(rect.x0 - hw, rect.y1 - hw, rect.x1 + hw, rect.y1 + hw),
            Rect::new(rect.x0 - hw, rect.y0 + hw, rect.x0 + hw, rect.y1 - hw),
            Rect::new(rect.x1 - hw, rect.y0 + hw, rect.x1 + hw, rect.y1 - hw),
        ];
        for band in bands {
            self.fill_rect(band, rgba_premul);
        }
    }

    /// Draw `src_rect` of `src` stretched onto `dest` (user space), bilinearly sampled.
    ///
    /// Only the whole pixels under `src_rect` are handed to the rasterizer, so sampling
    /// near the edge of `src_rect` pads with its own border instead of the surrounding image.
    pub fn draw_image(
        &mut self,
        src: PixelView<'_>,
        src_rect: Rect,
        dest: Rect,
    ) -> BadgeResult<()> {
        let degenerate = !(src_rect.width() > 0.0 && src_rect.height() > 0.0)
            || !(dest.width() > 0.0 && dest.height() > 0.0);
        if degenerate || src.width == 0 || src.height == 0 {
            return Ok(());
        }
        let (pixmap, origin) = crop_to_pixmap(src, src_rect)?;
        let local = src_rect - origin;

        // Image pixel space -> user space: local src rect onto dest.
        let paint = Affine::translate(dest.origin().to_vec2())
            * Affine::scale_non_uniform(dest.width() / local.width(), dest.height() / local.height())
            * Affine::translate(-local.origin().to_vec2());

        self.ctx.set_transform(to_cpu_affine(self.transform));
        self.ctx.set_paint_transform(to_cpu_affine(paint));
        self.ctx.set_paint(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        });
        self.ctx.fill_rect(&to_cpu_rect(dest));
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    /// Rasterize everything recorded so far.
    pub fn into_raster(mut self) -> BadgeResult<Raster> {
        self.release_clip();
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        Raster::from_premul(
            u32::from(self.width),
            u32::from(self.height),
            pixmap.data_as_u8_slice().to_vec(),
        )
    }
}

/// Copy the whole pixels covering `src_rect` into a pixmap. Returns it with its origin in
/// `src` coordinates.
fn crop_to_pixmap(src: PixelView<'_>, src_rect: Rect) -> BadgeResult<(vello_cpu::Pixmap, Vec2)> {
    let x0 = src_rect.x0.floor().clamp(0.0, f64::from(src.width - 1)) as u32;
    let y0 = src_rect.y0.floor().clamp(0.0, f64::from(src.height - 1)) as u32;
    let x1 = (src_rect.x1.ceil().max(0.0) as u32).clamp(x0 + 1, src.width);
    let y1 = (src_rect.y1.ceil().max(0.0) as u32).clamp(y0 + 1, src.height);
    let w: u16 = (x1 - x0)
        .try_into()
        .map_err(|_| BadgeError::render("image crop width exceeds u16"))?;
    let h: u16 = (y1 - y0)
        .try_into()
        .map_err(|_| BadgeError::render("image crop height exceeds u16"))?;

    let mut opaque = true;
    let mut pixels = Vec::with_capacity(usize::from(w) * usize::from(h));
    let row = src.width as usize * 4;
    for y in y0..y1 {
        let start = y as usize * row + x0 as usize * 4;
        for px in src.data[start..start + usize::from(w) * 4].chunks_exact(4) {
            opaque &= px[3] == 255;
            pixels.push(vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            });
        }
    }
    let origin = Vec2::new(f64::from(x0), f64::from(y0));
    Ok((
        vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, !opaque),
        origin,
    ))
}

fn to_cpu_affine(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn to_cpu_rect(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
