//! A [`PdfSink`] that paints the page into one raster, for whole-page previews and PNG output.

use crate::foundation::core::Rect;
use crate::foundation::error::{BadgeError, BadgeResult};
use crate::foundation::units::PX_PER_MM;
use crate::layout::grid::PageSpec;
use crate::render::painter::Painter;
use crate::render::raster::Raster;

use super::sink::{PageConfig, PdfSink, Stroke};

/// Rasterizes the page at a fixed pixel density.
#[derive(Debug)]
pub struct PageRasterSink {
    px_per_mm: f64,
    file_name: Option<String>,
    painter: Option<Painter>,
    finished: Option<Raster>,
}

impl PageRasterSink {
    /// A sink painting at `px_per_mm`.
    pub fn new(px_per_mm: f64) -> Self {
        Self {
            px_per_mm,
            file_name: None,
            painter: None,
            finished: None,
        }
    }

    /// Print resolution (11.811 px/mm).
    pub fn print() -> Self {
        Self::new(PX_PER_MM)
    }

    /// Page dimensions in whole pixels, rounded.
    pub fn page_size_px(page: PageSpec, px_per_mm: f64) -> (u32, u32) {
        (
            (page.width_mm * px_per_mm).round().max(1.0) as u32,
            (page.height_mm * px_per_mm).round().max(1.0) as u32,
        )
    }

    /// File name from the last `begin_page`.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// The finished page, once [`PdfSink::finish`] ran.
    pub fn raster(&self) -> Option<&Raster> {
        self.finished.as_ref()
    }

    /// Take the finished page.
    pub fn into_raster(self) -> Option<Raster> {
        self.finished
    }

    fn to_px(&self, rect_mm: Rect) -> Rect {
        rect_mm.scale_from_origin(self.px_per_mm)
    }

    fn painter_mut(&mut self, op: &str) -> BadgeResult<&mut Painter> {
        self.painter
            .as_mut()
            .ok_or_else(|| BadgeError::export(format!("{op} called outside a page")))
    }
}

impl PdfSink for PageRasterSink {
    fn begin_page(&mut self, cfg: PageConfig) -> BadgeResult<()> {
        if !self.px_per_mm.is_finite() || self.px_per_mm <= 0.0 {
            return Err(BadgeError::validation("page raster px/mm must be > 0"));
        }
        let (w, h) = Self::page_size_px(cfg.page, self.px_per_mm);
        let mut painter = Painter::new(w, h)?;
        painter.clear([255, 255, 255, 255]);
        self.painter = Some(painter);
        self.finished = None;
        self.file_name = Some(cfg.file_name);
        Ok(())
    }

    fn place_raster(&mut self, raster: &Raster, rect_mm: Rect) -> BadgeResult<()> {
        let dest = self.to_px(rect_mm);
        let src = Rect::new(0.0, 0.0, f64::from(raster.width), f64::from(raster.height));
        self.painter_mut("place_raster")?
            .draw_image(raster.view(), src, dest)
    }

    fn stroke_rect(&mut self, rect_mm: Rect, stroke: Stroke) -> BadgeResult<()> {
        let rect = self.to_px(rect_mm);
        // Hairlines still need one device pixel to show up.
        let width = (stroke.width_mm * self.px_per_mm).max(1.0);
        self.painter_mut("stroke_rect")?
            .stroke_rect(rect, width, stroke.rgb.to_premul_rgba(255));
        Ok(())
    }

    fn finish(&mut self) -> BadgeResult<()> {
        let painter = self
            .painter
            .take()
            .ok_or_else(|| BadgeError::export("finish called outside a page"))?;
        self.finished = Some(painter.into_raster()?);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/page_raster.rs"]
mod tests;
