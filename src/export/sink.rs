use crate::foundation::core::{Rect, Rgb8};
use crate::foundation::error::{BadgeError, BadgeResult};
use crate::layout::grid::PageSpec;
use crate::render::raster::Raster;

/// Configuration provided to a [`PdfSink`] before anything is placed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageConfig {
    /// Page size.
    pub page: PageSpec,
    /// Suggested download name, e.g. `badge-grid-2026-01-01T10-00-00.pdf`.
    pub file_name: String,
}

/// Line style for guide rectangles.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    /// Line width in millimeters.
    pub width_mm: f64,
    /// Line color.
    pub rgb: Rgb8,
}

impl Stroke {
    /// A stroke of `width_mm` in `rgb`.
    pub const fn new(width_mm: f64, rgb: Rgb8) -> Self {
        Self { width_mm, rgb }
    }
}

/// Page-assembly contract of the document writer.
///
/// Call order: `begin_page`, any number of `place_raster`/`stroke_rect` in paint order,
/// then `finish`. Coordinates are millimeters from the page's top-left corner.
pub trait PdfSink {
    /// Start the document.
    fn begin_page(&mut self, cfg: PageConfig) -> BadgeResult<()>;
    /// Draw `raster` stretched to `rect_mm`.
    fn place_raster(&mut self, raster: &Raster, rect_mm: Rect) -> BadgeResult<()>;
    /// Outline `rect_mm`.
    fn stroke_rect(&mut self, rect_mm: Rect, stroke: Stroke) -> BadgeResult<()>;
    /// Close the document.
    fn finish(&mut self) -> BadgeResult<()>;
}

/// One recorded sink call. Rasters are summarized by size and fingerprint.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SinkOp {
    /// [`PdfSink::begin_page`].
    BeginPage(PageConfig),
    /// [`PdfSink::place_raster`].
    PlaceRaster {
        /// Target rectangle on the page.
        rect_mm: Rect,
        /// Raster width.
        width_px: u32,
        /// Raster height.
        height_px: u32,
        /// [`Raster::fingerprint`] of the placed pixels.
        fingerprint: u64,
    },
    /// [`PdfSink::stroke_rect`].
    StrokeRect {
        /// Outlined rectangle.
        rect_mm: Rect,
        /// Line style.
        stroke: Stroke,
    },
    /// [`PdfSink::finish`].
    Finish,
}

/// In-memory sink for tests and for handing a manifest to an external writer.
#[derive(Debug, Default)]
pub struct RecordingSink {
    ops: Vec<SinkOp>,
    rasters: Vec<Raster>,
}

impl RecordingSink {
    /// An empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded calls, in call order.
    pub fn ops(&self) -> &[SinkOp] {
        &self.ops
    }

    /// Placed rasters, in placement order.
    pub fn rasters(&self) -> &[Raster] {
        &self.rasters
    }

    /// Whether the last recorded call was `finish`.
    pub fn is_finished(&self) -> bool {
        matches!(self.ops.last(), Some(SinkOp::Finish))
    }

    /// The recorded calls as pretty-printed JSON.
    pub fn to_manifest_json(&self) -> BadgeResult<String> {
        serde_json::to_string_pretty(&self.ops)
            .map_err(|e| BadgeError::serde(format!("encode sink manifest: {e}")))
    }
}

impl PdfSink for RecordingSink {
    fn begin_page(&mut self, cfg: PageConfig) -> BadgeResult<()> {
        self.ops.clear();
        self.rasters.clear();
        self.ops.push(SinkOp::BeginPage(cfg));
        Ok(())
    }

    fn place_raster(&mut self, raster: &Raster, rect_mm: Rect) -> BadgeResult<()> {
        self.ops.push(SinkOp::PlaceRaster {
            rect_mm,
            width_px: raster.width,
            height_px: raster.height,
            fingerprint: raster.fingerprint(),
        });
        self.rasters.push(raster.clone());
        Ok(())
    }

    fn stroke_rect(&mut self, rect_mm: Rect, stroke: Stroke) -> BadgeResult<()> {
        self.ops.push(SinkOp::StrokeRect { rect_mm, stroke });
        Ok(())
    }

    fn finish(&mut self) -> BadgeResult<()> {
        self.ops.push(SinkOp::Finish);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
