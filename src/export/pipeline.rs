//! Print export: render every badge at 300 DPI and hand placements and guides to a
//! [`PdfSink`].
//!
//! Exports run from an [`ExportSnapshot`], an owned copy of the slot state taken before
//! rendering starts, so edits made while an export is in flight cannot tear it.

use chrono::{DateTime, Utc};
use rayon::prelude::*;

use crate::assets::image::SourceImage;
use crate::foundation::core::{Point, Rect, Rgb8};
use crate::foundation::error::{BadgeError, BadgeResult};
use crate::foundation::units::{BADGE_MM, BadgeFrame, SLOT_COUNT};
use crate::layout::grid::{GuideKind, PageSpec, a4_grid_cells, single_badge_guides};
use crate::model::params::{Adjustments, RenderParameters, Transform};
use crate::render::compositor::{CompositorOpts, SlotCompositor};
use crate::render::raster::Raster;

use super::sink::{PageConfig, PdfSink, Stroke};

const CUT_GUIDE: Stroke = Stroke::new(0.1, Rgb8::BLACK);
const GRID_GUIDE: Stroke = Stroke::new(0.05, Rgb8::BLACK);
const EMPTY_SLOT_GUIDE: Stroke = Stroke::new(0.05, Rgb8::new(200, 200, 200));

/// Options for [`ExportPipeline`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOpts {
    /// Design, die-cut and rotary squares around every filled cell, plus a gray border
    /// around empty ones.
    pub cut_guides: bool,
    /// A thin border around every cell.
    pub grid_guides: bool,
    /// Render grid cells on a rayon pool.
    pub parallel: bool,
    /// Pool size when `parallel` is set; `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            cut_guides: true,
            grid_guides: false,
            parallel: false,
            threads: None,
        }
    }
}

impl ExportOpts {
    /// Toggle cut guides.
    pub fn with_cut_guides(mut self, on: bool) -> Self {
        self.cut_guides = on;
        self
    }

    /// Toggle grid guides.
    pub fn with_grid_guides(mut self, on: bool) -> Self {
        self.grid_guides = on;
        self
    }

    /// Render grid cells in parallel on a pool of `threads` workers.
    pub fn with_parallel(mut self, threads: Option<usize>) -> Self {
        self.parallel = true;
        self.threads = threads;
        self
    }
}

/// What an export produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    /// One badge on a badge-sized page.
    Single,
    /// Twelve badges on an A4 sheet.
    Grid,
}

impl ExportKind {
    /// Page format of this kind of export.
    pub fn page(self) -> PageSpec {
        match self {
            Self::Single => PageSpec::SINGLE_BADGE,
            Self::Grid => PageSpec::A4,
        }
    }

    /// Suggested document name for a `YYYY-MM-DDTHH-MM-SS` timestamp.
    pub fn file_name(self, timestamp: &str) -> String {
        match self {
            Self::Single => format!("badge-template-{timestamp}.pdf"),
            Self::Grid => format!("badge-grid-{timestamp}.pdf"),
        }
    }
}

/// Format a UTC instant as `YYYY-MM-DDTHH-MM-SS`, the stamp used in suggested file names.
pub fn file_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H-%M-%S").to_string()
}

/// Single-badge export input.
#[derive(Clone, Debug, Default)]
pub struct SingleJob {
    /// The badge image; `None` exports nothing.
    pub image: Option<SourceImage>,
    /// Parameters the badge is rendered with.
    pub params: RenderParameters,
}

/// One filled grid slot.
#[derive(Clone, Debug)]
pub struct SlotJob {
    /// Slot image.
    pub image: SourceImage,
    /// Slot placement.
    pub transform: Transform,
    /// Slot color adjustments.
    pub adjustments: Adjustments,
}

/// Grid export input: 12 slots sharing one margin.
#[derive(Clone, Debug)]
pub struct GridJob {
    /// Row-major slots, `None` where empty.
    pub slots: [Option<SlotJob>; SLOT_COUNT],
    /// Margin applied to every slot.
    pub margin_mm: f64,
}

impl Default for GridJob {
    fn default() -> Self {
        Self {
            slots: Default::default(),
            margin_mm: RenderParameters::DEFAULT_MARGIN_MM,
        }
    }
}

impl GridJob {
    /// Number of filled slots.
    pub fn filled_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Whether no slot is filled.
    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    /// Render parameters of `slot` with the grid margin.
    pub fn params_for(&self, slot: &SlotJob) -> RenderParameters {
        RenderParameters::new(slot.transform, slot.adjustments, self.margin_mm)
    }
}

/// Owned copy of everything an export reads.
#[derive(Clone, Debug)]
pub enum ExportSnapshot {
    /// A single badge.
    Single(SingleJob),
    /// The A4 sheet.
    Grid(GridJob),
}

impl ExportSnapshot {
    /// Kind of export this snapshot produces.
    pub fn kind(&self) -> ExportKind {
        match self {
            Self::Single(_) => ExportKind::Single,
            Self::Grid(_) => ExportKind::Grid,
        }
    }

    /// Whether there is nothing to print.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(job) => job.image.is_none(),
            Self::Grid(job) => job.is_empty(),
        }
    }
}

/// One cell of the A4 sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct GridCell {
    /// Row-major slot index.
    pub index: usize,
    /// Badge rectangle on the page.
    pub rect_mm: Rect,
    /// `None` for an empty slot.
    pub raster: Option<Raster>,
}

/// Result of [`ExportPipeline::run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing to export; neither the sink nor the observer was called.
    Skipped,
    /// The page was written with `rasters` badge images.
    Written {
        /// Suggested document name.
        file_name: String,
        /// Number of badge rasters placed on the page.
        rasters: usize,
    },
}

/// Export lifecycle hooks, e.g. a busy indicator.
pub trait ExportObserver {
    /// Called before rendering starts.
    fn on_started(&mut self, _kind: ExportKind) {}
    /// Called exactly once per started export, also on error and panic.
    fn on_finished(&mut self, _ok: bool) {}
}

/// Observer that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl ExportObserver for NoopObserver {}

struct FinishGuard<'a> {
    observer: &'a mut dyn ExportObserver,
    ok: bool,
}

impl Drop for FinishGuard<'_> {
    fn drop(&mut self) {
        self.observer.on_finished(self.ok);
    }
}

/// Renders export snapshots at print resolution and writes them to a sink.
#[derive(Clone, Debug)]
pub struct ExportPipeline {
    opts: ExportOpts,
    compositor: SlotCompositor,
    frame: BadgeFrame,
}

impl Default for ExportPipeline {
    fn default() -> Self {
        Self::new(ExportOpts::default())
    }
}

impl ExportPipeline {
    /// A pipeline rendering with the print compositor.
    pub fn new(opts: ExportOpts) -> Self {
        Self {
            opts,
            compositor: SlotCompositor::new(CompositorOpts::print()),
            frame: BadgeFrame::print(),
        }
    }

    /// Options this pipeline was built with.
    pub fn opts(&self) -> &ExportOpts {
        &self.opts
    }

    /// The 779 x 779 print raster of a single badge. Without an image the badge is blank.
    #[tracing::instrument(skip_all)]
    pub fn render_single(&self, job: &SingleJob) -> BadgeResult<Raster> {
        match &job.image {
            Some(image) => self.compositor.render(image, &job.params, &self.frame),
            None => Raster::filled(self.frame.size_px, self.frame.size_px, [255; 4]),
        }
    }

    /// Print rasters for all 12 cells, with their page rectangles.
    #[tracing::instrument(skip_all, fields(filled = job.filled_count(), parallel = self.opts.parallel))]
    pub fn render_grid(&self, job: &GridJob) -> BadgeResult<Vec<GridCell>> {
        let render = |slot: &Option<SlotJob>| -> BadgeResult<Option<Raster>> {
            match slot {
                Some(s) => self
                    .compositor
                    .render(&s.image, &job.params_for(s), &self.frame)
                    .map(Some),
                None => Ok(None),
            }
        };

        let rasters: Vec<BadgeResult<Option<Raster>>> = if self.opts.parallel {
            let pool = build_thread_pool(self.opts.threads)?;
            pool.install(|| job.slots.par_iter().map(render).collect())
        } else {
            job.slots.iter().map(render).collect()
        };

        a4_grid_cells()
            .into_iter()
            .zip(rasters)
            .enumerate()
            .map(|(index, (origin, raster))| {
                let raster = raster?;
                tracing::debug!(
                    index,
                    x_mm = origin.x,
                    y_mm = origin.y,
                    fingerprint = raster.as_ref().map(Raster::fingerprint),
                    "grid cell"
                );
                Ok(GridCell {
                    index,
                    rect_mm: badge_rect_mm(origin),
                    raster,
                })
            })
            .collect()
    }

    /// Emit the page of a single-badge export.
    pub fn write_single(
        &self,
        raster: &Raster,
        sink: &mut dyn PdfSink,
        file_name: String,
    ) -> BadgeResult<()> {
        sink.begin_page(PageConfig {
            page: ExportKind::Single.page(),
            file_name,
        })?;
        sink.place_raster(raster, badge_rect_mm(Point::ORIGIN))?;
        sink.finish()
    }

    /// Emit the A4 page: each cell's raster, then its guides.
    pub fn write_grid(
        &self,
        cells: &[GridCell],
        sink: &mut dyn PdfSink,
        file_name: String,
    ) -> BadgeResult<()> {
        sink.begin_page(PageConfig {
            page: ExportKind::Grid.page(),
            file_name,
        })?;
        let guides = single_badge_guides(BADGE_MM);
        for cell in cells {
            match &cell.raster {
                Some(raster) => {
                    sink.place_raster(raster, cell.rect_mm)?;
                    if self.opts.cut_guides {
                        let placed = guides.translated(cell.rect_mm.origin());
                        for kind in GuideKind::ALL {
                            sink.stroke_rect(placed.get(kind), CUT_GUIDE)?;
                        }
                    }
                }
                None if self.opts.cut_guides => sink.stroke_rect(cell.rect_mm, EMPTY_SLOT_GUIDE)?,
                None => {}
            }
            if self.opts.grid_guides {
                sink.stroke_rect(cell.rect_mm, GRID_GUIDE)?;
            }
        }
        sink.finish()
    }

    /// Render `snapshot` and write it to `sink`.
    ///
    /// Empty snapshots are skipped. Otherwise `observer` sees `on_started` and then exactly one
    /// `on_finished`; any failure comes back as [`BadgeError::Export`].
    pub fn run(
        &self,
        snapshot: &ExportSnapshot,
        sink: &mut dyn PdfSink,
        observer: &mut dyn ExportObserver,
        timestamp: &str,
    ) -> BadgeResult<ExportOutcome> {
        let kind = snapshot.kind();
        if snapshot.is_empty() {
            tracing::warn!(?kind, "nothing to export");
            return Ok(ExportOutcome::Skipped);
        }

        observer.on_started(kind);
        let mut guard = FinishGuard {
            observer,
            ok: false,
        };

        let file_name = kind.file_name(timestamp);
        let result = self.render_and_write(snapshot, sink, file_name.clone());
        guard.ok = result.is_ok();

        match result {
            Ok(rasters) => {
                tracing::info!(file_name = %file_name, rasters, "export finished");
                Ok(ExportOutcome::Written { file_name, rasters })
            }
            Err(e) => {
                tracing::error!(error = %e, ?kind, "export failed");
                Err(match e {
                    BadgeError::Export(_) => e,
                    other => BadgeError::export(format!("{kind:?} export failed: {other}")),
                })
            }
        }
    }

    fn render_and_write(
        &self,
        snapshot: &ExportSnapshot,
        sink: &mut dyn PdfSink,
        file_name: String,
    ) -> BadgeResult<usize> {
        match snapshot {
            ExportSnapshot::Single(job) => {
                let raster = self.render_single(job)?;
                self.write_single(&raster, sink, file_name)?;
                Ok(1)
            }
            ExportSnapshot::Grid(job) => {
                let cells = self.render_grid(job)?;
                self.write_grid(&cells, sink, file_name)?;
                Ok(cells.iter().filter(|c| c.raster.is_some()).count())
            }
        }
    }
}

fn badge_rect_mm(origin: Point) -> Rect {
    Rect::from_origin_size(origin, (BADGE_MM, BADGE_MM))
}

fn build_thread_pool(threads: Option<usize>) -> BadgeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(BadgeError::validation(
            "export 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| BadgeError::export(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/export/pipeline.rs"]
mod tests;
