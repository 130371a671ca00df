//! badgekit composes photographs into die-cut badge rasters and print-ready sheets.
//!
//! One image plus a [`RenderParameters`] value (crop, fit, zoom, offset, rotation, flips,
//! background, color adjustments, corner radius, margin) becomes a square raster. The same
//! [`SlotCompositor`] renders grid thumbnails, the on-screen preview and the 300 DPI print
//! cells; only the [`BadgeFrame`] differs.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: [`resolve`] maps image size, crop and fit/zoom onto a source rectangle and
//!    a destination rectangle inside the image area.
//! 2. **Plan**: [`plan_cell`] turns that placement into an ordered list of [`Stage`]s
//!    (clip, rotate, background, flip, draw, release).
//! 3. **Composite**: [`SlotCompositor`] executes the stages into a premultiplied [`Raster`].
//! 4. **Export** (optional): [`ExportPipeline`] renders single badges or the 3x4 A4 sheet
//!    and hands rasters and guide strokes to a [`PdfSink`].
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical inputs give byte-identical rasters.
//! - **Premultiplied RGBA8** end to end; color adjustment runs on straight alpha.
//! - Geometry and color math document their preconditions; range checks happen at the input
//!   boundary (`validate`/`clamped`).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod color;
mod config;
mod export;
mod foundation;
mod geometry;
mod layout;
mod model;
mod render;
mod session;

pub use assets::decode::{decode_image, load_image};
pub use assets::image::{PixelView, SourceImage};
pub use color::adjust::{apply as apply_color_adjustments, contrast_factor};
pub use config::job::{ExportJob, GuideOptions, JobImage};
pub use export::page_raster::PageRasterSink;
pub use export::pipeline::{
    ExportKind, ExportObserver, ExportOpts, ExportOutcome, ExportPipeline, ExportSnapshot,
    GridCell, GridJob, NoopObserver, SingleJob, SlotJob, file_timestamp,
};
pub use export::sink::{PageConfig, PdfSink, RecordingSink, SinkOp, Stroke};
pub use foundation::core::{Affine, Point, Rect, Rgb8, Vec2};
pub use foundation::error::{BadgeError, BadgeResult};
pub use foundation::units::{
    A4_HEIGHT_MM, A4_WIDTH_MM, BADGE_MM, BadgeFrame, DESIGN_MM, DIE_CUT_MM, GRID_COLS, GRID_ROWS,
    PX_PER_MM, REFERENCE_AREA_PX, SLOT_COUNT, mm_to_px, mm_to_whole_px,
};
pub use geometry::resolver::{Placement, ResolveInput, resolve};
pub use layout::grid::{
    BadgeGuides, GuideKind, PageSpec, a4_grid_cells, grid_cells, single_badge_guides,
};
pub use model::params::{
    Adjustments, BackgroundMode, CropFraction, FitMode, RenderParameters, Transform,
};
pub use render::blur::blur_raster;
pub use render::compositor::{CompositorOpts, SlotCompositor};
pub use render::painter::Painter;
pub use render::plan::{BackgroundFill, CellTarget, CompositePlan, Stage, plan_cell};
pub use render::raster::Raster;
pub use session::editor::{EditorSession, Mode, RenderTarget};
pub use session::slots::{Slot, SlotGrid};
