//! JSON export jobs, the file format of the command-line front end.
//!
//! ```json
//! {
//!   "mode": "grid",
//!   "margin_mm": 6,
//!   "guides": { "cut": true, "grid": false },
//!   "slots": [
//!     { "path": "a.jpg", "transform": { "rotation": 90 } },
//!     null,
//!     { "path": "b.png", "adjustments": { "brightness": 20 } }
//!   ]
//! }
//! ```
//!
//! Image paths are relative to the job file. Omitted fields take their defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::assets::decode::load_image;
use crate::export::pipeline::{ExportOpts, ExportSnapshot, GridJob, SingleJob, SlotJob};
use crate::foundation::error::{BadgeError, BadgeResult};
use crate::foundation::units::SLOT_COUNT;
use crate::model::params::{Adjustments, RenderParameters, Transform};
use crate::session::editor::Mode;

/// One image reference in a job file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobImage {
    /// Path of the encoded image, relative to the job file.
    pub path: PathBuf,
    /// Placement of the image in the badge.
    #[serde(default)]
    pub transform: Transform,
    /// Color adjustments and corner radius.
    #[serde(default)]
    pub adjustments: Adjustments,
}

/// Which guide sets the exported page carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuideOptions {
    /// Design, die-cut and rotary squares.
    pub cut: bool,
    /// Cell borders.
    pub grid: bool,
}

impl Default for GuideOptions {
    fn default() -> Self {
        let opts = ExportOpts::default();
        Self {
            cut: opts.cut_guides,
            grid: opts.grid_guides,
        }
    }
}

/// A complete export request read from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportJob {
    /// Single badge page or A4 grid.
    pub mode: Mode,
    /// Image-area margin shared by every badge of the job.
    pub margin_mm: f64,
    /// Guide strokes to emit.
    pub guides: GuideOptions,
    /// Image of a single-mode job.
    pub single: Option<JobImage>,
    /// Up to 12 grid slots in row-major order; `null` marks an empty slot.
    pub slots: Vec<Option<JobImage>>,
}

impl Default for ExportJob {
    fn default() -> Self {
        Self {
            mode: Mode::Single,
            margin_mm: RenderParameters::DEFAULT_MARGIN_MM,
            guides: GuideOptions::default(),
            single: None,
            slots: Vec::new(),
        }
    }
}

impl ExportJob {
    /// Parse and validate a job.
    pub fn from_json_str(s: &str) -> BadgeResult<Self> {
        let job: Self =
            serde_json::from_str(s).map_err(|e| BadgeError::serde(format!("export job: {e}")))?;
        job.validate()?;
        Ok(job)
    }

    /// Read, parse and validate a job file.
    pub fn from_path(path: &Path) -> BadgeResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read export job '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Range-check the margin, the slot count and every image's parameters.
    pub fn validate(&self) -> BadgeResult<()> {
        let (lo, hi) = RenderParameters::MARGIN_RANGE_MM;
        if !(lo..=hi).contains(&self.margin_mm) {
            return Err(BadgeError::validation(format!(
                "margin_mm {} outside [{lo}, {hi}]",
                self.margin_mm
            )));
        }
        if self.slots.len() > SLOT_COUNT {
            return Err(BadgeError::validation(format!(
                "job lists {} slots, the sheet has {SLOT_COUNT}",
                self.slots.len()
            )));
        }
        for image in self.single.iter().chain(self.slots.iter().flatten()) {
            image.transform.validate()?;
            image.adjustments.validate()?;
        }
        Ok(())
    }

    /// Pipeline options matching the job's guide settings.
    pub fn export_opts(&self) -> ExportOpts {
        ExportOpts::default()
            .with_cut_guides(self.guides.cut)
            .with_grid_guides(self.guides.grid)
    }

    /// Decode every referenced image, resolving relative paths against `base_dir`.
    pub fn load(&self, base_dir: &Path) -> BadgeResult<ExportSnapshot> {
        let read = |image: &JobImage| load_image(&base_dir.join(&image.path));
        match self.mode {
            Mode::Single => {
                let (image, params) = match &self.single {
                    Some(job_image) => (
                        Some(read(job_image)?),
                        RenderParameters::new(
                            job_image.transform,
                            job_image.adjustments,
                            self.margin_mm,
                        ),
                    ),
                    None => (
                        None,
                        RenderParameters {
                            margin_mm: self.margin_mm,
                            ..RenderParameters::default()
                        },
                    ),
                };
                Ok(ExportSnapshot::Single(SingleJob { image, params }))
            }
            Mode::Grid => {
                let mut grid = GridJob {
                    margin_mm: self.margin_mm,
                    ..GridJob::default()
                };
                for (dst, src) in grid.slots.iter_mut().zip(&self.slots) {
                    if let Some(job_image) = src {
                        *dst = Some(SlotJob {
                            image: read(job_image)?,
                            transform: job_image.transform,
                            adjustments: job_image.adjustments,
                        });
                    }
                }
                Ok(ExportSnapshot::Grid(grid))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/job.rs"]
mod tests;
