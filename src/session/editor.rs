//! In-memory editing session: the single-badge image and the 12 grid slots.
//!
//! Every mutation that changes what a slot looks like re-renders that slot's thumbnail
//! right away, in full. Rendering reads a [`RenderParameters`] value built once per call by
//! [`EditorSession::render_parameters_for`]; the compositor never sees the session mode.

use crate::assets::image::SourceImage;
use crate::export::pipeline::{ExportSnapshot, GridJob, SingleJob};
use crate::foundation::error::{BadgeError, BadgeResult};
use crate::foundation::units::{BadgeFrame, SLOT_COUNT};
use crate::model::params::{Adjustments, RenderParameters, Transform};
use crate::render::compositor::SlotCompositor;
use crate::render::raster::Raster;

use super::slots::{Slot, SlotGrid};

/// Which layout the session edits and exports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One badge.
    #[default]
    Single,
    /// The 3x4 sheet.
    Grid,
}

/// What a render is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderTarget {
    /// The single-mode badge.
    Single,
    /// One grid slot.
    Slot(usize),
}

#[derive(Clone, Debug, Default)]
struct SingleBadge {
    image: Option<SourceImage>,
    transform: Transform,
    adjustments: Adjustments,
    preview: Option<Raster>,
}

/// Owns the editable state and the rendered thumbnails.
#[derive(Clone, Debug)]
pub struct EditorSession {
    mode: Mode,
    single: SingleBadge,
    grid: SlotGrid,
    /// Selected slot indices in selection order.
    selection: Vec<usize>,
    single_margin_mm: f64,
    grid_margin_mm: f64,
    compositor: SlotCompositor,
    thumbnail_frame: BadgeFrame,
    preview_frame: BadgeFrame,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// Empty session in single mode with default margins.
    pub fn new() -> Self {
        Self {
            mode: Mode::Single,
            single: SingleBadge::default(),
            grid: SlotGrid::default(),
            selection: Vec::new(),
            single_margin_mm: RenderParameters::DEFAULT_MARGIN_MM,
            grid_margin_mm: RenderParameters::DEFAULT_MARGIN_MM,
            compositor: SlotCompositor::default(),
            thumbnail_frame: BadgeFrame::thumbnail(),
            preview_frame: BadgeFrame::preview(),
        }
    }

    /// Use different resolutions for grid thumbnails and the single-badge preview.
    pub fn with_frames(mut self, thumbnail: BadgeFrame, preview: BadgeFrame) -> Self {
        self.thumbnail_frame = thumbnail;
        self.preview_frame = preview;
        self
    }

    /// Active mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch modes. Both layouts keep their content.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Margin of `mode`.
    pub fn margin_mm(&self, mode: Mode) -> f64 {
        match mode {
            Mode::Single => self.single_margin_mm,
            Mode::Grid => self.grid_margin_mm,
        }
    }

    /// Set the margin of `mode` and re-render everything it affects.
    pub fn set_margin_mm(&mut self, mode: Mode, margin_mm: f64) -> BadgeResult<()> {
        let (lo, hi) = RenderParameters::MARGIN_RANGE_MM;
        if !(lo..=hi).contains(&margin_mm) {
            return Err(BadgeError::validation(format!(
                "margin {margin_mm}mm must be within {lo}..={hi}"
            )));
        }
        match mode {
            Mode::Single => {
                self.single_margin_mm = margin_mm;
                self.refresh_single()
            }
            Mode::Grid => {
                self.grid_margin_mm = margin_mm;
                for i in self.grid.filled_indices() {
                    self.refresh_slot(i)?;
                }
                Ok(())
            }
        }
    }

    /// The value object a render of `target` reads. Empty slots have none.
    pub fn render_parameters_for(&self, target: RenderTarget) -> Option<RenderParameters> {
        match target {
            RenderTarget::Single => Some(RenderParameters::new(
                self.single.transform,
                self.single.adjustments,
                self.single_margin_mm,
            )),
            RenderTarget::Slot(i) => self.grid.get(i).map(|s| {
                RenderParameters::new(s.transform, s.adjustments, self.grid_margin_mm)
            }),
        }
    }

    // Single mode.

    /// The single-mode image.
    pub fn single_image(&self) -> Option<&SourceImage> {
        self.single.image.as_ref()
    }

    /// Transform of the single badge.
    pub fn single_transform(&self) -> &Transform {
        &self.single.transform
    }

    /// Adjustments of the single badge.
    pub fn single_adjustments(&self) -> &Adjustments {
        &self.single.adjustments
    }

    /// Preview raster of the single badge, `None` without an image.
    pub fn single_preview(&self) -> Option<&Raster> {
        self.single.preview.as_ref()
    }

    /// Replace the single-mode image; transform and adjustments reset to defaults.
    pub fn set_single_image(&mut self, image: SourceImage) -> BadgeResult<()> {
        self.single.image = Some(image);
        self.single.transform = Transform::default();
        self.single.adjustments = Adjustments::default();
        self.refresh_single()
    }

    /// Validate and apply, then refresh the preview.
    pub fn set_single_transform(&mut self, transform: Transform) -> BadgeResult<()> {
        transform.validate()?;
        self.single.transform = transform;
        self.refresh_single()
    }

    /// Validate and apply, then refresh the preview.
    pub fn set_single_adjustments(&mut self, adjustments: Adjustments) -> BadgeResult<()> {
        adjustments.validate()?;
        self.single.adjustments = adjustments;
        self.refresh_single()
    }

    // Grid slots.

    /// All grid slots.
    pub fn slots(&self) -> &SlotGrid {
        &self.grid
    }

    /// Slot `index`, `None` when empty or out of range.
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.grid.get(index)
    }

    /// Lowest empty index.
    pub fn next_empty_slot(&self) -> Option<usize> {
        self.grid.next_empty()
    }

    /// Lowest filled index.
    pub fn first_filled_slot(&self) -> Option<usize> {
        self.grid.first_filled()
    }

    /// Put `image` into slot `index` with default transform and adjustments.
    pub fn load_into_slot(&mut self, index: usize, image: SourceImage) -> BadgeResult<()> {
        SlotGrid::check_index(index)?;
        let slot = self.new_slot(image, Transform::default(), Adjustments::default())?;
        self.grid.put(index, slot)
    }

    /// Fill successive empty slots; images beyond the last empty slot are ignored.
    pub fn load_many(
        &mut self,
        images: impl IntoIterator<Item = SourceImage>,
    ) -> BadgeResult<Vec<usize>> {
        let mut used = Vec::new();
        for image in images {
            let Some(index) = self.grid.next_empty() else {
                tracing::warn!("all slots are filled, ignoring remaining images");
                break;
            };
            self.load_into_slot(index, image)?;
            used.push(index);
        }
        Ok(used)
    }

    /// Empty slot `index`; returns whether it held an image.
    pub fn remove_slot(&mut self, index: usize) -> BadgeResult<bool> {
        let removed = self.grid.take(index)?.is_some();
        self.selection.retain(|&i| i != index);
        Ok(removed)
    }

    /// Empty every slot and clear the selection.
    pub fn clear_all(&mut self) {
        self.grid.clear();
        self.selection.clear();
    }

    /// Swap two slots' contents; clears the selection.
    pub fn swap_slots(&mut self, a: usize, b: usize) -> BadgeResult<()> {
        self.grid.swap(a, b)?;
        self.selection.clear();
        Ok(())
    }

    /// Validate and apply to a filled slot, then re-render its thumbnail.
    pub fn set_slot_transform(&mut self, index: usize, transform: Transform) -> BadgeResult<()> {
        transform.validate()?;
        match self.grid.get_mut(index) {
            Some(slot) => slot.transform = transform,
            None => {
                tracing::warn!(index, "transform on an empty slot ignored");
                return Ok(());
            }
        }
        self.refresh_slot(index)
    }

    // Selection.

    /// Selected indices in selection order.
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    /// Select slot `index`. `additive` toggles its membership instead of replacing the
    /// selection. Empty slots cannot be picked this way; returns whether `index` ends up
    /// selected.
    pub fn select(&mut self, index: usize, additive: bool) -> bool {
        if !self.grid.is_filled(index) {
            return false;
        }
        if additive {
            if let Some(pos) = self.selection.iter().position(|&i| i == index) {
                self.selection.remove(pos);
                return false;
            }
        } else {
            self.selection.clear();
        }
        self.selection.push(index);
        true
    }

    /// Select all 12 positions, or clear the selection when all are already selected.
    pub fn toggle_select_all(&mut self) {
        if self.selection.len() == SLOT_COUNT {
            self.selection.clear();
        } else {
            for i in 0..SLOT_COUNT {
                if !self.selection.contains(&i) {
                    self.selection.push(i);
                }
            }
        }
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Copy the first selected filled slot (or else the first filled slot) into every empty
    /// slot. The image is shared; transform and adjustments are copied. Returns the indices
    /// that were filled.
    pub fn fill_empty_slots(&mut self) -> BadgeResult<Vec<usize>> {
        let source = self
            .selection
            .iter()
            .copied()
            .find(|&i| self.grid.is_filled(i))
            .or_else(|| self.grid.first_filled())
            .and_then(|i| self.grid.get(i))
            .cloned();
        let Some(source) = source else {
            return Ok(Vec::new());
        };

        let mut filled = Vec::new();
        for i in 0..SLOT_COUNT {
            if !self.grid.is_filled(i) {
                self.grid.put(i, source.clone())?;
                filled.push(i);
            }
        }
        Ok(filled)
    }

    /// Apply to every selected filled slot.
    pub fn apply_adjustments_to_selected(&mut self, adjustments: Adjustments) -> BadgeResult<()> {
        adjustments.validate()?;
        let selected = self.selection.clone();
        self.apply_adjustments(&selected, adjustments)
    }

    /// Apply to every filled slot; empty slots are skipped.
    pub fn apply_adjustments_to_all(&mut self, adjustments: Adjustments) -> BadgeResult<()> {
        adjustments.validate()?;
        let all: Vec<usize> = (0..SLOT_COUNT).collect();
        self.apply_adjustments(&all, adjustments)
    }

    /// Restore default adjustments on the selected slots.
    pub fn reset_selected_adjustments(&mut self) -> BadgeResult<()> {
        let selected = self.selection.clone();
        self.apply_adjustments(&selected, Adjustments::default())
    }

    // Export.

    /// Owned copy of what an export of the current mode would print.
    pub fn snapshot_for_export(&self) -> ExportSnapshot {
        match self.mode {
            Mode::Single => ExportSnapshot::Single(SingleJob {
                image: self.single.image.clone(),
                params: RenderParameters::new(
                    self.single.transform,
                    self.single.adjustments,
                    self.single_margin_mm,
                ),
            }),
            Mode::Grid => {
                let mut job = GridJob {
                    margin_mm: self.grid_margin_mm,
                    ..GridJob::default()
                };
                for (dst, src) in job.slots.iter_mut().zip(self.grid.iter()) {
                    *dst = src.map(Slot::to_job);
                }
                ExportSnapshot::Grid(job)
            }
        }
    }

    fn apply_adjustments(&mut self, indices: &[usize], adjustments: Adjustments) -> BadgeResult<()> {
        for &i in indices {
            match self.grid.get_mut(i) {
                Some(slot) => slot.adjustments = adjustments,
                None => {
                    tracing::warn!(index = i, "adjustments on an empty slot skipped");
                    continue;
                }
            }
            self.refresh_slot(i)?;
        }
        Ok(())
    }

    fn new_slot(
        &self,
        image: SourceImage,
        transform: Transform,
        adjustments: Adjustments,
    ) -> BadgeResult<Slot> {
        let params = RenderParameters::new(transform, adjustments, self.grid_margin_mm);
        let thumbnail = self
            .compositor
            .render(&image, &params, &self.thumbnail_frame)?;
        Ok(Slot {
            image,
            transform,
            adjustments,
            thumbnail,
        })
    }

    fn refresh_slot(&mut self, index: usize) -> BadgeResult<()> {
        let Some(params) = self.render_parameters_for(RenderTarget::Slot(index)) else {
            return Ok(());
        };
        let Some(slot) = self.grid.get_mut(index) else {
            return Ok(());
        };
        slot.thumbnail = self
            .compositor
            .render(&slot.image, &params, &self.thumbnail_frame)?;
        Ok(())
    }

    fn refresh_single(&mut self) -> BadgeResult<()> {
        let params = self.render_parameters_for(RenderTarget::Single);
        self.single.preview = match (&self.single.image, params) {
            (Some(image), Some(params)) => {
                Some(self.compositor.render(image, &params, &self.preview_frame)?)
            }
            _ => None,
        };
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
