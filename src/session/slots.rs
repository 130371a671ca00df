use crate::assets::image::SourceImage;
use crate::export::pipeline::SlotJob;
use crate::foundation::error::{BadgeError, BadgeResult};
use crate::foundation::units::SLOT_COUNT;
use crate::model::params::{Adjustments, Transform};
use crate::render::raster::Raster;

/// A filled grid position.
#[derive(Clone, Debug)]
pub struct Slot {
    /// Shared source pixels.
    pub image: SourceImage,
    /// Placement.
    pub transform: Transform,
    /// Color adjustments and corner radius.
    pub adjustments: Adjustments,
    pub(crate) thumbnail: Raster,
}

impl Slot {
    /// Cached raster, current with `transform` and `adjustments`.
    pub fn thumbnail(&self) -> &Raster {
        &self.thumbnail
    }

    /// Export input for this slot. The image is shared, not copied.
    pub fn to_job(&self) -> SlotJob {
        SlotJob {
            image: self.image.clone(),
            transform: self.transform,
            adjustments: self.adjustments,
        }
    }
}

/// The 12 positions of the 3x4 sheet, each filled or empty.
#[derive(Clone, Debug, Default)]
pub struct SlotGrid {
    slots: [Option<Slot>; SLOT_COUNT],
}

impl SlotGrid {
    /// `index` if it names a grid position.
    pub fn check_index(index: usize) -> BadgeResult<usize> {
        if index < SLOT_COUNT {
            Ok(index)
        } else {
            Err(BadgeError::validation(format!(
                "slot index {index} out of range 0..{SLOT_COUNT}"
            )))
        }
    }

    /// The slot at `index` if it is filled.
    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    pub(crate) fn put(&mut self, index: usize, slot: Slot) -> BadgeResult<()> {
        self.slots[Self::check_index(index)?] = Some(slot);
        Ok(())
    }

    /// Empty the slot, returning what it held.
    pub(crate) fn take(&mut self, index: usize) -> BadgeResult<Option<Slot>> {
        Ok(self.slots[Self::check_index(index)?].take())
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) -> BadgeResult<()> {
        self.slots.swap(Self::check_index(a)?, Self::check_index(b)?);
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.slots = Default::default();
    }

    /// Whether `index` holds an image.
    pub fn is_filled(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Lowest empty position.
    pub fn next_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Lowest filled position.
    pub fn first_filled(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_some)
    }

    /// Filled positions in ascending order.
    pub fn filled_indices(&self) -> Vec<usize> {
        (0..SLOT_COUNT).filter(|&i| self.is_filled(i)).collect()
    }

    /// Whether every position is empty.
    pub fn is_empty(&self) -> bool {
        self.first_filled().is_none()
    }

    /// All 12 positions in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&Slot>> {
        self.slots.iter().map(Option::as_ref)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/slots.rs"]
mod tests;
