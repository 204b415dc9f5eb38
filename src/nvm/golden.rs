use heapless::Vec;

use crate::nvm::types::SlotId;

/// Checks the integrity of a stored image.
pub trait ImageValidator {
    /// Returns true if the image in `slot` passes its own integrity check.
    fn validate_image(&self, slot: SlotId) -> bool;
}

impl<F> ImageValidator for F
where
    F: Fn(SlotId) -> bool,
{
    fn validate_image(&self, slot: SlotId) -> bool {
        self(slot)
    }
}

/// Identifies recovery images and reports whether they are still intact.
pub trait GoldenImagePolicy {
    /// Golden-image slots in scan order. Empty when protection is disabled.
    fn golden_slots(&self) -> &[SlotId];
    /// Returns true if the golden image in `slot` is valid.
    fn is_image_valid(&self, slot: SlotId) -> bool;
}

/// Golden-image protection disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGoldenImages;

impl GoldenImagePolicy for NoGoldenImages {
    fn golden_slots(&self) -> &[SlotId] {
        &[]
    }

    fn is_image_valid(&self, _slot: SlotId) -> bool {
        true
    }
}

/// Ordered list of up to `N` golden-image slots plus their validator.
pub struct GoldenImages<V: ImageValidator, const N: usize> {
    slots: Vec<SlotId, N>,
    validator: V,
}

impl<V: ImageValidator, const N: usize> GoldenImages<V, N> {
    pub fn new(validator: V) -> Self {
        Self {
            slots: Vec::new(),
            validator,
        }
    }

    /// Returns `None` if `slots` does not fit in `N`.
    pub fn from_slots(slots: &[SlotId], validator: V) -> Option<Self> {
        let mut golden = Self::new(validator);
        for slot in slots {
            golden.push(*slot).ok()?;
        }
        Some(golden)
    }

    /// Appends a golden slot to the end of the scan order.
    pub fn push(&mut self, slot: SlotId) -> Result<(), SlotId> {
        self.slots.push(slot)
    }
}

impl<V: ImageValidator, const N: usize> GoldenImagePolicy for GoldenImages<V, N> {
    fn golden_slots(&self) -> &[SlotId] {
        &self.slots
    }

    fn is_image_valid(&self, slot: SlotId) -> bool {
        self.validator.validate_image(slot)
    }
}

impl<V: ImageValidator, const N: usize> core::fmt::Debug for GoldenImages<V, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GoldenImages")
            .field("slots", &self.slots.as_slice())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_golden_images_is_empty() {
        assert!(NoGoldenImages.golden_slots().is_empty());
    }

    #[test]
    fn golden_images_keep_order_and_capacity() {
        let golden = GoldenImages::<_, 2>::from_slots(&[2, 1], |slot: SlotId| slot == 1).unwrap();
        assert_eq!(golden.golden_slots(), &[2, 1]);
        assert!(golden.is_image_valid(1));
        assert!(!golden.is_image_valid(2));

        let full = GoldenImages::<_, 1>::from_slots(&[2, 1], |_: SlotId| true);
        assert!(full.is_none());
    }

    #[test]
    fn push_reports_overflow() {
        let mut golden = GoldenImages::<_, 1>::new(|_: SlotId| true);
        assert_eq!(golden.push(3), Ok(()));
        assert_eq!(golden.push(4), Err(4));
    }
}
