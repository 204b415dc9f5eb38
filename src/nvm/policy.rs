use crate::nvm::{
    NvmError,
    golden::GoldenImagePolicy,
    metadata::MetadataTable,
    resolver::AddressRangeResolver,
    types::{SlotId, SlotRange, Window},
};

/// One step of the write validation chain.
pub trait WriteGuard {
    /// Returns `Ok(())` if a write at `address` may proceed past this guard.
    fn check(&self, address: u32) -> Result<(), NvmError>;
}

/// Refuses writes into the application currently executing.
#[derive(Debug, Clone, Copy)]
pub struct SelfOverwriteGuard {
    running: Option<SlotRange>,
}

impl SelfOverwriteGuard {
    pub fn new<M: MetadataTable>(resolver: &AddressRangeResolver<'_, M>) -> Self {
        Self {
            running: resolver.running(),
        }
    }
}

impl WriteGuard for SelfOverwriteGuard {
    fn check(&self, address: u32) -> Result<(), NvmError> {
        match self.running {
            Some(range) if range.contains(address) => {
                debug!("write {=u32:#x} rejected: inside running image", address);
                Err(NvmError::Address)
            }
            Some(_) => Ok(()),
            // Without a range for the running image nothing can be proven safe.
            None => {
                warn!(
                    "running slot has no metadata, refusing write {=u32:#x}",
                    address
                );
                Err(NvmError::Address)
            }
        }
    }
}

/// Refuses writes into intact golden images.
///
/// Only the first golden image whose range contains the address is
/// considered. If that image already fails validation the write is
/// allowed so a broken backup can be replaced.
pub struct GoldenImageGuard<'a, M: MetadataTable, G: GoldenImagePolicy> {
    resolver: &'a AddressRangeResolver<'a, M>,
    golden: &'a G,
}

impl<'a, M: MetadataTable, G: GoldenImagePolicy> GoldenImageGuard<'a, M, G> {
    pub fn new(resolver: &'a AddressRangeResolver<'a, M>, golden: &'a G) -> Self {
        Self { resolver, golden }
    }
}

impl<M: MetadataTable, G: GoldenImagePolicy> WriteGuard for GoldenImageGuard<'_, M, G> {
    fn check(&self, address: u32) -> Result<(), NvmError> {
        let covers = |slot: &SlotId| {
            self.resolver
                .resolve(*slot)
                .is_some_and(|range| range.contains(address))
        };

        match self.golden.golden_slots().iter().copied().find(covers) {
            Some(slot) if self.golden.is_image_valid(slot) => {
                debug!(
                    "write {=u32:#x} rejected: golden image {=u32} is valid",
                    address, slot
                );
                Err(NvmError::Address)
            }
            Some(slot) => {
                trace!(
                    "golden image {=u32} invalid, allowing write {=u32:#x}",
                    slot, address
                );
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// Accepts only addresses inside one of the permitted storage windows.
#[derive(Debug, Clone, Copy)]
pub struct RegionGuard {
    windows: [Window; 2],
}

impl RegionGuard {
    pub fn new(app_flash: Window, em_eeprom: Window) -> Self {
        Self {
            windows: [app_flash, em_eeprom],
        }
    }

    /// True if `address` lies in any permitted window.
    #[inline]
    pub fn permits(&self, address: u32) -> bool {
        self.windows.iter().any(|window| window.contains(address))
    }
}

impl WriteGuard for RegionGuard {
    fn check(&self, address: u32) -> Result<(), NvmError> {
        if self.permits(address) {
            Ok(())
        } else {
            debug!("access {=u32:#x} rejected: outside update windows", address);
            Err(NvmError::Address)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nvm::{
        golden::{GoldenImages, NoGoldenImages},
        metadata::SlotTable,
        test_support::{SIGNATURE_SIZE, test_layout, test_metadata},
        types::{ImageFormat, SlotId, SlotMetadata},
    };

    fn resolver(table: &SlotTable<4>) -> AddressRangeResolver<'_, SlotTable<4>> {
        AddressRangeResolver::new(table, ImageFormat::Full, SIGNATURE_SIZE)
    }

    #[test]
    fn self_guard_blocks_running_range_only() {
        let table = test_metadata();
        let resolver = resolver(&table);
        let guard = SelfOverwriteGuard::new(&resolver);

        assert_eq!(guard.check(0x1000), Err(NvmError::Address));
        assert_eq!(guard.check(0x1FFF), Err(NvmError::Address));
        assert_eq!(guard.check(0x2000), Ok(()));
        assert_eq!(guard.check(0x0E00), Ok(()));
    }

    #[test]
    fn self_guard_fails_closed_without_metadata() {
        let mut table = test_metadata();
        table.set_running(9);
        let resolver = resolver(&table);
        let guard = SelfOverwriteGuard::new(&resolver);

        assert_eq!(guard.check(0x4000), Err(NvmError::Address));
    }

    #[test]
    fn golden_guard_protects_valid_image() {
        let table = test_metadata();
        let resolver = resolver(&table);
        let golden = GoldenImages::<_, 2>::from_slots(&[2], |_: SlotId| true).unwrap();
        let guard = GoldenImageGuard::new(&resolver, &golden);

        // Slot 2 occupies [0xA000, 0xC000)
        assert_eq!(guard.check(0xA000), Err(NvmError::Address));
        assert_eq!(guard.check(0xBE00), Err(NvmError::Address));
        assert_eq!(guard.check(0xC000), Ok(()));
        assert_eq!(guard.check(0x4000), Ok(()));
    }

    #[test]
    fn golden_guard_allows_overwriting_invalid_image() {
        let table = test_metadata();
        let resolver = resolver(&table);
        let golden = GoldenImages::<_, 2>::from_slots(&[2], |_: SlotId| false).unwrap();
        let guard = GoldenImageGuard::new(&resolver, &golden);

        assert_eq!(guard.check(0xA000), Ok(()));
    }

    #[test]
    fn golden_guard_first_match_wins() {
        // Slot 3 overlaps slot 2; slot 3 is scanned first and is invalid.
        let mut table = test_metadata();
        table.push(SlotMetadata::new(0xA000, 0x1000)).unwrap();
        let resolver = resolver(&table);
        let golden = GoldenImages::<_, 2>::from_slots(&[3, 2], |slot: SlotId| slot == 2).unwrap();
        let guard = GoldenImageGuard::new(&resolver, &golden);

        assert_eq!(guard.check(0xA000), Ok(()));
        // Past slot 3's range only slot 2 matches, and it is valid.
        assert_eq!(guard.check(0xB200), Err(NvmError::Address));
    }

    #[test]
    fn golden_guard_disabled() {
        let table = test_metadata();
        let resolver = resolver(&table);
        let guard = GoldenImageGuard::new(&resolver, &NoGoldenImages);

        assert_eq!(guard.check(0xA000), Ok(()));
    }

    #[test]
    fn region_guard_windows() {
        let layout = test_layout();
        let guard = RegionGuard::new(layout.app_flash, layout.em_eeprom);

        assert_eq!(guard.check(0x1800), Err(NvmError::Address));
        assert_eq!(guard.check(0x2000), Ok(()));
        assert_eq!(guard.check(0xFE00), Ok(()));
        assert_eq!(guard.check(0x1_0000), Err(NvmError::Address));
        assert_eq!(guard.check(0x2_0200), Ok(()));
        assert_eq!(guard.check(0x2_1000), Err(NvmError::Address));
    }
}
