use heapless::Vec;

use crate::nvm::{
    MetadataError,
    slice::ROSlice,
    types::{SlotId, SlotMetadata},
};

/// Read-only lookup into the bootloader's slot metadata.
pub trait MetadataTable {
    /// Verified region of `slot`, or `None` if the slot is not configured.
    fn slot_metadata(&self, slot: SlotId) -> Option<SlotMetadata>;
    /// Slot of the application currently executing.
    fn running_slot(&self) -> SlotId;
}

impl<T: MetadataTable> MetadataTable for &T {
    fn slot_metadata(&self, slot: SlotId) -> Option<SlotMetadata> {
        (**self).slot_metadata(slot)
    }

    fn running_slot(&self) -> SlotId {
        (**self).running_slot()
    }
}

/// Fixed-capacity slot table indexed by slot id.
#[derive(Debug, Clone)]
pub struct SlotTable<const N: usize> {
    slots: Vec<SlotMetadata, N>,
    running: SlotId,
}

/// Bytes per slot entry in the persisted metadata row: start and length words.
pub const METADATA_ENTRY_SIZE: usize = 8;
/// Size of the CRC-32C word that trails the slot entries.
pub const METADATA_CRC_SIZE: usize = 4;

impl<const N: usize> SlotTable<N> {
    pub fn new(running: SlotId) -> Self {
        Self {
            slots: Vec::new(),
            running,
        }
    }

    pub fn from_slots(slots: &[SlotMetadata], running: SlotId) -> Result<Self, MetadataError> {
        let mut table = Self::new(running);
        for meta in slots {
            table.push(*meta)?;
        }
        Ok(table)
    }

    /// Decodes `slot_count` entries from a persisted metadata row.
    ///
    /// Each entry is a little-endian `(start, length)` word pair; a CRC-32C
    /// word follows the last entry. The CRC is owned by the metadata
    /// writer and is not checked here.
    pub fn from_metadata_row(
        row: &[u8],
        slot_count: usize,
        running: SlotId,
    ) -> Result<Self, MetadataError> {
        if slot_count > N {
            return Err(MetadataError::CapacityExceeded);
        }

        let needed = slot_count * METADATA_ENTRY_SIZE + METADATA_CRC_SIZE;
        if row.len() < needed {
            return Err(MetadataError::RowTooShort);
        }

        let row = ROSlice::new(row);
        let mut table = Self::new(running);
        for slot in 0..slot_count {
            let offset = slot * METADATA_ENTRY_SIZE;
            table.push(SlotMetadata::new(
                row.read_u32_le_at(offset),
                row.read_u32_le_at(offset + 4),
            ))?;
        }
        Ok(table)
    }

    /// Appends the next slot; its id is its position in the table.
    pub fn push(&mut self, meta: SlotMetadata) -> Result<SlotId, MetadataError> {
        let slot = self.slots.len() as SlotId;
        self.slots
            .push(meta)
            .map_err(|_| MetadataError::CapacityExceeded)?;
        Ok(slot)
    }

    pub fn set_running(&mut self, slot: SlotId) {
        self.running = slot;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<const N: usize> MetadataTable for SlotTable<N> {
    fn slot_metadata(&self, slot: SlotId) -> Option<SlotMetadata> {
        self.slots.get(slot as usize).copied()
    }

    fn running_slot(&self) -> SlotId {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata_row() -> [u8; 20] {
        let mut row = [0u8; 20];
        row[0..4].copy_from_slice(&0x1000u32.to_le_bytes());
        row[4..8].copy_from_slice(&0x0F00u32.to_le_bytes());
        row[8..12].copy_from_slice(&0x8000u32.to_le_bytes());
        row[12..16].copy_from_slice(&0x4000u32.to_le_bytes());
        row[16..20].copy_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
        row
    }

    #[test]
    fn decodes_persisted_row() {
        let table = SlotTable::<4>::from_metadata_row(&metadata_row(), 2, 1).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.running_slot(), 1);
        assert_eq!(
            table.slot_metadata(0),
            Some(SlotMetadata::new(0x1000, 0x0F00))
        );
        assert_eq!(
            table.slot_metadata(1),
            Some(SlotMetadata::new(0x8000, 0x4000))
        );
        assert_eq!(table.slot_metadata(2), None);
    }

    #[test]
    fn row_decode_errors() {
        let row = metadata_row();

        // Both entries present, CRC word missing
        assert_eq!(
            SlotTable::<4>::from_metadata_row(&row[..16], 2, 0).unwrap_err(),
            MetadataError::RowTooShort
        );
        assert_eq!(
            SlotTable::<1>::from_metadata_row(&row, 2, 0).unwrap_err(),
            MetadataError::CapacityExceeded
        );
    }

    #[test]
    fn push_assigns_sequential_ids() {
        let mut table = SlotTable::<2>::new(0);
        assert!(table.is_empty());
        assert_eq!(table.push(SlotMetadata::new(0, 1)), Ok(0));
        assert_eq!(table.push(SlotMetadata::new(1, 1)), Ok(1));
        assert_eq!(
            table.push(SlotMetadata::new(2, 1)),
            Err(MetadataError::CapacityExceeded)
        );

        table.set_running(1);
        assert_eq!(table.running_slot(), 1);
    }
}
