use crate::nvm::{
    metadata::MetadataTable,
    types::{ImageFormat, SlotId, SlotRange},
};

/// Maps a slot's verified region onto the full range it occupies,
/// signature trailer included.
pub struct AddressRangeResolver<'a, M: MetadataTable> {
    metadata: &'a M,
    image_format: ImageFormat,
    signature_size: u32,
}

impl<'a, M: MetadataTable> AddressRangeResolver<'a, M> {
    pub fn new(metadata: &'a M, image_format: ImageFormat, signature_size: u32) -> Self {
        Self {
            metadata,
            image_format,
            signature_size,
        }
    }

    /// Occupied range of `slot`, or `None` if the metadata table has no entry for it.
    ///
    /// Arithmetic saturates at the ends of the address space so the result
    /// always covers the verified region.
    pub fn resolve(&self, slot: SlotId) -> Option<SlotRange> {
        let meta = self.metadata.slot_metadata(slot)?;
        let verify_end = meta.verify_start.saturating_add(meta.verify_length);

        let range = match self.image_format {
            ImageFormat::Simplified => SlotRange {
                start: meta.verify_start.saturating_sub(self.signature_size),
                end: verify_end,
            },
            ImageFormat::Full => SlotRange {
                start: meta.verify_start,
                end: verify_end.saturating_add(self.signature_size),
            },
        };
        Some(range)
    }

    /// Occupied range of the application currently executing.
    pub fn running(&self) -> Option<SlotRange> {
        self.resolve(self.metadata.running_slot())
    }
}
