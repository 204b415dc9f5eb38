use crate::nvm::{
    NvmError, Status,
    golden::GoldenImagePolicy,
    helpers::is_aligned,
    layout::NvmLayout,
    metadata::MetadataTable,
    policy::{GoldenImageGuard, RegionGuard, SelfOverwriteGuard, WriteGuard},
    resolver::AddressRangeResolver,
    storage::RowStorage,
    types::{Control, ControlFlags},
};

/// Validates every NVM write and read requested during a firmware transfer
/// and forwards the safe ones to the storage driver.
///
/// # Type Parameters
/// - `M`: Slot metadata lookup
/// - `G`: Golden-image list and validator
/// - `S`: Row storage driver
///
/// Writes are checked in a fixed order: row alignment, running image,
/// golden images, storage windows. The first failing check decides the
/// error and nothing is written.
pub struct NvmGate<M, G, S>
where
    M: MetadataTable,
    G: GoldenImagePolicy,
    S: RowStorage,
{
    layout: NvmLayout,
    metadata: M,
    golden: G,
    storage: S,
}

impl<M, G, S> NvmGate<M, G, S>
where
    M: MetadataTable,
    G: GoldenImagePolicy,
    S: RowStorage,
{
    /// Creates a gate without validating `layout`; see
    /// [`NvmGateBuilder`](crate::nvm::NvmGateBuilder) for the checked path.
    pub fn new(layout: NvmLayout, metadata: M, golden: G, storage: S) -> Self {
        Self {
            layout,
            metadata,
            golden,
            storage,
        }
    }

    pub fn layout(&self) -> &NvmLayout {
        &self.layout
    }

    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut M {
        &mut self.metadata
    }

    pub fn golden(&self) -> &G {
        &self.golden
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    fn resolver(&self) -> AddressRangeResolver<'_, M> {
        AddressRangeResolver::new(
            &self.metadata,
            self.layout.image_format,
            self.layout.signature_size,
        )
    }

    fn region_guard(&self) -> RegionGuard {
        RegionGuard::new(self.layout.app_flash, self.layout.em_eeprom)
    }

    /// Runs the write validation chain without touching storage.
    ///
    /// `buffer_len` is the size of the caller's data buffer; it must hold
    /// at least one row.
    pub fn check_write(
        &self,
        address: u32,
        length: u32,
        ctl: ControlFlags,
        buffer_len: usize,
    ) -> Result<(), NvmError> {
        let row_size = self.layout.row_size;
        let erase = ctl.contains(Control::Erase);

        // Erase always clears exactly one row, so it may carry any length.
        if !is_aligned(address, row_size) || (length != row_size && !erase) {
            debug!(
                "write {=u32:#x} len {=u32:#x} rejected: not row aligned",
                address, length
            );
            return Err(NvmError::Length);
        }
        if buffer_len < row_size as usize {
            debug!(
                "write {=u32:#x} rejected: buffer shorter than a row",
                address
            );
            return Err(NvmError::Length);
        }

        let resolver = self.resolver();
        SelfOverwriteGuard::new(&resolver).check(address)?;
        GoldenImageGuard::new(&resolver, &self.golden).check(address)?;
        self.region_guard().check(address)
    }

    /// Writes one row at `address` from `buffer`, or zeros if `ctl` has
    /// [`Control::Erase`] set.
    ///
    /// Erasing overwrites the first row of `buffer` with zeros before the
    /// write is issued.
    pub fn write_data(
        &mut self,
        address: u32,
        length: u32,
        ctl: ControlFlags,
        buffer: &mut [u8],
    ) -> Result<(), NvmError> {
        self.check_write(address, length, ctl, buffer.len())?;

        let row = &mut buffer[..self.layout.row_size as usize];
        if ctl.contains(Control::Erase) {
            row.fill(0);
        }

        trace!("writing row {=u32:#x}", address);
        self.storage.write_row(address, row).map_err(|_| {
            warn!("storage write failed at {=u32:#x}", address);
            NvmError::Data
        })
    }

    /// Copies `length` bytes at `address` into `buffer`, or with
    /// [`Control::Compare`] set, checks that storage matches `buffer`.
    ///
    /// Reads never modify storage, so only the length and window checks apply.
    pub fn read_data(
        &self,
        address: u32,
        length: u32,
        ctl: ControlFlags,
        buffer: &mut [u8],
    ) -> Result<(), NvmError> {
        if !is_aligned(length, self.layout.row_size) {
            debug!("read len {=u32:#x} rejected: not row aligned", length);
            return Err(NvmError::Length);
        }
        let len = length as usize;
        if buffer.len() < len {
            debug!(
                "read {=u32:#x} rejected: buffer shorter than length",
                address
            );
            return Err(NvmError::Length);
        }

        self.region_guard().check(address)?;

        let data = &mut buffer[..len];
        if ctl.contains(Control::Compare) {
            match self.storage.compare(address, data) {
                Ok(true) => Ok(()),
                Ok(false) => {
                    debug!("compare mismatch at {=u32:#x}", address);
                    Err(NvmError::Verify)
                }
                Err(_) => {
                    warn!("storage read failed at {=u32:#x}", address);
                    Err(NvmError::Data)
                }
            }
        } else {
            self.storage.read(address, data).map_err(|_| {
                warn!("storage read failed at {=u32:#x}", address);
                NvmError::Data
            })
        }
    }

    /// [`Self::write_data`] reporting a transport [`Status`].
    pub fn write_request(
        &mut self,
        address: u32,
        length: u32,
        ctl: ControlFlags,
        buffer: &mut [u8],
    ) -> Status {
        self.write_data(address, length, ctl, buffer).into()
    }

    /// [`Self::read_data`] reporting a transport [`Status`].
    pub fn read_request(
        &self,
        address: u32,
        length: u32,
        ctl: ControlFlags,
        buffer: &mut [u8],
    ) -> Status {
        self.read_data(address, length, ctl, buffer).into()
    }
}
