/// Reasons an NVM access request is refused or fails.
///
/// Exactly one kind is reported per call. A request that fails
/// validation never reaches the storage driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NvmError {
    /// Address or length violates the row alignment/size contract.
    Length,
    /// Address lies outside the update windows or inside a protected image.
    Address,
    /// Storage driver reported a failure.
    Data,
    /// Read-back compare found a mismatch.
    Verify,
}

impl core::fmt::Display for NvmError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NvmError::Length => write!(f, "address or length is not row aligned"),
            NvmError::Address => write!(f, "address is not a permitted update target"),
            NvmError::Data => write!(f, "storage driver reported a failure"),
            NvmError::Verify => write!(f, "stored data does not match buffer"),
        }
    }
}

/// Transport-facing outcome of a write or read request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    Success,
    LengthError,
    AddressError,
    DataError,
    VerifyError,
}

impl Status {
    /// Status byte reported to the DFU host.
    pub const fn code(self) -> u8 {
        match self {
            Status::Success => 0x00,
            Status::VerifyError => 0x02,
            Status::LengthError => 0x03,
            Status::DataError => 0x04,
            Status::AddressError => 0x0A,
        }
    }

    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }
}

impl From<NvmError> for Status {
    fn from(err: NvmError) -> Self {
        match err {
            NvmError::Length => Status::LengthError,
            NvmError::Address => Status::AddressError,
            NvmError::Data => Status::DataError,
            NvmError::Verify => Status::VerifyError,
        }
    }
}

impl From<Result<(), NvmError>> for Status {
    fn from(result: Result<(), NvmError>) -> Self {
        match result {
            Ok(()) => Status::Success,
            Err(err) => err.into(),
        }
    }
}

/// Rejected [`NvmLayout`](crate::nvm::NvmLayout) configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// Row size is zero.
    ZeroRowSize,
    /// A storage window has no addresses.
    EmptyWindow,
    /// A storage window bound is not a multiple of the row size.
    MisalignedWindow,
}

impl core::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LayoutError::ZeroRowSize => write!(f, "row size must be non-zero"),
            LayoutError::EmptyWindow => write!(f, "storage window is empty"),
            LayoutError::MisalignedWindow => write!(f, "storage window is not row aligned"),
        }
    }
}

/// Errors decoding the persisted metadata row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MetadataError {
    /// Row is too short for the requested slot count plus its CRC word.
    RowTooShort,
    /// More slots requested than the table can hold.
    CapacityExceeded,
}

impl core::fmt::Display for MetadataError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MetadataError::RowTooShort => write!(f, "metadata row too short"),
            MetadataError::CapacityExceeded => write!(f, "slot table capacity exceeded"),
        }
    }
}
