use crate::nvm::{helpers::range_span, storage::RowStorage};

/// Error from [`RamNvm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RamError {
    /// Access reaches outside the backing buffer.
    OutOfBounds,
}

/// RAM-backed storage of `SIZE` bytes mapped at `base`.
///
/// Stands in for a flash or emulated-EEPROM driver on the host.
pub struct RamNvm<const SIZE: usize> {
    base: u32,
    bytes: [u8; SIZE],
}

impl<const SIZE: usize> RamNvm<SIZE> {
    /// Zero-filled storage at `base`.
    pub fn new(base: u32) -> Self {
        Self::filled(base, 0x00)
    }

    /// Storage at `base` with every byte set to `value`.
    pub fn filled(base: u32, value: u8) -> Self {
        Self {
            base,
            bytes: [value; SIZE],
        }
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub(crate) fn with_bytes<F, R>(&self, address: u32, len: usize, f: F) -> Result<R, RamError>
    where
        F: FnOnce(&[u8]) -> R,
    {
        let (offset, end) = range_span(self.base, SIZE, address, len)
            .ok_or(RamError::OutOfBounds)?;
        Ok(f(&self.bytes[offset..end]))
    }

    pub(crate) fn with_bytes_mut<F, R>(
        &mut self,
        address: u32,
        len: usize,
        f: F,
    ) -> Result<R, RamError>
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        let (offset, end) = range_span(self.base, SIZE, address, len)
            .ok_or(RamError::OutOfBounds)?;
        Ok(f(&mut self.bytes[offset..end]))
    }

    /// Direct view of `len` bytes at `address`.
    pub fn bytes(&self, address: u32, len: usize) -> Result<&[u8], RamError> {
        let (offset, end) = range_span(self.base, SIZE, address, len)
            .ok_or(RamError::OutOfBounds)?;
        Ok(&self.bytes[offset..end])
    }
}

impl<const SIZE: usize> RowStorage for RamNvm<SIZE> {
    type Error = RamError;

    fn write_row(&mut self, address: u32, row: &[u8]) -> Result<(), RamError> {
        self.with_bytes_mut(address, row.len(), |dst| dst.copy_from_slice(row))
    }

    fn read(&self, address: u32, out: &mut [u8]) -> Result<(), RamError> {
        self.with_bytes(address, out.len(), |src| out.copy_from_slice(src))
    }

    fn compare(&self, address: u32, expected: &[u8]) -> Result<bool, RamError> {
        self.with_bytes(address, expected.len(), |src| src == expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 64 bytes mapped at 0x100
    type TestRam = RamNvm<64>;

    #[test]
    fn new_storage_is_zeroed() {
        let ram = TestRam::new(0x100);
        assert_eq!(ram.bytes(0x100, 64).unwrap(), &[0u8; 64]);
        assert_eq!(
            TestRam::filled(0x100, 0xFF).bytes(0x13F, 1).unwrap(),
            &[0xFF]
        );
    }

    #[test]
    fn write_then_read() {
        let mut ram = TestRam::new(0x100);
        ram.write_row(0x110, &[0xAA, 0xBB, 0xCC, 0xDD]).unwrap();

        let mut out = [0u8; 4];
        ram.read(0x110, &mut out).unwrap();
        assert_eq!(out, [0xAA, 0xBB, 0xCC, 0xDD]);

        assert_eq!(ram.compare(0x110, &out), Ok(true));
        assert_eq!(ram.compare(0x111, &out), Ok(false));
    }

    #[test]
    fn out_of_bounds_errors() {
        let mut ram = TestRam::new(0x100);
        let mut out = [0u8; 4];

        // Below base
        assert_eq!(ram.read(0xFC, &mut out), Err(RamError::OutOfBounds));
        // Straddles the end
        assert_eq!(ram.write_row(0x13E, &[0; 4]), Err(RamError::OutOfBounds));
        assert_eq!(ram.compare(0x140, &out), Err(RamError::OutOfBounds));
        assert_eq!(ram.bytes(0x100, 65), Err(RamError::OutOfBounds));
    }
}
