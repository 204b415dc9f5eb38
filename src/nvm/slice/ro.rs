use super::macros::{impl_read_field, impl_read_fields};

/// Read-only view over a persisted NVM record.
///
/// Provides bounds-checked fixed-width field readers.
pub struct ROSlice<'a>(&'a [u8]);

impl<'a> ROSlice<'a> {
    /// Creates a new read-only slice wrapper.
    #[inline]
    pub fn new(slice: &'a [u8]) -> Self {
        Self(slice)
    }

    /// Returns the length of the slice.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the slice is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn field<const N: usize>(&self, offset: usize) -> [u8; N] {
        assert!(
            offset + N <= self.0.len(),
            "read out of bounds: offset {} + size {} > len {}",
            offset,
            N,
            self.0.len()
        );
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&self.0[offset..offset + N]);
        bytes
    }

    impl_read_fields!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_fields() {
        let data = [0x78, 0x56, 0x34, 0x12, 0xCD, 0xAB, 0x00, 0x80];
        let slice = ROSlice::new(&data);

        assert_eq!(slice.read_u32_le_at(0), 0x12345678);
        assert_eq!(slice.read_u32_le_at(4), 0x8000_ABCD);
        // Unaligned offsets are fine.
        assert_eq!(slice.read_u32_le_at(2), 0xABCD_1234);
    }

    #[test]
    #[should_panic]
    fn read_out_of_bounds() {
        let data = [0u8; 4];
        ROSlice::new(&data).read_u32_le_at(1);
    }
}
