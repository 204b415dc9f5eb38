//! Address arithmetic shared by the guards and the storage backings.
//!
//! Useful when implementing a custom [`RowStorage`](crate::nvm::RowStorage)
//! that needs to map absolute addresses onto a local buffer.

/// Returns true if `value` is a whole multiple of `row_size`.
///
/// A zero row size never aligns anything.
///
/// # Example
/// ```
/// use dfu_nvm_gate::nvm::helpers::is_aligned;
///
/// assert!(is_aligned(0x2400, 0x200));
/// assert!(!is_aligned(0x2410, 0x200));
/// assert!(is_aligned(0, 0x200));
/// ```
#[inline]
pub fn is_aligned(value: u32, row_size: u32) -> bool {
    row_size != 0 && value % row_size == 0
}

/// Maps an absolute `address` and `len` onto offsets into a buffer of
/// `size` bytes that starts at `base`.
///
/// Returns `(start_offset, end_offset)` with end exclusive, or `None` if
/// any byte of the range falls outside `[base, base + size)`.
///
/// # Example
/// ```
/// use dfu_nvm_gate::nvm::helpers::range_span;
///
/// assert_eq!(range_span(0x2_0000, 0x1000, 0x2_0200, 0x200), Some((0x200, 0x400)));
/// assert_eq!(range_span(0x2_0000, 0x1000, 0x2_0F00, 0x200), None);
/// ```
pub fn range_span(base: u32, size: usize, address: u32, len: usize) -> Option<(usize, usize)> {
    let offset = address.checked_sub(base)? as usize;
    let end = offset.checked_add(len)?;

    if end > size {
        return None;
    }

    Some((offset, end))
}

#[test]
fn range_span_edge_cases() {
    // Below base
    assert_eq!(range_span(0x100, 0x40, 0xFF, 1), None);

    // Zero length at base is an empty span
    assert_eq!(range_span(0x100, 0x40, 0x100, 0), Some((0, 0)));

    // Last byte
    assert_eq!(range_span(0x100, 0x40, 0x13F, 1), Some((0x3F, 0x40)));

    // One past the end
    assert_eq!(range_span(0x100, 0x40, 0x13F, 2), None);

    // Whole buffer
    assert_eq!(range_span(0x100, 0x40, 0x100, 0x40), Some((0, 0x40)));
}

#[test]
fn zero_row_size_is_never_aligned() {
    assert!(!is_aligned(0, 0));
    assert!(!is_aligned(0x200, 0));
}
