/// Generates a little-endian reader for one fixed-width integer type.
macro_rules! impl_read_field {
    ($type:ty, $size:literal) => {
        paste::paste! {
            #[doc = "Reads a little-endian `" $type "` at the given offset."]
            #[doc = ""]
            #[doc = "# Panics"]
            #[doc = "Panics if `offset + " $size " > len()`."]
            #[inline]
            pub fn [<read_ $type _le_at>](&self, offset: usize) -> $type {
                <$type>::from_le_bytes(self.field::<$size>(offset))
            }
        }
    };
}

/// Generates readers for the field widths found in persisted NVM records.
macro_rules! impl_read_fields {
    () => {
        impl_read_field!(u32, 4);
    };
}

pub(super) use impl_read_field;
pub(super) use impl_read_fields;
