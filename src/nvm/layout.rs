use crate::nvm::{
    LayoutError,
    helpers::is_aligned,
    types::{ImageFormat, Window},
};

/// Build configuration of the device's update-visible storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NvmLayout {
    /// Program/erase granularity in bytes.
    pub row_size: u32,
    /// Size of the signature trailer attached to every image.
    pub signature_size: u32,
    /// Placement of the signature trailer.
    pub image_format: ImageFormat,
    /// Primary application flash, slot 0 excluded.
    pub app_flash: Window,
    /// Emulated EEPROM.
    pub em_eeprom: Window,
}

impl NvmLayout {
    pub const fn new(
        row_size: u32,
        signature_size: u32,
        image_format: ImageFormat,
        app_flash: Window,
        em_eeprom: Window,
    ) -> Self {
        Self {
            row_size,
            signature_size,
            image_format,
            app_flash,
            em_eeprom,
        }
    }

    /// The windows an update may target, primary flash first.
    #[inline]
    pub fn windows(&self) -> [Window; 2] {
        [self.app_flash, self.em_eeprom]
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.row_size == 0 {
            return Err(LayoutError::ZeroRowSize);
        }

        for window in self.windows() {
            if window.is_empty() {
                return Err(LayoutError::EmptyWindow);
            }
            if !is_aligned(window.start, self.row_size) || !is_aligned(window.end, self.row_size) {
                return Err(LayoutError::MisalignedWindow);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nvm::test_support::test_layout;

    #[test]
    fn standard_layout_is_valid() {
        assert_eq!(test_layout().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_bad_layouts() {
        let mut layout = test_layout();
        layout.row_size = 0;
        assert_eq!(layout.validate(), Err(LayoutError::ZeroRowSize));

        let mut layout = test_layout();
        layout.em_eeprom = Window::new(0x2_0000, 0x2_0000);
        assert_eq!(layout.validate(), Err(LayoutError::EmptyWindow));

        let mut layout = test_layout();
        layout.app_flash = Window::new(0x2100, 0x1_0000);
        assert_eq!(layout.validate(), Err(LayoutError::MisalignedWindow));
    }
}
