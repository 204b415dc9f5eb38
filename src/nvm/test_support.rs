//! Test support utilities - only compiled in test builds.

use crate::nvm::{
    gate::NvmGate,
    golden::NoGoldenImages,
    layout::NvmLayout,
    metadata::SlotTable,
    storage::{Banked, RowStorage},
    table::RamNvm,
    types::{ImageFormat, SlotMetadata, Window},
};

/// Row size of the standard test layout.
pub const ROW: usize = 0x200;
pub const SIGNATURE_SIZE: u32 = 0x100;

pub type TestFlash = RamNvm<0x1_0000>;
pub type TestEeprom = RamNvm<0x1000>;
pub type TestStorage = Banked<TestFlash, TestEeprom>;
pub type TestGate = NvmGate<SlotTable<4>, NoGoldenImages, TestStorage>;

/// Standard test configuration:
/// 512-byte rows, app flash `[0x2000, 0x10000)`, EEPROM `[0x20000, 0x21000)`.
pub fn test_layout() -> NvmLayout {
    NvmLayout::new(
        ROW as u32,
        SIGNATURE_SIZE,
        ImageFormat::Full,
        Window::app_flash(0x0, 0x1_0000, 0x2000),
        Window::new(0x2_0000, 0x2_1000),
    )
}

/// Three slots, slot 0 running. With the full image format they occupy
/// `[0x1000, 0x2000)`, `[0x2000, 0x9F00)` and `[0xA000, 0xC000)`.
pub fn test_metadata() -> SlotTable<4> {
    let mut table = SlotTable::new(0);
    for meta in [
        SlotMetadata::new(0x1000, 0x0F00),
        SlotMetadata::new(0x2000, 0x7E00),
        SlotMetadata::new(0xA000, 0x1F00),
    ] {
        table.push(meta).unwrap();
    }
    table
}

pub fn test_storage() -> TestStorage {
    let layout = test_layout();
    Banked::new(
        RamNvm::new(0x0),
        Window::new(0x0, 0x1_0000),
        RamNvm::new(layout.em_eeprom.start),
        layout.em_eeprom,
    )
}

/// Helper to create a gate over the standard layout with golden images disabled.
pub fn test_gate() -> TestGate {
    NvmGate::new(
        test_layout(),
        test_metadata(),
        NoGoldenImages,
        test_storage(),
    )
}

/// Storage whose every operation fails.
pub struct FailingStorage;

impl RowStorage for FailingStorage {
    type Error = ();

    fn write_row(&mut self, _address: u32, _row: &[u8]) -> Result<(), ()> {
        Err(())
    }

    fn read(&self, _address: u32, _out: &mut [u8]) -> Result<(), ()> {
        Err(())
    }
}

/// Storage that counts writes and remembers the last address written.
/// Reads return zeros.
#[derive(Default)]
pub struct RecordingStorage {
    writes: usize,
    last: Option<u32>,
}

impl RecordingStorage {
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn last_write(&self) -> Option<u32> {
        self.last
    }
}

impl RowStorage for RecordingStorage {
    type Error = ();

    fn write_row(&mut self, address: u32, _row: &[u8]) -> Result<(), ()> {
        self.writes += 1;
        self.last = Some(address);
        Ok(())
    }

    fn read(&self, _address: u32, out: &mut [u8]) -> Result<(), ()> {
        out.fill(0);
        Ok(())
    }
}
