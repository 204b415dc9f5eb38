//! Transfer example: gating a simulated firmware update
//!
//! This example demonstrates:
//! - Building a gate over application flash and emulated EEPROM
//! - Protecting the running application and a golden image
//! - Erasing, writing and verifying rows the way a DFU host drives them
//! - Serializing requests through `SharedGate`

use dfu_nvm_gate::prelude::*;

const ROW: usize = 0x200;
const FLASH_BASE: u32 = 0x0;
const FLASH_SIZE: usize = 0x1_0000;
const EEPROM_BASE: u32 = 0x2_0000;
const EEPROM_SIZE: usize = 0x1000;

fn main() {
    // Slot 0: bootloader + running app, slot 1: update target, slot 2: golden image
    let metadata = SlotTable::<3>::from_slots(
        &[
            SlotMetadata::new(0x0000, 0x1F00),
            SlotMetadata::new(0x2000, 0x7F00),
            SlotMetadata::new(0xA000, 0x5F00),
        ],
        0,
    )
    .expect("three slots fit");

    let layout = NvmLayout::new(
        ROW as u32,
        0x100,
        ImageFormat::Full,
        Window::app_flash(FLASH_BASE, FLASH_SIZE as u32, 0x2000),
        Window::new(EEPROM_BASE, EEPROM_BASE + EEPROM_SIZE as u32),
    );

    // Pretend the golden image in slot 2 is intact.
    let golden = GoldenImages::<_, 1>::from_slots(&[2], |_: SlotId| true).expect("one slot fits");

    let storage = Banked::new(
        RamNvm::<FLASH_SIZE>::filled(FLASH_BASE, 0xFF),
        Window::new(FLASH_BASE, FLASH_BASE + FLASH_SIZE as u32),
        RamNvm::<EEPROM_SIZE>::filled(EEPROM_BASE, 0xFF),
        layout.em_eeprom,
    );

    let gate = NvmGateBuilder::new()
        .layout(layout)
        .metadata(metadata)
        .golden_images(golden)
        .storage(storage)
        .build()
        .expect("layout is valid");

    let shared = SharedGate::new(gate);

    println!("=== Erase slot 1 ===");
    let mut row = [0u8; ROW];
    let mut address = 0x2000;
    while address < 0xA000 {
        let status = shared.write_request(address, 0, Control::Erase.into(), &mut row);
        assert!(status.is_success());
        address += ROW as u32;
    }
    println!("erased {:#x}..{:#x}", 0x2000, 0xA000);

    println!("\n=== Program and verify slot 1 ===");
    for (i, address) in (0x2000..0x2800).step_by(ROW).enumerate() {
        let mut data = [i as u8; ROW];
        let status = shared.write_request(address, ROW as u32, ControlFlags::empty(), &mut data);
        let code = status.code();
        println!("write {:#06x}: {:?} (code {:#04x})", address, status, code);

        let mut expected = [i as u8; ROW];
        let compare = Control::Compare.into();
        let status = shared.read_request(address, ROW as u32, compare, &mut expected);
        println!("verify {:#06x}: {:?}", address, status);
    }

    println!("\n=== Rejected requests ===");
    let attempts: [(&str, u32, u32, ControlFlags); 5] = [
        ("running app", 0x1000, ROW as u32, ControlFlags::empty()),
        ("golden image", 0xA000, ROW as u32, ControlFlags::empty()),
        ("misaligned", 0x2010, ROW as u32, ControlFlags::empty()),
        ("short length", 0x2000, 0x100, ControlFlags::empty()),
        ("outside windows", 0x1_8000, ROW as u32, ControlFlags::empty()),
    ];
    for (what, address, length, ctl) in attempts {
        let mut data = [0x55u8; ROW];
        let status = shared.write_request(address, length, ctl, &mut data);
        println!("{:<16} {:#07x}: {:?}", what, address, status);
    }

    println!("\n=== EEPROM ===");
    let record_address = EEPROM_BASE + 0x200;
    let plain = ControlFlags::empty();
    let mut record = [0x42u8; ROW];
    let status = shared.write_request(record_address, ROW as u32, plain, &mut record);
    println!("write: {:?}", status);

    let mut out = [0u8; ROW];
    let status = shared.read_request(record_address, ROW as u32, plain, &mut out);
    println!("read: {:?}, first byte {:#04x}", status, out[0]);
}
