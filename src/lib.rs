//! A `no_std`, no-alloc write/read gate for DFU bootloaders.
//!
//! Every flash or emulated-EEPROM access requested during a firmware
//! transfer passes through an [`NvmGate`](nvm::NvmGate) before it reaches
//! the storage driver. The gate refuses anything that could brick the
//! device: writes into the running application, writes into an intact
//! golden (recovery) image, writes outside the update windows, and
//! misaligned accesses.
//!
//! # Features
//!
//! - **Zero heap allocation** - Slot tables and golden-image lists are fixed capacity
//! - **Fixed validation order** - Alignment, running image, golden images, windows
//! - **Injected collaborators** - Metadata, image validation and storage are traits
//! - **Both image formats** - Signature before or after the verified region, chosen at runtime
//! - **Interrupt-safe sharing** - [`SharedGate`](nvm::SharedGate) serializes through `critical-section`
//!
//! # Validation order
//!
//! ```text
//!  write_data(addr, len, ctl, buf)
//!       │
//!       ├─ addr row aligned, len == row (or ERASE) ──✗── Length
//!       ├─ addr outside running image ───────────────✗── Address
//!       ├─ addr outside intact golden images ────────✗── Address
//!       ├─ addr inside app flash or EEPROM window ───✗── Address
//!       ▼
//!  zero buf if ERASE, write_row(addr, buf) ──────────✗── Data
//!
//!  read_data(addr, len, ctl, buf)
//!       │
//!       ├─ len row aligned ──────────────────────────✗── Length
//!       ├─ addr inside app flash or EEPROM window ───✗── Address
//!       ▼
//!  copy into buf, or compare with buf if COMPARE ────✗── Verify / Data
//! ```
//!
//! A request that fails validation never reaches the storage driver.
//!
//! # Example
//!
//! ```rust,no_run
//! use dfu_nvm_gate::prelude::*;
//!
//! const ROW: usize = 0x200;
//!
//! let layout = NvmLayout::new(
//!     ROW as u32,
//!     0x100,
//!     ImageFormat::Full,
//!     Window::app_flash(0x0, 0x1_0000, 0x2000),
//!     Window::new(0x2_0000, 0x2_1000),
//! );
//!
//! // Slot 0 (running) occupies [0x1000, 0x2000), slot 1 the rest of flash.
//! let metadata = SlotTable::<2>::from_slots(
//!     &[SlotMetadata::new(0x1000, 0x0F00), SlotMetadata::new(0x2000, 0xDF00)],
//!     0,
//! )
//! .unwrap();
//!
//! let mut gate = NvmGateBuilder::new()
//!     .layout(layout)
//!     .metadata(metadata)
//!     .no_golden_images()
//!     .storage(RamNvm::<0x1_0000>::new(0x0))
//!     .build()
//!     .unwrap();
//!
//! let mut row = [0xA5u8; ROW];
//! assert_eq!(gate.write_request(0x2000, ROW as u32, ControlFlags::empty(), &mut row), Status::Success);
//! assert_eq!(gate.write_request(0x1000, ROW as u32, ControlFlags::empty(), &mut row), Status::AddressError);
//!
//! let mut check = [0xA5u8; ROW];
//! assert_eq!(gate.read_request(0x2000, ROW as u32, Control::Compare.into(), &mut check), Status::Success);
//! ```

#![deny(unsafe_code)]
#![no_std]

pub mod nvm;

pub mod prelude {
    pub use crate::nvm::prelude::*;
}
