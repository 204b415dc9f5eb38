use crate::nvm::types::Window;

/// Synchronous row-level storage driver.
///
/// Addresses are absolute. Callers guarantee `write_row` addresses are row
/// aligned and `row` is exactly one row long.
pub trait RowStorage {
    type Error;

    /// Programs one row at `address`.
    fn write_row(&mut self, address: u32, row: &[u8]) -> Result<(), Self::Error>;

    /// Copies `out.len()` bytes starting at `address` into `out`.
    fn read(&self, address: u32, out: &mut [u8]) -> Result<(), Self::Error>;

    /// Returns true if storage at `address` equals `expected` byte for byte.
    fn compare(&self, address: u32, expected: &[u8]) -> Result<bool, Self::Error> {
        let mut chunk = [0u8; 32];
        let mut addr = address;
        for part in expected.chunks(chunk.len()) {
            let buf = &mut chunk[..part.len()];
            self.read(addr, buf)?;
            if buf != part {
                return Ok(false);
            }
            addr = addr.wrapping_add(part.len() as u32);
        }
        Ok(true)
    }
}

impl<S: RowStorage> RowStorage for &mut S {
    type Error = S::Error;

    fn write_row(&mut self, address: u32, row: &[u8]) -> Result<(), Self::Error> {
        (**self).write_row(address, row)
    }

    fn read(&self, address: u32, out: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(address, out)
    }

    fn compare(&self, address: u32, expected: &[u8]) -> Result<bool, Self::Error> {
        (**self).compare(address, expected)
    }
}

/// Error from a [`Banked`] storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BankedError<P, S> {
    Primary(P),
    Secondary(S),
    /// Address is in neither bank.
    Unmapped,
}

/// Two storage drivers behind one address space, e.g. application flash
/// and emulated EEPROM.
///
/// An access is routed by its start address and must not cross banks.
pub struct Banked<P, S> {
    primary: P,
    primary_window: Window,
    secondary: S,
    secondary_window: Window,
}

impl<P: RowStorage, S: RowStorage> Banked<P, S> {
    pub fn new(primary: P, primary_window: Window, secondary: S, secondary_window: Window) -> Self {
        Self {
            primary,
            primary_window,
            secondary,
            secondary_window,
        }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }
}

impl<P: RowStorage, S: RowStorage> RowStorage for Banked<P, S> {
    type Error = BankedError<P::Error, S::Error>;

    fn write_row(&mut self, address: u32, row: &[u8]) -> Result<(), Self::Error> {
        if self.primary_window.contains(address) {
            self.primary
                .write_row(address, row)
                .map_err(BankedError::Primary)
        } else if self.secondary_window.contains(address) {
            self.secondary
                .write_row(address, row)
                .map_err(BankedError::Secondary)
        } else {
            Err(BankedError::Unmapped)
        }
    }

    fn read(&self, address: u32, out: &mut [u8]) -> Result<(), Self::Error> {
        if self.primary_window.contains(address) {
            self.primary
                .read(address, out)
                .map_err(BankedError::Primary)
        } else if self.secondary_window.contains(address) {
            self.secondary
                .read(address, out)
                .map_err(BankedError::Secondary)
        } else {
            Err(BankedError::Unmapped)
        }
    }
}
