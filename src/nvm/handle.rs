use core::cell::RefCell;

use critical_section::Mutex;

use crate::nvm::{
    NvmError, Status, gate::NvmGate, golden::GoldenImagePolicy, metadata::MetadataTable,
    storage::RowStorage, types::ControlFlags,
};

/// Gate wrapper that can live in a `static` and be driven from whichever
/// context services the DFU transport.
///
/// Every access runs inside a critical section, so requests are serialized
/// even if the transport is interrupt driven.
pub struct SharedGate<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> SharedGate<T> {
    pub const fn new(gate: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(gate)),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        critical_section::with(|cs| f(&mut *self.inner.borrow_ref_mut(cs)))
    }

    pub fn into_inner(self) -> T {
        self.inner.into_inner().into_inner()
    }
}

impl<M, G, S> SharedGate<NvmGate<M, G, S>>
where
    M: MetadataTable,
    G: GoldenImagePolicy,
    S: RowStorage,
{
    /// See [`NvmGate::write_data`].
    pub fn write_data(
        &self,
        address: u32,
        length: u32,
        ctl: ControlFlags,
        buffer: &mut [u8],
    ) -> Result<(), NvmError> {
        self.with(|gate| gate.write_data(address, length, ctl, buffer))
    }

    /// See [`NvmGate::read_data`].
    pub fn read_data(
        &self,
        address: u32,
        length: u32,
        ctl: ControlFlags,
        buffer: &mut [u8],
    ) -> Result<(), NvmError> {
        self.with(|gate| gate.read_data(address, length, ctl, buffer))
    }

    pub fn write_request(
        &self,
        address: u32,
        length: u32,
        ctl: ControlFlags,
        buffer: &mut [u8],
    ) -> Status {
        self.write_data(address, length, ctl, buffer).into()
    }

    pub fn read_request(
        &self,
        address: u32,
        length: u32,
        ctl: ControlFlags,
        buffer: &mut [u8],
    ) -> Status {
        self.read_data(address, length, ctl, buffer).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nvm::{
        test_support::{ROW, test_gate},
        types::Control,
    };

    #[test]
    fn shared_write_read_cycle() {
        let shared = SharedGate::new(test_gate());

        let mut buf = [0x7Au8; ROW];
        assert_eq!(
            shared.write_request(0x3000, ROW as u32, ControlFlags::empty(), &mut buf),
            Status::Success
        );

        let mut expected = [0x7Au8; ROW];
        assert_eq!(
            shared.read_request(0x3000, ROW as u32, Control::Compare.into(), &mut expected),
            Status::Success
        );

        assert_eq!(
            shared.write_data(0x1000, ROW as u32, ControlFlags::empty(), &mut buf),
            Err(NvmError::Address)
        );
    }

    #[test]
    fn with_exposes_gate() {
        let shared = SharedGate::new(test_gate());
        shared.with(|gate| gate.metadata_mut().set_running(1));

        let gate = shared.into_inner();
        assert_eq!(gate.metadata().running_slot(), 1);
    }
}
