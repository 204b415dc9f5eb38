mod fmt;

pub mod builder;
pub mod error;
pub mod gate;
pub mod golden;
pub mod handle;
pub mod helpers;
pub mod layout;
pub mod metadata;
pub mod policy;
pub mod resolver;
pub mod slice;
pub mod storage;
pub mod table;
pub mod types;

#[cfg(test)]
mod test_support;

pub use builder::NvmGateBuilder;
pub use error::{LayoutError, MetadataError, NvmError, Status};
pub use gate::NvmGate;
pub use golden::{GoldenImagePolicy, GoldenImages, ImageValidator, NoGoldenImages};
pub use handle::SharedGate;
pub use layout::NvmLayout;
pub use metadata::{MetadataTable, SlotTable};
pub use policy::{GoldenImageGuard, RegionGuard, SelfOverwriteGuard, WriteGuard};
pub use resolver::AddressRangeResolver;
pub use slice::ROSlice;
pub use storage::{Banked, BankedError, RowStorage};
pub use table::{RamError, RamNvm};
pub use types::{
    CTL_COMPARE, CTL_ERASE, Control, ControlFlags, ImageFormat, SlotId, SlotMetadata, SlotRange,
    Window,
};

pub mod prelude {
    pub use super::{
        Banked, Control, ControlFlags, GoldenImagePolicy, GoldenImages, ImageFormat,
        ImageValidator, MetadataTable, NoGoldenImages, NvmError, NvmGate, NvmGateBuilder,
        NvmLayout, RamNvm, RowStorage, SharedGate, SlotId, SlotMetadata, SlotTable, Status,
        Window,
    };
}
