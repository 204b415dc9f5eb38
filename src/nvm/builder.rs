use core::marker::PhantomData;

use crate::nvm::{
    LayoutError,
    gate::NvmGate,
    golden::{GoldenImagePolicy, NoGoldenImages},
    layout::NvmLayout,
    metadata::MetadataTable,
    storage::RowStorage,
};

// Builder states
pub struct NeedLayout;
pub struct NeedMetadata;
pub struct NeedGoldenImages;
pub struct NeedStorage;
pub struct Ready;

/// Typestate builder for [`NvmGate`].
///
/// ```rust,no_run
/// use dfu_nvm_gate::prelude::*;
///
/// let layout = NvmLayout::new(
///     0x200,
///     0x100,
///     ImageFormat::Full,
///     Window::app_flash(0x1000_0000, 0x4_0000, 0x1_0000),
///     Window::new(0x1400_0000, 0x1400_1000),
/// );
/// let metadata = SlotTable::<2>::from_slots(
///     &[
///         SlotMetadata::new(0x1000_0000, 0xFF00),
///         SlotMetadata::new(0x1001_0000, 0x2FF00),
///     ],
///     0,
/// )
/// .unwrap();
///
/// let gate = NvmGateBuilder::new()
///     .layout(layout)
///     .metadata(metadata)
///     .no_golden_images()
///     .storage(RamNvm::<0x4_0000>::new(0x1000_0000))
///     .build()
///     .unwrap();
/// # let _ = gate;
/// ```
pub struct NvmGateBuilder<L, M, G, S, State> {
    layout: L,
    metadata: M,
    golden: G,
    storage: S,
    _state: PhantomData<State>,
}

impl NvmGateBuilder<(), (), (), (), NeedLayout> {
    pub fn new() -> Self {
        NvmGateBuilder {
            layout: (),
            metadata: (),
            golden: (),
            storage: (),
            _state: PhantomData,
        }
    }
}

impl Default for NvmGateBuilder<(), (), (), (), NeedLayout> {
    fn default() -> Self {
        Self::new()
    }
}

// Set layout
impl NvmGateBuilder<(), (), (), (), NeedLayout> {
    pub fn layout(self, layout: NvmLayout) -> NvmGateBuilder<NvmLayout, (), (), (), NeedMetadata> {
        NvmGateBuilder {
            layout,
            metadata: (),
            golden: (),
            storage: (),
            _state: PhantomData,
        }
    }
}

// Set metadata table
impl NvmGateBuilder<NvmLayout, (), (), (), NeedMetadata> {
    pub fn metadata<M: MetadataTable>(
        self,
        metadata: M,
    ) -> NvmGateBuilder<NvmLayout, M, (), (), NeedGoldenImages> {
        NvmGateBuilder {
            layout: self.layout,
            metadata,
            golden: (),
            storage: (),
            _state: PhantomData,
        }
    }
}

// Set golden-image policy
impl<M: MetadataTable> NvmGateBuilder<NvmLayout, M, (), (), NeedGoldenImages> {
    pub fn golden_images<G: GoldenImagePolicy>(
        self,
        golden: G,
    ) -> NvmGateBuilder<NvmLayout, M, G, (), NeedStorage> {
        NvmGateBuilder {
            layout: self.layout,
            metadata: self.metadata,
            golden,
            storage: (),
            _state: PhantomData,
        }
    }

    /// Disable golden-image protection.
    pub fn no_golden_images(self) -> NvmGateBuilder<NvmLayout, M, NoGoldenImages, (), NeedStorage> {
        self.golden_images(NoGoldenImages)
    }
}

// Set storage driver
impl<M: MetadataTable, G: GoldenImagePolicy> NvmGateBuilder<NvmLayout, M, G, (), NeedStorage> {
    pub fn storage<S: RowStorage>(self, storage: S) -> NvmGateBuilder<NvmLayout, M, G, S, Ready> {
        NvmGateBuilder {
            layout: self.layout,
            metadata: self.metadata,
            golden: self.golden,
            storage,
            _state: PhantomData,
        }
    }
}

// Build the final gate
impl<M, G, S> NvmGateBuilder<NvmLayout, M, G, S, Ready>
where
    M: MetadataTable,
    G: GoldenImagePolicy,
    S: RowStorage,
{
    /// Build the gate after validating the layout.
    pub fn build(self) -> Result<NvmGate<M, G, S>, LayoutError> {
        self.layout.validate()?;
        Ok(NvmGate::new(
            self.layout,
            self.metadata,
            self.golden,
            self.storage,
        ))
    }
}
