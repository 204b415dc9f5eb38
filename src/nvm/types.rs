use bitmaps::Bitmap;

/// Application slot identifier.
pub type SlotId = u32;

/// Verified region of one application slot, as recorded in the metadata table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotMetadata {
    pub verify_start: u32,
    pub verify_length: u32,
}

impl SlotMetadata {
    pub const fn new(verify_start: u32, verify_length: u32) -> Self {
        Self {
            verify_start,
            verify_length,
        }
    }
}

/// Half-open byte range `[start, end)` a slot occupies, signature included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotRange {
    pub start: u32,
    pub end: u32,
}

impl SlotRange {
    #[inline]
    pub fn contains(&self, address: u32) -> bool {
        self.start <= address && address < self.end
    }
}

/// Contiguous storage window with inclusive start and exclusive end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Window {
    pub start: u32,
    pub end: u32,
}

impl Window {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Application flash window with the always-resident slot 0 cut off
    /// the bottom: `[flash_base + slot0_length, flash_base + flash_size)`.
    pub const fn app_flash(flash_base: u32, flash_size: u32, slot0_length: u32) -> Self {
        Self {
            start: flash_base.saturating_add(slot0_length),
            end: flash_base.saturating_add(flash_size),
        }
    }

    #[inline]
    pub fn contains(&self, address: u32) -> bool {
        self.start <= address && address < self.end
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where an image keeps its signature trailer relative to the verified region.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageFormat {
    /// Signature precedes the verified region.
    Simplified,
    /// Signature follows the verified region.
    #[default]
    Full,
}

/// Raw `ctl` bit requesting a single-row erase.
pub const CTL_ERASE: u32 = 0x01;
/// Raw `ctl` bit requesting a compare instead of a copy on read.
pub const CTL_COMPARE: u32 = 0x02;

/// A single request control flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Control {
    /// Write zeros to the row instead of the buffer contents.
    Erase,
    /// Compare the buffer against storage instead of copying into it.
    Compare,
}

impl Control {
    const fn index(self) -> usize {
        match self {
            Control::Erase => 0,
            Control::Compare => 1,
        }
    }
}

/// Set of [`Control`] flags attached to a request.
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub struct ControlFlags(Bitmap<2>);

impl ControlFlags {
    /// No flags set: plain write or plain read.
    pub fn empty() -> Self {
        Self(Bitmap::new())
    }

    /// Decodes the transport's raw `ctl` word. Unknown bits are ignored.
    pub fn from_bits(raw: u32) -> Self {
        let mut flags = Self::empty();
        if raw & CTL_ERASE != 0 {
            flags.insert(Control::Erase);
        }
        if raw & CTL_COMPARE != 0 {
            flags.insert(Control::Compare);
        }
        flags
    }

    pub fn bits(&self) -> u32 {
        let mut raw = 0;
        if self.contains(Control::Erase) {
            raw |= CTL_ERASE;
        }
        if self.contains(Control::Compare) {
            raw |= CTL_COMPARE;
        }
        raw
    }

    #[inline]
    pub fn with(mut self, flag: Control) -> Self {
        self.insert(flag);
        self
    }

    #[inline]
    pub fn insert(&mut self, flag: Control) {
        self.0.set(flag.index(), true);
    }

    #[inline]
    pub fn remove(&mut self, flag: Control) {
        self.0.set(flag.index(), false);
    }

    #[inline]
    pub fn contains(&self, flag: Control) -> bool {
        self.0.get(flag.index())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Control> for ControlFlags {
    fn from(flag: Control) -> Self {
        Self::empty().with(flag)
    }
}

impl core::fmt::Debug for ControlFlags {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ControlFlags")
            .field("erase", &self.contains(Control::Erase))
            .field("compare", &self.contains(Control::Compare))
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ControlFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ControlFlags({=u32:#x})", self.bits())
    }
}
