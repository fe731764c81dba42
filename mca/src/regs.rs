//! MCA setup register definitions.
//!
//! Port addresses, bit masks and bus-level constants for Programmable
//! Option Select (POS) access on Micro Channel machines.

// Setup registers
pub const MOTHERBOARD_SETUP_REG: u16 = 0x94;
pub const ADAPTER_SETUP_REG: u16 = 0x96;

/// Written to the motherboard setup register to leave motherboard setup.
pub const MOTHERBOARD_SETUP_OFF: u8 = 0xff;
/// Adapter setup enable bit; the low nibble selects the slot.
pub const ADAPTER_SETUP_ENABLE: u8 = 0x08;
pub const ADAPTER_SLOT_MASK: u8 = 0x0f;
/// Written to the adapter setup register to kill all setup modes.
pub const ADAPTER_SETUP_OFF: u8 = 0x00;

/// First POS register port; register `n` sits at `POS_BASE + n`.
pub const POS_BASE: u16 = 0x100;
/// POS registers per adapter.
pub const POS_COUNT: usize = 8;

/// Number of adapter slots probed.
pub const MCA_MAX_SLOT_NR: u8 = 8;

/// Port of POS register `n` for the currently selected slot.
#[inline]
pub const fn pos_reg(n: usize) -> u16 {
    POS_BASE + n as u16
}

/// Adapter setup value selecting `slot` for POS access.
#[inline]
pub const fn adapter_select(slot: u8) -> u8 {
    ADAPTER_SETUP_ENABLE | (slot & ADAPTER_SLOT_MASK)
}

/// Bus type tag recorded in a device's [`DevId`](crate::device::DevId).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusType {
    #[default]
    None = 0,
    Pci = 1,
    IsaPnp = 2,
    Eisa = 3,
    Mca = 4,
    Isa = 5,
}

impl BusType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusType::None => "none",
            BusType::Pci => "PCI",
            BusType::IsaPnp => "ISAPnP",
            BusType::Eisa => "EISA",
            BusType::Mca => "MCA",
            BusType::Isa => "ISA",
        }
    }
}

/// Compressed three-letter ISA/EISA vendor code.
///
/// Each letter is stored as `letter - 'A' + 1` in 5 bits, most significant
/// letter first, and the resulting 16-bit word is byte-swapped to match the
/// on-card byte order.
pub const fn isa_vendor(a: u8, b: u8, c: u8) -> u16 {
    let packed = (vendor_char(a) << 10) | (vendor_char(b) << 5) | vendor_char(c);
    packed.swap_bytes()
}

const fn vendor_char(x: u8) -> u16 {
    (x.wrapping_sub(b'A').wrapping_add(1) & 0x1f) as u16
}

/// Vendor tag reported for every MCA device; MCA IDs carry no vendor field.
pub const GENERIC_MCA_VENDOR: u16 = isa_vendor(b'M', b'C', b'A');
