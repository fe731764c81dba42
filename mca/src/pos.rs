//! POS register snapshot for one adapter slot.

use core::fmt;
use core::ops::Index;

use crate::pio::PortIo;
use crate::regs::{
    adapter_select, pos_reg, ADAPTER_SETUP_OFF, ADAPTER_SETUP_REG, MOTHERBOARD_SETUP_OFF,
    MOTHERBOARD_SETUP_REG, POS_COUNT,
};

/// The eight Programmable Option Select bytes of a slot.
///
/// POS 0 and 1 hold the adapter ID, little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PosRegisters(pub [u8; POS_COUNT]);

impl PosRegisters {
    /// Adapter identifier: `pos[0] | pos[1] << 8`.
    #[inline]
    pub fn id(&self) -> u16 {
        u16::from_le_bytes([self.0[0], self.0[1]])
    }

    pub fn as_bytes(&self) -> &[u8; POS_COUNT] {
        &self.0
    }

    /// Read the POS registers of `slot`.
    ///
    /// Leaves motherboard setup, puts the slot in adapter setup, reads all
    /// eight registers and drops every setup mode again. There is no
    /// failure path: an empty slot simply reads back whatever the bus floats.
    pub fn read<P: PortIo>(io: &mut P, slot: u8) -> Self {
        let mut pos = [0u8; POS_COUNT];

        io.outb_p(MOTHERBOARD_SETUP_REG, MOTHERBOARD_SETUP_OFF);
        io.outb_p(ADAPTER_SETUP_REG, adapter_select(slot));

        for (i, byte) in pos.iter_mut().enumerate() {
            *byte = io.inb_p(pos_reg(i));
        }

        io.outb_p(ADAPTER_SETUP_REG, ADAPTER_SETUP_OFF);

        Self(pos)
    }
}

impl Index<usize> for PosRegisters {
    type Output = u8;

    fn index(&self, i: usize) -> &u8 {
        &self.0[i]
    }
}

impl fmt::Display for PosRegisters {
    /// `pp:pp:pp:pp:pp:pp:pp:pp`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
