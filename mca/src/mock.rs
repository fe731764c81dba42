//! Emulated MCA setup hardware for unit tests.

use std::vec::Vec;

use crate::pio::{PortIo, IO_DELAY_PORT};
use crate::regs::{
    ADAPTER_SETUP_ENABLE, ADAPTER_SETUP_REG, ADAPTER_SLOT_MASK, MCA_MAX_SLOT_NR,
    MOTHERBOARD_SETUP_OFF, MOTHERBOARD_SETUP_REG, POS_BASE, POS_COUNT,
};

const SLOTS: usize = MCA_MAX_SLOT_NR as usize;

/// Machine with eight adapter slots and a 16550-ish UART.
pub struct MockBus {
    slots: [Option<[u8; POS_COUNT]>; SLOTS],
    reads: [usize; SLOTS],
    selected: Option<u8>,
    motherboard_setup: bool,
    /// UART base; writes to it are captured in `tx`.
    pub uart_base: u16,
    /// Value returned from the UART line status register.
    pub lsr: u8,
    pub tx: Vec<u8>,
}

impl MockBus {
    pub fn new() -> Self {
        Self {
            slots: [None; SLOTS],
            reads: [0; SLOTS],
            selected: None,
            motherboard_setup: true,
            uart_base: 0x3f8,
            lsr: 0x20,
            tx: Vec::new(),
        }
    }

    pub fn insert(&mut self, slot: u8, pos: [u8; POS_COUNT]) {
        self.slots[slot as usize] = Some(pos);
    }

    /// Adapter with the given ID in POS 0/1 and zeroes elsewhere.
    pub fn insert_id(&mut self, slot: u8, id: u16) {
        let [lo, hi] = id.to_le_bytes();
        self.insert(slot, [lo, hi, 0, 0, 0, 0, 0, 0]);
    }

    /// Times POS register 0 was read while `slot` was selected.
    pub fn reads(&self, slot: u8) -> usize {
        self.reads[slot as usize]
    }

    pub fn total_reads(&self) -> usize {
        self.reads.iter().sum()
    }

    pub fn selected(&self) -> Option<u8> {
        self.selected
    }

    pub fn motherboard_setup(&self) -> bool {
        self.motherboard_setup
    }
}

impl PortIo for MockBus {
    fn inb(&mut self, port: u16) -> u8 {
        if port == self.uart_base + 5 {
            return self.lsr;
        }
        if (POS_BASE..POS_BASE + POS_COUNT as u16).contains(&port) {
            let reg = (port - POS_BASE) as usize;
            return match self.selected {
                Some(slot) if !self.motherboard_setup => {
                    if reg == 0 {
                        self.reads[slot as usize] += 1;
                    }
                    self.slots[slot as usize].map_or(0xff, |pos| pos[reg])
                }
                _ => 0xff,
            };
        }
        0xff
    }

    fn outb(&mut self, port: u16, value: u8) {
        match port {
            MOTHERBOARD_SETUP_REG => self.motherboard_setup = value != MOTHERBOARD_SETUP_OFF,
            ADAPTER_SETUP_REG => {
                // Enable bit shares the low nibble with the slot number
                self.selected = if value & ADAPTER_SETUP_ENABLE != 0 {
                    Some(value & ADAPTER_SLOT_MASK & !ADAPTER_SETUP_ENABLE)
                } else {
                    None
                };
            }
            IO_DELAY_PORT => {}
            p if p == self.uart_base => self.tx.push(value),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regs::{adapter_select, pos_reg, ADAPTER_SETUP_OFF};

    #[test]
    fn test_adapter_select_decodes_slot() {
        let mut bus = MockBus::new();
        for slot in 0..MCA_MAX_SLOT_NR {
            bus.outb(ADAPTER_SETUP_REG, adapter_select(slot));
            assert_eq!(bus.selected(), Some(slot));
        }
        bus.outb(ADAPTER_SETUP_REG, ADAPTER_SETUP_OFF);
        assert_eq!(bus.selected(), None);
    }

    #[test]
    fn test_pos_read_hits_selected_slot() {
        let mut bus = MockBus::new();
        bus.insert_id(5, 0x6fc0);
        bus.outb(MOTHERBOARD_SETUP_REG, MOTHERBOARD_SETUP_OFF);
        bus.outb(ADAPTER_SETUP_REG, adapter_select(5));

        assert_eq!(bus.inb(pos_reg(0)), 0xc0);
        assert_eq!(bus.inb(pos_reg(1)), 0x6f);
        assert_eq!(bus.reads(5), 1);
        assert_eq!(bus.total_reads(), 1);
    }
}
