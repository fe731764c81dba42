//! MCA slot scanner.
//!
//! The probe loop calls [`mca_device`] on a device handle and then
//! [`McaDevice::find`] once per candidate driver. The scanner keeps its
//! position in the handle between calls, so several drivers can share one
//! pass over the bus:
//!
//! - a match leaves the position *on* the matching slot, marked claimed;
//! - the next call steps over the claimed slot without touching hardware;
//! - only running off the end of the bus rewinds to slot 0.
//!
//! ```ignore
//! let mut io = unsafe { HardwarePorts::new() };
//! let mut dev = Dev::new();
//! for driver in drivers {
//!     let mut mca = mca_device(&mut dev);
//!     while mca.find(&mut io, driver) {
//!         // bind driver to mca.state().slot()
//!     }
//! }
//! ```

use log::{debug, info};

use crate::device::{Dev, DevId};
use crate::ids::{McaDriver, McaId};
use crate::pio::PortIo;
use crate::pos::PosRegisters;
use crate::regs::{BusType, GENERIC_MCA_VENDOR, MCA_MAX_SLOT_NR, POS_COUNT};

/// Claim state of the slot the scanner is positioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotState {
    /// Slot has not been reported yet.
    #[default]
    Scanning,
    /// Slot was just reported as a match; the next scan steps past it.
    Claimed,
}

/// Per-handle scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct McaState {
    slot: u8,
    state: SlotState,
    pos: PosRegisters,
    initialized: bool,
}

impl McaState {
    /// Zeroed, initialized state positioned at slot 0.
    pub const fn new() -> Self {
        Self {
            slot: 0,
            state: SlotState::Scanning,
            pos: PosRegisters([0; POS_COUNT]),
            initialized: true,
        }
    }

    /// Rewind to slot 0 and forget the last read, marking the state initialized.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Whether this state has been set up by [`McaState::new`] or [`reset`](Self::reset).
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Slot the scanner is positioned on.
    pub fn slot(&self) -> u8 {
        self.slot
    }

    /// Whether the current slot was just reported and will be stepped over.
    pub fn slot_state(&self) -> SlotState {
        self.state
    }

    /// POS registers of the slot read last. Meaningless before the first read.
    pub fn pos(&self) -> &PosRegisters {
        &self.pos
    }

    /// Adapter ID of the slot read last.
    pub fn id(&self) -> u16 {
        self.pos.id()
    }

    /// Advance to the next slot whose adapter ID is in `driver`'s table.
    ///
    /// Returns the matching table entry with the scanner left on the
    /// matching slot, or `None` once every remaining slot has been tried,
    /// in which case the scanner rewinds to slot 0.
    pub fn find<P: PortIo>(&mut self, io: &mut P, driver: &McaDriver) -> Option<&'static McaId> {
        while self.slot < MCA_MAX_SLOT_NR {
            // Already reported on a previous call
            if self.state == SlotState::Claimed {
                self.state = SlotState::Scanning;
                self.slot += 1;
                continue;
            }

            self.pos = PosRegisters::read(io, self.slot);
            let id = self.pos.id();
            debug!("MCA slot {} id {:04x} ({})", self.slot, id, self.pos);

            if let Some(entry) = driver.find_id(id) {
                info!(
                    "Device {} (driver {}) matches ID {:04x}",
                    entry.name, driver.name, id
                );
                self.state = SlotState::Claimed;
                return Some(entry);
            }

            self.slot += 1;
        }

        self.slot = 0;
        None
    }
}

/// Scanner state bound to the device handle it fills in.
pub struct McaDevice<'a> {
    dev: &'a mut Dev,
}

/// Get the MCA scanner for `dev`.
///
/// A handle that has not been used for an MCA scan gets a fresh state.
/// Otherwise the existing position and claim are kept, so a different
/// driver resumes where the last one stopped.
pub fn mca_device(dev: &mut Dev) -> McaDevice<'_> {
    if !dev.bus.is_initialized() {
        dev.bus.reset();
    }
    McaDevice { dev }
}

impl McaDevice<'_> {
    /// Find the next slot matching `driver` and bind the handle to it.
    ///
    /// On a match the handle's name and [`DevId`] are filled in from the
    /// matched table entry.
    pub fn find<P: PortIo>(&mut self, io: &mut P, driver: &McaDriver) -> bool {
        match self.dev.bus.find(io, driver) {
            Some(entry) => {
                self.dev.name = entry.name;
                self.dev.driver = driver.name;
                self.dev.devid = DevId {
                    bus_type: BusType::Mca,
                    vendor_id: GENERIC_MCA_VENDOR,
                    device_id: entry.id,
                };
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> &McaState {
        &self.dev.bus
    }

    pub fn dev(&self) -> &Dev {
        &*self.dev
    }
}
