//! Micro Channel (MCA) bus support for MorpheusX network boot.
//!
//! Walks the MCA adapter slots, reads each adapter's POS registers and
//! matches the adapter ID against a driver's ID table.
//!
//! # Modules
//!
//! - `pio` - port I/O trait and x86 implementation
//! - `regs` - setup register ports and bus constants
//! - `pos` - POS register snapshot and slot read sequence
//! - `ids` - adapter ID tables and driver descriptors
//! - `device` - device handle filled in on a match
//! - `scan` - slot scanner
//! - `serial` - COM1 `log` backend (feature `serial_log`)
//!
//! # Usage
//!
//! ```ignore
//! use morpheus_mca::{ids::known, mca_device, Dev, HardwarePorts};
//!
//! let mut io = unsafe { HardwarePorts::new() };
//! let mut dev = Dev::new();
//! if mca_device(&mut dev).find(&mut io, &known::EL3_MCA) {
//!     // dev.devid.device_id, dev.bus_state().pos()
//! }
//! ```

#![cfg_attr(not(test), no_std)]

pub mod device;
pub mod ids;
pub mod pio;
pub mod pos;
pub mod regs;
pub mod scan;
#[cfg(feature = "serial_log")]
pub mod serial;

#[cfg(test)]
mod mock;

// Re-exports
pub use device::{Dev, DevId};
pub use ids::{McaDriver, McaId};
pub use pio::{HardwarePorts, PortIo};
pub use pos::PosRegisters;
pub use regs::{BusType, GENERIC_MCA_VENDOR, MCA_MAX_SLOT_NR};
pub use scan::{mca_device, McaDevice, McaState, SlotState};
