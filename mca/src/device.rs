//! Logical device handle filled in by the scanner.

use crate::regs::BusType;
use crate::scan::McaState;

/// Bus-level identity of a bound device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DevId {
    pub bus_type: BusType,
    pub vendor_id: u16,
    pub device_id: u16,
}

/// A logical device as seen by the probe loop.
///
/// The probe loop owns the handle and keeps it alive across driver
/// attempts; `bus` is the per-bus scratch region the scanner keeps its
/// position in. A fresh handle carries an uninitialized region.
#[derive(Debug, Default)]
pub struct Dev {
    /// Name of the matched adapter.
    pub name: &'static str,
    /// Name of the driver that claimed it.
    pub driver: &'static str,
    pub devid: DevId,
    pub(crate) bus: McaState,
}

impl Dev {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scanner state attached to this handle.
    pub fn bus_state(&self) -> &McaState {
        &self.bus
    }

    /// Whether a driver has been bound to this handle.
    pub fn is_bound(&self) -> bool {
        self.devid.bus_type != BusType::None
    }
}
