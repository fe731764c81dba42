//! MCA adapter ID tables and driver descriptors.
//!
//! An MCA adapter identifies itself with a single 16-bit ID in POS 0/1;
//! there is no separate vendor field. Drivers declare the IDs they accept
//! as an ordered table, and the scanner takes the first entry that matches.

/// One adapter ID a driver accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct McaId {
    /// Adapter ID as read from POS 0 (low) and POS 1 (high).
    pub id: u16,
    /// Human-readable adapter name.
    pub name: &'static str,
}

impl McaId {
    #[must_use]
    pub const fn new(id: u16, name: &'static str) -> Self {
        Self { id, name }
    }
}

/// Driver descriptor: a name and the IDs it binds to, in priority order.
#[derive(Debug, Clone, Copy)]
pub struct McaDriver {
    /// Driver name (for logging and the bound device's name).
    pub name: &'static str,
    pub ids: &'static [McaId],
}

impl McaDriver {
    #[must_use]
    pub const fn new(name: &'static str, ids: &'static [McaId]) -> Self {
        Self { name, ids }
    }

    /// First table entry equal to `id`, if any.
    #[inline]
    pub fn find_id(&self, id: u16) -> Option<&'static McaId> {
        self.ids.iter().find(|entry| entry.id == id)
    }

    #[inline]
    pub fn supports(&self, id: u16) -> bool {
        self.find_id(id).is_some()
    }
}

/// Declare a static [`McaDriver`] together with its ID table.
///
/// # Example
///
/// ```ignore
/// morpheus_mca::mca_driver!(EL3_MCA, "3c529", [
///     (0x627c, "3C529 (10base2)"),
///     (0x627d, "3C529 (10baseT)"),
/// ]);
/// ```
#[macro_export]
macro_rules! mca_driver {
    ($vis:vis $name:ident, $driver:expr, [$(($id:expr, $id_name:expr)),* $(,)?]) => {
        $vis static $name: $crate::ids::McaDriver = $crate::ids::McaDriver {
            name: $driver,
            ids: &[$($crate::ids::McaId { id: $id, name: $id_name }),*],
        };
    };
}

/// ID tables for MCA network adapters seen in the field.
pub mod known {
    use super::{McaDriver, McaId};

    /// 3Com EtherLink III/MC (3C529) IDs.
    pub const EL3_MCA_IDS: &[McaId] = &[
        McaId::new(0x627c, "3C529 (10base2)"),
        McaId::new(0x627d, "3C529 (10baseT)"),
        McaId::new(0x62db, "3C529 (test mode)"),
        McaId::new(0x62f6, "3C529 (TP or coax)"),
        McaId::new(0x62f7, "3C529 (TP only)"),
    ];

    /// Western Digital / SMC 80x3 MCA adapters and IBM's rebadged variants.
    pub const WD_MCA_IDS: &[McaId] = &[
        McaId::new(0x61c8, "WD8013EP/A"),
        McaId::new(0x61c9, "WD8013WP/A"),
        McaId::new(0x6fc0, "WD8003ET/A"),
        McaId::new(0x6fc1, "WD8003ST/A"),
        McaId::new(0x6fc2, "WD8003EB/A"),
        McaId::new(0xefd4, "IBM PS/2 Adapter/A for Ethernet (UTP)"),
        McaId::new(0xefd5, "IBM PS/2 Adapter/A for Ethernet (BNC)"),
        McaId::new(0xefe5, "IBM PS/2 Adapter/A for Ethernet"),
    ];

    pub static EL3_MCA: McaDriver = McaDriver::new("3c529", EL3_MCA_IDS);
    pub static WD_MCA: McaDriver = McaDriver::new("wd", WD_MCA_IDS);
}
