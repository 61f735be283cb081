//! Build the table which remaps keycodes of a customer remote onto the keycodes
//! of the default layout.

use crate::keylayout::{KeyMap, KEYCODE_CNT};
use libc::c_uint;

/// Name of the key which wakes the device from standby
pub const POWER_KEY_NAME: &str = "POWER";

/// Mapping table as the driver expects it; this is `struct mapping_table_t`.
///
/// `value` is indexed by customer keycode and holds the default keycode. A
/// zero means unmapped, which cannot be told apart from a key remapped to
/// keycode 0, since 0 is also the reserved keycode.
#[repr(C)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    pub identity: c_uint,
    pub powerkey: c_uint,
    pub value: [c_uint; KEYCODE_CNT],
}

impl Default for MappingTable {
    fn default() -> Self {
        MappingTable {
            identity: 0,
            powerkey: 0,
            value: [0; KEYCODE_CNT],
        }
    }
}

impl MappingTable {
    /// Map each customer key to the first default key with the same name.
    pub fn build(default: &KeyMap, customer: &KeyMap) -> Self {
        let mut table = MappingTable::default();

        for key in customer.iter().filter(|key| !key.is_unset()) {
            if let Some(found) = default
                .iter()
                .filter(|d| !d.is_reserved())
                .find(|d| d.name == key.name)
            {
                table.value[key.keycode as usize] = found.keycode;
            }

            if table.powerkey == 0 && key.name == POWER_KEY_NAME {
                table.powerkey = key.keycode;
            }
        }

        table
    }

    pub fn with_identity(mut self, identity: u16) -> Self {
        self.identity = identity.into();
        self
    }

    /// Customer and default keycode of every slot which is mapped
    pub fn mapped(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.value
            .iter()
            .enumerate()
            .filter(|(_, default)| **default != 0)
            .map(|(customer, default)| (customer as u32, *default))
    }
}
