//! Inventory component.

use crate::object::component::{Fields, ParseError};

/// Item names carried by an object, capped at `capacity`.
///
/// The core does not enforce the cap on mutation; pickup scripts check
/// it before inserting.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    /// Carried item names, in pickup order.
    pub items: Vec<String>,
    /// Maximum number of items.
    pub capacity: u32,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            capacity: 8,
        }
    }
}

impl Inventory {
    /// Whether another item fits.
    pub fn has_room(&self) -> bool {
        (self.items.len() as u32) < self.capacity
    }

    pub(crate) fn write_fields(&self, out: &mut String) {
        out.push_str(&format!("Items: {}\n", self.items.join(", ")));
        out.push_str(&format!("Capacity: {}\n", self.capacity));
    }

    pub(crate) fn read_fields(&mut self, fields: &Fields) -> Result<(), ParseError> {
        self.items = fields.list_field("Items")?;
        self.capacity = fields.u32_field("Capacity")?;
        Ok(())
    }
}
