//! Lifetime component: timed self-destruction for ephemeral objects.

use crate::object::component::{Fields, ParseError};

/// Remaining lifetime of a short-lived object (VFX, projectiles).
///
/// The scripting layer decrements `seconds` and queues the object for
/// deletion once it reaches zero; the core only stores the value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lifetime {
    /// Seconds until the object should be deleted.
    pub seconds: f32,
}

impl Lifetime {
    /// Whether the clock has run out.
    pub fn expired(&self) -> bool {
        self.seconds <= 0.0
    }

    pub(crate) fn write_fields(&self, out: &mut String) {
        out.push_str(&format!("Seconds: {}\n", self.seconds));
    }

    pub(crate) fn read_fields(&mut self, fields: &Fields) -> Result<(), ParseError> {
        self.seconds = fields.f32_field("Seconds")?;
        Ok(())
    }
}
