//! Controller component: input-driven movement parameters.

use crate::object::component::{Fields, ParseError};

/// Tuning for input-driven movement. The input mapping itself lives
/// in the (external) driver; scripts read these values when applying
/// input to the rigid body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Controller {
    /// Horizontal move speed in world units per second.
    pub move_speed: f32,
    /// Instantaneous upward velocity applied on jump.
    pub jump_force: f32,
}

impl Controller {
    pub(crate) fn write_fields(&self, out: &mut String) {
        out.push_str(&format!("Move Speed: {}\n", self.move_speed));
        out.push_str(&format!("Jump Force: {}\n", self.jump_force));
    }

    pub(crate) fn read_fields(&mut self, fields: &Fields) -> Result<(), ParseError> {
        self.move_speed = fields.f32_field("Move Speed")?;
        self.jump_force = fields.f32_field("Jump Force")?;
        Ok(())
    }
}
