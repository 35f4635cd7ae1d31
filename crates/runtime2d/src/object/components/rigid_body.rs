//! Rigid body component: velocity state for the movement integrator.

use crate::foundation::math::Vec2;
use crate::object::component::{Fields, ParseError};

/// Velocity and gravity state.
///
/// Defaults describe a static body: zero velocity, zero gravity
/// scale, no speed clamp.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec2,
    /// Constant acceleration applied every sub-step.
    pub acceleration: Vec2,
    /// Multiplier on the world gravity vector; 0 disables gravity.
    pub gravity_scale: f32,
    /// Speed clamp in world units per second; 0 means unclamped.
    pub max_speed: f32,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            velocity: Vec2::zeros(),
            acceleration: Vec2::zeros(),
            gravity_scale: 0.0,
            max_speed: 0.0,
        }
    }
}

impl RigidBody {
    pub(crate) fn write_fields(&self, out: &mut String) {
        out.push_str(&format!(
            "Velocity: {}, {}\n",
            self.velocity.x, self.velocity.y
        ));
        out.push_str(&format!(
            "Acceleration: {}, {}\n",
            self.acceleration.x, self.acceleration.y
        ));
        out.push_str(&format!("Gravity: {}\n", self.gravity_scale));
        out.push_str(&format!("Max Speed: {}\n", self.max_speed));
    }

    pub(crate) fn read_fields(&mut self, fields: &Fields) -> Result<(), ParseError> {
        self.velocity = fields.vec2_field("Velocity")?;
        self.acceleration = fields.vec2_field("Acceleration")?;
        self.gravity_scale = fields.f32_field("Gravity")?;
        self.max_speed = fields.f32_field("Max Speed")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_static() {
        let body = RigidBody::default();
        assert_eq!(body.velocity, Vec2::zeros());
        assert_eq!(body.gravity_scale, 0.0);
        assert_eq!(body.max_speed, 0.0);
    }

    #[test]
    fn test_read_fields() {
        let mut fields = Fields::new();
        fields.insert("Velocity", "1.5, -2");
        fields.insert("Acceleration", "0, 0");
        fields.insert("Gravity", "1");
        fields.insert("Max Speed", "300");

        let mut body = RigidBody::default();
        body.read_fields(&fields).unwrap();
        assert_eq!(body.velocity, Vec2::new(1.5, -2.0));
        assert_eq!(body.gravity_scale, 1.0);
        assert_eq!(body.max_speed, 300.0);
    }
}
