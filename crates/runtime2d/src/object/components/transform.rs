//! Transform component: position, rotation, scale, and sprite dimensions.

use crate::foundation::math::Vec2;
use crate::object::component::{Fields, ParseError};

/// Spatial state of an object.
///
/// `position` is the sprite center in world space; `depth` orders
/// draw calls and never affects physics. `dimensions` are the
/// unscaled sprite extents; the collision pass derives the bounding
/// box from `dimensions * scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// World-space center position.
    pub position: Vec2,
    /// Draw-order depth.
    pub depth: f32,
    /// Rotation in degrees.
    pub rotation_angle: f32,
    /// Rotation speed in degrees per second.
    pub rotation_speed: f32,
    /// Per-axis scale factors.
    pub scale: Vec2,
    /// Unscaled sprite extents.
    pub dimensions: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            depth: 0.0,
            rotation_angle: 0.0,
            rotation_speed: 0.0,
            scale: Vec2::new(1.0, 1.0),
            dimensions: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a transform at a position with everything else default.
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Scaled extents, the box the collision pass works from.
    pub fn scaled_dimensions(&self) -> Vec2 {
        Vec2::new(
            self.dimensions.x * self.scale.x,
            self.dimensions.y * self.scale.y,
        )
    }

    pub(crate) fn write_fields(&self, out: &mut String) {
        out.push_str(&format!(
            "Position: {}, {}, {}\n",
            self.position.x, self.position.y, self.depth
        ));
        out.push_str(&format!("Rotation Angle: {}\n", self.rotation_angle));
        out.push_str(&format!("Rotation Speed: {}\n", self.rotation_speed));
        out.push_str(&format!("Scale: {}, {}\n", self.scale.x, self.scale.y));
        out.push_str(&format!(
            "Dimensions: {}, {}\n",
            self.dimensions.x, self.dimensions.y
        ));
    }

    pub(crate) fn read_fields(&mut self, fields: &Fields) -> Result<(), ParseError> {
        let [x, y, depth] = fields.f32_triple("Position")?;
        self.position = Vec2::new(x, y);
        self.depth = depth;
        self.rotation_angle = fields.f32_field("Rotation Angle")?;
        self.rotation_speed = fields.f32_field("Rotation Speed")?;
        self.scale = fields.vec2_field("Scale")?;
        self.dimensions = fields.vec2_field("Dimensions")?;
        Ok(())
    }
}
