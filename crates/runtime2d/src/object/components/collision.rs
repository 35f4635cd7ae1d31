//! Collision component: bounding box and per-step collision flag.

use crate::foundation::math::Aabb;
use crate::foundation::math::Vec2;
use crate::object::component::{Fields, ParseError};

/// Collision participation state.
///
/// The bounding box and `is_colliding` flag are runtime state owned by
/// the physics pass and are not persisted; only the configuration
/// fields go through the scene file.
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    /// Whether this object blocks movement (scripts read this; the
    /// core records intersections either way).
    pub solid: bool,
    /// Per-axis multiplier on the transform-derived box extents.
    pub bounds_scale: Vec2,
    /// Current world-space bounding box, refreshed every sub-step.
    pub aabb: Aabb,
    /// Set while any other collider intersects this one; cleared at the
    /// start of each sub-step and latched on for the rest of it.
    pub is_colliding: bool,
}

impl Default for Collision {
    fn default() -> Self {
        Self {
            solid: true,
            bounds_scale: Vec2::new(1.0, 1.0),
            aabb: Aabb::default(),
            is_colliding: false,
        }
    }
}

impl Collision {
    pub(crate) fn write_fields(&self, out: &mut String) {
        out.push_str(&format!("Solid: {}\n", u8::from(self.solid)));
        out.push_str(&format!(
            "Bounds Scale: {}, {}\n",
            self.bounds_scale.x, self.bounds_scale.y
        ));
    }

    pub(crate) fn read_fields(&mut self, fields: &Fields) -> Result<(), ParseError> {
        self.solid = fields.bool_field("Solid")?;
        self.bounds_scale = fields.vec2_field("Bounds Scale")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_state_not_persisted() {
        let mut collision = Collision {
            is_colliding: true,
            aabb: Aabb::from_center(Vec2::new(5.0, 5.0), Vec2::new(1.0, 1.0)),
            ..Collision::default()
        };
        let mut text = String::new();
        collision.write_fields(&mut text);
        assert!(!text.contains('5'));

        let mut fields = Fields::new();
        fields.insert("Solid", "0");
        fields.insert("Bounds Scale", "0.5, 0.5");
        collision.read_fields(&fields).unwrap();
        assert!(!collision.solid);
        assert_eq!(collision.bounds_scale, Vec2::new(0.5, 0.5));
    }
}
