//! Lighting component: 2D point-light parameters.

use crate::object::component::{Fields, ParseError};

/// A 2D point light attached to an object's position.
#[derive(Debug, Clone, PartialEq)]
pub struct Lighting {
    /// Falloff radius in world units.
    pub radius: f32,
    /// Brightness multiplier.
    pub intensity: f32,
    /// RGB color, each channel in `[0, 1]`.
    pub color: [f32; 3],
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            radius: 1.0,
            intensity: 1.0,
            color: [1.0, 1.0, 1.0],
        }
    }
}

impl Lighting {
    pub(crate) fn write_fields(&self, out: &mut String) {
        out.push_str(&format!("Radius: {}\n", self.radius));
        out.push_str(&format!("Intensity: {}\n", self.intensity));
        out.push_str(&format!(
            "Color: {}, {}, {}\n",
            self.color[0], self.color[1], self.color[2]
        ));
    }

    pub(crate) fn read_fields(&mut self, fields: &Fields) -> Result<(), ParseError> {
        self.radius = fields.f32_field("Radius")?;
        self.intensity = fields.f32_field("Intensity")?;
        self.color = fields.f32_triple("Color")?;
        Ok(())
    }
}
