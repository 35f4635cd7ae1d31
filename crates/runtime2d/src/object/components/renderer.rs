//! Renderer component: sprite binding consumed by the draw layer.

use crate::foundation::math::Vec2;
use crate::object::component::{Fields, ParseError};

/// Sprite binding for the (external) rendering subsystem.
#[derive(Debug, Clone, PartialEq)]
pub struct Renderer {
    /// Texture name resolved by the asset layer.
    pub texture: String,
    /// On-screen quad size in world units.
    pub size: Vec2,
    /// Draw toggle; invisible objects still simulate.
    pub visible: bool,
    /// Horizontal flip for left/right facing sprites.
    pub flip: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            texture: String::new(),
            size: Vec2::new(1.0, 1.0),
            visible: true,
            flip: false,
        }
    }
}

impl Renderer {
    pub(crate) fn write_fields(&self, out: &mut String) {
        out.push_str(&format!("Texture: {}\n", self.texture));
        out.push_str(&format!("Size: {}, {}\n", self.size.x, self.size.y));
        out.push_str(&format!("Visible: {}\n", u8::from(self.visible)));
        out.push_str(&format!("Flip: {}\n", u8::from(self.flip)));
    }

    pub(crate) fn read_fields(&mut self, fields: &Fields) -> Result<(), ParseError> {
        self.texture = fields.str_field("Texture")?;
        self.size = fields.vec2_field("Size")?;
        self.visible = fields.bool_field("Visible")?;
        self.flip = fields.bool_field("Flip")?;
        Ok(())
    }
}
