//! Animate component: flipbook animation parameters.

use crate::object::component::{Fields, ParseError};

/// Flipbook animation state for a sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct Animate {
    /// Animation clip name.
    pub animation: String,
    /// Number of frames in the clip.
    pub frames: u32,
    /// Seconds per frame.
    pub frame_time: f32,
    /// Whether the clip loops or holds its last frame.
    pub looping: bool,
}

impl Default for Animate {
    fn default() -> Self {
        Self {
            animation: String::new(),
            frames: 1,
            frame_time: 0.1,
            looping: true,
        }
    }
}

impl Animate {
    pub(crate) fn write_fields(&self, out: &mut String) {
        out.push_str(&format!("Animation: {}\n", self.animation));
        out.push_str(&format!("Frames: {}\n", self.frames));
        out.push_str(&format!("Frame Time: {}\n", self.frame_time));
        out.push_str(&format!("Looping: {}\n", u8::from(self.looping)));
    }

    pub(crate) fn read_fields(&mut self, fields: &Fields) -> Result<(), ParseError> {
        self.animation = fields.str_field("Animation")?;
        self.frames = fields.u32_field("Frames")?;
        self.frame_time = fields.f32_field("Frame Time")?;
        self.looping = fields.bool_field("Looping")?;
        Ok(())
    }
}
