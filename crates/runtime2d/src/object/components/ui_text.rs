//! UI text component.

use crate::object::component::{Fields, ParseError};

/// A piece of screen text owned by a UI-layer object.
#[derive(Debug, Clone, PartialEq)]
pub struct UiText {
    /// The text to display.
    pub text: String,
    /// Font size in points.
    pub size: f32,
    /// RGB color, each channel in `[0, 1]`.
    pub color: [f32; 3],
}

impl Default for UiText {
    fn default() -> Self {
        Self {
            text: String::new(),
            size: 16.0,
            color: [1.0, 1.0, 1.0],
        }
    }
}

impl UiText {
    pub(crate) fn write_fields(&self, out: &mut String) {
        out.push_str(&format!("Text: {}\n", self.text));
        out.push_str(&format!("Size: {}\n", self.size));
        out.push_str(&format!(
            "Color: {}, {}, {}\n",
            self.color[0], self.color[1], self.color[2]
        ));
    }

    pub(crate) fn read_fields(&mut self, fields: &Fields) -> Result<(), ParseError> {
        self.text = fields.str_field("Text")?;
        self.size = fields.f32_field("Size")?;
        self.color = fields.f32_triple("Color")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_keeps_interior_colons() {
        let mut fields = Fields::new();
        fields.insert("Text", "Score: 100");
        fields.insert("Size", "24");
        fields.insert("Color", "1, 0.5, 0");

        let mut text = UiText::default();
        text.read_fields(&fields).unwrap();
        assert_eq!(text.text, "Score: 100");
        assert_eq!(text.size, 24.0);
        assert_eq!(text.color, [1.0, 0.5, 0.0]);
    }
}
