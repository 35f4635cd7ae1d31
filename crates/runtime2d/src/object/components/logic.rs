//! Logic components: scripted behavior binding and behavior targets.

use crate::object::component::{Fields, ParseError};

/// Binds an object to a named scripted behavior.
///
/// The behavior implementations live outside the core; this component
/// only carries the binding and its parameter strings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Logic {
    /// Behavior name resolved by the scripting layer.
    pub behavior: String,
    /// Free-form parameters forwarded to the behavior.
    pub params: Vec<String>,
}

impl Logic {
    pub(crate) fn write_fields(&self, out: &mut String) {
        out.push_str(&format!("Behavior: {}\n", self.behavior));
        out.push_str(&format!("Params: {}\n", self.params.join(", ")));
    }

    pub(crate) fn read_fields(&mut self, fields: &Fields) -> Result<(), ParseError> {
        self.behavior = fields.str_field("Behavior")?;
        self.params = fields.list_field("Params")?;
        Ok(())
    }
}

/// Names of the objects a behavior acts on (doors a switch opens,
/// waypoints a patrol walks, ...). Resolved by name at script run
/// time; dangling names are the script's problem, not the core's.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogicTargets {
    /// Target object names, in script-defined order.
    pub targets: Vec<String>,
}

impl LogicTargets {
    pub(crate) fn write_fields(&self, out: &mut String) {
        out.push_str(&format!("Targets: {}\n", self.targets.join(", ")));
    }

    pub(crate) fn read_fields(&mut self, fields: &Fields) -> Result<(), ParseError> {
        self.targets = fields.list_field("Targets")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logic_roundtrip_with_empty_params() {
        let logic = Logic {
            behavior: "patrol".to_owned(),
            params: Vec::new(),
        };
        let mut text = String::new();
        logic.write_fields(&mut text);

        let mut fields = Fields::new();
        for line in text.lines() {
            let (key, value) = line.split_once(':').unwrap();
            fields.insert(key.trim(), value.trim());
        }
        let mut parsed = Logic::default();
        parsed.read_fields(&fields).unwrap();
        assert_eq!(parsed, logic);
    }

    #[test]
    fn test_targets_preserve_order() {
        let mut fields = Fields::new();
        fields.insert("Targets", "door_b, door_a, bridge");
        let mut targets = LogicTargets::default();
        targets.read_fields(&fields).unwrap();
        assert_eq!(targets.targets, vec!["door_b", "door_a", "bridge"]);
    }
}
