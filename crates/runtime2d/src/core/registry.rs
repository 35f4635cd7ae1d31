//! Tag and visibility-layer registries.
//!
//! These were file-scope statics in the original design; here they are
//! an explicit [`Registries`] value constructed at application start
//! and passed to the factory and codec.
//!
//! Removal policy: a tag or layer still referenced by a live object is
//! never detached from it. The removal is rejected and the entry is
//! *retired* instead: live objects keep resolving it for the rest of
//! the process, but the next persisted write drops it.

use super::config::{Config, ConfigError};
use crate::level::Level;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Both registries, persisted together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registries {
    /// String tags for gameplay grouping.
    pub tags: TagRegistry,
    /// Visibility layers with a 32-bit culling mask.
    pub layers: LayerRegistry,
}

impl Config for Registries {}

impl Registries {
    /// Persist to file, excluding retired entries.
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        self.pruned().save_to_file(path)
    }

    fn pruned(&self) -> Self {
        Self {
            tags: TagRegistry {
                entries: self
                    .tags
                    .entries
                    .iter()
                    .filter(|e| !e.retired)
                    .cloned()
                    .collect(),
            },
            layers: LayerRegistry {
                slots: self
                    .layers
                    .slots
                    .iter()
                    .filter(|s| !s.retired && !s.vacant)
                    .cloned()
                    .collect(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TagEntry {
    name: String,
    retired: bool,
}

/// Registry of gameplay tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagRegistry {
    entries: Vec<TagEntry>,
}

impl TagRegistry {
    /// Register a tag. Re-adding an existing tag is a no-op; re-adding
    /// a retired tag revives it. Returns whether the tag is now live.
    pub fn add(&mut self, name: &str) -> bool {
        if name.is_empty() {
            debug!("ignoring empty tag name");
            return false;
        }
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.retired = false;
            return true;
        }
        self.entries.push(TagEntry {
            name: name.to_owned(),
            retired: false,
        });
        true
    }

    /// Whether the tag is registered (retired entries included, since
    /// live objects may still reference them).
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Whether the tag is retired.
    pub fn is_retired(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name && e.retired)
    }

    /// Remove a tag. Fails (and retires the tag instead) when any live
    /// object in `level` still carries it.
    pub fn remove(&mut self, name: &str, level: &Level) -> bool {
        let Some(index) = self.entries.iter().position(|e| e.name == name) else {
            debug!("tag '{name}' not registered, remove ignored");
            return false;
        };
        if level.live_objects().any(|o| o.tag == name) {
            warn!("tag '{name}' still referenced by a live object; retiring instead of removing");
            self.entries[index].retired = true;
            return false;
        }
        self.entries.remove(index);
        true
    }

    /// Live (non-retired) tag names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| !e.retired)
            .map(|e| e.name.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LayerSlot {
    name: String,
    visible: bool,
    retired: bool,
    // Tombstone left by a successful remove. The slot keeps its index
    // so every later layer keeps its bit; a later add may reuse it.
    vacant: bool,
}

/// Registry of visibility layers, at most 32, each mapped to one bit
/// of the culling mask. Unrelated to the capability index despite the
/// shared "layer" name.
///
/// Bit assignments are stable for the lifetime of the process: removal
/// tombstones the slot in place. The persisted file compacts vacated
/// slots away, so bits may be reassigned across a save/load boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerRegistry {
    slots: Vec<LayerSlot>,
}

impl LayerRegistry {
    /// Hard cap: one bit per slot in the `u32` mask.
    pub const MAX_LAYERS: usize = 32;

    /// Register a layer and return its bit. Existing layers return
    /// their current bit (reviving a retired one); a new layer takes
    /// the first vacated slot, if any. A full registry logs an error
    /// and returns `None`.
    pub fn add(&mut self, name: &str) -> Option<u32> {
        if name.is_empty() {
            debug!("ignoring empty layer name");
            return None;
        }
        if let Some(index) = self.position(name) {
            self.slots[index].retired = false;
            return Some(1 << index);
        }
        if let Some(index) = self.slots.iter().position(|s| s.vacant) {
            self.slots[index] = LayerSlot {
                name: name.to_owned(),
                visible: true,
                retired: false,
                vacant: false,
            };
            return Some(1 << index);
        }
        if self.slots.len() >= Self::MAX_LAYERS {
            log::error!(
                "layer registry full ({} slots), cannot add '{name}'",
                Self::MAX_LAYERS
            );
            return None;
        }
        self.slots.push(LayerSlot {
            name: name.to_owned(),
            visible: true,
            retired: false,
            vacant: false,
        });
        Some(1 << (self.slots.len() - 1))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| !s.vacant && s.name == name)
    }

    /// Bit assigned to a layer, `None` when unregistered.
    pub fn bit(&self, name: &str) -> Option<u32> {
        self.position(name).map(|i| 1 << i)
    }

    /// Whether the layer is registered (retired included).
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Whether the layer is retired.
    pub fn is_retired(&self, name: &str) -> bool {
        self.slots
            .iter()
            .any(|s| !s.vacant && s.name == name && s.retired)
    }

    /// Toggle a layer's visibility bit.
    pub fn set_visible(&mut self, name: &str, visible: bool) {
        match self.position(name) {
            Some(index) => self.slots[index].visible = visible,
            None => debug!("layer '{name}' not registered, visibility ignored"),
        }
    }

    /// Whether a layer is currently visible; unregistered layers
    /// report visible so nothing silently disappears.
    pub fn is_visible(&self, name: &str) -> bool {
        self.position(name).map_or(true, |i| self.slots[i].visible)
    }

    /// Culling mask: one bit per visible layer.
    pub fn visible_mask(&self) -> u32 {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.vacant && s.visible)
            .fold(0, |mask, (i, _)| mask | (1 << i))
    }

    /// Remove a layer. Fails (and retires it) when any live object in
    /// `level` still sits on it. A successful remove tombstones the
    /// slot in place; bits assigned to later layers never shift.
    pub fn remove(&mut self, name: &str, level: &Level) -> bool {
        let Some(index) = self.position(name) else {
            debug!("layer '{name}' not registered, remove ignored");
            return false;
        };
        if level.live_objects().any(|o| o.layer == name) {
            warn!(
                "layer '{name}' still referenced by a live object; retiring instead of removing"
            );
            self.slots[index].retired = true;
            return false;
        }
        self.slots[index].vacant = true;
        true
    }

    /// Live (non-retired) layer names, in slot order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .filter(|s| !s.vacant && !s.retired)
            .map(|s| s.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::GameObject;

    fn level_with_tagged(tag: &str, layer: &str) -> Level {
        let mut level = Level::new("test", (0.0, 100.0));
        let mut object = GameObject::new("marker");
        object.tag = tag.to_owned();
        object.layer = layer.to_owned();
        level.add_object(object);
        level
    }

    #[test]
    fn test_remove_referenced_tag_retires() {
        let level = level_with_tagged("enemy", "World");
        let mut tags = TagRegistry::default();
        tags.add("enemy");

        assert!(!tags.remove("enemy", &level));
        // Still resolvable, but excluded from the persisted set.
        assert!(tags.contains("enemy"));
        assert!(tags.is_retired("enemy"));
        assert_eq!(tags.names().count(), 0);
    }

    #[test]
    fn test_remove_unreferenced_tag_succeeds() {
        let level = Level::new("test", (0.0, 100.0));
        let mut tags = TagRegistry::default();
        tags.add("enemy");
        assert!(tags.remove("enemy", &level));
        assert!(!tags.contains("enemy"));
    }

    #[test]
    fn test_layer_bits_and_mask() {
        let mut layers = LayerRegistry::default();
        assert_eq!(layers.add("World"), Some(1));
        assert_eq!(layers.add("UI"), Some(2));
        assert_eq!(layers.bit("UI"), Some(2));
        assert_eq!(layers.visible_mask(), 0b11);

        layers.set_visible("World", false);
        assert_eq!(layers.visible_mask(), 0b10);
        assert!(!layers.is_visible("World"));
        assert!(layers.is_visible("UI"));
    }

    #[test]
    fn test_remove_keeps_later_layer_bits_stable() {
        let level = Level::new("test", (0.0, 100.0));
        let mut layers = LayerRegistry::default();
        assert_eq!(layers.add("World"), Some(1));
        assert_eq!(layers.add("UI"), Some(2));
        assert_eq!(layers.add("Fx"), Some(4));

        assert!(layers.remove("UI", &level));
        assert!(!layers.contains("UI"));
        // Layers after the removed one keep their bits.
        assert_eq!(layers.bit("Fx"), Some(4));
        assert_eq!(layers.visible_mask(), 0b101);

        // A later add reuses the vacated slot and its bit.
        assert_eq!(layers.add("Overlay"), Some(2));
        assert_eq!(layers.bit("Fx"), Some(4));
        assert_eq!(layers.names().count(), 3);
    }

    #[test]
    fn test_layer_registry_caps_at_32() {
        let mut layers = LayerRegistry::default();
        for i in 0..LayerRegistry::MAX_LAYERS {
            assert!(layers.add(&format!("layer{i}")).is_some());
        }
        assert!(layers.add("one_too_many").is_none());
    }

    #[test]
    fn test_retired_layer_excluded_from_persisted_write() {
        let level = level_with_tagged("", "UI");
        let mut registries = Registries::default();
        registries.layers.add("World");
        registries.layers.add("UI");

        assert!(!registries.layers.remove("UI", &level));

        let pruned = registries.pruned();
        assert!(pruned.layers.contains("World"));
        assert!(!pruned.layers.contains("UI"));
        // The in-memory registry keeps resolving it until restart.
        assert!(registries.layers.contains("UI"));
    }

    #[test]
    fn test_readd_revives_retired_tag() {
        let level = level_with_tagged("enemy", "World");
        let mut tags = TagRegistry::default();
        tags.add("enemy");
        tags.remove("enemy", &level);
        assert!(tags.is_retired("enemy"));

        tags.add("enemy");
        assert!(!tags.is_retired("enemy"));
        assert_eq!(tags.names().count(), 1);
    }
}
