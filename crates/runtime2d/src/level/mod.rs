//! Level: the entity container for one scene, plus the capability
//! index.
//!
//! The six capability layers are a denormalized cache over the live
//! list: an object appears in layer(K) iff it currently owns a
//! component of kind K. Every component add/remove that goes through
//! the level keeps the cache consistent; that invariant is what
//! rendering and physics iterate against.

use crate::object::{Component, ComponentKind, GameObject, ObjectKey};
use log::debug;
use slotmap::SlotMap;

/// Entity container for one scene.
///
/// Owns every object through a generation-checked arena. Destroy and
/// lookup through stale keys are safe no-ops.
pub struct Level {
    name: String,
    bounds: (f32, f32),
    objects: SlotMap<ObjectKey, GameObject>,
    live: Vec<ObjectKey>,
    layers: [Vec<ObjectKey>; 6],
}

fn layer_slot(kind: ComponentKind) -> Option<usize> {
    ComponentKind::INDEXED.iter().position(|&k| k == kind)
}

impl Level {
    /// Create an empty level with world bounds (min x, max x).
    pub fn new(name: impl Into<String>, bounds: (f32, f32)) -> Self {
        Self {
            name: name.into(),
            bounds,
            objects: SlotMap::with_key(),
            live: Vec::new(),
            layers: Default::default(),
        }
    }

    /// Scene name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// World bounds (min x, max x), read by camera-follow and AI.
    pub fn bounds(&self) -> (f32, f32) {
        self.bounds
    }

    /// Replace the world bounds.
    pub fn set_bounds(&mut self, bounds: (f32, f32)) {
        self.bounds = bounds;
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether the level holds no objects.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Insert an object and fan it out into every capability layer it
    /// currently qualifies for.
    pub fn add_object(&mut self, object: GameObject) -> ObjectKey {
        let key = self.objects.insert(object);
        self.live.push(key);
        if let Some(object) = self.objects.get(key) {
            let kinds: Vec<ComponentKind> =
                object.components().iter().map(Component::kind).collect();
            for kind in kinds {
                self.push_to_layer(key, kind);
            }
        }
        key
    }

    /// Borrow an object; `None` for stale keys.
    pub fn object(&self, key: ObjectKey) -> Option<&GameObject> {
        self.objects.get(key)
    }

    /// Mutably borrow an object; `None` for stale keys.
    pub fn object_mut(&mut self, key: ObjectKey) -> Option<&mut GameObject> {
        self.objects.get_mut(key)
    }

    /// Live objects in insertion order.
    pub fn live_objects(&self) -> impl Iterator<Item = &GameObject> {
        self.live.iter().filter_map(|&k| self.objects.get(k))
    }

    /// Live object keys in insertion order.
    pub fn live_keys(&self) -> &[ObjectKey] {
        &self.live
    }

    /// Attach a component to a live object, updating the one relevant
    /// capability layer. Duplicate kinds and stale keys are no-ops;
    /// returns whether the component was attached.
    pub fn add_component_to(&mut self, key: ObjectKey, component: Component) -> bool {
        let kind = component.kind();
        let Some(object) = self.objects.get_mut(key) else {
            debug!("add_component_to: stale object key, ignored");
            return false;
        };
        if !object.add_component(component) {
            return false;
        }
        self.push_to_layer(key, kind);
        true
    }

    /// Detach and drop a component, removing the object from the
    /// matching capability layer. No-op when absent.
    pub fn remove_component_from(&mut self, key: ObjectKey, kind: ComponentKind) {
        let Some(object) = self.objects.get_mut(key) else {
            debug!("remove_component_from: stale object key, ignored");
            return;
        };
        if object.take_component(kind).is_some() {
            self.remove_from_layer(key, kind);
        }
    }

    fn push_to_layer(&mut self, key: ObjectKey, kind: ComponentKind) {
        if let Some(slot) = layer_slot(kind) {
            if !self.layers[slot].contains(&key) {
                self.layers[slot].push(key);
            }
        }
    }

    /// Linear-search removal from one capability layer; tolerant of the
    /// object not being present.
    pub fn remove_from_layer(&mut self, key: ObjectKey, kind: ComponentKind) {
        if let Some(slot) = layer_slot(kind) {
            self.layers[slot].retain(|&k| k != key);
        }
    }

    /// Remove the object from every capability layer.
    pub fn remove_from_all_layers(&mut self, key: ObjectKey) {
        for layer in &mut self.layers {
            layer.retain(|&k| k != key);
        }
    }

    /// Objects with a Transform component.
    pub fn transform_layer(&self) -> &[ObjectKey] {
        &self.layers[0]
    }

    /// Objects with a RigidBody component.
    pub fn rigid_body_layer(&self) -> &[ObjectKey] {
        &self.layers[1]
    }

    /// Objects with a Collision component.
    pub fn collision_layer(&self) -> &[ObjectKey] {
        &self.layers[2]
    }

    /// Objects with a Logic component.
    pub fn logic_layer(&self) -> &[ObjectKey] {
        &self.layers[3]
    }

    /// Objects with a UIText component.
    pub fn ui_text_layer(&self) -> &[ObjectKey] {
        &self.layers[4]
    }

    /// Objects with a Renderer component.
    pub fn renderer_layer(&self) -> &[ObjectKey] {
        &self.layers[5]
    }

    /// Capability layer for an indexed kind; `None` for the eight
    /// non-indexed kinds.
    pub fn layer(&self, kind: ComponentKind) -> Option<&[ObjectKey]> {
        layer_slot(kind).map(|slot| self.layers[slot].as_slice())
    }

    /// Effective active flag: an object with an inactive ancestor is
    /// inactive regardless of its own stored flag. Stale keys report
    /// inactive.
    pub fn is_active(&self, key: ObjectKey) -> bool {
        let mut current = key;
        loop {
            let Some(object) = self.objects.get(current) else {
                return false;
            };
            match object.parent() {
                Some(parent) => current = parent,
                None => return object.active_flag(),
            }
        }
    }

    /// Make `child` a child of `parent`. Rejects stale keys,
    /// self-parenting, and cycles; returns whether the link was made.
    pub fn set_parent(&mut self, child: ObjectKey, parent: ObjectKey) -> bool {
        if child == parent || !self.objects.contains_key(child) || !self.objects.contains_key(parent)
        {
            debug!("set_parent: invalid child/parent pair, ignored");
            return false;
        }
        // Walk up from the prospective parent: linking under a
        // descendant would cycle.
        let mut current = parent;
        while let Some(object) = self.objects.get(current) {
            match object.parent() {
                Some(p) if p == child => {
                    debug!("set_parent: would create a cycle, ignored");
                    return false;
                }
                Some(p) => current = p,
                None => break,
            }
        }
        if let Some(object) = self.objects.get(child) {
            if let Some(old_parent) = object.parent() {
                if let Some(old) = self.objects.get_mut(old_parent) {
                    old.children.retain(|&k| k != child);
                }
            }
        }
        if let Some(object) = self.objects.get_mut(child) {
            object.parent = Some(parent);
        }
        if let Some(object) = self.objects.get_mut(parent) {
            object.children.push(child);
        }
        true
    }

    /// Destroy an object: children first (recursively), then its
    /// components in reverse insertion order. Returns the ids of every
    /// destroyed object so the factory can roll its counter back.
    /// A stale key is a safe no-op returning an empty list.
    pub fn destroy(&mut self, key: ObjectKey) -> Vec<u32> {
        let mut destroyed = Vec::new();
        self.destroy_inner(key, &mut destroyed);
        destroyed
    }

    fn destroy_inner(&mut self, key: ObjectKey, destroyed: &mut Vec<u32>) {
        let Some(object) = self.objects.get(key) else {
            return;
        };
        let children = object.children().to_vec();
        for child in children {
            self.destroy_inner(child, destroyed);
        }

        self.remove_from_all_layers(key);
        self.live.retain(|&k| k != key);
        if let Some(mut object) = self.objects.remove(key) {
            if let Some(parent) = object.parent() {
                if let Some(parent_object) = self.objects.get_mut(parent) {
                    parent_object.children.retain(|&k| k != key);
                }
            }
            // Reverse insertion order, matching construction order.
            while object.pop_component().is_some() {}
            destroyed.push(object.id());
        }
    }

    /// First live object with the given name. Empty filters and
    /// misses report `None` with a debug log line.
    pub fn find_by_name(&self, name: &str) -> Option<ObjectKey> {
        self.find_first("name", name, |o| o.name == name)
    }

    /// First live object with the given tag.
    pub fn find_with_tag(&self, tag: &str) -> Option<ObjectKey> {
        self.find_first("tag", tag, |o| o.tag == tag)
    }

    /// First live object on the given visibility layer.
    pub fn find_with_layer(&self, layer: &str) -> Option<ObjectKey> {
        self.find_first("layer", layer, |o| o.layer == layer)
    }

    fn find_first(
        &self,
        what: &str,
        filter: &str,
        predicate: impl Fn(&GameObject) -> bool,
    ) -> Option<ObjectKey> {
        if filter.is_empty() {
            debug!("find by {what}: empty filter");
            return None;
        }
        let found = self
            .live
            .iter()
            .copied()
            .find(|&k| self.objects.get(k).is_some_and(&predicate));
        if found.is_none() {
            debug!("find by {what}: no object matches '{filter}'");
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::components::{Collision, Renderer, RigidBody, Transform};
    use crate::object::ComponentData;

    fn object_with(name: &str, components: Vec<Component>) -> GameObject {
        let mut object = GameObject::new(name);
        for component in components {
            object.add_component(component);
        }
        object
    }

    fn assert_layer_invariant(level: &Level) {
        for &key in level.live_keys() {
            let object = level.object(key).unwrap();
            for &kind in ComponentKind::INDEXED {
                let in_layer = level.layer(kind).unwrap().contains(&key);
                assert_eq!(
                    in_layer,
                    object.has_component(kind),
                    "layer invariant broken for {kind} on '{}'",
                    object.name
                );
            }
        }
        // No layer may hold a key outside the live set.
        for &kind in ComponentKind::INDEXED {
            for key in level.layer(kind).unwrap() {
                assert!(level.live_keys().contains(key));
            }
        }
    }

    #[test]
    fn test_add_object_fans_out_layers() {
        let mut level = Level::new("test", (0.0, 100.0));
        let key = level.add_object(object_with(
            "crate",
            vec![
                Transform::default().into_component(),
                Collision::default().into_component(),
            ],
        ));

        assert_eq!(level.transform_layer(), &[key]);
        assert_eq!(level.collision_layer(), &[key]);
        assert!(level.rigid_body_layer().is_empty());
        assert_layer_invariant(&level);
    }

    #[test]
    fn test_layer_invariant_through_mutation_sequence() {
        let mut level = Level::new("test", (0.0, 100.0));
        let a = level.add_object(object_with(
            "a",
            vec![Transform::default().into_component()],
        ));
        let b = level.add_object(object_with(
            "b",
            vec![
                Transform::default().into_component(),
                RigidBody::default().into_component(),
            ],
        ));
        assert_layer_invariant(&level);

        level.add_component_to(a, Renderer::default().into_component());
        assert_layer_invariant(&level);

        level.remove_component_from(b, ComponentKind::RigidBody);
        assert_layer_invariant(&level);

        // Duplicate add leaves both object and layers untouched.
        level.add_component_to(a, Renderer::default().into_component());
        assert_eq!(level.renderer_layer().len(), 1);
        assert_layer_invariant(&level);

        // Removing an absent kind is tolerated.
        level.remove_component_from(b, ComponentKind::Collision);
        assert_layer_invariant(&level);

        level.destroy(a);
        assert_layer_invariant(&level);
        assert_eq!(level.len(), 1);
    }

    #[test]
    fn test_active_inheritance() {
        let mut level = Level::new("test", (0.0, 100.0));
        let parent = level.add_object(GameObject::new("parent"));
        let child = level.add_object(GameObject::new("child"));
        assert!(level.set_parent(child, parent));

        level.object_mut(parent).unwrap().set_active(false);
        // Child's own flag stays true, but its effective state follows
        // the parent.
        assert!(level.object(child).unwrap().active_flag());
        assert!(!level.is_active(child));

        level.object_mut(parent).unwrap().set_active(true);
        assert!(level.is_active(child));
    }

    #[test]
    fn test_destroy_recurses_children_first() {
        let mut level = Level::new("test", (0.0, 100.0));
        let mut root = GameObject::new("root");
        root.set_id(1);
        let root = level.add_object(root);
        let mut mid = GameObject::new("mid");
        mid.set_id(2);
        let mid = level.add_object(mid);
        let mut leaf = GameObject::new("leaf");
        leaf.set_id(3);
        let leaf = level.add_object(leaf);
        level.set_parent(mid, root);
        level.set_parent(leaf, mid);

        let destroyed = level.destroy(root);
        // Deepest child first.
        assert_eq!(destroyed, vec![3, 2, 1]);
        assert!(level.is_empty());
        assert!(level.object(leaf).is_none());

        // Destroying a stale key is a safe no-op.
        assert!(level.destroy(root).is_empty());
    }

    #[test]
    fn test_set_parent_rejects_cycles() {
        let mut level = Level::new("test", (0.0, 100.0));
        let a = level.add_object(GameObject::new("a"));
        let b = level.add_object(GameObject::new("b"));
        assert!(level.set_parent(b, a));
        assert!(!level.set_parent(a, b));
        assert!(!level.set_parent(a, a));
    }

    #[test]
    fn test_find_by_name_and_tag() {
        let mut level = Level::new("test", (0.0, 100.0));
        let mut object = GameObject::new("player");
        object.tag = "hero".to_owned();
        object.layer = "World".to_owned();
        let key = level.add_object(object);
        level.add_object(GameObject::new("other"));

        assert_eq!(level.find_by_name("player"), Some(key));
        assert_eq!(level.find_with_tag("hero"), Some(key));
        assert_eq!(level.find_with_layer("World"), Some(key));
        assert_eq!(level.find_by_name("ghost"), None);
        assert_eq!(level.find_by_name(""), None);
        assert_eq!(level.find_with_tag(""), None);
    }
}
