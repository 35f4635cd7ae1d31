//! Game object: identity plus an ordered bag of components.

use super::component::{Component, ComponentData, ComponentKind};
use log::debug;
use slotmap::new_key_type;

new_key_type! {
    /// Generation-checked handle into a level's object arena.
    ///
    /// Replaces raw owner/child pointers: a destroyed-then-reused slot
    /// fails the generation check instead of dereferencing freed data.
    pub struct ObjectKey;
}

/// The identity + component-bag unit of simulation.
///
/// Ownership is explicit: the level's arena owns every object; parent
/// and child links are arena keys, never references. An object owns
/// its components exclusively.
#[derive(Debug, Clone)]
pub struct GameObject {
    id: u32,
    /// Display name; not guaranteed unique.
    pub name: String,
    /// Tag from the tag registry.
    pub tag: String,
    /// Visibility-layer name from the layer registry.
    pub layer: String,
    active: bool,
    components: Vec<Component>,
    pub(crate) parent: Option<ObjectKey>,
    pub(crate) children: Vec<ObjectKey>,
}

impl GameObject {
    /// Create a named object with no components. The id stays zero
    /// until the factory assigns one.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            tag: String::new(),
            layer: String::new(),
            active: true,
            components: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Process-unique id assigned by the factory.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    /// Attach a component. A second component of an already-present
    /// kind is a rejected no-op: the original stays, the argument is
    /// dropped, and `false` is returned.
    pub fn add_component(&mut self, component: Component) -> bool {
        let kind = component.kind();
        if self.has_component(kind) {
            debug!(
                "object '{}' already has a {} component, add ignored",
                self.name, kind
            );
            return false;
        }
        self.components.push(component);
        true
    }

    /// Whether a component of the given kind is attached.
    pub fn has_component(&self, kind: ComponentKind) -> bool {
        self.components.iter().any(|c| c.kind() == kind)
    }

    /// Component of the given kind, linear scan.
    pub fn component(&self, kind: ComponentKind) -> Option<&Component> {
        self.components.iter().find(|c| c.kind() == kind)
    }

    /// Mutable component of the given kind, linear scan.
    pub fn component_mut(&mut self, kind: ComponentKind) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.kind() == kind)
    }

    /// Typed component access: lookup by kind tag, then a checked
    /// variant unwrap.
    pub fn get<T: ComponentData>(&self) -> Option<&T> {
        self.component(T::KIND).and_then(T::from_component)
    }

    /// Typed mutable component access.
    pub fn get_mut<T: ComponentData>(&mut self) -> Option<&mut T> {
        self.component_mut(T::KIND).and_then(T::from_component_mut)
    }

    /// Detach and return the component of the given kind, if any.
    /// Layer-index upkeep is the level's job; callers outside the
    /// level go through `Level::remove_component_from`.
    pub(crate) fn take_component(&mut self, kind: ComponentKind) -> Option<Component> {
        let index = self.components.iter().position(|c| c.kind() == kind)?;
        Some(self.components.remove(index))
    }

    /// Components in insertion order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub(crate) fn pop_component(&mut self) -> Option<Component> {
        self.components.pop()
    }

    /// This object's own stored flag. The effective flag, which defers
    /// to ancestors, is `Level::is_active`.
    pub fn active_flag(&self) -> bool {
        self.active
    }

    /// Set this object's own flag. Never touches children: their
    /// effective state changes through the parent-chain walk.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Parent handle, if this object was created as a child.
    pub fn parent(&self) -> Option<ObjectKey> {
        self.parent
    }

    /// Child handles, in creation order.
    pub fn children(&self) -> &[ObjectKey] {
        &self.children
    }
}
