//! Entity/component object model.
//!
//! [`GameObject`] is the identity + component-bag unit; the component
//! set is closed and enumerated in [`component::ComponentKind`].

pub mod component;
pub mod components;
pub mod game_object;

pub use component::{Component, ComponentData, ComponentKind, Fields, ParseError};
pub use game_object::{GameObject, ObjectKey};
