//! Process-scoped services: configuration and the tag/layer
//! registries. Constructed explicitly at startup and passed down;
//! nothing in the core reaches for globals.

pub mod config;
pub mod registry;

pub use config::{Config, ConfigError, CoreConfig, PhysicsConfig, UiConfig};
pub use registry::{LayerRegistry, Registries, TagRegistry};
