//! # runtime2d
//!
//! Runtime core for a 2D real-time game: the entity/component object
//! model, a text scene persistence format, a fixed-substep physics and
//! collision pass, and the per-level capability index every other
//! subsystem iterates.
//!
//! Rendering, audio, input, and scripted behaviors live outside this
//! crate; they consume the object/component accessors and the level's
//! layer lists, and go through the [`factory::Factory`] queues for any
//! in-frame lifecycle changes.
//!
//! ## Frame shape
//!
//! ```rust,no_run
//! use runtime2d::core::{CoreConfig, Registries};
//! use runtime2d::factory::Factory;
//! use runtime2d::physics::Physics;
//! use runtime2d::scene;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     runtime2d::foundation::logging::init();
//!     let config = CoreConfig::default();
//!     let mut registries = Registries::default();
//!     let mut factory = Factory::new();
//!     let physics = Physics::new(config.physics.clone());
//!
//!     let mut level = scene::load_level("levels/cave.lvl", &mut factory, &mut registries, &config.ui)?;
//!     loop {
//!         factory.flush(&mut level);
//!         physics.step(&mut level, physics.fixed_timestep());
//!         // ... scripts, rendering (external) ...
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;
pub mod factory;
pub mod foundation;
pub mod level;
pub mod object;
pub mod physics;
pub mod scene;

pub use crate::core::{Config, CoreConfig, Registries};
pub use crate::factory::Factory;
pub use crate::level::Level;
pub use crate::object::{Component, ComponentData, ComponentKind, GameObject, ObjectKey};
pub use crate::physics::Physics;
