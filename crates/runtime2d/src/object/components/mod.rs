//! Concrete component kinds.
//!
//! Pure data structs; per-frame behavior lives in the physics module
//! and in the (external) scripting layer. Each struct carries its own
//! text field I/O so the serialize/deserialize pair stays in lock-step
//! in one place per kind.

pub mod animate;
pub mod collision;
pub mod combat;
pub mod controller;
pub mod inventory;
pub mod lifetime;
pub mod lighting;
pub mod logic;
pub mod renderer;
pub mod rigid_body;
pub mod transform;
pub mod ui_text;

pub use animate::Animate;
pub use collision::Collision;
pub use combat::{EnemyCombat, PlayerCombat};
pub use controller::Controller;
pub use inventory::Inventory;
pub use lifetime::Lifetime;
pub use lighting::Lighting;
pub use logic::{Logic, LogicTargets};
pub use renderer::Renderer;
pub use rigid_body::RigidBody;
pub use transform::Transform;
pub use ui_text::UiText;
