//! Fixed-substep physics: movement integration and the pairwise
//! collision pass.
//!
//! Each sub-step: clear every collision flag, integrate velocities,
//! refresh bounding boxes from the transforms, then run the swept test
//! over every ordered pair of active colliders. The pair loop is
//! O(n²) with no broad phase, by design. Iteration works on snapshots
//! of the capability layers so scripts queueing deletions between
//! sub-steps never invalidate an in-progress pass.

pub mod sweep;

use crate::core::PhysicsConfig;
use crate::foundation::math::Aabb;
use crate::level::Level;
use crate::object::components::{Collision, RigidBody, Transform};
use crate::object::ObjectKey;
use sweep::swept_aabb;

/// The per-frame physics pass over one level.
pub struct Physics {
    config: PhysicsConfig,
}

impl Physics {
    /// Create a physics pass with the given tuning.
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// Seconds per sub-step, for drivers accumulating frame time.
    pub fn fixed_timestep(&self) -> f32 {
        self.config.fixed_timestep
    }

    /// Run one fixed sub-step over the level.
    pub fn step(&self, level: &mut Level, dt: f32) {
        // Snapshots: the layer lists may not be mutated mid-iteration.
        let colliders: Vec<ObjectKey> = level.collision_layer().to_vec();
        let bodies: Vec<ObjectKey> = level.rigid_body_layer().to_vec();

        for &key in &colliders {
            if let Some(collision) = level.object_mut(key).and_then(GameObjectExt::collision_mut) {
                collision.is_colliding = false;
            }
        }

        for &key in &bodies {
            if level.is_active(key) {
                self.integrate(level, key, dt);
            }
        }

        for &key in &colliders {
            if level.is_active(key) {
                refresh_bounds(level, key);
            }
        }

        for (i, &a) in colliders.iter().enumerate() {
            if !level.is_active(a) {
                continue;
            }
            for (j, &b) in colliders.iter().enumerate() {
                if i == j || !level.is_active(b) {
                    continue;
                }
                refresh_bounds(level, b);
                if Self::test_pair(level, a, b, dt) {
                    for key in [a, b] {
                        if let Some(collision) =
                            level.object_mut(key).and_then(GameObjectExt::collision_mut)
                        {
                            // Latched: once set in a sub-step it stays
                            // set for the rest of it.
                            collision.is_colliding = true;
                        }
                    }
                }
            }
        }
    }

    fn integrate(&self, level: &mut Level, key: ObjectKey, dt: f32) {
        let Some(object) = level.object_mut(key) else {
            return;
        };
        let Some(body) = object.get::<RigidBody>() else {
            return;
        };

        let mut velocity = body.velocity
            + (body.acceleration + self.config.gravity * body.gravity_scale) * dt;
        if body.max_speed > 0.0 {
            let speed = velocity.norm();
            if speed > body.max_speed {
                velocity *= body.max_speed / speed;
            }
        }

        if let Some(body) = object.get_mut::<RigidBody>() {
            body.velocity = velocity;
        }
        if let Some(transform) = object.get_mut::<Transform>() {
            transform.position += velocity * dt;
            transform.rotation_angle += transform.rotation_speed * dt;
        }
    }

    fn test_pair(level: &Level, a: ObjectKey, b: ObjectKey, dt: f32) -> bool {
        let (Some(obj_a), Some(obj_b)) = (level.object(a), level.object(b)) else {
            return false;
        };
        let (Some(col_a), Some(col_b)) = (obj_a.get::<Collision>(), obj_b.get::<Collision>())
        else {
            return false;
        };
        let vel_a = obj_a
            .get::<RigidBody>()
            .map_or_else(crate::foundation::math::Vec2::zeros, |r| r.velocity);
        let vel_b = obj_b
            .get::<RigidBody>()
            .map_or_else(crate::foundation::math::Vec2::zeros, |r| r.velocity);
        swept_aabb(&col_a.aabb, &col_b.aabb, vel_a, vel_b, dt)
    }
}

/// Rebuild an object's bounding box from its current transform.
fn refresh_bounds(level: &mut Level, key: ObjectKey) {
    let Some(object) = level.object_mut(key) else {
        return;
    };
    let Some(transform) = object.get::<Transform>() else {
        return;
    };
    let center = transform.position;
    let extents = transform.scaled_dimensions();
    if let Some(collision) = object.get_mut::<Collision>() {
        let half = crate::foundation::math::Vec2::new(
            extents.x * collision.bounds_scale.x * 0.5,
            extents.y * collision.bounds_scale.y * 0.5,
        );
        collision.aabb = Aabb::from_center(center, half);
    }
}

// Local helper so the flag clear/set sites read as one call.
trait GameObjectExt {
    fn collision_mut(&mut self) -> Option<&mut Collision>;
}

impl GameObjectExt for crate::object::GameObject {
    fn collision_mut(&mut self) -> Option<&mut Collision> {
        self.get_mut::<Collision>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PhysicsConfig;
    use crate::foundation::math::Vec2;
    use crate::object::{ComponentData, GameObject};
    use approx::assert_relative_eq;

    fn physics() -> Physics {
        Physics::new(PhysicsConfig {
            fixed_timestep: 1.0 / 120.0,
            gravity: Vec2::new(0.0, -100.0),
        })
    }

    fn collider(name: &str, x: f32, y: f32, size: f32) -> GameObject {
        let mut object = GameObject::new(name);
        let mut transform = Transform::at(Vec2::new(x, y));
        transform.dimensions = Vec2::new(size, size);
        object.add_component(transform.into_component());
        object.add_component(Collision::default().into_component());
        object
    }

    fn colliding(level: &Level, key: crate::object::ObjectKey) -> bool {
        level
            .object(key)
            .unwrap()
            .get::<Collision>()
            .unwrap()
            .is_colliding
    }

    #[test]
    fn test_flags_set_for_overlapping_pair_and_cleared_next_step() {
        let physics = physics();
        let mut level = Level::new("test", (0.0, 100.0));
        let a = level.add_object(collider("a", 0.0, 0.0, 2.0));
        let b = level.add_object(collider("b", 1.0, 0.0, 2.0));
        let far = level.add_object(collider("far", 50.0, 50.0, 2.0));

        physics.step(&mut level, physics.fixed_timestep());
        assert!(colliding(&level, a));
        assert!(colliding(&level, b));
        assert!(!colliding(&level, far));

        // Separate them; the next step clears the latched flags.
        level
            .object_mut(b)
            .unwrap()
            .get_mut::<Transform>()
            .unwrap()
            .position = Vec2::new(30.0, 0.0);
        physics.step(&mut level, physics.fixed_timestep());
        assert!(!colliding(&level, a));
        assert!(!colliding(&level, b));
    }

    #[test]
    fn test_touching_unit_boxes_report_collision() {
        // Shared edge, zero velocity: the inclusive overlap test fires.
        let physics = physics();
        let mut level = Level::new("test", (0.0, 100.0));
        let a = level.add_object(collider("a", 0.0, 0.0, 1.0));
        let b = level.add_object(collider("b", 1.0, 0.0, 1.0));

        physics.step(&mut level, physics.fixed_timestep());
        for key in [a, b] {
            assert!(
                level
                    .object(key)
                    .unwrap()
                    .get::<Collision>()
                    .unwrap()
                    .is_colliding
            );
        }
    }

    #[test]
    fn test_inactive_objects_are_skipped() {
        let physics = physics();
        let mut level = Level::new("test", (0.0, 100.0));
        let a = level.add_object(collider("a", 0.0, 0.0, 2.0));
        let b = level.add_object(collider("b", 1.0, 0.0, 2.0));
        level.object_mut(b).unwrap().set_active(false);

        physics.step(&mut level, physics.fixed_timestep());
        assert!(
            !level
                .object(a)
                .unwrap()
                .get::<Collision>()
                .unwrap()
                .is_colliding
        );
    }

    #[test]
    fn test_gravity_integration_and_clamp() {
        let physics = physics();
        let mut level = Level::new("test", (0.0, 100.0));
        let mut object = collider("faller", 0.0, 100.0, 1.0);
        object.add_component(
            RigidBody {
                gravity_scale: 1.0,
                max_speed: 0.5,
                ..RigidBody::default()
            }
            .into_component(),
        );
        let key = level.add_object(object);

        let dt = physics.fixed_timestep();
        for _ in 0..240 {
            physics.step(&mut level, dt);
        }

        let object = level.object(key).unwrap();
        let body = object.get::<RigidBody>().unwrap();
        assert_relative_eq!(body.velocity.norm(), 0.5, epsilon = 1e-4);
        // Two seconds of clamped fall: position dropped, but no
        // further than max_speed allows.
        let transform = object.get::<Transform>().unwrap();
        assert!(transform.position.y < 100.0);
        assert!(transform.position.y > 100.0 - 0.5 * 2.0 - 1e-3);
    }

    #[test]
    fn test_sweep_window_follows_the_step_dt() {
        // A driver stepping with a coarser dt than the configured
        // sub-step must still get contacts predicted inside that dt.
        let physics = Physics::new(PhysicsConfig {
            fixed_timestep: 0.001,
            gravity: Vec2::zeros(),
        });
        let mut level = Level::new("test", (0.0, 100.0));
        let mut mover = collider("mover", 0.0, 0.0, 1.0);
        mover.add_component(
            RigidBody {
                velocity: Vec2::new(10.0, 0.0),
                ..RigidBody::default()
            }
            .into_component(),
        );
        let mover = level.add_object(mover);
        let wall = level.add_object(collider("wall", 3.0, 0.0, 1.0));

        // After integrating 0.15s the mover sits at x = 1.5, half a
        // unit short of the wall; contact comes at t = 0.05 of the
        // next window. A sweep over the 1ms sub-step would miss it.
        physics.step(&mut level, 0.15);
        assert!(colliding(&level, mover));
        assert!(colliding(&level, wall));
    }

    #[test]
    fn test_bounds_refresh_uses_scale_and_dimensions() {
        let physics = physics();
        let mut level = Level::new("test", (0.0, 100.0));
        let mut object = collider("scaled", 10.0, 5.0, 4.0);
        object.get_mut::<Transform>().unwrap().scale = Vec2::new(2.0, 1.0);
        let key = level.add_object(object);

        physics.step(&mut level, physics.fixed_timestep());
        let aabb = level.object(key).unwrap().get::<Collision>().unwrap().aabb;
        assert_relative_eq!(aabb.min.x, 6.0);
        assert_relative_eq!(aabb.max.x, 14.0);
        assert_relative_eq!(aabb.min.y, 3.0);
        assert_relative_eq!(aabb.max.y, 7.0);
    }
}
