//! Line of sight
//!
//! Enemies see far ahead and a little behind. Occlusion is sampled at a fixed
//! step along the horizontal line at the observer's height; a thin obstacle
//! falling between two samples does not block.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Enemy, EnemyId, Facing};
use super::geometry::Geometry;
use crate::{Tuning, step_sign};

/// Applicable detection range toward `toward` for an observer facing `facing`
#[inline]
pub fn detection_range(facing: Facing, toward: Facing, tuning: &Tuning) -> f32 {
    if facing == toward {
        tuning.sight_forward_range
    } else {
        tuning.sight_backward_range
    }
}

/// Sample the horizontal line from `from` to `to_x` at `from.y`.
///
/// Samples start one step away from `from` and continue for
/// `ceil(|dx| / step)` steps, so the last sample may land slightly past `to_x`.
pub fn line_is_occluded(geometry: &Geometry, from: Vec2, to_x: f32, step: f32) -> bool {
    let dx = to_x - from.x;
    let dir = step_sign(dx);
    let steps = (dx.abs() / step).ceil() as u32;

    (1..=steps).any(|i| {
        let sample = Vec2::new(from.x + dir * i as f32 * step, from.y);
        geometry.occludes(sample)
    })
}

/// True if `observer` has unobstructed sight of `target`
pub fn can_see(
    geometry: &Geometry,
    observer: &impl Actor,
    target: &impl Actor,
    tuning: &Tuning,
) -> bool {
    if !observer.is_active() || !target.is_active() {
        return false;
    }

    let from = observer.position();
    let to = target.position();
    let dx = to.x - from.x;

    let range = detection_range(observer.facing(), Facing::toward(dx), tuning);
    if dx.abs() > range {
        return false;
    }

    if line_is_occluded(geometry, from, to.x, tuning.sight_step) {
        return false;
    }

    // Same row only
    (from.y - to.y).abs() < tuning.actor_size
}

/// Diagnostic sight lines for one enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SightSegments {
    pub enemy: EnemyId,
    /// Forward cone, drawn slightly above center
    pub forward: [Vec2; 2],
    /// Rear cone, drawn slightly below center
    pub rear: [Vec2; 2],
}

/// Sight lines matching the ranges used by [`can_see`]
pub fn sight_segments(enemy: &Enemy, tuning: &Tuning, line_offset: f32) -> SightSegments {
    let pos = enemy.position();
    let dir = enemy.facing.sign();
    let upper = Vec2::new(pos.x, pos.y - line_offset);
    let lower = Vec2::new(pos.x, pos.y + line_offset);

    SightSegments {
        enemy: enemy.id,
        forward: [upper, upper + Vec2::new(dir * tuning.sight_forward_range, 0.0)],
        rear: [lower, lower - Vec2::new(dir * tuning.sight_backward_range, 0.0)],
    }
}
