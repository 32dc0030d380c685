//! Lookahead queries
//!
//! Short directional probes in front of an actor: a wall at body height, and
//! ground one tile ahead at foot height. Both are approximate center-distance
//! tests against each obstacle's own size, not exact box intersection.

use glam::Vec2;

use super::actor::Actor;
use super::geometry::{Geometry, ObstacleKind};
use crate::Tuning;

/// Probe point just past the actor's leading edge, at its center height
#[inline]
pub fn wall_probe(actor: &impl Actor, tuning: &Tuning) -> Vec2 {
    let body = actor.body();
    let reach = body.half_width() + tuning.probe_margin;
    Vec2::new(body.pos.x + actor.facing().sign() * reach, body.pos.y)
}

/// Probe point one tile ahead and one tile down
#[inline]
pub fn ground_probe(actor: &impl Actor, tuning: &Tuning) -> Vec2 {
    let pos = actor.position();
    Vec2::new(
        pos.x + actor.facing().sign() * tuning.platform_tile,
        pos.y + tuning.platform_tile,
    )
}

/// True if a platform or hazard sits right in front of the actor
pub fn is_blocked_ahead(geometry: &Geometry, actor: &impl Actor, tuning: &Tuning) -> bool {
    if !actor.is_active() {
        return false;
    }
    let probe = wall_probe(actor, tuning);
    geometry
        .all_obstacles()
        .iter()
        .filter(|o| o.is_wall())
        .any(|o| {
            let size = o.size();
            let tolerance = Vec2::new(size.x / 2.0, size.y * tuning.block_height_tolerance);
            o.bounds.center_near(probe, tolerance)
        })
}

/// True if a platform or ground tile lies under the next step
pub fn has_ground_ahead(geometry: &Geometry, actor: &impl Actor, tuning: &Tuning) -> bool {
    if !actor.is_active() {
        return false;
    }
    let probe = ground_probe(actor, tuning);
    // Platforms first; ground tiles are wider and use their own half extents
    let on = |kind| {
        geometry
            .obstacles_of_kind(kind)
            .any(|o| o.bounds.center_near(probe, o.size() / 2.0))
    };
    on(ObstacleKind::Platform) || on(ObstacleKind::Ground)
}
