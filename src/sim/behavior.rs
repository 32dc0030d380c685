//! Enemy behavior state machine
//!
//! Patrol until the player is in sight, chase while it stays in sight, and
//! drop back to patrol the moment it is lost. There is no memory between
//! ticks beyond the current state.

use super::actor::{Enemy, EnemyState, Facing, Player};
use super::geometry::Geometry;
use super::lookahead::{has_ground_ahead, is_blocked_ahead};
use super::sight::can_see;
use crate::Tuning;

/// Advance one enemy by a tick.
///
/// Returns the new state when it changed. Disabled enemies are left alone.
pub fn update_enemy(
    enemy: &mut Enemy,
    player: &Player,
    geometry: &Geometry,
    tuning: &Tuning,
) -> Option<EnemyState> {
    if !enemy.body.enabled {
        return None;
    }

    let previous = enemy.state;
    enemy.state = if can_see(geometry, enemy, player, tuning) {
        EnemyState::Chase
    } else {
        EnemyState::Patrol
    };

    match enemy.state {
        EnemyState::Patrol => patrol(enemy, geometry, tuning),
        EnemyState::Chase => chase(enemy, player, geometry, tuning),
    }

    (enemy.state != previous).then_some(enemy.state)
}

/// Walk; turn around at walls and ledges within the same tick
fn patrol(enemy: &mut Enemy, geometry: &Geometry, tuning: &Tuning) {
    enemy.walk(tuning.patrol_speed);

    if is_blocked_ahead(geometry, enemy, tuning) || !has_ground_ahead(geometry, enemy, tuning) {
        enemy.facing = enemy.facing.flipped();
        enemy.walk(tuning.patrol_speed);
    }
}

/// Head for the player, but never off a ledge
fn chase(enemy: &mut Enemy, player: &Player, geometry: &Geometry, tuning: &Tuning) {
    enemy.facing = Facing::toward(player.body.pos.x - enemy.body.pos.x);

    if has_ground_ahead(geometry, enemy, tuning) {
        enemy.walk(tuning.chase_speed());
    } else {
        enemy.body.vel.x = 0.0;
    }
}
