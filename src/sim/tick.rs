//! Fixed timestep simulation tick
//!
//! One call per frame. Order within a tick:
//! 1. pending respawn countdown
//! 2. contacts reported by the last physics step
//! 3. player controller
//! 4. sight lines, then enemy AI
//!
//! The physics integrator runs between ticks and consumes the velocities
//! written here.

use super::actor::{EnemyState, Facing, Player};
use super::behavior::update_enemy;
use super::contact::Contact;
use super::sight::sight_segments;
use super::state::{GameEvent, World};
use crate::Tuning;
use crate::consts::SIGHT_LINE_OFFSET;

/// Held inputs for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Fast-fall while airborne
    pub fast_fall: bool,
    /// Stomp attack on enemy contact
    pub stomp: bool,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &TickInput, contacts: &[Contact]) -> Vec<GameEvent> {
    let mut events = std::mem::take(&mut world.queued_events);
    world.time_ticks += 1;

    if let Some(at) = world.advance_respawn() {
        events.push(GameEvent::PlayerRespawned { at });
    }

    events.extend(world.resolve_contacts(contacts, input.stomp));

    if world.player.body.enabled {
        drive_player(&mut world.player, input, &world.tuning);
    }

    world.sight_segments = world
        .enemies
        .iter()
        .filter(|e| e.body.enabled)
        .map(|e| sight_segments(e, &world.tuning, SIGHT_LINE_OFFSET))
        .collect();

    let World {
        enemies,
        player,
        geometry,
        tuning,
        ..
    } = world;
    for enemy in enemies.iter_mut() {
        if let Some(state) = update_enemy(enemy, player, geometry, tuning) {
            log::debug!("Enemy {} -> {:?}", enemy.id.0, state);
            events.push(match state {
                EnemyState::Chase => GameEvent::EnemySpottedPlayer(enemy.id),
                EnemyState::Patrol => GameEvent::EnemyLostPlayer(enemy.id),
            });
        }
    }

    events
}

/// Run, jump and fast-fall from held inputs
fn drive_player(player: &mut Player, input: &TickInput, tuning: &Tuning) {
    let vel = &mut player.body.vel;

    vel.x = 0.0;
    if input.left {
        vel.x = -tuning.player_speed;
        player.facing = Facing::Left;
    } else if input.right {
        vel.x = tuning.player_speed;
        player.facing = Facing::Right;
    }

    if input.jump && player.on_ground {
        vel.y = tuning.jump_velocity;
    }

    if input.fast_fall && !player.on_ground {
        if !player.fast_falling {
            vel.y = if vel.y > 0.0 {
                vel.y * 2.0
            } else {
                tuning.player_speed / 2.0
            };
            player.fast_falling = true;
        }
    } else if player.fast_falling {
        if vel.y > 0.0 {
            vel.y /= 2.0;
        }
        player.fast_falling = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::ObstacleKind;
    use crate::sim::rect::Rect;
    use crate::sim::state::DeathCause;
    use glam::Vec2;

    const ROW: f32 = 400.0;

    fn floored_world(player_x: f32) -> World {
        let mut world = World::with_defaults(Vec2::new(player_x, ROW));
        for i in 0..60 {
            world.geometry.add_obstacle(
                Rect::from_center_size(Vec2::new(i as f32 * 48.0, ROW + 49.0), Vec2::splat(48.0)),
                ObstacleKind::Platform,
            );
        }
        world
    }

    #[test]
    fn test_player_runs_and_faces() {
        let mut world = floored_world(100.0);
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut world, &input, &[]);
        assert_eq!(world.player.body.vel.x, -world.tuning.player_speed);
        assert_eq!(world.player.facing, Facing::Left);

        tick(&mut world, &TickInput::default(), &[]);
        assert_eq!(world.player.body.vel.x, 0.0);
        assert_eq!(world.player.facing, Facing::Left);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut world = floored_world(100.0);
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut world, &jump, &[]);
        assert_eq!(world.player.body.vel.y, 0.0);

        world.player.on_ground = true;
        tick(&mut world, &jump, &[]);
        assert_eq!(world.player.body.vel.y, world.tuning.jump_velocity);
    }

    #[test]
    fn test_fast_fall_doubles_then_halves() {
        let mut world = floored_world(100.0);
        world.player.body.vel.y = 200.0;
        let down = TickInput {
            fast_fall: true,
            ..Default::default()
        };

        tick(&mut world, &down, &[]);
        assert_eq!(world.player.body.vel.y, 400.0);
        assert!(world.player.fast_falling);

        // Held: no further boost
        tick(&mut world, &down, &[]);
        assert_eq!(world.player.body.vel.y, 400.0);

        tick(&mut world, &TickInput::default(), &[]);
        assert_eq!(world.player.body.vel.y, 200.0);
        assert!(!world.player.fast_falling);
    }

    #[test]
    fn test_fast_fall_from_rising_pushes_down() {
        let mut world = floored_world(100.0);
        world.player.body.vel.y = -300.0;
        let down = TickInput {
            fast_fall: true,
            ..Default::default()
        };
        tick(&mut world, &down, &[]);
        assert_eq!(world.player.body.vel.y, world.tuning.player_speed / 2.0);
    }

    #[test]
    fn test_chase_starts_and_stops_with_sight() {
        let mut world = floored_world(800.0);
        let id = world.spawn_enemy(Vec2::new(500.0, ROW), Facing::Right);

        let events = tick(&mut world, &TickInput::default(), &[]);
        assert_eq!(events, vec![GameEvent::EnemySpottedPlayer(id)]);
        assert_eq!(world.enemy(id).unwrap().state, EnemyState::Chase);

        world.player.body.pos.y = ROW - 300.0;
        let events = tick(&mut world, &TickInput::default(), &[]);
        assert_eq!(events, vec![GameEvent::EnemyLostPlayer(id)]);
        assert_eq!(world.enemy(id).unwrap().state, EnemyState::Patrol);
    }

    #[test]
    fn test_sight_segments_skip_disabled_enemies() {
        let mut world = floored_world(100.0);
        world.player.body.pos.y = 0.0;
        let a = world.spawn_enemy(Vec2::new(500.0, ROW), Facing::Right);
        let b = world.spawn_enemy(Vec2::new(900.0, ROW), Facing::Left);
        world.kill_enemy(a);

        tick(&mut world, &TickInput::default(), &[]);
        assert_eq!(world.sight_segments.len(), 1);
        assert_eq!(world.sight_segments[0].enemy, b);
    }

    #[test]
    fn test_death_then_respawn_through_ticks() {
        let mut world = floored_world(100.0);
        let events = tick(&mut world, &TickInput::default(), &[Contact::PlayerHazard]);
        assert!(events.contains(&GameEvent::PlayerDied(DeathCause::Hazard)));
        assert!(!world.player.body.enabled);

        let settle = world.tuning.respawn_settle_ticks();
        for _ in 1..settle {
            let events = tick(&mut world, &TickInput::default(), &[Contact::PlayerHazard]);
            assert!(events.is_empty());
        }
        let events = tick(&mut world, &TickInput::default(), &[]);
        assert_eq!(
            events,
            vec![GameEvent::PlayerRespawned {
                at: Vec2::new(100.0, ROW)
            }]
        );
        assert!(world.player.body.enabled);
    }

    #[test]
    fn test_reset_event_delivered_on_next_tick() {
        let mut world = floored_world(100.0);
        world.reset_checkpoints();
        let events = tick(&mut world, &TickInput::default(), &[]);
        assert_eq!(
            events,
            vec![
                GameEvent::CheckpointsReset,
                GameEvent::PlayerDied(DeathCause::Reset),
            ]
        );
        assert_eq!(world.time_ticks, 1);
    }
}
