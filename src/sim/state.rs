//! Simulation state
//!
//! Everything a running level owns: geometry, actors, checkpoints, the
//! pending respawn and the checkpoint store. Lifetime is one play session.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Enemy, EnemyId, Facing, Player};
use super::geometry::Geometry;
use super::sight::SightSegments;
use crate::Tuning;
use crate::persistence::{CheckpointStore, MemoryStore};

/// A respawn anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub pos: Vec2,
    pub active: bool,
}

/// Why the player died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Hazard,
    Enemy(EnemyId),
    /// Explicit reset from the UI
    Reset,
}

/// Why an enemy was disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillCause {
    Hazard,
    Stomp,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpottedPlayer(EnemyId),
    EnemyLostPlayer(EnemyId),
    EnemyKilled { enemy: EnemyId, cause: KillCause },
    PlayerDied(DeathCause),
    PlayerRespawned { at: Vec2 },
    CheckpointActivated(usize),
    CheckpointsReset,
}

/// A respawn waiting for the physics system to settle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRespawn {
    pub ticks_left: u32,
}

/// A running level
#[derive(Debug)]
pub struct World {
    /// Seed for spawn-time randomness
    pub seed: u64,
    pub tuning: Tuning,
    pub geometry: Geometry,
    pub player: Player,
    /// Indexed by `EnemyId`; enemies are disabled, never removed
    pub enemies: Vec<Enemy>,
    pub checkpoints: Vec<Checkpoint>,
    /// Where the player respawns without an active checkpoint
    pub start: Vec2,
    pub pending_respawn: Option<PendingRespawn>,
    /// Rebuilt every tick for the diagnostic overlay
    pub sight_segments: Vec<SightSegments>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced outside `tick` (UI resets), drained by the next tick
    pub(crate) queued_events: Vec<GameEvent>,
    store: Box<dyn CheckpointStore>,
}

impl World {
    /// Empty world with the player standing at `start`
    pub fn new(tuning: Tuning, start: Vec2, store: Box<dyn CheckpointStore>, seed: u64) -> Self {
        let player = Player::new(start, tuning.actor_size);
        Self {
            seed,
            tuning,
            geometry: Geometry::new(),
            player,
            enemies: Vec::new(),
            checkpoints: Vec::new(),
            start,
            pending_respawn: None,
            sight_segments: Vec::new(),
            time_ticks: 0,
            queued_events: Vec::new(),
            store,
        }
    }

    /// Empty world with default tuning and an in-memory store
    pub fn with_defaults(start: Vec2) -> Self {
        Self::new(Tuning::default(), start, Box::new(MemoryStore::new()), 0)
    }

    /// Spawn an enemy at `pos`, patrolling in `facing`
    pub fn spawn_enemy(&mut self, pos: Vec2, facing: Facing) -> EnemyId {
        let id = EnemyId(self.enemies.len() as u32);
        let mut enemy = Enemy::new(id, pos, facing, self.tuning.actor_size);
        enemy.walk(self.tuning.patrol_speed);
        self.enemies.push(enemy);
        id
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.get(id.0 as usize)
    }

    pub fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.get_mut(id.0 as usize)
    }

    /// Place an inactive checkpoint, returning its index
    pub fn add_checkpoint(&mut self, pos: Vec2) -> usize {
        self.checkpoints.push(Checkpoint { pos, active: false });
        self.checkpoints.len() - 1
    }

    pub fn active_checkpoint(&self) -> Option<&Checkpoint> {
        self.checkpoints.iter().find(|c| c.active)
    }

    /// Fresh RNG seeded from the world seed
    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }

    pub fn is_respawning(&self) -> bool {
        self.pending_respawn.is_some()
    }

    pub fn store(&self) -> &dyn CheckpointStore {
        self.store.as_ref()
    }

    pub(crate) fn store_mut(&mut self) -> &mut dyn CheckpointStore {
        self.store.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_ids_are_indices() {
        let mut world = World::with_defaults(Vec2::ZERO);
        let a = world.spawn_enemy(Vec2::new(10.0, 0.0), Facing::Left);
        let b = world.spawn_enemy(Vec2::new(20.0, 0.0), Facing::Right);
        assert_eq!(a, EnemyId(0));
        assert_eq!(b, EnemyId(1));
        assert_eq!(world.enemy(b).map(|e| e.spawn.x), Some(20.0));
        assert!(world.enemy(EnemyId(7)).is_none());
    }

    #[test]
    fn test_spawned_enemy_patrols() {
        let mut world = World::with_defaults(Vec2::ZERO);
        let id = world.spawn_enemy(Vec2::new(10.0, 0.0), Facing::Left);
        let enemy = world.enemy(id).unwrap();
        assert_eq!(enemy.body.vel.x, -world.tuning.patrol_speed);
        assert_eq!(enemy.initial_facing, Facing::Left);
    }

    #[test]
    fn test_rng_follows_seed() {
        use rand::Rng;

        let store = || Box::new(MemoryStore::new());
        let a = World::new(Tuning::default(), Vec2::ZERO, store(), 7);
        let b = World::new(Tuning::default(), Vec2::ZERO, store(), 7);
        let draw = |w: &World| -> Vec<u32> {
            let mut rng = w.to_rng();
            (0..4).map(|_| rng.random()).collect()
        };
        assert_eq!(draw(&a), draw(&b));
    }

    #[test]
    fn test_no_active_checkpoint_initially() {
        let mut world = World::with_defaults(Vec2::ZERO);
        world.add_checkpoint(Vec2::new(100.0, 100.0));
        assert!(world.active_checkpoint().is_none());
        assert!(!world.is_respawning());
    }
}
