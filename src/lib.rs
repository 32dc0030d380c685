//! Ledge Runner - side-scrolling platformer level simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (obstacle queries, enemy AI, encounters)
//! - `persistence`: Checkpoint record storage
//! - `tuning`: Data-driven gameplay constants

pub mod persistence;
pub mod sim;
pub mod tuning;

pub use persistence::{CheckpointRecord, CheckpointStore, MemoryStore, PersistenceError};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (one step per frame)
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;

    /// Player and enemy bodies are square
    pub const ACTOR_SIZE: f32 = 50.0;
    pub const PLAYER_SPEED: f32 = 900.0;
    /// Negative is up (screen coordinates)
    pub const JUMP_VELOCITY: f32 = -1000.0;

    pub const ENEMY_PATROL_SPEED: f32 = 150.0;
    pub const ENEMY_CHASE_MULT: f32 = 1.5;
    /// Enemies spawn this far above the first segment of their platform
    pub const ENEMY_SPAWN_LIFT: f32 = 64.0;
    /// Platforms narrower than this never host an enemy
    pub const MIN_ENEMY_PLATFORM_SEGMENTS: usize = 3;

    /// Line of sight
    pub const SIGHT_FORWARD_RANGE: f32 = 600.0;
    pub const SIGHT_BACKWARD_RANGE: f32 = 200.0;
    pub const SIGHT_STEP: f32 = 8.0;
    /// Vertical offset of the diagnostic sight lines from the enemy center
    pub const SIGHT_LINE_OFFSET: f32 = 10.0;

    /// Lookahead probe sits this far past the actor's leading edge
    pub const PROBE_MARGIN: f32 = 6.0;
    /// Fraction of obstacle height counted as "at body height"
    pub const BLOCK_HEIGHT_TOLERANCE: f32 = 0.9;

    /// Player must be this far above an enemy for a stomp
    pub const STOMP_MIN_GAP: f32 = 30.0;

    pub const CHECKPOINT_SIZE: f32 = 32.0;
    /// Persisted checkpoint matches a placed one within this distance per axis
    pub const CHECKPOINT_MATCH_TOLERANCE: f32 = 1.0;

    /// Tile sizes (stone platforms, grass ground)
    pub const PLATFORM_TILE: f32 = 48.0;
    pub const GROUND_TILE_WIDTH: f32 = 100.0;
    pub const GROUND_TILE_HEIGHT: f32 = 50.0;

    pub const WORLD_LENGTH: f32 = 25_000.0;

    /// Delay between disabling and re-enabling the player on respawn
    pub const RESPAWN_SETTLE_MS: u32 = 100;
    /// Delay before the initial placement at a saved checkpoint
    pub const START_SETTLE_MS: u32 = 50;
}

/// Direction of `dx` as a unit step; zero counts as left
#[inline]
pub fn step_sign(dx: f32) -> f32 {
    if dx > 0.0 { 1.0 } else { -1.0 }
}

/// Tick count covering `millis` at the fixed timestep, never zero
#[inline]
pub fn ticks_for_millis(millis: u32) -> u32 {
    let ticks = (u64::from(millis) * u64::from(consts::SIM_HZ)).div_ceil(1000);
    u32::try_from(ticks).unwrap_or(u32::MAX).max(1)
}
