//! Gameplay tuning
//!
//! Every constant the simulation reads, overridable from JSON. Missing
//! fields fall back to the reference values in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::ticks_for_millis;

/// Finest occlusion sampling accepted from config
const MIN_SIGHT_STEP: f32 = 1.0;

/// Data-driven gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Actors ===
    /// Side length of player and enemy bodies
    pub actor_size: f32,
    pub player_speed: f32,
    pub jump_velocity: f32,

    // === Enemies ===
    pub patrol_speed: f32,
    /// Chase speed is `patrol_speed * chase_multiplier`
    pub chase_multiplier: f32,
    pub enemy_spawn_lift: f32,
    pub min_enemy_platform_segments: usize,

    // === Perception ===
    pub sight_forward_range: f32,
    pub sight_backward_range: f32,
    /// Occlusion sampling resolution along the sight line
    pub sight_step: f32,
    pub probe_margin: f32,
    pub block_height_tolerance: f32,

    // === Encounters ===
    pub stomp_min_gap: f32,
    pub checkpoint_size: f32,
    pub respawn_settle_ms: u32,
    pub start_settle_ms: u32,

    // === Tiles ===
    pub platform_tile: f32,
    pub ground_tile_width: f32,
    pub ground_tile_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            actor_size: ACTOR_SIZE,
            player_speed: PLAYER_SPEED,
            jump_velocity: JUMP_VELOCITY,

            patrol_speed: ENEMY_PATROL_SPEED,
            chase_multiplier: ENEMY_CHASE_MULT,
            enemy_spawn_lift: ENEMY_SPAWN_LIFT,
            min_enemy_platform_segments: MIN_ENEMY_PLATFORM_SEGMENTS,

            sight_forward_range: SIGHT_FORWARD_RANGE,
            sight_backward_range: SIGHT_BACKWARD_RANGE,
            sight_step: SIGHT_STEP,
            probe_margin: PROBE_MARGIN,
            block_height_tolerance: BLOCK_HEIGHT_TOLERANCE,

            stomp_min_gap: STOMP_MIN_GAP,
            checkpoint_size: CHECKPOINT_SIZE,
            respawn_settle_ms: RESPAWN_SETTLE_MS,
            start_settle_ms: START_SETTLE_MS,

            platform_tile: PLATFORM_TILE,
            ground_tile_width: GROUND_TILE_WIDTH,
            ground_tile_height: GROUND_TILE_HEIGHT,
        }
    }
}

impl Tuning {
    /// Parse tuning JSON; malformed input yields the defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Tuning>(json) {
            Ok(tuning) => tuning.sanitized(),
            Err(e) => {
                log::warn!("Ignoring malformed tuning ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Load tuning from a JSON file; unreadable files yield the defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded tuning from {}", path.display());
                Self::from_json(&json)
            }
            Err(e) => {
                log::warn!("Could not read tuning {} ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Replace values the simulation cannot run with by their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.sight_step >= MIN_SIGHT_STEP) {
            log::warn!("sight_step must be at least {MIN_SIGHT_STEP}, got {}", self.sight_step);
            self.sight_step = defaults.sight_step;
        }
        if !(self.actor_size > 0.0) {
            self.actor_size = defaults.actor_size;
        }
        if !(self.platform_tile > 0.0) {
            self.platform_tile = defaults.platform_tile;
        }
        if !(self.ground_tile_width > 0.0) || !(self.ground_tile_height > 0.0) {
            self.ground_tile_width = defaults.ground_tile_width;
            self.ground_tile_height = defaults.ground_tile_height;
        }
        self
    }

    #[inline]
    pub fn chase_speed(&self) -> f32 {
        self.patrol_speed * self.chase_multiplier
    }

    #[inline]
    pub fn respawn_settle_ticks(&self) -> u32 {
        ticks_for_millis(self.respawn_settle_ms)
    }

    #[inline]
    pub fn start_settle_ticks(&self) -> u32 {
        ticks_for_millis(self.start_settle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "patrol_speed": 100.0 }"#);
        assert_eq!(tuning.patrol_speed, 100.0);
        assert_eq!(tuning.sight_forward_range, SIGHT_FORWARD_RANGE);
        assert_eq!(tuning.chase_speed(), 150.0);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert_eq!(Tuning::from_json("not json"), Tuning::default());
    }

    #[test]
    fn test_zero_step_is_sanitized() {
        let tuning = Tuning::from_json(r#"{ "sight_step": 0.0 }"#);
        assert_eq!(tuning.sight_step, SIGHT_STEP);
    }

    #[test]
    fn test_tiny_step_is_sanitized() {
        let tuning = Tuning::from_json(r#"{ "sight_step": 0.000001 }"#);
        assert_eq!(tuning.sight_step, SIGHT_STEP);
        let tuning = Tuning::from_json(r#"{ "sight_step": 1.0 }"#);
        assert_eq!(tuning.sight_step, 1.0);
    }

    #[test]
    fn test_huge_settle_delay_does_not_overflow() {
        let tuning = Tuning::from_json(r#"{ "respawn_settle_ms": 100000000 }"#);
        assert_eq!(tuning.respawn_settle_ticks(), 6_000_000);

        let tuning = Tuning::from_json(r#"{ "start_settle_ms": 4294967295 }"#);
        assert!(tuning.start_settle_ticks() > 1);
    }

    #[test]
    fn test_settle_never_zero() {
        let tuning = Tuning {
            respawn_settle_ms: 0,
            ..Default::default()
        };
        assert_eq!(tuning.respawn_settle_ticks(), 1);
        assert_eq!(Tuning::default().respawn_settle_ticks(), 6);
    }
}
