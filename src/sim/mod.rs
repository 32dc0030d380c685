//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by obstacle index and enemy ID)
//! - No rendering, physics engine or platform dependencies

pub mod actor;
pub mod behavior;
pub mod contact;
pub mod encounter;
pub mod geometry;
pub mod level;
pub mod lookahead;
pub mod rect;
pub mod sight;
pub mod state;
pub mod tick;

pub use actor::{Actor, Body, Enemy, EnemyId, EnemyState, Facing, Player};
pub use behavior::update_enemy;
pub use contact::{Contact, detect_contacts};
pub use geometry::{Geometry, Obstacle, ObstacleKind};
pub use level::{LevelLayout, PlatformRun, Spot, build_world};
pub use lookahead::{ground_probe, has_ground_ahead, is_blocked_ahead, wall_probe};
pub use rect::Rect;
pub use sight::{SightSegments, can_see, detection_range, line_is_occluded, sight_segments};
pub use state::{Checkpoint, DeathCause, GameEvent, KillCause, PendingRespawn, World};
pub use tick::{TickInput, tick};
