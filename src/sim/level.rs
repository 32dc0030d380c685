//! Level construction
//!
//! Turns a [`LevelLayout`] into a populated [`World`]: ground strip, stone
//! platforms, spikes, enemies and checkpoints. Heights in the layout are
//! measured upward from `ground_y`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::Facing;
use super::geometry::ObstacleKind;
use super::rect::Rect;
use super::state::World;
use crate::Tuning;
use crate::consts::WORLD_LENGTH;
use crate::persistence::CheckpointStore;

/// A run of contiguous stone segments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformRun {
    /// Anchor x; segment 0 is centered half a tile to its left
    pub x: f32,
    /// Top of the run above `ground_y`
    pub height: f32,
    pub segments: usize,
}

/// A placement given as anchor x and height above `ground_y`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    pub x: f32,
    pub height: f32,
}

/// Static description of a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLayout {
    /// Center line of the ground strip
    pub ground_y: f32,
    pub world_length: f32,
    pub start_x: f32,
    /// Gap between the player's feet and the ground at the start
    pub start_lift: f32,
    pub platforms: Vec<PlatformRun>,
    /// Spikes standing on platform tops
    pub top_hazards: Vec<Spot>,
    pub checkpoints: Vec<Spot>,
}

fn run(column: u32, height: f32, segments: usize) -> PlatformRun {
    PlatformRun {
        x: 64.0 * column as f32 - 32.0,
        height,
        segments,
    }
}

impl Default for LevelLayout {
    fn default() -> Self {
        let spot = |x: f32, height: f32| Spot { x, height };
        Self {
            ground_y: 868.0,
            world_length: WORLD_LENGTH,
            start_x: 100.0,
            start_lift: 20.0,
            platforms: vec![
                run(10, 200.0, 1),
                run(15, 300.0, 1),
                run(21, 250.0, 1),
                run(29, 250.0, 4),
                run(40, 300.0, 5),
                run(52, 200.0, 3),
                run(63, 350.0, 4),
                run(74, 450.0, 4),
                run(85, 300.0, 3),
                run(94, 250.0, 4),
                run(106, 200.0, 3),
                run(113, 150.0, 2),
                run(119, 100.0, 3),
                run(126, 200.0, 2),
                run(135, 280.0, 2),
            ],
            top_hazards: vec![
                spot(64.0 * 29.0 - 32.0, 250.0),
                spot(64.0 * 40.0 - 32.0, 300.0),
                spot(64.0 * 63.0 - 32.0, 350.0),
            ],
            checkpoints: vec![
                spot(64.0 * 21.0 - 64.0, 350.0),
                spot(64.0 * 66.0 - 64.0, 450.0),
                spot(64.0 * 135.0 - 64.0, 380.0),
            ],
        }
    }
}

impl LevelLayout {
    /// Parse a layout from JSON; missing fields take the default course's values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Player start: standing `start_lift` above the ground strip
    pub fn start_position(&self, tuning: &Tuning) -> Vec2 {
        let y = self.ground_y
            - tuning.ground_tile_height / 2.0
            - tuning.actor_size / 2.0
            - self.start_lift;
        Vec2::new(self.start_x, y)
    }

    /// Segment centers of a platform run
    pub fn segment_centers(&self, run: &PlatformRun, tuning: &Tuning) -> Vec<Vec2> {
        let tile = tuning.platform_tile;
        let top = self.ground_y - run.height;
        (0..run.segments)
            .map(|i| Vec2::new(run.x + i as f32 * tile - tile / 2.0, top - tile / 2.0))
            .collect()
    }

    /// Center of a spike standing on a platform top
    pub fn top_hazard_center(&self, spot: &Spot, tuning: &Tuning) -> Vec2 {
        let tile = tuning.platform_tile;
        Vec2::new(spot.x - tile / 2.0, self.ground_y - spot.height - tile * 1.5)
    }

    /// Enemy spawn points, one per qualifying platform.
    ///
    /// A platform qualifies when it is at least `min_enemy_platform_segments`
    /// wide and no top spike lines up with any of its segments.
    pub fn enemy_spawn_sites(&self, tuning: &Tuning) -> Vec<Vec2> {
        let tile = tuning.platform_tile;
        let spike_xs: Vec<f32> = self
            .top_hazards
            .iter()
            .map(|s| self.top_hazard_center(s, tuning).x)
            .collect();

        self.platforms
            .iter()
            .filter(|run| run.segments >= tuning.min_enemy_platform_segments)
            .filter_map(|run| {
                let segments = self.segment_centers(run, tuning);
                let spiked = segments.iter().any(|seg| {
                    spike_xs
                        .iter()
                        .any(|sx| (sx - seg.x).abs() < tile / 2.0 + 1.0)
                });
                if spiked {
                    return None;
                }
                segments
                    .first()
                    .map(|seg| Vec2::new(seg.x, seg.y - tuning.enemy_spawn_lift))
            })
            .collect()
    }
}

/// Build a playable world from `layout`.
///
/// Restores the stored checkpoint and schedules the initial placement, so the
/// player appears at the saved checkpoint (or the start) after a short settle.
pub fn build_world(
    layout: &LevelLayout,
    tuning: Tuning,
    store: Box<dyn CheckpointStore>,
    seed: u64,
) -> World {
    let start = layout.start_position(&tuning);
    let mut world = World::new(tuning, start, store, seed);
    let tuning = world.tuning.clone();
    let tile = Vec2::splat(tuning.platform_tile);

    // Ground strip
    let ground_size = Vec2::new(tuning.ground_tile_width, tuning.ground_tile_height);
    let mut x = 0.0;
    while x < layout.world_length {
        world.geometry.add_obstacle(
            Rect::from_center_size(Vec2::new(x, layout.ground_y), ground_size),
            ObstacleKind::Ground,
        );
        x += ground_size.x;
    }

    // Stone platforms
    for run in &layout.platforms {
        for center in layout.segment_centers(run, &tuning) {
            world
                .geometry
                .add_obstacle(Rect::from_center_size(center, tile), ObstacleKind::Platform);
        }
    }

    // Spikes on platform tops
    for spot in &layout.top_hazards {
        let center = layout.top_hazard_center(spot, &tuning);
        world
            .geometry
            .add_obstacle(Rect::from_center_size(center, tile), ObstacleKind::Hazard);
    }

    // Spike floor under the platform section
    if !layout.platforms.is_empty() {
        let min_x = layout
            .platforms
            .iter()
            .map(|r| r.x)
            .fold(f32::INFINITY, f32::min);
        let max_x = layout
            .platforms
            .iter()
            .map(|r| r.x + r.segments as f32 * tile.x)
            .fold(f32::NEG_INFINITY, f32::max);
        let spike_y = layout.ground_y - tuning.ground_tile_height / 2.0 - tile.x / 2.0;

        let mut x = min_x;
        while x <= max_x {
            world.geometry.add_obstacle(
                Rect::from_center_size(Vec2::new(x - tile.x / 2.0, spike_y), Vec2::splat(tile.x)),
                ObstacleKind::Hazard,
            );
            x += tile.x;
        }
    }

    // Enemies, facing chosen by the seeded RNG
    let mut rng = world.to_rng();
    for site in layout.enemy_spawn_sites(&tuning) {
        let facing = if rng.random_bool(0.5) {
            Facing::Left
        } else {
            Facing::Right
        };
        world.spawn_enemy(site, facing);
    }

    for spot in &layout.checkpoints {
        world.add_checkpoint(Vec2::new(spot.x, layout.ground_y - spot.height));
    }
    world.restore_checkpoint();

    let (ground, platforms, hazards) = world.geometry.counts();
    log::info!(
        "Level built: {} ground, {} platform, {} hazard tiles, {} enemies, {} checkpoints",
        ground,
        platforms,
        hazards,
        world.enemies.len(),
        world.checkpoints.len()
    );

    world.schedule_respawn(tuning.start_settle_ticks());
    world
}
