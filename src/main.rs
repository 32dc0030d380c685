//! Ledge Runner entry point
//!
//! Headless runner: builds the default course and drives it with a scripted
//! input pattern and a small kinematic integrator standing in for the physics
//! engine. Useful as a soak test and for eyeballing the event log.

use ledge_runner::consts::SIM_DT;
use ledge_runner::sim::{GameEvent, ObstacleKind, TickInput, World, detect_contacts, tick};

/// Downward acceleration applied to the player between ticks
const GRAVITY: f32 = 2000.0;

/// Scripted input for tick `n`: run right, hop often, stomp when falling
fn scripted_input(n: u64, world: &World) -> TickInput {
    let falling = world.player.body.vel.y > 0.0;
    TickInput {
        left: false,
        right: n % 600 < 540,
        jump: n % 45 == 0,
        fast_fall: falling && n % 90 > 60,
        stomp: falling,
    }
}

/// Integrate velocities over one timestep and land bodies on solid tops
fn integrate(world: &mut World) {
    let World {
        player,
        enemies,
        geometry,
        ..
    } = world;

    if player.body.enabled {
        player.body.vel.y += GRAVITY * SIM_DT;
        player.body.pos += player.body.vel * SIM_DT;
        player.on_ground = false;

        if player.body.vel.y >= 0.0 {
            let bounds = player.body.bounds();
            let landing = geometry
                .all_obstacles()
                .iter()
                .filter(|o| o.kind != ObstacleKind::Hazard)
                .filter(|o| o.bounds.overlaps(&bounds))
                .map(|o| o.bounds.min.y)
                .fold(None, |top: Option<f32>, y| Some(top.map_or(y, |t| t.min(y))));
            if let Some(top) = landing {
                player.body.pos.y = top - player.body.size.y / 2.0;
                player.body.vel.y = 0.0;
                player.on_ground = true;
            }
        }
    }

    for enemy in enemies.iter_mut().filter(|e| e.body.enabled) {
        enemy.body.pos.x += enemy.body.vel.x * SIM_DT;
    }
}

/// Run `ticks` steps, logging notable events
fn run(world: &mut World, ticks: u64) -> RunSummary {
    let mut summary = RunSummary::default();
    for n in 0..ticks {
        let input = scripted_input(n, world);
        let contacts = detect_contacts(world);
        for event in tick(world, &input, &contacts) {
            summary.record(&event);
            match event {
                GameEvent::EnemySpottedPlayer(_) | GameEvent::EnemyLostPlayer(_) => {
                    log::debug!("t={} {:?}", world.time_ticks, event)
                }
                _ => log::info!("t={} {:?}", world.time_ticks, event),
            }
        }
        integrate(world);
        summary.furthest_x = summary.furthest_x.max(world.player.body.pos.x);
    }
    summary
}

#[derive(Debug, Default)]
struct RunSummary {
    deaths: u32,
    respawns: u32,
    enemies_killed: u32,
    checkpoints: u32,
    sightings: u32,
    furthest_x: f32,
}

impl RunSummary {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PlayerDied(_) => self.deaths += 1,
            GameEvent::PlayerRespawned { .. } => self.respawns += 1,
            GameEvent::EnemyKilled { .. } => self.enemies_killed += 1,
            GameEvent::CheckpointActivated(_) => self.checkpoints += 1,
            GameEvent::EnemySpottedPlayer(_) => self.sightings += 1,
            GameEvent::EnemyLostPlayer(_) | GameEvent::CheckpointsReset => {}
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ledge_runner::Tuning;
    use ledge_runner::persistence::FileStore;
    use ledge_runner::sim::{LevelLayout, build_world};
    use std::time::{SystemTime, UNIX_EPOCH};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Ledge Runner (native) starting...");

    let mut args = std::env::args().skip(1);
    let ticks = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(60 * 60);
    let tuning = match args.next() {
        Some(path) => Tuning::load(std::path::Path::new(&path)),
        None => Tuning::default(),
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Seed: {seed}, running {ticks} ticks");

    let store = FileStore::new("ledge_runner_checkpoint.json");
    let mut world = build_world(&LevelLayout::default(), tuning, Box::new(store), seed);

    let summary = run(&mut world, ticks);
    log::info!("Run finished: {summary:?}");
    if let Some(cp) = world.active_checkpoint() {
        log::info!("Active checkpoint at {:?}", cp.pos);
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_runner {
    use wasm_bindgen::prelude::*;

    use ledge_runner::Tuning;
    use ledge_runner::persistence::LocalStorageStore;
    use ledge_runner::sim::{LevelLayout, build_world};

    #[wasm_bindgen(start)]
    pub fn wasm_main() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Ledge Runner starting...");

        let seed = entropy_seed();
        let mut world = build_world(
            &LevelLayout::default(),
            Tuning::default(),
            Box::new(LocalStorageStore::new()),
            seed,
        );
        let summary = super::run(&mut world, 60 * 30);
        log::info!("Run finished: {summary:?}");
    }

    /// Seed from the OS entropy source
    fn entropy_seed() -> u64 {
        let mut bytes = [0u8; 8];
        if getrandom_03::fill(&mut bytes).is_err() {
            log::warn!("No entropy available, using fixed seed");
        }
        u64::from_le_bytes(bytes)
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
