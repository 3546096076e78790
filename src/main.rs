//! Zombie Conga headless driver
//!
//! Runs the simulation natively without a renderer: a scripted player taps
//! toward the nearest stray cat every half second, and every intent the
//! simulation emits is logged. Handy for eyeballing tuning changes.
//!
//! Usage: `zombie-conga [settings.json] [seed]` (set `RUST_LOG=debug` for
//! spawn/retire traffic)

use std::process::ExitCode;

use glam::Vec2;

use zombie_conga::Settings;
use zombie_conga::consts::{FRAME_DT, MAX_FRAME_DT};
use zombie_conga::sim::{ActorKind, GameEvent, GamePhase, Simulation};

/// Give up after this much simulated time
const MAX_RUN_SECS: f32 = 120.0;
/// Seconds between scripted touches
const TOUCH_INTERVAL: f32 = 0.5;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Zombie Conga (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("Bad settings file {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);

    let mut sim = match Simulation::new(settings, seed) {
        Ok(sim) => sim,
        Err(err) => {
            log::error!("Invalid settings: {err}");
            return ExitCode::FAILURE;
        }
    };

    let dt = FRAME_DT.min(MAX_FRAME_DT);
    let mut elapsed = 0.0;
    let mut next_touch = 0.0;

    while elapsed < MAX_RUN_SECS {
        if elapsed >= next_touch {
            if let Some(target) = nearest_cat(&sim) {
                sim.on_touch(target);
            }
            next_touch += TOUCH_INTERVAL;
        }

        for event in sim.update(dt) {
            match event {
                GameEvent::SpawnActor { .. } | GameEvent::RetireActor { .. } => {
                    log::debug!("{event:?}")
                }
                _ => log::info!("[{elapsed:6.2}s] {event:?}"),
            }
        }
        elapsed += dt;

        if let GamePhase::GameOver { won } = sim.phase() {
            let state = sim.state();
            log::info!(
                "Finished: {} in {:.1}s with {} cats and {} lives",
                if won { "won" } else { "lost" },
                state.elapsed,
                state.train_len(),
                state.lives
            );
            return ExitCode::SUCCESS;
        }
    }

    log::info!(
        "Time limit reached with {} cats in the train",
        sim.state().train_len()
    );
    ExitCode::SUCCESS
}

/// Closest uncaptured cat to the player, if any
fn nearest_cat(sim: &Simulation) -> Option<Vec2> {
    let player = sim.state().player.pos;
    sim.snapshot()
        .into_iter()
        .filter(|a| a.kind == ActorKind::Collectible)
        .map(|a| a.position)
        .min_by(|a, b| {
            a.distance_squared(player)
                .partial_cmp(&b.distance_squared(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}
