#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use std::time::Instant;

use pacman_rules::clock::GameClock;
use pacman_rules::config::SimulationConfig;
use pacman_rules::constants::LOOP_TIME;
use pacman_rules::controller::GameController;
use pacman_rules::events::GameEvent;
use pacman_rules::formatter::CustomFormatter;
use thousands::Separable;
use tracing::{info, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(CustomFormatter)
        .finish()
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Runs the simulation headless: no picture, no sound, no input beyond the configured coins.
pub fn main() -> anyhow::Result<()> {
    init_logging()?;
    let config = SimulationConfig::load()?;
    info!(?config, "Starting simulation");

    let mut controller = GameController::new(config.clone())?;
    controller.subscribe(|event: &GameEvent| match event {
        GameEvent::GameStateChanged { old, new } => info!(%old, %new, "Phase changed"),
        GameEvent::LevelStarted { number } => info!(level = number, "Level started"),
        _ => {}
    });
    for _ in 0..config.coins {
        if !controller.insert_coin()? {
            warn!("Credit is full, coin rejected");
        }
    }

    let mut clock = GameClock::new(controller);
    let max_ticks = config.max_ticks.unwrap_or(u64::MAX);
    let mut behind = 0u64;

    while clock.ticks() < max_ticks {
        let start = Instant::now();
        if !clock.advance_one_tick() {
            break;
        }

        if config.throttled {
            match LOOP_TIME.checked_sub(start.elapsed()) {
                Some(remaining) => spin_sleep::sleep(remaining),
                None => behind += 1,
            }
        }
    }

    let model = clock.controller().model();
    info!(
        ticks = clock.ticks().separate_with_commas(),
        halted = clock.is_halted(),
        phase = %clock.controller().current_phase(),
        score = model.score().separate_with_commas(),
        high_score = model.high_score().separate_with_commas(),
        lives = model.lives(),
        ticks_behind_schedule = behind,
        "Simulation finished"
    );

    if clock.is_halted() {
        anyhow::bail!("simulation halted after {} ticks", clock.ticks());
    }
    Ok(())
}
