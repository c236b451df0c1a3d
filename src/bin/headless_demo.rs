//! Runs a seeded level without rendering and logs its events.
//!
//! Usage: `headless_demo [seed] [ticks]`. The log level is controlled via
//! `RUST_LOG`.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pacsim::entity::pacman::{Pac, Steering};
use pacsim::events::{GameEvent, RecordingSink};
use pacsim::level::data::GameVariant;
use pacsim::level::GameLevel;
use pacsim::map::builder::World;
use pacsim::map::direction::Direction;

/// Keeps walking and turns clockwise whenever a wall stops Pac-Man.
struct WallHugger;

impl Steering for WallHugger {
    fn steer(&mut self, _world: &World, pac: &Pac) -> Option<Direction> {
        pac.creature
            .got_stuck
            .then(|| pac.creature.move_dir.next_clockwise())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .map(|arg| arg.parse())
        .transpose()
        .context("seed must be a number")?
        .unwrap_or(42);
    let ticks: u64 = args
        .next()
        .map(|arg| arg.parse())
        .transpose()
        .context("tick count must be a number")?
        .unwrap_or(3600);

    let mut level = GameLevel::new(GameVariant::Pacman, 1, seed, true)?;
    level.install_steering(Box::new(WallHugger));
    level.set_pac_immune(true);
    level.start()?;

    let mut sink = RecordingSink::new();
    let mut score = 0u32;
    for tick in 0..ticks {
        level.simulate_one_frame(&mut sink)?;
        if !level.memory.pac_prey.is_empty() {
            level.kill_edible_ghosts(&mut sink);
        }
        for event in sink.events.drain(..) {
            match event {
                GameEvent::Scored { points } => score += points,
                other => info!(tick, event = ?other, "Event"),
            }
        }
    }

    info!(
        seed,
        ticks,
        score,
        food_left = level.world.uneaten_food_count(),
        "Demo finished"
    );
    Ok(())
}
