//! Cardboard Warrior - Entry Point
//!
//! Plays one run headless with the autopilot and prints how it went.
//! Usage: `cardboard-warrior [seed]`

use anyhow::{Context, Result};

use cardboard_warrior::data::DataManager;
use cardboard_warrior::game::{autopilot, Game, GamePhase};

/// Upper bound on autopilot actions for one run
const MAX_STEPS: usize = 100_000;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Cardboard Warrior v{}", env!("CARGO_PKG_VERSION"));

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u64>()
            .with_context(|| format!("seed must be a whole number, got {:?}", arg))?,
        None => rand::random(),
    };

    let mut game = Game::new(DataManager::new(), seed);
    game.start();

    let report = autopilot::run(&mut game, MAX_STEPS).context("combat got out of sync")?;

    println!("Seed {}", seed);
    for floor in &report.floors {
        println!(
            "  Floor {:>2}: {:>2}/{:>2} rooms visited, {:>3} kills, {:>5} gold, {:>3} hp",
            floor.floor, floor.rooms_visited, floor.rooms, floor.kills, floor.gold, floor.health
        );
    }

    let player = game.player();
    let verdict = match report.phase {
        GamePhase::Victory => "Victory!",
        GamePhase::GameOver => "Defeated.",
        _ => "Stopped.",
    };
    println!(
        "{} Floor {} after {} steps: {}/{} hp, {} gold, {} potions, {} kills",
        verdict,
        game.floor(),
        report.steps,
        player.health,
        player.max_health,
        player.gold,
        player.potions,
        player.kill_count
    );

    log::info!("Cardboard Warrior shut down cleanly");
    Ok(())
}
