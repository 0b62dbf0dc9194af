//! Headless Blockfall runner (default binary).
//!
//! Plays one scripted session at a fixed timestep, keeps the high score and
//! statistics in the JSON profile, then prints the final board and a JSON
//! snapshot to stdout.

use anyhow::{Context, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use blockfall::config::RunnerConfig;
use blockfall::core::{GameConfig, GameState, ProfileStore};
use blockfall::profile_store::JsonProfileStore;
use blockfall::runner;

fn main() -> Result<()> {
    let config = RunnerConfig::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(LevelFilter::from_level(config.log_level))
        .init();

    let store = JsonProfileStore::new(&config.profile_path);
    let game_config = config.game_config(GameConfig::from_profile(&store.load()));
    let mut game = GameState::with_store(game_config, store);

    let summary = runner::run(&mut game, config.max_ticks);

    print!("{}", game.board());
    println!(
        "status={} score={} high_score={} lines={} level={} ticks={}",
        summary.status.as_str(),
        summary.score,
        game.high_score(),
        summary.lines,
        summary.level,
        summary.ticks,
    );
    let snapshot =
        serde_json::to_string_pretty(&game.snapshot()).context("encoding final snapshot")?;
    println!("{snapshot}");
    Ok(())
}
