//! Headless session driver.
//!
//! Steps a [`GameState`] at the fixed [`TICK_MS`] timestep and feeds it a
//! seeded pseudo-random input script: for each new piece it picks a rotation
//! and a target column, walks the piece there one command at a time, then hard
//! drops. Events are logged as they are drained.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::core::{GameEvent, GameState, ProfileStore};
use crate::types::{SessionStatus, BOARD_WIDTH, TICK_MS};

/// Ticks between two scripted commands.
const ACTION_EVERY: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Plan {
    rotations: u8,
    target_col: i8,
}

/// Outcome of [`run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub status: SessionStatus,
    pub ticks: u32,
    pub pieces: u32,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
}

/// Scripted player; same seed, same inputs.
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: StdRng,
    plan: Option<Plan>,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            plan: None,
        }
    }

    fn new_plan(&mut self) -> Plan {
        Plan {
            rotations: self.rng.gen_range(0..4),
            target_col: self.rng.gen_range(-1..BOARD_WIDTH as i8),
        }
    }

    /// Forget the current plan; called when the active piece changes.
    pub fn piece_changed(&mut self) {
        self.plan = None;
    }

    /// Issue at most one command for the current piece.
    pub fn step<S: ProfileStore>(&mut self, game: &mut GameState<S>) {
        let Some(col) = game.active().map(|piece| piece.col()) else {
            return;
        };
        let mut plan = match self.plan {
            Some(plan) => plan,
            None => self.new_plan(),
        };

        if plan.rotations > 0 {
            plan.rotations = if game.rotate_cw() {
                plan.rotations - 1
            } else {
                0
            };
            self.plan = Some(plan);
            return;
        }

        let moved = if col < plan.target_col {
            game.move_right()
        } else if col > plan.target_col {
            game.move_left()
        } else {
            false
        };

        if moved {
            self.plan = Some(plan);
        } else {
            game.hard_drop();
            self.plan = None;
        }
    }
}

/// Drive `game` until it ends or `max_ticks` ticks have run.
pub fn run<S: ProfileStore>(game: &mut GameState<S>, max_ticks: u32) -> RunSummary {
    let mut pilot = Autopilot::new(game.seed());
    let mut ticks = 0;
    let mut pieces = 0;

    game.start();
    while ticks < max_ticks && game.status() == SessionStatus::Playing {
        if ticks % ACTION_EVERY == 0 {
            pilot.step(game);
        }
        game.tick(TICK_MS);
        ticks += 1;

        for event in game.drain_events() {
            if matches!(event, GameEvent::PieceLocked { .. }) {
                pieces += 1;
                pilot.piece_changed();
            }
            log_event(&event);
        }
    }

    let summary = RunSummary {
        status: game.status(),
        ticks,
        pieces,
        score: game.score(),
        lines: game.lines(),
        level: game.level(),
    };
    info!(
        status = summary.status.as_str(),
        ticks = summary.ticks,
        pieces = summary.pieces,
        score = summary.score,
        lines = summary.lines,
        "run finished"
    );
    summary
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::LinesCleared {
            count,
            tspin,
            score_delta,
            ..
        } => info!(
            lines = count,
            tspin = tspin.as_str().unwrap_or("none"),
            points = score_delta,
            "clear"
        ),
        GameEvent::ComboChanged { combo } if *combo >= 2 => info!(combo, "combo"),
        other => debug!(event = other.name(), "event"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, NullStore};
    use crate::types::GameMode;

    #[test]
    fn test_run_is_deterministic() {
        let mut a = GameState::new(42);
        let mut b = GameState::new(42);

        let first = run(&mut a, 3_000);
        let second = run(&mut b, 3_000);

        assert_eq!(first, second);
        assert_eq!(a.board(), b.board());
        assert!(first.pieces > 0);
    }

    #[test]
    fn test_run_stops_at_tick_budget() {
        let mut game = GameState::new(7);
        let summary = run(&mut game, 10);
        assert_eq!(summary.ticks, 10);
        assert_eq!(summary.status, SessionStatus::Playing);
    }

    #[test]
    fn test_run_ends_with_the_session() {
        let config = GameConfig::default()
            .with_seed(11)
            .with_mode(GameMode::Ultra { time_limit_ms: 800 });
        let mut game = GameState::with_store(config, NullStore);

        let summary = run(&mut game, 1_000);
        assert_eq!(summary.status, SessionStatus::Completed);
        assert_eq!(summary.ticks, 50); // 50 * 16 = 800
    }
}
