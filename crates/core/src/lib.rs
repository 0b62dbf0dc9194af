//! Core game logic module - pure, deterministic, and testable
//!
//! This crate is the falling-block rules engine: board state, piece geometry,
//! rotation with wall kicks, gravity and lock timing, line clearing, T-spin
//! classification, scoring and level progression. It does no rendering, input
//! decoding or file I/O; those collaborators talk to it through the command
//! API, [`GameSnapshot`], [`GameEvent`] and the [`ProfileStore`] trait.
//!
//! # Module Structure
//!
//! - [`pieces`]: shape table, colors and SRS kick tables
//! - [`bag`]: 7-bag random piece generation
//! - [`piece`]: the active piece and its rotation state machine
//! - [`board`]: 10x20 grid with collision, locking and line clearing
//! - [`tspin`]: corner-based T-spin classification
//! - [`scoring`]: score table, combo bonus, levels and gravity
//! - [`game_state`]: the engine itself
//! - [`events`], [`snapshot`], [`profile`], [`config`]: collaborator interfaces
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every aligned window of seven pieces holds each kind once
//! - **SRS Rotation**: per-kind wall kicks, O never rotates
//! - **Lock Delay**: 500ms once grounded, up to 15 move/rotate resets per piece
//! - **T-Spin Detection**: three of four corners, Full or Mini by front corners or kick
//! - **Scoring**: classic line table times `level + 1`, T-spin tables, combo bonus
//! - **Modes**: marathon, sprint (line target) and ultra (time limit)
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) with the elapsed
//! milliseconds. Gravity runs from 1000ms per row at level 0 down to 120ms.

pub mod bag;
pub mod board;
pub mod config;
pub mod events;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod profile;
pub mod scoring;
pub mod snapshot;
pub mod tspin;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use bag::PieceBag;
pub use board::{Board, ClearedRows, LineClear};
pub use config::GameConfig;
pub use events::GameEvent;
pub use game_state::GameState;
pub use piece::{Piece, Rotated};
pub use profile::{MemoryStore, NullStore, Profile, ProfileStore, Statistics};
pub use scoring::{calculate_drop_score, calculate_score, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use tspin::classify_tspin;
