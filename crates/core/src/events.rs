//! Events published by the engine for audio, achievements and logging
//!
//! The engine buffers events in the order they happen; collaborators pull
//! them with [`GameState::drain_events`](crate::GameState::drain_events).

use serde::{Deserialize, Serialize};

use crate::board::ClearedRows;
use crate::types::{GameMode, PieceKind, TSpinKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// The active piece was merged into the board.
    PieceLocked { kind: PieceKind, tspin: TSpinKind },
    /// A lock cleared lines or was a T-spin. A zero-line T-spin has `count == 0`.
    LinesCleared {
        count: usize,
        /// Original row indices, bottom to top.
        rows: ClearedRows,
        tspin: TSpinKind,
        score_delta: u32,
    },
    LevelUp { level: u32 },
    /// The combo counter changed (including drops back to 0).
    ComboChanged { combo: u32 },
    GameOver { score: u32, lines: u32 },
    /// The mode's goal was reached.
    ModeWon {
        mode: GameMode,
        score: u32,
        lines: u32,
        elapsed_ms: u64,
    },
}

impl GameEvent {
    /// Short name, matching the serialized `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::PieceLocked { .. } => "pieceLocked",
            GameEvent::LinesCleared { .. } => "linesCleared",
            GameEvent::LevelUp { .. } => "levelUp",
            GameEvent::ComboChanged { .. } => "comboChanged",
            GameEvent::GameOver { .. } => "gameOver",
            GameEvent::ModeWon { .. } => "modeWon",
        }
    }

    /// True for events that end the session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::GameOver { .. } | GameEvent::ModeWon { .. })
    }
}
