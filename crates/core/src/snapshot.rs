use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::piece::Piece;
use crate::types::{GameMode, PieceKind, Rotation, SessionStatus, BOARD_HEIGHT, BOARD_WIDTH};

/// Board as cell codes: 0 empty, otherwise [`PieceKind::code`].
pub type BoardGrid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub row: i8,
    pub col: i8,
    /// Board coordinates `(row, col)` of the four cells.
    pub cells: ArrayVec<(i8, i8), 4>,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind(),
            rotation: piece.rotation(),
            row: piece.row(),
            col: piece.col(),
            cells: piece.cells().take(4).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimersSnapshot {
    pub gravity_ms: u32,
    pub lock_ms: u32,
    pub lock_resets: u8,
    pub elapsed_ms: u64,
}

/// Read-only view of a session for renderers and tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    pub active: Option<ActiveSnapshot>,
    pub ghost_row: Option<i8>,
    pub next: PieceKind,
    pub status: SessionStatus,
    pub paused: bool,
    pub mode: GameMode,
    pub seed: u64,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: u32,
    pub lines_remaining: Option<u32>,
    pub time_remaining_ms: Option<u32>,
    pub clear_message: Option<String>,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.status == SessionStatus::Playing && !self.paused
    }
}

/// Encode the board as cell codes.
pub fn board_grid(board: &Board) -> BoardGrid {
    let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
    for (out, row) in grid.iter_mut().zip(board.rows()) {
        for (code, cell) in out.iter_mut().zip(row) {
            *code = cell.map_or(0, |kind| kind.code());
        }
    }
    grid
}
