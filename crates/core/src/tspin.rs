//! T-spin detection based on corner occupancy
//!
//! The T rotates around mask cell (1, 1). The four diagonal neighbours of that
//! pivot are the corners; the two on the side the T points at are the "front"
//! corners. Occupancy uses the collision rule, so walls and the floor count as
//! filled and the area above the field counts as empty.

use crate::board::Board;
use crate::piece::Piece;
use crate::types::{LastAction, PieceKind, Rotation, TSpinKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

const ALL_CORNERS: [Corner; 4] = [
    Corner::TopLeft,
    Corner::TopRight,
    Corner::BottomLeft,
    Corner::BottomRight,
];

impl Corner {
    /// Offset from the pivot.
    fn offset(self) -> (i8, i8) {
        match self {
            Corner::TopLeft => (-1, -1),
            Corner::TopRight => (-1, 1),
            Corner::BottomLeft => (1, -1),
            Corner::BottomRight => (1, 1),
        }
    }
}

fn front_corners(rotation: Rotation) -> [Corner; 2] {
    match rotation {
        Rotation::North => [Corner::TopLeft, Corner::TopRight],
        Rotation::East => [Corner::TopRight, Corner::BottomRight],
        Rotation::South => [Corner::BottomLeft, Corner::BottomRight],
        Rotation::West => [Corner::TopLeft, Corner::BottomLeft],
    }
}

fn corner_filled(board: &Board, piece: &Piece, corner: Corner) -> bool {
    let (dr, dc) = corner.offset();
    board.is_occupied(piece.row() + 1 + dr, piece.col() + 1 + dc)
}

/// Classify the piece about to lock.
///
/// Only a T whose last successful action was a rotation can spin. Three or
/// more filled corners make a spin; it is `Full` when both front corners are
/// filled or the rotation needed a kick, `Mini` otherwise.
pub fn classify_tspin(
    board: &Board,
    piece: &Piece,
    last_action: LastAction,
    last_kick: bool,
) -> TSpinKind {
    if piece.kind() != PieceKind::T || last_action != LastAction::Rotate {
        return TSpinKind::None;
    }

    let filled = ALL_CORNERS
        .iter()
        .filter(|&&corner| corner_filled(board, piece, corner))
        .count();
    if filled < 3 {
        return TSpinKind::None;
    }

    let front_filled = front_corners(piece.rotation())
        .iter()
        .filter(|&&corner| corner_filled(board, piece, corner))
        .count();

    if front_filled == 2 || last_kick {
        TSpinKind::Full
    } else {
        TSpinKind::Mini
    }
}
