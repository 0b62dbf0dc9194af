//! Piece module - the active tetromino and its rotation state machine
//!
//! A piece is a kind, a rotation, an anchor `(row, col)` for the top-left of
//! its mask, and the mask itself. The mask always equals the kind's shape at
//! the current rotation; the only way to change it is a successful rotation.

use crate::board::Board;
use crate::pieces::{self, kick_offsets, mask_cells, Mask};
use crate::types::{Color, PieceKind, Rotation, BOARD_WIDTH};

/// Anchor row for freshly spawned pieces (one row above the field).
pub const SPAWN_ROW: i8 = -1;

/// Zero-offset fallback used when a transition has no kick entry.
const NO_KICKS: [(i8, i8); 1] = [(0, 0)];

/// Outcome of a successful rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotated {
    /// Position of the winning offset in the kick list.
    pub kick_index: usize,
    /// `(dx, dy)` that was applied to the anchor.
    pub offset: (i8, i8),
}

impl Rotated {
    /// True when an offset other than the in-place attempt was used.
    pub fn kicked(&self) -> bool {
        self.kick_index > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    rotation: Rotation,
    row: i8,
    col: i8,
    mask: Mask,
}

impl Piece {
    /// New piece of `kind` at the spawn anchor: row -1, horizontally centered.
    pub fn spawn(kind: PieceKind) -> Self {
        let col = (BOARD_WIDTH as i8 - pieces::box_size(kind) as i8) / 2;
        Self::at(kind, Rotation::North, SPAWN_ROW, col)
    }

    /// Piece of `kind` at an explicit rotation and anchor.
    pub fn at(kind: PieceKind, rotation: Rotation, row: i8, col: i8) -> Self {
        let rotation = if kind == PieceKind::O {
            Rotation::North
        } else {
            rotation
        };
        Self {
            kind,
            rotation,
            row,
            col,
            mask: pieces::mask_for(kind, rotation),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn row(&self) -> i8 {
        self.row
    }

    pub fn col(&self) -> i8 {
        self.col
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn color(&self) -> Color {
        pieces::color(self.kind)
    }

    /// Board coordinates `(row, col)` of the filled cells.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        mask_cells(&self.mask).map(move |(r, c)| (self.row + r, self.col + c))
    }

    /// Copy of this piece translated by `(dx, dy)`; no collision check.
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            row: self.row + dy,
            col: self.col + dx,
            ..*self
        }
    }

    /// Translate in place; callers check `Board::can_move` first.
    pub(crate) fn translate(&mut self, dx: i8, dy: i8) {
        self.row += dy;
        self.col += dx;
    }

    pub fn try_rotate_cw(&mut self, board: &Board) -> Option<Rotated> {
        self.try_rotate(board, true)
    }

    pub fn try_rotate_ccw(&mut self, board: &Board) -> Option<Rotated> {
        self.try_rotate(board, false)
    }

    /// Rotate with SRS wall kicks.
    ///
    /// Offsets for the transition are tried in table order and the first one
    /// that fits is applied. Returns `None`, leaving the piece untouched, when
    /// the kind is O or nothing fits.
    pub fn try_rotate(&mut self, board: &Board, clockwise: bool) -> Option<Rotated> {
        if self.kind == PieceKind::O {
            return None;
        }

        let size = pieces::box_size(self.kind);
        let (mask, rotation) = if clockwise {
            (pieces::rotate_mask_cw(&self.mask, size), self.rotation.rotate_cw())
        } else {
            (pieces::rotate_mask_ccw(&self.mask, size), self.rotation.rotate_ccw())
        };

        let kicks: &[(i8, i8)] = match kick_offsets(self.kind, self.rotation, rotation) {
            Some(kicks) => kicks,
            None => &NO_KICKS,
        };

        for (kick_index, &(dx, dy)) in kicks.iter().enumerate() {
            let row = self.row + dy;
            let col = self.col + dx;
            if board.fits(&mask, row, col) {
                self.mask = mask;
                self.rotation = rotation;
                self.row = row;
                self.col = col;
                return Some(Rotated {
                    kick_index,
                    offset: (dx, dy),
                });
            }
        }

        None
    }
}
