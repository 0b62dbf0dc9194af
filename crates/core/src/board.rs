//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind of the
//! piece that filled it. Storage is a flat row-major array.
//!
//! Coordinates are `(row, col)`: row 0 is the top visible row, row 19 the
//! floor; col 0 is the left wall. For collision purposes a column outside
//! `0..10` or a row at or below 20 is always occupied, while rows above the
//! field (`row < 0`) are always free, so freshly spawned pieces may poke out
//! of the top.

use std::fmt;

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::pieces::{mask_cells, Mask};
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const ROWS: usize = BOARD_HEIGHT as usize;
const COLS: usize = BOARD_WIDTH as usize;

/// Original indices of cleared rows, bottom to top.
pub type ClearedRows = ArrayVec<usize, ROWS>;

/// Result of [`Board::clear_full_lines`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineClear {
    pub count: usize,
    /// Row indices as they were before compaction, in bottom-to-top scan order.
    pub rows: ClearedRows,
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board from text rows, bottom-aligned.
    ///
    /// `.` or space is empty; any other character fills the cell. A letter
    /// naming a piece kind keeps that kind, anything else is stored as `I`.
    /// Rows longer than the board are truncated, extra rows drop off the top.
    ///
    /// ```
    /// use blockfall_core::Board;
    ///
    /// let board = Board::from_rows(&["#########."]);
    /// assert!(board.is_occupied(19, 0));
    /// assert!(!board.is_occupied(19, 9));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let skip = rows.len().saturating_sub(ROWS);
        let first_row = ROWS - (rows.len() - skip);
        for (i, text) in rows.iter().skip(skip).enumerate() {
            let row = first_row + i;
            for (col, ch) in text.chars().take(COLS).enumerate() {
                let cell = match ch {
                    '.' | ' ' => None,
                    other => Some(
                        PieceKind::from_str(&other.to_string()).unwrap_or(PieceKind::I),
                    ),
                };
                board.cells[row * COLS + col] = cell;
            }
        }
        board
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= BOARD_HEIGHT as i8 || col < 0 || col >= BOARD_WIDTH as i8 {
            return None;
        }
        Some((row as usize) * COLS + (col as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at position (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Collision occupancy: walls and floor are solid, the area above the
    /// field is open.
    #[inline]
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        if col < 0 || col >= BOARD_WIDTH as i8 || row >= BOARD_HEIGHT as i8 {
            return true;
        }
        if row < 0 {
            return false;
        }
        self.cells[(row as usize) * COLS + (col as usize)].is_some()
    }

    /// Whether `mask` anchored at `(row, col)` overlaps nothing.
    pub fn fits(&self, mask: &Mask, row: i8, col: i8) -> bool {
        mask_cells(mask).all(|(r, c)| !self.is_occupied(row + r, col + c))
    }

    /// Whether `piece` could be translated by `(dx, dy)` without colliding.
    /// Pure; the piece is not moved.
    pub fn can_move(&self, piece: &Piece, dx: i8, dy: i8) -> bool {
        self.fits(piece.mask(), piece.row() + dy, piece.col() + dx)
    }

    /// Rows the piece can fall before it rests on something.
    pub fn drop_distance(&self, piece: &Piece) -> i8 {
        let mut distance = 0;
        while distance < BOARD_HEIGHT as i8 + 4 && self.can_move(piece, 0, distance + 1) {
            distance += 1;
        }
        distance
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= ROWS {
            return false;
        }
        let start = row * COLS;
        self.cells[start..start + COLS].iter().all(|cell| cell.is_some())
    }

    /// Merge `piece` into the board at its current position.
    ///
    /// Cells above the field are dropped. Returns the number of cells written.
    pub fn lock_piece(&mut self, piece: &Piece) -> usize {
        let kind = piece.kind();
        let mut written = 0;
        for (row, col) in piece.cells() {
            if row < 0 {
                continue;
            }
            if self.set(row, col, Some(kind)) {
                written += 1;
            }
        }
        written
    }

    /// Remove every full row and compact the rest downward.
    ///
    /// Two-pointer pass from the bottom: surviving rows keep their relative
    /// order and empty rows are inserted at the top, so the row count never
    /// changes.
    pub fn clear_full_lines(&mut self) -> LineClear {
        let mut rows = ClearedRows::new();
        let mut write_row = ROWS;

        for read_row in (0..ROWS).rev() {
            if self.is_row_full(read_row) {
                rows.push(read_row);
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * COLS;
                    self.cells.copy_within(src..src + COLS, write_row * COLS);
                }
            }
        }

        for cell in &mut self.cells[..write_row * COLS] {
            *cell = None;
        }

        LineClear {
            count: rows.len(),
            rows,
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(COLS)
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                let ch = cell.map(|kind| kind.glyph()).unwrap_or('.');
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
