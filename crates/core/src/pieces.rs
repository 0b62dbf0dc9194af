//! Pieces module - shape table and SRS wall kick tables
//!
//! Every kind is stored as a 4x4 boolean mask in its spawn orientation, plus
//! the size of the square box it rotates in (I: 4, O: 2, everything else: 3).
//! Rotating inside the kind's own box keeps the T pivot at mask cell (1, 1) in
//! all four orientations.
//!
//! Kick offsets are `(dx, dy)` in board coordinates: `dx` grows to the right,
//! `dy` grows downward. They are the guideline SRS offsets with the vertical
//! component flipped (the guideline tables are written y-up).
//! Reference: https://tetris.wiki/SRS

use crate::types::{Color, PieceKind, Rotation};

/// A 4x4 occupancy mask, indexed `[row][col]`.
pub type Mask = [[bool; 4]; 4];

/// Ordered kick offsets for one rotation transition; entry 0 is always `(0, 0)`.
pub type KickList = [(i8, i8); 5];

/// One row of a kick table: transition plus its offsets.
pub type KickEntry = (Rotation, Rotation, KickList);

const fn parse_mask(rows: [&str; 4]) -> Mask {
    let mut mask = [[false; 4]; 4];
    let mut r = 0;
    while r < 4 {
        let bytes = rows[r].as_bytes();
        let mut c = 0;
        while c < bytes.len() && c < 4 {
            mask[r][c] = bytes[c] == b'#';
            c += 1;
        }
        r += 1;
    }
    mask
}

const I_MASK: Mask = parse_mask(["....", "####", "....", "...."]);
const O_MASK: Mask = parse_mask(["##", "##", "", ""]);
const T_MASK: Mask = parse_mask([".#.", "###", "...", ""]);
const S_MASK: Mask = parse_mask([".##", "##.", "...", ""]);
const Z_MASK: Mask = parse_mask(["##.", ".##", "...", ""]);
const J_MASK: Mask = parse_mask(["#..", "###", "...", ""]);
const L_MASK: Mask = parse_mask(["..#", "###", "...", ""]);

/// Spawn-orientation mask for a kind.
pub fn spawn_mask(kind: PieceKind) -> Mask {
    match kind {
        PieceKind::I => I_MASK,
        PieceKind::O => O_MASK,
        PieceKind::T => T_MASK,
        PieceKind::S => S_MASK,
        PieceKind::Z => Z_MASK,
        PieceKind::J => J_MASK,
        PieceKind::L => L_MASK,
    }
}

/// Side length of the square the kind rotates in.
pub fn box_size(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::I => 4,
        PieceKind::O => 2,
        PieceKind::T | PieceKind::S | PieceKind::Z | PieceKind::J | PieceKind::L => 3,
    }
}

/// Display color for a kind.
pub fn color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::rgb(0x00, 0xf0, 0xf0),
        PieceKind::O => Color::rgb(0xf0, 0xf0, 0x00),
        PieceKind::T => Color::rgb(0xa0, 0x00, 0xf0),
        PieceKind::S => Color::rgb(0x00, 0xf0, 0x00),
        PieceKind::Z => Color::rgb(0xf0, 0x00, 0x00),
        PieceKind::J => Color::rgb(0x00, 0x00, 0xf0),
        PieceKind::L => Color::rgb(0xf0, 0xa0, 0x00),
    }
}

/// Rotate the top-left `size`x`size` box of a mask 90° clockwise.
pub fn rotate_mask_cw(mask: &Mask, size: u8) -> Mask {
    let n = size as usize;
    let mut out = [[false; 4]; 4];
    for (r, row) in out.iter_mut().enumerate().take(n) {
        for (c, cell) in row.iter_mut().enumerate().take(n) {
            *cell = mask[n - 1 - c][r];
        }
    }
    out
}

/// Rotate the top-left `size`x`size` box of a mask 90° counter-clockwise.
pub fn rotate_mask_ccw(mask: &Mask, size: u8) -> Mask {
    let n = size as usize;
    let mut out = [[false; 4]; 4];
    for (r, row) in out.iter_mut().enumerate().take(n) {
        for (c, cell) in row.iter_mut().enumerate().take(n) {
            *cell = mask[c][n - 1 - r];
        }
    }
    out
}

/// Mask of `kind` at `rotation`, derived from the spawn mask.
pub fn mask_for(kind: PieceKind, rotation: Rotation) -> Mask {
    let size = box_size(kind);
    let mut mask = spawn_mask(kind);
    if kind == PieceKind::O {
        return mask;
    }
    for _ in 0..rotation.index() {
        mask = rotate_mask_cw(&mask, size);
    }
    mask
}

/// Filled cells of a mask as `(row, col)` offsets, row-major.
pub fn mask_cells(mask: &Mask) -> impl Iterator<Item = (i8, i8)> + '_ {
    mask.iter().enumerate().flat_map(|(r, row)| {
        row.iter()
            .enumerate()
            .filter(|&(_, &filled)| filled)
            .map(move |(c, _)| (r as i8, c as i8))
    })
}

/// JLSTZ kick table (shared by J, L, S, T, Z)
pub const JLSTZ_KICKS: [KickEntry; 8] = [
    (Rotation::North, Rotation::East, [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]),
    (Rotation::East, Rotation::North, [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]),
    (Rotation::East, Rotation::South, [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]),
    (Rotation::South, Rotation::East, [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]),
    (Rotation::South, Rotation::West, [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]),
    (Rotation::West, Rotation::South, [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]),
    (Rotation::West, Rotation::North, [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]),
    (Rotation::North, Rotation::West, [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]),
];

/// I piece kick table (different from JLSTZ)
pub const I_KICKS: [KickEntry; 8] = [
    (Rotation::North, Rotation::East, [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)]),
    (Rotation::East, Rotation::North, [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)]),
    (Rotation::East, Rotation::South, [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)]),
    (Rotation::South, Rotation::East, [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)]),
    (Rotation::South, Rotation::West, [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)]),
    (Rotation::West, Rotation::South, [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)]),
    (Rotation::West, Rotation::North, [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)]),
    (Rotation::North, Rotation::West, [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)]),
];

/// Kick table for a kind; `None` for O, which never rotates.
pub fn kick_table(kind: PieceKind) -> Option<&'static [KickEntry; 8]> {
    match kind {
        PieceKind::O => None,
        PieceKind::I => Some(&I_KICKS),
        PieceKind::T | PieceKind::S | PieceKind::Z | PieceKind::J | PieceKind::L => {
            Some(&JLSTZ_KICKS)
        }
    }
}

/// Offsets to try for `from -> to`, or `None` when the table has no such
/// transition (O pieces, or a non-adjacent pair such as North -> South).
pub fn kick_offsets(kind: PieceKind, from: Rotation, to: Rotation) -> Option<&'static KickList> {
    kick_table(kind)?
        .iter()
        .find(|(f, t, _)| *f == from && *t == to)
        .map(|(_, _, kicks)| kicks)
}
