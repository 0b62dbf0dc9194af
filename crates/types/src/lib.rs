//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used by the rules engine and by the
//! collaborators around it (renderers, input decoders, persistence). Everything
//! here is plain data: no timing, no I/O.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - Rows above the field (`row < 0`) are a passable spawn area
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep used by the headless runner (~60 FPS) |
//! | `LOCK_DELAY_MS` | 500 | Grounded time before a piece locks |
//! | `LOCK_RESET_LIMIT` | 15 | Max lock timer resets per piece |
//! | `CLEAR_MESSAGE_MS` | 1500 | How long a clear message stays on the HUD |
//!
//! # Gravity by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 0 | 1000ms |
//! | 1 | 800ms |
//! | 2 | 650ms |
//! | 3 | 500ms |
//! | 4 | 400ms |
//! | 5 | 320ms |
//! | 6 | 250ms |
//! | 7 | 200ms |
//! | 8 | 160ms |
//! | 9+ | 120ms |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, GameMode, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::from_index(3), Rotation::West);
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(GameMode::from_str("sprint:20"), Some(GameMode::Sprint { target_lines: 20 }));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Grounded time before the active piece is merged into the board.
pub const LOCK_DELAY_MS: u32 = 500;

/// Maximum number of lock timer resets per piece (15)
pub const LOCK_RESET_LIMIT: u8 = 15;

/// Lifetime of the transient clear message shown after a scoring lock.
pub const CLEAR_MESSAGE_MS: u32 = 1500;

/// Gravity interval per level (milliseconds per row).
///
/// Levels past the end of the table use the last entry.
pub const GRAVITY_TABLE_MS: [u32; 10] = [1000, 800, 650, 500, 400, 320, 250, 200, 160, 120];

/// Lines needed to finish a sprint when no target is configured.
pub const DEFAULT_SPRINT_LINES: u32 = 40;

/// Ultra mode time budget when none is configured (two minutes).
pub const DEFAULT_ULTRA_MS: u32 = 120_000;

/// Lines per level step.
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table (classic scoring)
///
/// Base points for clearing N lines at level 0:
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Full T-spin points for 0..=3 lines at level 0.
pub const TSPIN_FULL_SCORES: [u32; 4] = [100, 200, 400, 800];

/// Mini T-spin points for 0..=2 lines at level 0.
pub const TSPIN_MINI_SCORES: [u32; 3] = [50, 100, 200];

/// Combo scoring base value (50 points per combo step, times level + 1)
pub const COMBO_BASE: u32 = 50;

/// Points per row for a player-initiated soft drop.
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row for a hard drop.
pub const HARD_DROP_POINTS: u32 = 2;

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind once, in table order. A fresh bag starts from this.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Non-zero cell code used by snapshot grids (0 means empty).
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Single uppercase letter, used by the ASCII board dump.
    pub fn glyph(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }
}

/// RGB color of a piece or locked cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form for web-style renderers.
    ///
    /// ```
    /// use blockfall_types::Color;
    ///
    /// assert_eq!(Color::rgb(0, 240, 240).hex(), "#00f0f0");
    /// ```
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Rotation states following the Super Rotation System (SRS)
///
/// - **North**: Spawn orientation (index 0)
/// - **East**: Rotated 90° clockwise (index 1)
/// - **South**: Rotated 180° (index 2)
/// - **West**: Rotated 90° counter-clockwise (index 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Numeric rotation index: 0 = spawn, increasing clockwise.
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Inverse of [`Rotation::index`]; wraps modulo 4.
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Parse rotation from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "north" | "n", "east" | "e", "south" | "s", "west" | "w"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" | "n" => Some(Rotation::North),
            "east" | "e" => Some(Rotation::East),
            "south" | "s" => Some(Rotation::South),
            "west" | "w" => Some(Rotation::West),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Commands an input collaborator can send to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down, or lock it if it is already resting
    SoftDrop,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle pause state
    Pause,
    /// Start a fresh session
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// T-Spin classification
///
/// - **None**: Not a T-spin
/// - **Mini**: 3+ corners filled, but not both front corners and no kick
/// - **Full**: 3+ corners filled and either both front corners filled or the
///   last rotation was kicked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TSpinKind {
    #[default]
    None,
    Mini,
    Full,
}

impl TSpinKind {
    /// Returns `None` for `TSpinKind::None`, `Some("mini")` / `Some("full")` otherwise.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            TSpinKind::None => None,
            TSpinKind::Mini => Some("mini"),
            TSpinKind::Full => Some("full"),
        }
    }

    pub fn is_spin(&self) -> bool {
        !matches!(self, TSpinKind::None)
    }
}

/// The last successful manipulation of the active piece.
///
/// T-spin detection only fires when this is `Rotate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LastAction {
    #[default]
    None,
    Move,
    Rotate,
    Drop,
}

/// Game mode and its end condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GameMode {
    /// Endless play; only a blocked spawn ends the session.
    #[default]
    Marathon,
    /// Finish once `target_lines` lines have been cleared.
    Sprint { target_lines: u32 },
    /// Score as much as possible before `time_limit_ms` of play time runs out.
    Ultra { time_limit_ms: u32 },
}

impl GameMode {
    pub fn sprint() -> Self {
        GameMode::Sprint {
            target_lines: DEFAULT_SPRINT_LINES,
        }
    }

    pub fn ultra() -> Self {
        GameMode::Ultra {
            time_limit_ms: DEFAULT_ULTRA_MS,
        }
    }

    /// Parse a mode name, optionally with a parameter after `:`.
    ///
    /// `sprint:<lines>` sets the line target, `ultra:<seconds>` the time limit.
    ///
    /// ```
    /// use blockfall_types::GameMode;
    ///
    /// assert_eq!(GameMode::from_str("marathon"), Some(GameMode::Marathon));
    /// assert_eq!(GameMode::from_str("ultra:60"), Some(GameMode::Ultra { time_limit_ms: 60_000 }));
    /// assert_eq!(GameMode::from_str("sprint:zero"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        let (name, arg) = match lower.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (lower.as_str(), None),
        };

        match (name, arg) {
            ("marathon", None) => Some(GameMode::Marathon),
            ("sprint", None) => Some(GameMode::sprint()),
            ("sprint", Some(n)) => n
                .parse::<u32>()
                .ok()
                .filter(|&n| n > 0)
                .map(|target_lines| GameMode::Sprint { target_lines }),
            ("ultra", None) => Some(GameMode::ultra()),
            ("ultra", Some(secs)) => secs
                .parse::<u32>()
                .ok()
                .filter(|&s| s > 0)
                .map(|s| GameMode::Ultra {
                    time_limit_ms: s.saturating_mul(1000),
                }),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Marathon => "marathon",
            GameMode::Sprint { .. } => "sprint",
            GameMode::Ultra { .. } => "ultra",
        }
    }
}

/// Lifecycle of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    /// Constructed, waiting for `start`.
    #[default]
    Ready,
    Playing,
    /// A spawned piece collided.
    GameOver,
    /// The mode's goal was reached (sprint target or ultra time-out).
    Completed,
}

impl SessionStatus {
    /// True once the session can no longer change.
    pub fn is_finished(&self) -> bool {
        matches!(self, SessionStatus::GameOver | SessionStatus::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Ready => "ready",
            SessionStatus::Playing => "playing",
            SessionStatus::GameOver => "gameOver",
            SessionStatus::Completed => "completed",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(LOCK_DELAY_MS, 500);
        assert_eq!(LOCK_RESET_LIMIT, 15);
        assert_eq!(GRAVITY_TABLE_MS[0], 1000);
        assert!(GRAVITY_TABLE_MS.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn rotation_index_roundtrip() {
        for i in 0..4u8 {
            assert_eq!(Rotation::from_index(i).index(), i);
        }
        assert_eq!(Rotation::from_index(5), Rotation::East);
        assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    }

    #[test]
    fn mode_parsing() {
        assert_eq!(GameMode::from_str("Sprint"), Some(GameMode::sprint()));
        assert_eq!(
            GameMode::from_str("sprint:10"),
            Some(GameMode::Sprint { target_lines: 10 })
        );
        assert_eq!(GameMode::from_str("sprint:0"), None);
        assert_eq!(GameMode::from_str("ultra"), Some(GameMode::ultra()));
        assert_eq!(GameMode::from_str("zen"), None);
        assert_eq!(GameMode::Ultra { time_limit_ms: 1 }.as_str(), "ultra");
    }

    #[test]
    fn tspin_kind_strings() {
        assert_eq!(TSpinKind::None.as_str(), None);
        assert_eq!(TSpinKind::Mini.as_str(), Some("mini"));
        assert!(TSpinKind::Full.is_spin());
        assert!(!TSpinKind::None.is_spin());
    }
}
