//! Scoring module - line clears, T-spins, combos, drops, levels, gravity
//!
//! All line-clear points scale with `L = level + 1`:
//!
//! | Classification | 0 lines | 1 | 2 | 3 | 4 |
//! |---|---|---|---|---|---|
//! | Normal | - | 40·L | 100·L | 300·L | 1200·L |
//! | T-spin (Full) | 100·L | 200·L | 400·L | 800·L | - |
//! | T-spin (Mini) | 50·L | 100·L | 200·L | - | - |
//!
//! A T-spin line count missing from its table scores as a normal clear.
//! The combo bonus `50 × combo × L` is added only when at least one line
//! cleared.

use crate::types::{
    TSpinKind, COMBO_BASE, GRAVITY_TABLE_MS, HARD_DROP_POINTS, LINES_PER_LEVEL, LINE_SCORES,
    SOFT_DROP_POINTS, TSPIN_FULL_SCORES, TSPIN_MINI_SCORES,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points for the clear itself (normal or T-spin table).
    pub line_clear_score: u32,
    /// Combo bonus added on top of `line_clear_score`.
    pub combo_bonus: u32,
    pub total: u32,
}

fn multiplier(level: u32) -> u32 {
    level.saturating_add(1)
}

/// Calculate line clear score (classic rules)
/// lines: number of lines cleared (1-4)
/// level: current level (0-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(multiplier(level))
}

/// T-spin table lookup; `None` when the table has no entry for `lines`.
pub fn calculate_tspin_score(tspin: TSpinKind, lines: usize, level: u32) -> Option<u32> {
    let base = match tspin {
        TSpinKind::Full => TSPIN_FULL_SCORES.get(lines)?,
        TSpinKind::Mini => TSPIN_MINI_SCORES.get(lines)?,
        TSpinKind::None => return None,
    };
    Some(base.saturating_mul(multiplier(level)))
}

/// Combo bonus for a lock that cleared `lines` with the chain at `combo`.
pub fn calculate_combo_bonus(combo: u32, lines: usize, level: u32) -> u32 {
    if combo == 0 || lines == 0 {
        return 0;
    }
    COMBO_BASE
        .saturating_mul(combo)
        .saturating_mul(multiplier(level))
}

/// Score delta for one lock.
///
/// `combo` is the chain length after this lock has been counted.
pub fn calculate_score(lines: usize, level: u32, tspin: TSpinKind, combo: u32) -> ScoreResult {
    let line_clear_score = calculate_tspin_score(tspin, lines, level)
        .unwrap_or_else(|| calculate_line_score(lines, level));
    let combo_bonus = calculate_combo_bonus(combo, lines, level);

    ScoreResult {
        line_clear_score,
        combo_bonus,
        total: line_clear_score.saturating_add(combo_bonus),
    }
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells.saturating_mul(HARD_DROP_POINTS)
    } else {
        cells.saturating_mul(SOFT_DROP_POINTS)
    }
}

/// Level from total lines, never below the configured starting level.
pub fn calculate_level(total_lines: u32, starting_level: u32) -> u32 {
    (total_lines / LINES_PER_LEVEL).max(starting_level)
}

/// Gravity interval for a level; levels past the table use its last entry.
pub fn gravity_interval_ms(level: u32) -> u32 {
    let last = GRAVITY_TABLE_MS.len() - 1;
    GRAVITY_TABLE_MS[(level as usize).min(last)]
}

/// HUD text for a lock, or `None` when nothing worth announcing happened.
pub fn describe_clear(lines: usize, tspin: TSpinKind, combo: u32) -> Option<String> {
    let count_word = match lines {
        0 => None,
        1 => Some("SINGLE"),
        2 => Some("DOUBLE"),
        3 => Some("TRIPLE"),
        _ => Some("TETRIS"),
    };

    let mut text = match (tspin, count_word) {
        (TSpinKind::None, None) => return None,
        (TSpinKind::None, Some(word)) => word.to_string(),
        (TSpinKind::Full, None) => "T-SPIN".to_string(),
        (TSpinKind::Full, Some(word)) => format!("T-SPIN {word}"),
        (TSpinKind::Mini, None) => "MINI T-SPIN".to_string(),
        (TSpinKind::Mini, Some(word)) => format!("MINI T-SPIN {word}"),
    };

    if lines > 0 && combo >= 2 {
        text.push_str(&format!(" COMBO x{combo}"));
    }
    Some(text)
}
