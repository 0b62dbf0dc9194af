//! Game state module - the rules engine
//!
//! This module ties together the board, the active piece, the bag, scoring and
//! the profile store. It handles gravity and lock timing, the command API,
//! the lock/line-clear sequence, modes and the session lifecycle.
//!
//! Time only moves through [`GameState::tick`]. Commands are synchronous and
//! return `false` when they had no effect.

use tracing::{debug, info, warn};

use crate::bag::PieceBag;
use crate::board::Board;
use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::piece::Piece;
use crate::profile::{NullStore, Profile, ProfileStore};
use crate::scoring::{
    calculate_drop_score, calculate_level, calculate_score, describe_clear, gravity_interval_ms,
};
use crate::snapshot::{board_grid, ActiveSnapshot, GameSnapshot, TimersSnapshot};
use crate::tspin::classify_tspin;
use crate::types::*;

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState<S: ProfileStore = NullStore> {
    config: GameConfig,
    seed: u64,
    store: S,
    profile: Profile,
    board: Board,
    bag: PieceBag,
    active: Option<Piece>,
    next: PieceKind,
    status: SessionStatus,
    paused: bool,
    score: u32,
    high_score: u32,
    /// Set when `high_score` moved past the persisted value.
    high_score_dirty: bool,
    level: u32,
    lines: u32,
    combo: u32,
    gravity_ms: u32,
    lock_timer_ms: u32,
    lock_resets: u8,
    on_ground: bool,
    last_action: LastAction,
    last_kick: bool,
    /// Play time; paused time is not counted.
    elapsed_ms: u64,
    clear_message: Option<String>,
    clear_message_ms: u32,
    events: Vec<GameEvent>,
}

impl GameState<NullStore> {
    /// Create a marathon game with the given bag seed and no persistence
    pub fn new(seed: u64) -> Self {
        Self::with_store(GameConfig::default().with_seed(seed), NullStore)
    }
}

impl Default for GameState<NullStore> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<S: ProfileStore> GameState<S> {
    /// Create a game backed by `store`. The profile is loaded once, here.
    pub fn with_store(config: GameConfig, store: S) -> Self {
        let profile = store.load();
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut bag = PieceBag::new(seed);
        let next = bag.draw();

        Self {
            config,
            seed,
            store,
            high_score: profile.high_score,
            profile,
            board: Board::new(),
            bag,
            active: None,
            next,
            status: SessionStatus::Ready,
            paused: false,
            score: 0,
            high_score_dirty: false,
            level: config.starting_level,
            lines: 0,
            combo: 0,
            gravity_ms: 0,
            lock_timer_ms: 0,
            lock_resets: 0,
            on_ground: false,
            last_action: LastAction::None,
            last_kick: false,
            elapsed_ms: 0,
            clear_message: None,
            clear_message_ms: 0,
            events: Vec::new(),
        }
    }

    /// Create a game whose configuration comes from the stored profile.
    pub fn from_store(store: S) -> Self {
        let config = GameConfig::from_profile(&store.load());
        Self::with_store(config, store)
    }

    /// Replace the board before the session starts (puzzles, tests).
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Start the session and spawn the first piece
    pub fn start(&mut self) {
        if self.status != SessionStatus::Ready {
            return;
        }
        self.status = SessionStatus::Playing;
        debug!(seed = self.seed, mode = self.config.mode.as_str(), "session started");
        self.spawn_next();
    }

    /// Throw away the session and start a fresh one.
    ///
    /// Board, bag and session counters are reset; the configuration and the
    /// high score are kept. An unfinished session still counts as played.
    pub fn restart(&mut self) {
        if self.status == SessionStatus::Playing {
            self.record_session();
        }

        self.board.clear();
        self.bag.reset();
        self.next = self.bag.draw();
        self.active = None;
        self.status = SessionStatus::Ready;
        self.paused = false;
        self.score = 0;
        self.level = self.config.starting_level;
        self.lines = 0;
        self.combo = 0;
        self.gravity_ms = 0;
        self.elapsed_ms = 0;
        self.clear_message = None;
        self.clear_message_ms = 0;
        self.reset_piece_state();

        self.start();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn last_action(&self) -> LastAction {
        self.last_action
    }

    pub fn last_kick(&self) -> bool {
        self.last_kick
    }

    pub fn lock_timer_ms(&self) -> u32 {
        self.lock_timer_ms
    }

    pub fn lock_resets(&self) -> u8 {
        self.lock_resets
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn clear_message(&self) -> Option<&str> {
        self.clear_message.as_deref()
    }

    /// Lines left in a sprint.
    pub fn lines_remaining(&self) -> Option<u32> {
        match self.config.mode {
            GameMode::Sprint { target_lines } => Some(target_lines.saturating_sub(self.lines)),
            _ => None,
        }
    }

    /// Play time left in ultra.
    pub fn time_remaining_ms(&self) -> Option<u32> {
        match self.config.mode {
            GameMode::Ultra { time_limit_ms } => {
                let left = u64::from(time_limit_ms).saturating_sub(self.elapsed_ms);
                Some(left as u32)
            }
            _ => None,
        }
    }

    /// Row the active piece would land on; `None` with ghosts disabled.
    pub fn ghost_row(&self) -> Option<i8> {
        if !self.config.ghost_enabled {
            return None;
        }
        let piece = self.active.as_ref()?;
        Some(piece.row() + self.board.drop_distance(piece))
    }

    /// Check if the active piece can move in the given direction
    pub fn can_move(&self, dx: i8, dy: i8) -> bool {
        match self.active {
            Some(ref piece) => self.board.can_move(piece, dx, dy),
            None => false,
        }
    }

    /// Take every event published since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: board_grid(&self.board),
            active: self.active.as_ref().map(ActiveSnapshot::from),
            ghost_row: self.ghost_row(),
            next: self.next,
            status: self.status,
            paused: self.paused,
            mode: self.config.mode,
            seed: self.seed,
            score: self.score,
            high_score: self.high_score,
            level: self.level,
            lines: self.lines,
            combo: self.combo,
            lines_remaining: self.lines_remaining(),
            time_remaining_ms: self.time_remaining_ms(),
            clear_message: self.clear_message.clone(),
            timers: TimersSnapshot {
                gravity_ms: self.gravity_ms,
                lock_ms: self.lock_timer_ms,
                lock_resets: self.lock_resets,
                elapsed_ms: self.elapsed_ms,
            },
        }
    }

    fn can_act(&self) -> bool {
        self.status == SessionStatus::Playing && !self.paused
    }

    fn reset_piece_state(&mut self) {
        self.gravity_ms = 0;
        self.lock_timer_ms = 0;
        self.lock_resets = 0;
        self.on_ground = false;
        self.last_action = LastAction::None;
        self.last_kick = false;
    }

    /// Spawn the queued kind and queue the next one.
    ///
    /// A collision at the spawn position ends the session without touching the
    /// board.
    fn spawn_next(&mut self) -> bool {
        let kind = self.next;
        self.next = self.bag.draw();
        self.reset_piece_state();

        let piece = Piece::spawn(kind);
        if !self.board.can_move(&piece, 0, 0) {
            self.active = None;
            self.finish(SessionStatus::GameOver);
            return false;
        }

        debug!(kind = kind.as_str(), next = self.next.as_str(), "spawned");
        self.active = Some(piece);
        true
    }

    /// Main game tick - advance timers, gravity and lock delay
    ///
    /// Returns true when the active piece moved, locked, or the session ended.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.can_act() {
            return false;
        }

        self.elapsed_ms += u64::from(elapsed_ms);

        if self.clear_message_ms > 0 {
            self.clear_message_ms = self.clear_message_ms.saturating_sub(elapsed_ms);
            if self.clear_message_ms == 0 {
                self.clear_message = None;
            }
        }

        if let GameMode::Ultra { time_limit_ms } = self.config.mode {
            if self.elapsed_ms >= u64::from(time_limit_ms) {
                self.finish(SessionStatus::Completed);
                return true;
            }
        }

        let Some(piece) = self.active else {
            return false;
        };

        if !self.board.can_move(&piece, 0, 1) {
            if !self.on_ground {
                self.on_ground = true;
                self.lock_timer_ms = 0;
            }
            self.lock_timer_ms = self.lock_timer_ms.saturating_add(elapsed_ms);

            if self.lock_timer_ms >= LOCK_DELAY_MS {
                self.lock_active();
                return true;
            }
            return false;
        }

        self.on_ground = false;
        self.lock_timer_ms = 0;
        self.gravity_ms = self.gravity_ms.saturating_add(elapsed_ms);

        let interval = gravity_interval_ms(self.level);
        if self.gravity_ms < interval {
            return false;
        }
        self.gravity_ms -= interval;

        if let Some(piece) = self.active.as_mut() {
            piece.translate(0, 1);
        }
        self.last_action = LastAction::Drop;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    fn shift(&mut self, dx: i8) -> bool {
        if !self.can_act() {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if !self.board.can_move(piece, dx, 0) {
            return false;
        }

        piece.translate(dx, 0);
        self.last_action = LastAction::Move;
        self.reset_lock_delay();
        true
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.rotate(true)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.rotate(false)
    }

    fn rotate(&mut self, clockwise: bool) -> bool {
        if !self.can_act() {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let Some(rotated) = piece.try_rotate(&self.board, clockwise) else {
            return false;
        };

        self.last_action = LastAction::Rotate;
        self.last_kick = rotated.kicked();
        self.reset_lock_delay();
        true
    }

    /// Lock delay reset, capped per piece. Past the cap the running countdown
    /// keeps going.
    fn reset_lock_delay(&mut self) {
        if self.on_ground && self.lock_resets < LOCK_RESET_LIMIT {
            self.lock_timer_ms = 0;
            self.lock_resets += 1;
        }
    }

    /// Move down one row for a point, or lock at once if resting.
    pub fn soft_drop(&mut self) -> bool {
        if !self.can_act() {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        if self.board.can_move(piece, 0, 1) {
            piece.translate(0, 1);
            self.last_action = LastAction::Drop;
            self.add_score(calculate_drop_score(1, false));
        } else {
            self.lock_active();
        }
        true
    }

    /// Drop to the landing row and lock immediately.
    ///
    /// A hard-dropped piece never scores as a T-spin, even when it was
    /// already resting.
    pub fn hard_drop(&mut self) -> bool {
        if !self.can_act() {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        let distance = self.board.drop_distance(piece);
        if distance > 0 {
            piece.translate(0, distance);
            self.add_score(calculate_drop_score(distance as u32, true));
        }
        self.last_action = LastAction::Drop;
        self.lock_active();
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.status != SessionStatus::Playing {
            return false;
        }
        self.paused = !self.paused;
        debug!(paused = self.paused, "pause toggled");
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
            self.high_score_dirty = true;
        }
    }

    /// Lock the active piece onto the board and handle line clears
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        let tspin = classify_tspin(&self.board, &piece, self.last_action, self.last_kick);
        self.board.lock_piece(&piece);
        let clear = self.board.clear_full_lines();
        let count = clear.count;

        let previous_combo = self.combo;
        self.combo = if count > 0 { self.combo + 1 } else { 0 };

        let result = calculate_score(count, self.level, tspin, self.combo);
        self.add_score(result.total);

        debug!(
            kind = piece.kind().as_str(),
            lines = count,
            tspin = tspin.as_str().unwrap_or("none"),
            points = result.total,
            "piece locked"
        );
        self.events.push(GameEvent::PieceLocked {
            kind: piece.kind(),
            tspin,
        });
        if count > 0 || tspin.is_spin() {
            self.events.push(GameEvent::LinesCleared {
                count,
                rows: clear.rows,
                tspin,
                score_delta: result.total,
            });
        }
        if self.combo != previous_combo {
            self.events.push(GameEvent::ComboChanged { combo: self.combo });
        }

        if let Some(text) = describe_clear(count, tspin, self.combo) {
            self.clear_message = Some(text);
            self.clear_message_ms = CLEAR_MESSAGE_MS;
        }

        let stats = &mut self.profile.statistics;
        stats.total_lines += count as u64;
        if count == 4 {
            stats.tetrises += 1;
        }
        if tspin.is_spin() {
            stats.tspins += 1;
        }

        self.lines += count as u32;
        let level = calculate_level(self.lines, self.config.starting_level);
        if level > self.level {
            self.level = level;
            info!(level, lines = self.lines, "level up");
            self.events.push(GameEvent::LevelUp { level });
        }

        if self.high_score_dirty {
            self.persist();
        }

        if let GameMode::Sprint { target_lines } = self.config.mode {
            if self.lines >= target_lines {
                self.finish(SessionStatus::Completed);
                return;
            }
        }

        self.spawn_next();
    }

    /// Move into a terminal status and record the session.
    fn finish(&mut self, status: SessionStatus) {
        self.status = status;
        match status {
            SessionStatus::GameOver => {
                info!(score = self.score, lines = self.lines, "game over");
                self.events.push(GameEvent::GameOver {
                    score: self.score,
                    lines: self.lines,
                });
            }
            SessionStatus::Completed => {
                info!(
                    mode = self.config.mode.as_str(),
                    score = self.score,
                    elapsed_ms = self.elapsed_ms,
                    "mode completed"
                );
                self.events.push(GameEvent::ModeWon {
                    mode: self.config.mode,
                    score: self.score,
                    lines: self.lines,
                    elapsed_ms: self.elapsed_ms,
                });
            }
            SessionStatus::Ready | SessionStatus::Playing => return,
        }
        self.record_session();
    }

    fn record_session(&mut self) {
        let stats = &mut self.profile.statistics;
        stats.games_played += 1;
        if self.status == SessionStatus::Completed
            && matches!(self.config.mode, GameMode::Sprint { .. })
        {
            stats.record_sprint(self.elapsed_ms);
        }
        self.persist();
    }

    fn persist(&mut self) {
        self.profile.high_score = self.profile.high_score.max(self.high_score);
        self.high_score_dirty = false;
        if let Err(err) = self.store.save(&self.profile) {
            warn!("failed to save profile: {err:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::MemoryStore;

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    /// Soft drop until the active piece rests on something.
    fn ground(state: &mut GameState) {
        while state.can_move(0, 1) {
            assert!(state.soft_drop());
        }
    }

    fn locked_count(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::PieceLocked { .. }))
            .count()
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);
        assert_eq!(state.status(), SessionStatus::Ready);
        assert!(state.active().is_none());
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 0);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.seed(), 12345);
    }

    #[test]
    fn test_game_start() {
        let mut state = GameState::new(12345);
        let queued = state.next();
        state.start();

        assert_eq!(state.status(), SessionStatus::Playing);
        let piece = state.active().unwrap();
        assert_eq!(piece.kind(), queued);
        assert_eq!(piece.row(), -1);

        // Starting twice does nothing.
        state.start();
        assert_eq!(state.active().unwrap().kind(), queued);
    }

    #[test]
    fn test_same_seed_same_pieces() {
        let mut a = started(77);
        let mut b = started(77);
        for _ in 0..10 {
            assert_eq!(a.active().map(Piece::kind), b.active().map(Piece::kind));
            assert_eq!(a.next(), b.next());
            a.hard_drop();
            b.hard_drop();
        }
    }

    #[test]
    fn test_commands_ignored_before_start() {
        let mut state = GameState::new(1);
        assert!(!state.move_left());
        assert!(!state.rotate_cw());
        assert!(!state.hard_drop());
        assert!(!state.toggle_pause());
        assert!(!state.tick(1000));
    }

    #[test]
    fn test_move_and_wall() {
        let mut state = started(12345);
        let col = state.active().unwrap().col();

        assert!(state.move_right());
        assert_eq!(state.active().unwrap().col(), col + 1);
        assert_eq!(state.last_action(), LastAction::Move);

        while state.move_left() {}
        let at_wall = state.active().unwrap().col();
        assert!(!state.move_left());
        assert_eq!(state.active().unwrap().col(), at_wall);
    }

    #[test]
    fn test_gravity_moves_one_row_per_interval() {
        let mut state = started(12345);
        let row = state.active().unwrap().row();

        assert!(!state.tick(999));
        assert_eq!(state.active().unwrap().row(), row);

        assert!(state.tick(1));
        assert_eq!(state.active().unwrap().row(), row + 1);
        assert_eq!(state.last_action(), LastAction::Drop);
    }

    #[test]
    fn test_soft_drop_scores_and_locks_when_resting() {
        let mut state = started(12345);
        assert!(state.soft_drop());
        assert_eq!(state.score(), 1);

        ground(&mut state);
        let score = state.score();
        state.drain_events();

        assert!(state.soft_drop());
        assert_eq!(state.score(), score);
        assert_eq!(locked_count(&state.drain_events()), 1);
    }

    #[test]
    fn test_hard_drop_scores_two_per_row() {
        let mut state = started(12345);
        let piece = *state.active().unwrap();
        let distance = state.board().drop_distance(&piece);

        assert!(state.hard_drop());
        assert_eq!(state.score(), 2 * distance as u32);
        assert_eq!(state.board().filled_count(), 4);
        assert_eq!(state.last_action(), LastAction::None); // fresh piece
    }

    #[test]
    fn test_lock_delay_exactly_500ms() {
        let mut state = started(12345);
        ground(&mut state);
        state.drain_events();

        for _ in 0..49 {
            assert!(!state.tick(10));
        }
        assert!(state.on_ground());
        assert_eq!(state.lock_timer_ms(), 490);
        assert!(state.drain_events().is_empty());

        assert!(state.tick(10));
        assert_eq!(locked_count(&state.drain_events()), 1);
    }

    #[test]
    fn test_lock_reset_soft_cap() {
        let mut state = started(12345);
        ground(&mut state);
        state.drain_events();
        state.tick(10);

        for i in 0..LOCK_RESET_LIMIT {
            assert!(!state.tick(400));
            let moved = if i % 2 == 0 {
                state.move_left()
            } else {
                state.move_right()
            };
            assert!(moved);
            assert_eq!(state.lock_timer_ms(), 0);
        }
        assert_eq!(state.lock_resets(), LOCK_RESET_LIMIT);

        // Past the cap a move no longer resets the countdown.
        assert!(!state.tick(400));
        assert!(state.move_left());
        assert_eq!(state.lock_timer_ms(), 400);
        assert_eq!(state.lock_resets(), LOCK_RESET_LIMIT);

        assert!(state.tick(100));
        assert_eq!(locked_count(&state.drain_events()), 1);
        assert_eq!(state.lock_resets(), 0);
    }

    #[test]
    fn test_airborne_moves_do_not_spend_resets() {
        let mut state = started(12345);
        assert!(state.move_left());
        assert!(state.move_right());
        assert_eq!(state.lock_resets(), 0);
    }

    #[test]
    fn test_tspin_double_through_engine() {
        let board = Board::from_rows(&["####......", "###...####", "####.#####"]);
        let mut state = GameState::new(5).with_board(board);
        state.start();
        state.drain_events();

        state.active = Some(Piece::at(PieceKind::T, Rotation::East, 17, 3));
        assert!(state.rotate_cw());
        assert_eq!(state.active().unwrap().rotation(), Rotation::South);
        assert!(!state.last_kick());

        // Resting after the turn, so a soft drop locks without moving.
        assert!(!state.can_move(0, 1));
        assert!(state.soft_drop());
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PieceLocked {
            kind: PieceKind::T,
            tspin: TSpinKind::Full,
        }));

        let cleared = events
            .iter()
            .find_map(|e| match e {
                GameEvent::LinesCleared {
                    count,
                    rows,
                    tspin,
                    score_delta,
                } => Some((*count, rows.to_vec(), *tspin, *score_delta)),
                _ => None,
            })
            .unwrap();
        // T-spin double (400) plus a first combo step (50).
        assert_eq!(cleared, (2, vec![19, 18], TSpinKind::Full, 450));
        assert_eq!(state.lines(), 2);
        assert_eq!(state.combo(), 1);
        assert_eq!(state.clear_message(), Some("T-SPIN DOUBLE"));
        assert_eq!(state.profile().statistics.tspins, 1);
    }

    #[test]
    fn test_tspin_expires_through_lock_delay() {
        let board = Board::from_rows(&["####......", "###...####", "####.#####"]);
        let mut state = GameState::new(5).with_board(board);
        state.start();
        state.drain_events();

        state.active = Some(Piece::at(PieceKind::T, Rotation::East, 17, 3));
        assert!(state.rotate_cw());
        for _ in 0..(LOCK_DELAY_MS / 10) {
            state.tick(10);
        }

        assert!(state.drain_events().contains(&GameEvent::PieceLocked {
            kind: PieceKind::T,
            tspin: TSpinKind::Full,
        }));
        assert_eq!(state.lines(), 2);
    }

    #[test]
    fn test_hard_drop_in_place_is_not_a_tspin() {
        let board = Board::from_rows(&["####......", "###...####", "####.#####"]);
        let mut state = GameState::new(5).with_board(board);
        state.start();
        state.drain_events();

        state.active = Some(Piece::at(PieceKind::T, Rotation::East, 17, 3));
        assert!(state.rotate_cw());
        assert_eq!(state.last_action(), LastAction::Rotate);
        assert_eq!(state.board().drop_distance(state.active().unwrap()), 0);
        let score_before = state.score();

        assert!(state.hard_drop());
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PieceLocked {
            kind: PieceKind::T,
            tspin: TSpinKind::None,
        }));
        // Plain double at level 0 plus the first combo step, no drop points.
        assert_eq!(state.score() - score_before, 100 + 50);
        assert_eq!(state.profile().statistics.tspins, 0);
    }

    #[test]
    fn test_combo_resets_on_empty_lock() {
        let board = Board::from_rows(&["####..####", "####..####"]);
        let mut state = GameState::new(5).with_board(board);
        state.start();

        state.active = Some(Piece::at(PieceKind::O, Rotation::North, 5, 4));
        state.hard_drop();
        assert_eq!(state.combo(), 1);

        state.hard_drop();
        assert_eq!(state.combo(), 0);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::ComboChanged { combo: 1 }));
        assert!(events.contains(&GameEvent::ComboChanged { combo: 0 }));
    }

    #[test]
    fn test_game_over_leaves_board_untouched() {
        let rows: Vec<String> = (0..20).map(|_| "#########.".to_string()).collect();
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        let board = Board::from_rows(&refs);

        let mut state = GameState::new(3).with_board(board.clone());
        state.start();

        assert_eq!(state.status(), SessionStatus::GameOver);
        assert!(state.active().is_none());
        assert_eq!(state.board(), &board);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameOver { score: 0, lines: 0 }]
        );
        assert!(!state.hard_drop());
        assert!(!state.tick(1000));
    }

    #[test]
    fn test_pause_freezes_timers() {
        let mut state = started(12345);
        state.tick(500);
        let row = state.active().unwrap().row();

        assert!(state.toggle_pause());
        assert!(!state.tick(5000));
        assert!(!state.move_left());
        assert_eq!(state.active().unwrap().row(), row);
        assert_eq!(state.elapsed_ms(), 500);

        assert!(state.toggle_pause());
        assert!(state.tick(500));
        assert_eq!(state.active().unwrap().row(), row + 1);
    }

    #[test]
    fn test_sprint_completes_at_target() {
        let board = Board::from_rows(&["####..####", "####..####"]);
        let config = GameConfig::default()
            .with_seed(4)
            .with_mode(GameMode::Sprint { target_lines: 2 });
        let mut state = GameState::with_store(config, MemoryStore::default()).with_board(board);
        state.start();
        assert_eq!(state.lines_remaining(), Some(2));

        state.tick(2000);
        state.active = Some(Piece::at(PieceKind::O, Rotation::North, 5, 4));
        state.hard_drop();

        assert_eq!(state.status(), SessionStatus::Completed);
        assert_eq!(state.lines_remaining(), Some(0));
        assert!(state.active().is_none());
        assert!(state
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::ModeWon { lines: 2, .. })));

        let stats = &state.store().profile().statistics;
        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.best_sprint_ms, Some(2000));
    }

    #[test]
    fn test_ultra_times_out() {
        let config = GameConfig::default()
            .with_seed(8)
            .with_mode(GameMode::Ultra { time_limit_ms: 1000 });
        let mut state = GameState::with_store(config, NullStore);
        state.start();

        let mut ticks = 0;
        while state.status() == SessionStatus::Playing {
            state.tick(TICK_MS);
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(state.status(), SessionStatus::Completed);
        assert_eq!(state.time_remaining_ms(), Some(0));
        assert_eq!(ticks, 63); // 63 * 16 = 1008
    }

    #[test]
    fn test_level_up_from_starting_level() {
        let config = GameConfig::default().with_seed(2).with_starting_level(3);
        let state = GameState::with_store(config, NullStore);
        assert_eq!(state.level(), 3);
        assert_eq!(state.snapshot().level, 3);
    }

    #[test]
    fn test_high_score_persisted() {
        let store = MemoryStore::new(Profile {
            high_score: 10,
            ..Profile::default()
        });
        let mut state = GameState::with_store(GameConfig::default().with_seed(6), store);
        state.start();
        assert_eq!(state.high_score(), 10);

        // Hard drops from spawn are worth well over 10 points.
        state.hard_drop();
        assert!(state.score() > 10);
        assert_eq!(state.high_score(), state.score());
        assert_eq!(state.store().profile().high_score, state.score());
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let mut state = started(12345);
        state.hard_drop();
        let best = state.high_score();
        assert!(best > 0);

        assert!(state.apply_action(GameAction::Restart));
        assert_eq!(state.status(), SessionStatus::Playing);
        assert_eq!(state.score(), 0);
        assert_eq!(state.board().filled_count(), 0);
        assert_eq!(state.high_score(), best);
        assert_eq!(state.profile().statistics.games_played, 1);
    }

    #[test]
    fn test_ghost_row() {
        let mut state = started(12345);
        let ghost = state.ghost_row().unwrap();
        let piece = *state.active().unwrap();
        assert_eq!(ghost, piece.row() + state.board().drop_distance(&piece));

        state.hard_drop();
        let config = GameConfig {
            ghost_enabled: false,
            ..GameConfig::default().with_seed(1)
        };
        let mut hidden = GameState::with_store(config, NullStore);
        hidden.start();
        assert_eq!(hidden.ghost_row(), None);
    }

    #[test]
    fn test_clear_message_expires() {
        let board = Board::from_rows(&["####..####"]);
        let mut state = GameState::new(5).with_board(board);
        state.start();
        state.active = Some(Piece::at(PieceKind::O, Rotation::North, 5, 4));
        state.hard_drop();
        assert_eq!(state.clear_message(), Some("SINGLE"));

        state.tick(CLEAR_MESSAGE_MS - 1);
        assert!(state.clear_message().is_some());
        state.tick(1);
        assert_eq!(state.clear_message(), None);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = started(12345);
        state.hard_drop();
        let snap = state.snapshot();

        assert_eq!(snap.score, state.score());
        assert_eq!(snap.next, state.next());
        assert!(snap.playable());
        assert_eq!(snap.board.iter().flatten().filter(|&&c| c != 0).count(), 4);
        assert_eq!(snap.active.unwrap().cells.len(), 4);
    }
}
