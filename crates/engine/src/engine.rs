//! Engine module - game state machine, gravity, scoring, and AI driving
//!
//! States: `Idle` -> `Playing` -> {`Paused` <-> `Playing`, `GameOver`}.
//! The engine is the only owner of the board and the current/next pieces. Each
//! public call runs to completion, so callers never observe half-applied state.
//!
//! Timing is driven externally through [`Engine::update`] with elapsed
//! milliseconds. Gravity and AI decisions use separate accumulators; gravity is
//! checked first on every call.

use tracing::{debug, info, trace};

use crate::ai::{self, AiPhase, AiTarget};
use crate::core::{
    drop_interval_ms, level_for_lines, line_clear_points, Board, GameSnapshot, Grid, Piece,
    PieceGenerator,
};
use crate::types::*;

/// Complete game engine
#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    generator: PieceGenerator,
    current: Option<Piece>,
    next: Piece,
    state: EngineState,
    mode: GameMode,
    stats: GameStats,
    drop_timer_ms: u32,
    drop_interval_ms: u32,
    ai_timer_ms: u32,
    /// Phase chosen by the most recent AI decision
    ai_phase: Option<AiPhase>,
}

impl Engine {
    /// Create an idle engine whose pieces come from the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_generator(PieceGenerator::new(seed))
    }

    /// Create an idle engine seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::with_generator(PieceGenerator::from_entropy())
    }

    pub fn with_generator(mut generator: PieceGenerator) -> Self {
        let next = generator.create_random();
        Self {
            board: Board::new(),
            generator,
            current: None,
            next,
            state: EngineState::Idle,
            mode: GameMode::Human,
            stats: GameStats::default(),
            drop_timer_ms: 0,
            drop_interval_ms: BASE_DROP_MS,
            ai_timer_ms: 0,
            ai_phase: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Copy of the locked cells
    pub fn grid(&self) -> Grid {
        self.board.grid()
    }

    pub fn current_piece(&self) -> Option<Piece> {
        self.current
    }

    pub fn next_piece(&self) -> Piece {
        self.next
    }

    pub fn stats(&self) -> GameStats {
        self.stats
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn ai_phase(&self) -> Option<AiPhase> {
        self.ai_phase
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = self.board.grid();
        out.current = self.current;
        out.next = Some(self.next);
        out.state = self.state;
        out.mode = self.mode;
        out.stats = self.stats;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Start a fresh game in `mode`
    ///
    /// Works from any state. Board, stats, and timers are reset before the
    /// first piece spawns.
    pub fn start_game(&mut self, mode: GameMode) {
        self.mode = mode;
        self.state = EngineState::Playing;
        self.board.clear();
        self.reset_progress();
        debug!(mode = mode.as_str(), "game started");
        self.spawn_piece();
    }

    /// Toggle between playing and paused
    ///
    /// Returns false (and does nothing) in `Idle` or `GameOver`.
    pub fn pause_game(&mut self) -> bool {
        self.state = match self.state {
            EngineState::Playing => EngineState::Paused,
            EngineState::Paused => EngineState::Playing,
            EngineState::Idle | EngineState::GameOver => return false,
        };
        debug!(state = self.state.as_str(), "pause toggled");
        true
    }

    /// Return to `Idle` with an empty board and a freshly drawn next piece
    pub fn reset_game(&mut self) {
        self.state = EngineState::Idle;
        self.current = None;
        self.board.clear();
        self.reset_progress();
        self.next = self.generator.create_random();
        debug!("game reset");
    }

    fn reset_progress(&mut self) {
        self.stats = GameStats::default();
        self.drop_timer_ms = 0;
        self.drop_interval_ms = drop_interval_ms(self.stats.level);
        self.ai_timer_ms = 0;
        self.ai_phase = None;
    }

    /// Advance timers by `delta_ms`
    ///
    /// Gravity fires at most once per call, then (in AI mode) at most one AI
    /// action. Only effective while playing.
    pub fn update(&mut self, delta_ms: u32) {
        if self.state != EngineState::Playing {
            return;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(delta_ms);
        if self.drop_timer_ms >= self.drop_interval_ms {
            self.drop_timer_ms = 0;
            self.gravity_step();
        }

        if self.mode == GameMode::Ai && self.current.is_some() {
            self.ai_timer_ms = self.ai_timer_ms.saturating_add(delta_ms);
            if self.ai_timer_ms >= AI_DECISION_MS {
                self.ai_timer_ms = 0;
                self.ai_step();
            }
        }
    }

    /// Spawn the held next piece and draw a new one
    fn spawn_piece(&mut self) {
        let piece = std::mem::replace(&mut self.next, self.generator.create_random());

        if self.mode == GameMode::Ai {
            self.ai_timer_ms = 0;
        }

        if !self.board.is_valid_position(&piece, piece.position) {
            self.current = None;
            self.finish_game("spawn blocked");
            return;
        }

        trace!(id = %piece.id, shape = piece.shape.as_str(), "piece spawned");
        self.current = Some(piece);
    }

    fn finish_game(&mut self, reason: &'static str) {
        self.state = EngineState::GameOver;
        info!(
            reason,
            score = self.stats.score,
            level = self.stats.level,
            lines = self.stats.lines_cleared,
            "game over"
        );
    }

    fn is_live(&self) -> bool {
        self.state == EngineState::Playing && self.current.is_some()
    }

    /// Try to move the current piece one cell
    ///
    /// Returns false and leaves everything unchanged when the move is blocked
    /// or the game is not playing.
    pub fn move_block(&mut self, direction: Direction) -> bool {
        if self.state != EngineState::Playing {
            return false;
        }
        let Some(piece) = self.current.as_mut() else {
            return false;
        };

        let (dx, dy) = direction.offset();
        let target = piece.position.offset(dx, dy);
        if self.board.is_valid_position(piece, target) {
            piece.position = target;
            return true;
        }
        false
    }

    /// Try to rotate the current piece clockwise in place (no wall kicks)
    pub fn rotate_block(&mut self) -> bool {
        if self.state != EngineState::Playing {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let rotated = piece.rotated();
        if self.board.is_valid_position(&rotated, piece.position) {
            self.current = Some(rotated);
            return true;
        }
        false
    }

    /// Drop the current piece as far as it goes and lock it
    ///
    /// Returns false when the game is not playing.
    pub fn drop_block(&mut self) -> bool {
        if !self.is_live() {
            return false;
        }
        while self.move_block(Direction::Down) {}
        self.lock_piece();
        true
    }

    fn gravity_step(&mut self) {
        if !self.move_block(Direction::Down) {
            self.lock_piece();
        }
    }

    /// Commit the current piece, clear rows, score, then spawn or end the game
    fn lock_piece(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };

        self.board.place_piece(&piece);
        let cleared = self.board.clear_completed_rows();
        if cleared > 0 {
            self.apply_line_clear(cleared);
        }

        if self.board.is_game_over() {
            self.finish_game("top row occupied");
        } else {
            self.spawn_piece();
        }
    }

    fn apply_line_clear(&mut self, lines: usize) {
        let points = line_clear_points(lines, self.stats.level);
        self.stats.score = self.stats.score.saturating_add(points);
        self.stats.lines_cleared = self.stats.lines_cleared.saturating_add(lines as u32);
        self.stats.level = level_for_lines(self.stats.lines_cleared);
        self.drop_interval_ms = drop_interval_ms(self.stats.level);
        debug!(
            lines,
            points,
            level = self.stats.level,
            drop_interval_ms = self.drop_interval_ms,
            "rows cleared"
        );
    }

    /// Best placement for the current piece, if any
    pub fn find_best_move(&self) -> Option<AiTarget> {
        let piece = self.current?;
        ai::find_best_move(&self.board, &piece)
    }

    /// Perform exactly one AI action toward a freshly searched target
    fn ai_step(&mut self) {
        let Some(piece) = self.current else {
            return;
        };
        let Some(target) = ai::find_best_move(&self.board, &piece) else {
            trace!("ai found no placement");
            self.ai_phase = None;
            return;
        };

        let phase = AiPhase::for_piece(&piece, target);
        self.ai_phase = Some(phase);
        let done = match phase {
            AiPhase::AlignRotation => self.rotate_block(),
            AiPhase::AlignColumn(direction) => self.move_block(direction),
            AiPhase::Drop => self.drop_block(),
        };
        trace!(
            ?phase,
            target_x = target.x,
            target_rotation = target.rotation.degrees(),
            done,
            "ai action"
        );
    }

    /// Apply an input-surface action
    ///
    /// Returns whether the action had an effect.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if let Some(direction) = action.direction() {
            return self.move_block(direction);
        }
        match action {
            GameAction::StartHuman => self.start_game(GameMode::Human),
            GameAction::StartAi => self.start_game(GameMode::Ai),
            GameAction::Reset | GameAction::Abandon => self.reset_game(),
            GameAction::Pause => return self.pause_game(),
            GameAction::Rotate => return self.rotate_block(),
            GameAction::HardDrop => return self.drop_block(),
            GameAction::MoveLeft | GameAction::MoveRight | GameAction::MoveDown => return false,
        }
        true
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PieceId;

    const R: Cell = Some(Color::Red);
    const B: Cell = Some(Color::Blue);

    fn horizontal(colors: [Color; 3], x: i8, y: i8) -> Piece {
        Piece::from_template(
            PieceId::Serial(99),
            ShapeKind::Straight,
            &[(0, 0), (1, 0), (2, 0)],
            colors,
            Position::new(x, y),
        )
    }

    fn playing(mode: GameMode) -> Engine {
        let mut engine = Engine::new(12345);
        engine.start_game(mode);
        engine
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = Engine::new(12345);
        assert_eq!(engine.state, EngineState::Idle);
        assert!(engine.current.is_none());
        assert_eq!(engine.stats, GameStats::default());
        assert_eq!(engine.drop_interval_ms, 1000);
        assert_eq!(engine.next.boxes.len(), 3);
    }

    #[test]
    fn test_next_becomes_current_on_start() {
        let mut engine = Engine::new(12345);
        let next = engine.next;
        engine.start_game(GameMode::Human);
        assert_eq!(engine.current, Some(next));
        assert_ne!(engine.next.id, next.id);
    }

    #[test]
    fn test_single_row_clear_scores_100() {
        let mut engine = playing(GameMode::Human);
        engine.board.clear();
        for x in 0..5 {
            engine.board.set(x, 15, R);
        }
        engine.current = Some(horizontal([Color::Red; 3], 5, 0));

        assert!(engine.drop_block());

        assert_eq!(engine.stats.score, 100);
        assert_eq!(engine.stats.lines_cleared, 1);
        assert_eq!(engine.stats.level, 1);
        assert_eq!(engine.drop_interval_ms, 1000);
        assert_eq!(engine.state, EngineState::Playing);
        assert!(engine.board.rows().all(|row| row.iter().all(|c| c.is_none())));
    }

    #[test]
    fn test_tenth_line_raises_level_and_speed() {
        let mut engine = playing(GameMode::Human);
        engine.stats.lines_cleared = 9;
        engine.board.clear();
        for x in 0..3 {
            engine.board.set(x, 15, B);
        }
        engine.board.set(6, 15, R);
        engine.current = Some(horizontal([Color::Blue; 3], 3, 0));

        assert!(engine.drop_block());

        assert_eq!(engine.stats.lines_cleared, 10);
        assert_eq!(engine.stats.level, 2);
        assert_eq!(engine.drop_interval_ms, 950);
        // Paid at the level in force when the row cleared.
        assert_eq!(engine.stats.score, 100);
    }

    #[test]
    fn test_double_clear_pays_level_multiplier() {
        let mut engine = playing(GameMode::Human);
        engine.stats.level = 3;
        engine.stats.lines_cleared = 20;
        engine.board.clear();
        for y in [14, 15] {
            for x in 1..6 {
                engine.board.set(x, y, R);
            }
        }
        // Vertical straight in column 0 finishes both rows.
        engine.current = Some(
            horizontal([Color::Red; 3], 0, 0)
                .rotated()
                .with_position(Position::new(0, 0)),
        );

        assert!(engine.drop_block());
        assert_eq!(engine.stats.score, 300 * 3);
        assert_eq!(engine.stats.lines_cleared, 22);
    }

    #[test]
    fn test_lock_into_top_row_ends_game() {
        let mut engine = playing(GameMode::Human);
        engine.board.clear();
        for y in 1..16 {
            engine.board.set(0, y, if y % 2 == 0 { R } else { B });
        }
        engine.current = Some(horizontal([Color::Red; 3], 0, 0));

        // Resting row is 0, which tops out.
        assert!(engine.drop_block());
        assert_eq!(engine.state, EngineState::GameOver);
        assert!(engine.current.is_none());
        assert!(!engine.move_block(Direction::Left));
        assert!(!engine.drop_block());
    }

    #[test]
    fn test_blocked_spawn_ends_game_without_placing() {
        let mut engine = playing(GameMode::Human);
        engine.board.clear();
        engine.board.set(4, 0, B);
        engine.next = horizontal([Color::Red; 3], SPAWN_X, SPAWN_Y);
        let before = engine.board.clone();

        engine.spawn_piece();

        assert_eq!(engine.state, EngineState::GameOver);
        assert!(engine.current.is_none());
        assert_eq!(engine.board, before);
        assert!(!engine.rotate_block());
    }

    #[test]
    fn test_gravity_fires_on_interval_and_resets_timer() {
        let mut engine = playing(GameMode::Human);
        let y0 = engine.current.unwrap().position.y;

        engine.update(999);
        assert_eq!(engine.current.unwrap().position.y, y0);

        engine.update(1);
        assert_eq!(engine.current.unwrap().position.y, y0 + 1);
        assert_eq!(engine.drop_timer_ms, 0);

        // Excess time is not carried over.
        engine.update(1500);
        assert_eq!(engine.current.unwrap().position.y, y0 + 2);
        assert_eq!(engine.drop_timer_ms, 0);
    }

    #[test]
    fn test_update_is_noop_unless_playing() {
        let mut engine = Engine::new(1);
        engine.update(5000);
        assert_eq!(engine.state, EngineState::Idle);

        engine.start_game(GameMode::Human);
        engine.pause_game();
        let piece = engine.current;
        engine.update(5000);
        assert_eq!(engine.current, piece);
        assert_eq!(engine.drop_timer_ms, 0);
    }

    #[test]
    fn test_ai_takes_one_action_per_interval() {
        let mut engine = playing(GameMode::Ai);
        engine.board.clear();
        engine.current = Some(horizontal([Color::Blue; 3], 3, 0));

        // Empty board: target is (x=0, North). Three steps left, then drop.
        engine.update(199);
        assert_eq!(engine.current.unwrap().position.x, 3);

        engine.update(1);
        assert_eq!(engine.current.unwrap().position.x, 2);
        assert_eq!(engine.ai_phase, Some(AiPhase::AlignColumn(Direction::Left)));

        engine.update(200);
        engine.update(200);
        assert_eq!(engine.current.unwrap().position.x, 0);

        // 600ms elapsed: gravity has not fired yet.
        assert_eq!(engine.current.unwrap().position.y, 0);

        engine.update(200);
        assert_eq!(engine.ai_phase, Some(AiPhase::Drop));
        for x in 0..3 {
            assert_eq!(engine.board.color_at(x, 15), B);
        }
    }

    #[test]
    fn test_ai_rotates_before_moving() {
        let mut engine = playing(GameMode::Ai);
        engine.board.clear();
        // Vertical at x=3: on an empty board the flat orientation wins.
        let vertical = horizontal([Color::Red; 3], 3, 0).rotated();
        engine.current = Some(vertical);

        engine.update(AI_DECISION_MS);
        assert_eq!(engine.ai_phase, Some(AiPhase::AlignRotation));
        let piece = engine.current.unwrap();
        assert_eq!(piece.rotation, Rotation::South);
        assert_eq!(piece.position.x, 3);
    }

    #[test]
    fn test_human_mode_ignores_ai_timer() {
        let mut engine = playing(GameMode::Human);
        let x0 = engine.current.unwrap().position.x;
        engine.update(AI_DECISION_MS);
        assert_eq!(engine.current.unwrap().position.x, x0);
        assert_eq!(engine.ai_timer_ms, 0);
        assert!(engine.ai_phase.is_none());
    }

    #[test]
    fn test_start_game_resets_speed_and_stats() {
        let mut engine = playing(GameMode::Human);
        engine.stats = GameStats {
            score: 5000,
            level: 7,
            lines_cleared: 61,
        };
        engine.drop_interval_ms = 700;
        engine.drop_timer_ms = 400;

        engine.start_game(GameMode::Ai);
        assert_eq!(engine.stats, GameStats::default());
        assert_eq!(engine.drop_interval_ms, 1000);
        assert_eq!(engine.drop_timer_ms, 0);
        assert_eq!(engine.mode, GameMode::Ai);
    }
}
