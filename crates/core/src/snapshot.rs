use crate::board::{Board, Grid};
use crate::pieces::Piece;
use crate::types::{EngineState, GameMode, GameStats, BOARD_HEIGHT, BOARD_WIDTH};

/// Owned, per-frame view of a game for renderers and stat displays.
///
/// Everything is copied out of the engine; editing a snapshot never feeds back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Grid,
    pub current: Option<Piece>,
    pub next: Option<Piece>,
    pub state: EngineState,
    pub mode: GameMode,
    pub stats: GameStats,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.current = None;
        self.next = None;
        self.state = EngineState::Idle;
        self.mode = GameMode::Human;
        self.stats = GameStats::default();
        self.drop_interval_ms = 0;
    }

    /// Board cells with the current piece drawn on top
    pub fn composed_board(&self) -> Grid {
        let mut board = Board::from_grid(&self.board);
        if let Some(piece) = self.current {
            board.place_piece(&piece);
        }
        board.grid()
    }

    pub fn playable(&self) -> bool {
        self.state == EngineState::Playing
    }

    pub fn game_over(&self) -> bool {
        self.state == EngineState::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: None,
            next: None,
            state: EngineState::Idle,
            mode: GameMode::Human,
            stats: GameStats::default(),
            drop_interval_ms: 0,
        }
    }
}
