//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data with no external dependencies, so they can be shared
//! by the core rules, the engine, the terminal view, and the input layer.
//!
//! # Board Dimensions
//!
//! - **Width**: 8 columns (indexed 0-7)
//! - **Height**: 16 rows (indexed 0-15, row 0 is the spawn row at the top)
//! - **Spawn position**: (3, 0)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep of the terminal runner (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 50 | Gravity speed-up per level |
//! | `MIN_DROP_MS` | 100 | Gravity floor |
//! | `AI_DECISION_MS` | 200 | One AI action per interval |
//! | `KEY_REPEAT_DELAY_MS` | 150 | Minimum gap between repeated movement keys |
//!
//! # Drop Intervals by Level
//!
//! `max(100, 1000 - (level - 1) * 50)`:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 950ms |
//! | 10 | 550ms |
//! | 19+ | 100ms |
//!
//! # Examples
//!
//! ```
//! use trifall_types::{Color, Direction, GameAction, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(Color::from_str("RED"), Some(Color::Red));
//!
//! let rotation = Rotation::North.rotate_cw();
//! assert_eq!(rotation.degrees(), 90);
//!
//! assert_eq!(Direction::from_str("left"), Some(Direction::Left));
//! assert_eq!(Direction::from_str("sideways"), None);
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 8);
//! assert_eq!(BOARD_HEIGHT, 16);
//! ```

/// Board width in cells (8 columns)
pub const BOARD_WIDTH: u8 = 8;

/// Board height in cells (16 rows)
pub const BOARD_HEIGHT: u8 = 16;

/// Spawn column: left-of-center for an even width
pub const SPAWN_X: i8 = (BOARD_WIDTH as i8 - 1) / 2;

/// Spawn row (top of the board)
pub const SPAWN_Y: i8 = 0;

/// Number of boxes in every piece
pub const BOXES_PER_PIECE: usize = 3;

/// Cells of a single color needed in one row for that row to clear
pub const CLEAR_THRESHOLD: u8 = 6;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval reduction per level above 1
pub const DROP_STEP_MS: u32 = 50;

/// Gravity interval floor
pub const MIN_DROP_MS: u32 = 100;

/// Interval between autonomous AI actions
pub const AI_DECISION_MS: u32 = 200;

/// Cumulative cleared lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Minimum gap between two repeats of a held movement key
pub const KEY_REPEAT_DELAY_MS: u32 = 150;

/// A held key with no further events for this long counts as released.
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 250;

/// Line clear scoring table
///
/// Base points for clearing N rows in one lock, multiplied by the current level.
/// Clears of more than 4 rows pay the 4-row value.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_column_is_left_of_center() {
        assert_eq!(SPAWN_X, 3);
        assert_eq!(SPAWN_Y, 0);
    }

    #[test]
    fn clear_threshold_is_sub_maximal() {
        assert!(CLEAR_THRESHOLD < BOARD_WIDTH);
        assert_eq!(CLEAR_THRESHOLD, 6);
    }
}

/// The two box colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
}

impl Color {
    /// Every color, in declaration order
    pub const ALL: [Color; 2] = [Color::Red, Color::Blue];

    /// Parse color from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(Color::Red),
            "blue" => Some(Color::Blue),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
        }
    }

    /// Dense index into per-color tables
    pub fn index(&self) -> usize {
        match self {
            Color::Red => 0,
            Color::Blue => 1,
        }
    }
}

/// The piece shape catalog keys
///
/// - **Straight**: three boxes in a line
/// - **Bent**: three boxes forming an L
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Straight,
    Bent,
}

impl ShapeKind {
    /// Every shape, in catalog order
    pub const ALL: [ShapeKind; 2] = [ShapeKind::Straight, ShapeKind::Bent];

    /// Parse shape from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "straight" => Some(ShapeKind::Straight),
            "bent" => Some(ShapeKind::Bent),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Straight => "straight",
            ShapeKind::Bent => "bent",
        }
    }
}

/// Integer board coordinate: `x` is the column, `y` the row, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Component-wise sum
    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::ops::Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        self.offset(rhs.x, rhs.y)
    }
}

/// Piece rotation angle in 90° steps
///
/// North is the spawn orientation (0°); each clockwise turn adds 90°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (+90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use trifall_types::Rotation;
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

    /// Number of clockwise quarter turns from North (0..=3)
    pub fn quarter_turns(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Angle in degrees, always in `[0, 360)`
    pub fn degrees(&self) -> u16 {
        self.quarter_turns() as u16 * 90
    }

    /// Build from an angle in degrees
    ///
    /// Any multiple of 90 (including negative ones) is normalized mod 360.
    /// Other angles are rejected.
    ///
    /// ```
    /// use trifall_types::Rotation;
    ///
    /// assert_eq!(Rotation::from_degrees(450), Some(Rotation::East));
    /// assert_eq!(Rotation::from_degrees(-90), Some(Rotation::West));
    /// assert_eq!(Rotation::from_degrees(45), None);
    /// ```
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        if degrees % 90 != 0 {
            return None;
        }
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::North),
            90 => Some(Rotation::East),
            180 => Some(Rotation::South),
            _ => Some(Rotation::West),
        }
    }
}

/// Unit movement directions accepted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// Unit (dx, dy) offset for this direction
    pub fn offset(&self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }

    /// Parse direction from string (case-insensitive)
    ///
    /// Unknown names yield `None`, which callers treat as "no effect".
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Down => "down",
        }
    }
}

/// Who controls the falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    #[default]
    Human,
    Ai,
}

impl GameMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "human" => Some(GameMode::Human),
            "ai" => Some(GameMode::Ai),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Human => "human",
            GameMode::Ai => "ai",
        }
    }
}

/// Engine lifecycle state
///
/// `Idle` is initial. `GameOver` is terminal until a start or reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineState {
    #[default]
    Idle,
    Playing,
    Paused,
    GameOver,
}

impl EngineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineState::Idle => "idle",
            EngineState::Playing => "playing",
            EngineState::Paused => "paused",
            EngineState::GameOver => "game_over",
        }
    }
}

/// Game actions that can be applied to the engine
///
/// These are the calls the input surface is allowed to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Start (or restart) a human-controlled game
    StartHuman,
    /// Start (or restart) an AI-controlled game
    StartAi,
    /// Toggle pause state
    Pause,
    /// Return to idle after a game ends
    Reset,
    /// Leave the current game, running or not, and return to idle
    Abandon,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    MoveDown,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Drop piece to its resting row and lock it
    HardDrop,
}

impl GameAction {
    /// Parse action from a camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use trifall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("startAi"), Some(GameAction::StartAi));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "starthuman" => Some(GameAction::StartHuman),
            "startai" => Some(GameAction::StartAi),
            "pause" => Some(GameAction::Pause),
            "reset" => Some(GameAction::Reset),
            "abandon" => Some(GameAction::Abandon),
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::StartHuman => "startHuman",
            GameAction::StartAi => "startAi",
            GameAction::Pause => "pause",
            GameAction::Reset => "reset",
            GameAction::Abandon => "abandon",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
        }
    }

    /// Movement direction carried by this action, if any
    pub fn direction(&self) -> Option<Direction> {
        match self {
            GameAction::MoveLeft => Some(Direction::Left),
            GameAction::MoveRight => Some(Direction::Right),
            GameAction::MoveDown => Some(Direction::Down),
            _ => None,
        }
    }

    /// Whether this action steers the falling piece
    pub fn is_piece_control(&self) -> bool {
        matches!(
            self,
            GameAction::MoveLeft
                | GameAction::MoveRight
                | GameAction::MoveDown
                | GameAction::Rotate
                | GameAction::HardDrop
        )
    }
}

/// Score, level, and cumulative cleared lines
///
/// Handed out by value; holding one never observes later engine changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameStats {
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            lines_cleared: 0,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell filled with a box of that color
pub type Cell = Option<Color>;
