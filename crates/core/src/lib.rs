//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the rules of the colored-triomino puzzle. It has **zero
//! dependencies** on UI, timing, or I/O:
//!
//! - **Deterministic**: a seeded [`PieceGenerator`] replays the same pieces
//! - **Testable**: unit tests sit next to every rule
//! - **Portable**: runs in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 8x16 grid with collision checks and the majority-color row clear
//! - [`pieces`]: triomino catalog, [`Piece`], and 90° rotation with normalization
//! - [`generator`]: random and enumerated piece creation
//! - [`scoring`]: line payout, level progression, gravity speed
//! - [`snapshot`]: owned per-frame view for renderers
//!
//! # Game Rules
//!
//! - **Pieces**: three boxes, each independently red or blue
//! - **Rotation**: clockwise about the piece origin, no wall kicks
//! - **Row clear**: a row clears when one color fills 6 or more of its 8 cells
//! - **Game over**: any locked box in the top row
//!
//! # Example
//!
//! ```
//! use trifall_core::{Board, PieceGenerator};
//!
//! let mut generator = PieceGenerator::new(12345);
//! let piece = generator.create_random();
//!
//! let mut board = Board::new();
//! assert!(board.is_valid_position(&piece, piece.position));
//!
//! board.place_piece(&piece);
//! assert!(board.is_game_over()); // spawned in the top row
//! ```

pub mod board;
pub mod generator;
pub mod pieces;
pub mod scoring;
pub mod snapshot;

pub use trifall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Grid};
pub use generator::PieceGenerator;
pub use pieces::{rotate, templates, Piece, PieceBox, PieceId};
pub use scoring::{drop_interval_ms, level_for_lines, line_clear_points};
pub use snapshot::GameSnapshot;
