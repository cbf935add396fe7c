//! Engine module - the playable game on top of the core rules
//!
//! [`Engine`] owns the board, the current and next pieces, score/level/lines,
//! and the gravity and AI timers. Callers drive it with elapsed time
//! ([`Engine::update`]) and discrete commands (moves, rotation, drops, or a
//! [`GameAction`](crate::types::GameAction) via [`Engine::apply_action`]).
//!
//! | State      | `update` | piece commands | `pause_game` | `start_game` / `reset_game` |
//! |------------|----------|----------------|--------------|-----------------------------|
//! | `Idle`     | no-op    | rejected       | rejected     | allowed                     |
//! | `Playing`  | runs     | allowed        | -> `Paused`  | allowed                     |
//! | `Paused`   | no-op    | rejected       | -> `Playing` | allowed                     |
//! | `GameOver` | no-op    | rejected       | rejected     | allowed                     |
//!
//! # Example
//!
//! ```
//! use trifall_engine::Engine;
//! use trifall_engine::types::{EngineState, GameMode};
//!
//! let mut engine = Engine::new(7);
//! engine.start_game(GameMode::Ai);
//! for _ in 0..50 {
//!     engine.update(200);
//! }
//! assert_ne!(engine.state(), EngineState::Idle);
//! ```

pub mod ai;
pub mod engine;

pub use trifall_core as core;
pub use trifall_types as types;

pub use ai::{evaluate_placement, find_best_move, AiPhase, AiTarget, Placement};
pub use engine::Engine;
