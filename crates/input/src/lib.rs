//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`], applies the key-repeat policy for
//! held movement keys (including terminals without key-release events), and
//! decides which actions the current game state lets through.

pub mod handler;
pub mod map;

pub use trifall_types as types;

pub use handler::{accepts, InputHandler};
pub use map::{handle_key_event, should_quit};
