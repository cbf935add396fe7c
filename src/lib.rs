//! Trifall (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and adds the pieces the
//! terminal binary needs on top of them: environment configuration
//! ([`config`]), log setup ([`logging`]), and the input-to-engine routing step
//! ([`dispatch`]).

pub mod config;
pub mod logging;

pub use trifall_core as core;
pub use trifall_engine as engine;
pub use trifall_input as input;
pub use trifall_term as term;
pub use trifall_types as types;

use trifall_engine::Engine;
use trifall_types::GameAction;

/// Forward `action` to `engine` if the input policy accepts it in the current state
///
/// Returns whether the engine reported an effect.
pub fn dispatch(engine: &mut Engine, action: GameAction) -> bool {
    if !input::accepts(action, engine.state(), engine.mode()) {
        return false;
    }
    engine.apply_action(action)
}
