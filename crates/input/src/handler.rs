//! Key-repeat handler for terminal environments.
//!
//! The first press of a key fires immediately. Held movement keys (Left, Right,
//! Down) then repeat at most once per repeat delay; every other key fires only
//! on its own press. Terminals that never report key releases are handled by
//! an idle timeout: a held key with no events for that long counts as released.
//!
//! Time is supplied by the caller in elapsed milliseconds, so the handler is
//! fully deterministic under test.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::handle_key_event;
use crate::types::{
    EngineState, GameAction, GameMode, KEY_RELEASE_TIMEOUT_MS, KEY_REPEAT_DELAY_MS,
};

/// Left, Right, and Down can be tracked at once
const MAX_HELD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeldKey {
    action: GameAction,
    since_fire_ms: u32,
    idle_ms: u32,
}

/// Tracks held movement keys and emits their repeats.
#[derive(Debug, Clone)]
pub struct InputHandler {
    held: ArrayVec<HeldKey, MAX_HELD>,
    repeat_delay_ms: u32,
    key_release_timeout_ms: u32,
}

fn repeats(action: GameAction) -> bool {
    matches!(
        action,
        GameAction::MoveLeft | GameAction::MoveRight | GameAction::MoveDown
    )
}

fn opposite(action: GameAction) -> Option<GameAction> {
    match action {
        GameAction::MoveLeft => Some(GameAction::MoveRight),
        GameAction::MoveRight => Some(GameAction::MoveLeft),
        _ => None,
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_repeat_delay(KEY_REPEAT_DELAY_MS)
    }

    pub fn with_repeat_delay(repeat_delay_ms: u32) -> Self {
        Self {
            held: ArrayVec::new(),
            repeat_delay_ms,
            key_release_timeout_ms: KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn repeat_delay_ms(&self) -> u32 {
        self.repeat_delay_ms
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Whether `action` is currently held down
    pub fn is_held(&self, action: GameAction) -> bool {
        self.held.iter().any(|h| h.action == action)
    }

    /// Feed one terminal key event, returning the action to apply now (if any)
    ///
    /// Press and repeat events go through the repeat gate; release events drop
    /// the held key.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<GameAction> {
        match key.kind {
            KeyEventKind::Release => {
                if let Some(action) = handle_key_event(key) {
                    self.release(action);
                }
                None
            }
            KeyEventKind::Press => self.press(handle_key_event(key)?),
            KeyEventKind::Repeat => {
                let action = handle_key_event(key)?;
                if repeats(action) {
                    self.press(action)
                } else {
                    None
                }
            }
        }
    }

    /// Register a press of `action`
    pub fn press(&mut self, action: GameAction) -> Option<GameAction> {
        if !repeats(action) {
            return Some(action);
        }

        if let Some(held) = self.held.iter_mut().find(|h| h.action == action) {
            held.idle_ms = 0;
            return None;
        }

        if let Some(other) = opposite(action) {
            self.release(other);
        }
        let _ = self.held.try_push(HeldKey {
            action,
            since_fire_ms: 0,
            idle_ms: 0,
        });
        Some(action)
    }

    pub fn release(&mut self, action: GameAction) {
        self.held.retain(|h| h.action != action);
    }

    /// Advance time and collect repeats for held keys
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, MAX_HELD> {
        let timeout = self.key_release_timeout_ms;
        self.held.retain(|h| {
            h.idle_ms = h.idle_ms.saturating_add(elapsed_ms);
            h.idle_ms <= timeout
        });

        let mut actions = ArrayVec::new();
        for held in self.held.iter_mut() {
            held.since_fire_ms = held.since_fire_ms.saturating_add(elapsed_ms);
            if held.since_fire_ms >= self.repeat_delay_ms {
                held.since_fire_ms = 0;
                actions.push(held.action);
            }
        }
        actions
    }

    pub fn reset(&mut self) {
        self.held.clear();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the input surface forwards `action` to the engine in this state
///
/// Piece control only reaches a playing human game; the AI owns the piece
/// otherwise. Reset is only offered from game over, while abandon returns to
/// idle from any state. Starting a game is blocked while one is running.
pub fn accepts(action: GameAction, state: EngineState, mode: GameMode) -> bool {
    if action.is_piece_control() {
        return state == EngineState::Playing && mode == GameMode::Human;
    }
    match action {
        GameAction::StartHuman | GameAction::StartAi => state != EngineState::Playing,
        GameAction::Pause => matches!(state, EngineState::Playing | EngineState::Paused),
        GameAction::Reset => state == EngineState::GameOver,
        GameAction::Abandon => true,
        _ => false,
    }
}
