//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
///
/// | Key            | Action       |
/// |----------------|--------------|
/// | Left / Right   | move         |
/// | Down           | move down    |
/// | Up             | rotate       |
/// | Space          | hard drop    |
/// | `p`            | pause        |
/// | `r`            | reset        |
/// | Esc            | abandon game |
/// | `h`            | start human  |
/// | `a`            | start AI     |
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::MoveDown),
        KeyCode::Up => Some(GameAction::Rotate),
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Esc => Some(GameAction::Abandon),

        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Reset),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(GameAction::StartHuman),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::StartAi),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
