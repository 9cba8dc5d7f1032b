//! Input handling: raw terminal events → logical game actions.
//!
//! Keyboard and mouse are heterogeneous sources for the same two in-game
//! actions (jump, fire) plus session controls. Mapping happens here so the
//! main loop only ever dispatches on [`GameAction`].

use crate::game::GamePhase;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

/// Logical actions the host loop dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Start a session (also restart after game over).
    Start,
    Jump,
    Fire,
    ToggleNightMode,
    CycleSpeedTier,
    ResetBest,
    Quit,
}

/// Map a key event. Only rising edges count: terminal auto-repeat while a
/// key is held, and release events, must not retrigger anything.
pub fn map_key(key: KeyEvent, phase: GamePhase) -> Option<GameAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Up => Some(primary_action(phase)),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(GameAction::Fire),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(GameAction::ToggleNightMode),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(GameAction::CycleSpeedTier),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::ResetBest),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(GameAction::Quit),
        _ => None,
    }
}

/// Map a mouse event. A press anywhere is the primary action; the play area
/// is a single action zone and position is ignored.
pub fn map_mouse(mouse: MouseEvent, phase: GamePhase) -> Option<GameAction> {
    match mouse.kind {
        MouseEventKind::Down(_) => Some(primary_action(phase)),
        _ => None,
    }
}

/// The primary trigger jumps mid-session and starts/restarts otherwise.
fn primary_action(phase: GamePhase) -> GameAction {
    match phase {
        GamePhase::Running => GameAction::Jump,
        GamePhase::Idle | GamePhase::GameOver => GameAction::Start,
    }
}
