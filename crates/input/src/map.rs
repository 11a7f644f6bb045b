//! Key and mouse mapping from terminal events to game commands.

use crate::types::{Difficulty, GameAction};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// What a key press means during play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayInput {
    /// A command the engine handles directly.
    Action(GameAction),
    /// Move the selection cursor to the previous clickable tile.
    CursorPrev,
    /// Move the selection cursor to the next clickable tile.
    CursorNext,
    /// Pick the tile under the selection cursor.
    PickSelected,
    /// Leave the game and return to the difficulty menu.
    Menu,
}

/// What a key press means on the difficulty menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Start(Difficulty),
    Quit,
}

/// Map keyboard input during play.
pub fn handle_key_event(key: KeyEvent) -> Option<PlayInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::BackTab => {
            Some(PlayInput::CursorPrev)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Tab => {
            Some(PlayInput::CursorNext)
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(PlayInput::PickSelected),

        // Actions
        KeyCode::Char('s') | KeyCode::Char('S') => Some(PlayInput::Action(GameAction::Shuffle)),
        KeyCode::Char('u') | KeyCode::Char('U') | KeyCode::Char('z') | KeyCode::Char('Z') => {
            Some(PlayInput::Action(GameAction::Undo))
        }
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => {
            Some(PlayInput::Action(GameAction::Pause))
        }

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(PlayInput::Action(GameAction::Restart)),

        KeyCode::Char('m') | KeyCode::Char('M') => Some(PlayInput::Menu),

        _ => None,
    }
}

/// Map keyboard input on the difficulty menu.
pub fn handle_menu_key(key: KeyEvent) -> Option<MenuChoice> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key) {
        return Some(MenuChoice::Quit);
    }
    match key.code {
        KeyCode::Char('1') | KeyCode::Char('e') | KeyCode::Char('E') => {
            Some(MenuChoice::Start(Difficulty::Easy))
        }
        KeyCode::Char('2') | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(MenuChoice::Start(Difficulty::Hard))
        }
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Terminal cell of a left-button press, if this event is one.
pub fn mouse_pick(event: MouseEvent) -> Option<(u16, u16)> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some((event.column, event.row)),
        _ => None,
    }
}
