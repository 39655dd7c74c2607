//! Key bindings.
//!
//! [`action_for_key`] maps a decoded key to an editing command. Bindings
//! are checked in a fixed order, so a key matching several rules (Ctrl+Left
//! is both "Left" and "Ctrl+arrow") always resolves the same way:
//!
//! 1. line breaks
//! 2. navigation, including word moves
//! 3. word deletion
//! 4. kill line, undo and redo
//! 5. single-character deletion
//! 6. plain characters, inserted as typed

use crate::input::keyboard::{KeyCode, KeyEvent};
use crate::text::Direction;

/// DEL, sent by many terminals for the Backspace key.
const DEL: char = '\u{7f}';

/// Editing command produced by a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Newline,
    Move(Direction),
    DeleteWordLeft,
    DeleteWordRight,
    KillLineRight,
    KillLineLeft,
    Undo,
    Redo,
    Backspace,
    Delete,
    Insert(char),
}

/// Look up the command bound to `key`, or `None` if the key is unbound.
#[must_use]
pub fn action_for_key(key: &KeyEvent) -> Option<KeyCommand> {
    let modified = !key.is_plain();

    if matches!(key.code, KeyCode::Enter | KeyCode::Char('\r' | '\n')) {
        return Some(KeyCommand::Newline);
    }

    if let Some(direction) = direction_for_key(key, modified) {
        return Some(KeyCommand::Move(direction));
    }

    if key.is_ctrl_char('w') || (modified && is_backspace(key.code)) {
        return Some(KeyCommand::DeleteWordLeft);
    }
    if modified && key.code == KeyCode::Delete {
        return Some(KeyCommand::DeleteWordRight);
    }

    if key.ctrl() {
        match key.code {
            KeyCode::Char('k') => return Some(KeyCommand::KillLineRight),
            KeyCode::Char('u') => return Some(KeyCommand::KillLineLeft),
            KeyCode::Char('z') => return Some(KeyCommand::Undo),
            KeyCode::Char('y') => return Some(KeyCommand::Redo),
            _ => {}
        }
    }

    if is_backspace(key.code) || key.is_ctrl_char('h') {
        return Some(KeyCommand::Backspace);
    }
    if key.code == KeyCode::Delete || key.is_ctrl_char('d') {
        return Some(KeyCommand::Delete);
    }

    match key.code {
        KeyCode::Char(c) if !modified => Some(KeyCommand::Insert(c)),
        _ => None,
    }
}

fn direction_for_key(key: &KeyEvent, modified: bool) -> Option<Direction> {
    let direction = match key.code {
        KeyCode::Left if !modified => Direction::Left,
        KeyCode::Right if !modified => Direction::Right,
        KeyCode::Left => Direction::WordLeft,
        KeyCode::Right => Direction::WordRight,
        KeyCode::Up => Direction::Up,
        KeyCode::Down => Direction::Down,
        KeyCode::Home => Direction::Home,
        KeyCode::End => Direction::End,
        _ if key.is_ctrl_char('b') => Direction::Left,
        _ if key.is_ctrl_char('f') => Direction::Right,
        _ if key.is_alt_char('b') => Direction::WordLeft,
        _ if key.is_alt_char('f') => Direction::WordRight,
        _ if key.is_ctrl_char('a') => Direction::Home,
        _ if key.is_ctrl_char('e') => Direction::End,
        _ => return None,
    };
    Some(direction)
}

fn is_backspace(code: KeyCode) -> bool {
    matches!(code, KeyCode::Backspace | KeyCode::Char(DEL))
}
