//! Fuzz target for the buffer state machine.
//!
//! Generates structured action sequences and checks that the state stays
//! consistent after every step.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use promptbuf::text::{Action, BufferState, Direction, reduce};

#[derive(Arbitrary, Debug)]
enum FuzzAction {
    Insert(String),
    SetText(String),
    Backspace,
    Delete,
    Move(u8),
    DeleteWordLeft,
    DeleteWordRight,
    KillLineRight,
    KillLineLeft,
    Replace { start: (u8, u8), end: (u8, u8), text: String },
    Undo,
    Redo,
    MoveToOffset(u16),
    SetWidth(u8),
    Snapshot,
}

impl FuzzAction {
    fn to_action(&self) -> Action {
        const DIRECTIONS: [Direction; 8] = [
            Direction::Left,
            Direction::Right,
            Direction::Up,
            Direction::Down,
            Direction::Home,
            Direction::End,
            Direction::WordLeft,
            Direction::WordRight,
        ];
        match self {
            Self::Insert(text) => Action::Insert(text.clone()),
            Self::SetText(text) => Action::set_text(text.clone()),
            Self::Backspace => Action::Backspace,
            Self::Delete => Action::Delete,
            Self::Move(d) => Action::Move(DIRECTIONS[usize::from(*d) % DIRECTIONS.len()]),
            Self::DeleteWordLeft => Action::DeleteWordLeft,
            Self::DeleteWordRight => Action::DeleteWordRight,
            Self::KillLineRight => Action::KillLineRight,
            Self::KillLineLeft => Action::KillLineLeft,
            Self::Replace { start, end, text } => Action::ReplaceRange {
                start_row: usize::from(start.0),
                start_col: usize::from(start.1),
                end_row: usize::from(end.0),
                end_col: usize::from(end.1),
                text: text.clone(),
            },
            Self::Undo => Action::Undo,
            Self::Redo => Action::Redo,
            Self::MoveToOffset(offset) => Action::MoveToOffset(usize::from(*offset)),
            Self::SetWidth(width) => Action::SetViewportWidth(usize::from(*width)),
            Self::Snapshot => Action::CreateUndoSnapshot,
        }
    }
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let mut state = BufferState::default().with_history_limit(8);
    for action in actions.iter().take(256) {
        state = reduce(&state, &action.to_action());
        assert!(state.is_consistent(), "inconsistent after {action:?}");
    }
});
