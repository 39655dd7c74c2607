//! Property-based tests for the buffer state machine and layout.
//!
//! Uses proptest to verify invariants that must hold across all valid inputs.

use promptbuf::text::{
    Action, BufferState, Direction, compute_layout, compute_layout_with_method, reduce,
};
use promptbuf::{TextBuffer, WidthMethod};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Text built from a mix of ASCII, separators, wide and astral characters.
fn doc_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "a", "b", "word", " ", "  ", ",", ".", "\n", "漢", "字", "😀", "é", "①",
        ]),
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

/// Printable text without control characters.
fn printable_text() -> impl Strategy<Value = String> {
    "\\PC{0,60}"
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(vec![
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
        Direction::Home,
        Direction::End,
        Direction::WordLeft,
        Direction::WordRight,
    ])
}

/// Actions that record undo history when they change something.
fn tracked_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        doc_text().prop_map(Action::Insert),
        Just(Action::Backspace),
        Just(Action::Delete),
        Just(Action::DeleteWordLeft),
        Just(Action::DeleteWordRight),
        Just(Action::KillLineRight),
        Just(Action::KillLineLeft),
        doc_text().prop_map(Action::set_text),
        (0..4usize, 0..12usize, 0..4usize, 0..12usize, doc_text()).prop_map(
            |(start_row, start_col, end_row, end_col, text)| Action::ReplaceRange {
                start_row,
                start_col,
                end_row,
                end_col,
                text,
            }
        ),
    ]
}

fn any_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => tracked_action(),
        2 => direction().prop_map(Action::Move),
        1 => Just(Action::Undo),
        1 => Just(Action::Redo),
        1 => (0..80usize).prop_map(Action::MoveToOffset),
        1 => (0..30usize).prop_map(Action::SetViewportWidth),
    ]
}

/// Cursor as a code-point offset into the `\n`-joined text.
fn flat_offset(state: &BufferState) -> usize {
    state.lines[..state.cursor_row]
        .iter()
        .map(|line| line.chars().count() + 1)
        .sum::<usize>()
        + state.cursor_col
}

fn state_strategy() -> impl Strategy<Value = BufferState> {
    (doc_text(), 0..60usize, 1..20usize)
        .prop_map(|(text, offset, width)| BufferState::new(&text, offset, width))
}

// ============================================================================
// Editing Properties
// ============================================================================

proptest! {
    /// Inserting printable text into an empty buffer reproduces it exactly.
    #[test]
    fn insert_then_read_is_identity(text in printable_text()) {
        let mut buffer = TextBuffer::default();
        buffer.insert(&text);
        prop_assert_eq!(buffer.text(), text);
    }

    /// Undo right after a recorded edit restores lines and cursor.
    #[test]
    fn undo_restores_previous_state(state in state_strategy(), action in tracked_action()) {
        let next = reduce(&state, &action);
        if next.undo_stack.len() > state.undo_stack.len() {
            let undone = reduce(&next, &Action::Undo);
            prop_assert_eq!(&undone.lines, &state.lines);
            prop_assert_eq!(undone.cursor(), state.cursor());
        } else {
            prop_assert_eq!(&next, &state, "an edit that records nothing must change nothing");
        }
    }

    /// Redo after undo restores the post-edit state; a new edit clears redo.
    #[test]
    fn redo_replays_undone_edit(state in state_strategy(), action in tracked_action()) {
        let next = reduce(&state, &action);
        prop_assume!(next.undo_stack.len() > state.undo_stack.len());

        let undone = reduce(&next, &Action::Undo);
        let redone = reduce(&undone, &Action::Redo);
        prop_assert_eq!(&redone.lines, &next.lines);
        prop_assert_eq!(redone.cursor(), next.cursor());

        let edited = reduce(&undone, &Action::insert("z"));
        prop_assert!(edited.redo_stack.is_empty());
    }

    /// Any sequence of actions keeps the state structurally valid.
    #[test]
    fn actions_preserve_invariants(
        state in state_strategy(),
        actions in prop::collection::vec(any_action(), 0..30),
    ) {
        let mut state = state.with_history_limit(5);
        for action in &actions {
            state = reduce(&state, action);
            prop_assert!(state.is_consistent(), "after {:?}: {:?}", action, state);
        }
    }
}

// ============================================================================
// Layout Properties
// ============================================================================

proptest! {
    /// Wrapping already-wrapped lines changes nothing.
    #[test]
    fn layout_is_idempotent(text in doc_text(), width in 1..20usize) {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        let first = compute_layout(&lines, (0, 0), width);
        let second = compute_layout(&first.visual_lines, (0, 0), width);
        prop_assert_eq!(first.visual_lines, second.visual_lines);
    }

    /// Chunk counts add up and every logical position maps into its own row.
    #[test]
    fn every_position_round_trips(text in doc_text(), width in 0..20usize) {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        let layout = compute_layout_with_method(&lines, (0, 0), width, WidthMethod::Unicode);

        let chunk_total: usize = layout.logical_to_visual.iter().map(Vec::len).sum();
        prop_assert_eq!(chunk_total, layout.visual_lines.len());

        for (row, line) in lines.iter().enumerate() {
            for col in 0..=line.chars().count() {
                let visual = layout.to_visual(row, col);
                prop_assert!(visual.is_some(), "({}, {}) unmapped", row, col);
                let (vrow, vcol) = visual.unwrap_or_default();
                let back = layout.to_logical(vrow, vcol);
                prop_assert!(back.is_some());
                let (back_row, back_col) = back.unwrap_or_default();
                prop_assert_eq!(back_row, row);
                // A consumed break space maps onto the end of the chunk before it.
                prop_assert!(back_col == col || back_col + 1 == col,
                    "({}, {}) came back as ({}, {})", row, col, back_row, back_col);
            }
        }
    }

    /// Left always moves toward the start of the document, across soft and
    /// hard wraps alike.
    #[test]
    fn left_always_moves_back(state in state_strategy()) {
        prop_assume!(state.cursor() != (0, 0));
        let moved = reduce(&state, &Action::Move(Direction::Left));
        prop_assert!(
            flat_offset(&moved) < flat_offset(&state),
            "{:?} -> {:?}", state.cursor(), moved.cursor()
        );
    }

    /// Up from any row but the first lands on the visual row above.
    #[test]
    fn up_reaches_previous_visual_row(state in state_strategy()) {
        let before = compute_layout(&state.lines, state.cursor(), state.viewport_width);
        prop_assume!(before.visual_cursor.0 > 0);

        let moved = reduce(&state, &Action::Move(Direction::Up));
        let after = compute_layout(&moved.lines, moved.cursor(), moved.viewport_width);
        prop_assert_eq!(after.visual_cursor.0, before.visual_cursor.0 - 1);
    }

    /// The cursor reported by the layout matches the per-position mapping.
    #[test]
    fn visual_cursor_matches_mapping(state in state_strategy()) {
        let layout = compute_layout(&state.lines, state.cursor(), state.viewport_width);
        prop_assert_eq!(
            Some(layout.visual_cursor),
            layout.to_visual(state.cursor_row, state.cursor_col)
        );
    }
}
