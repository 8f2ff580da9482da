// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;

use super::{History, HISTORY_LIMIT};

/// Drives `edit_count` edits through a (text, history) pair the way the
/// session controller does: record the prior text, then replace it.
fn run_edits(edit_count: usize) -> (String, History) {
    let mut history = History::new();
    let mut text = String::new();
    for i in 0..edit_count {
        history.record(std::mem::replace(&mut text, format!("edit {i}")));
    }
    (text, history)
}

#[rstest]
#[case(1, 1)]
#[case(5, 3)]
#[case(5, 5)]
#[case(12, 12)]
fn undo_redo_round_trip_restores_text(#[case] edit_count: usize, #[case] n: usize) {
    let (mut text, mut history) = run_edits(edit_count);
    let before_undos = text.clone();

    for _ in 0..n {
        text = history.undo(text).expect("undo within edit count");
    }
    for _ in 0..n {
        text = history.redo(text).expect("redo within undo count");
    }

    assert_eq!(text, before_undos);
    assert!(!history.can_redo());
}

#[test]
fn record_discards_redo_branch() {
    let (mut text, mut history) = run_edits(3);

    text = history.undo(text).expect("undo");
    text = history.undo(text).expect("undo");
    assert_eq!(history.future_len(), 2);

    history.record(std::mem::replace(&mut text, "branched".to_owned()));
    assert_eq!(history.future_len(), 0);
    assert!(!history.can_redo());

    // The discarded branch stays gone; undo walks the new lineage.
    let restored = history.undo(text).expect("undo");
    assert_eq!(restored, "edit 0");
}

#[test]
fn undo_on_empty_history_is_noop() {
    let mut history = History::new();
    assert!(history.undo("current".to_owned()).is_none());
    // The failed undo must not have captured the text as a redo point.
    assert!(!history.can_redo());
}

#[test]
fn redo_on_empty_future_is_noop() {
    let (text, mut history) = run_edits(2);
    assert!(history.redo(text).is_none());
    assert_eq!(history.past_len(), 2);
}

#[test]
fn history_is_bounded_oldest_first() {
    let (mut text, mut history) = run_edits(HISTORY_LIMIT + 10);
    assert_eq!(history.past_len(), HISTORY_LIMIT);

    let mut undone = 0;
    while let Some(restored) = history.undo(text.clone()) {
        text = restored;
        undone += 1;
    }

    assert_eq!(undone, HISTORY_LIMIT);
    // The oldest retained snapshot is edit 9, not the very first edit.
    assert_eq!(text, "edit 9");
}

#[test]
fn undo_then_redo_preserves_capacity_bound() {
    let (mut text, mut history) = run_edits(HISTORY_LIMIT);
    text = history.undo(text).expect("undo");
    history.redo(text).expect("redo");
    assert_eq!(history.past_len(), HISTORY_LIMIT);
}
