//! Tests for batching and session statement ordering

use super::*;
use crate::constants::{RELAX_STATEMENTS, RESTORE_STATEMENTS};

#[test]
fn test_remainder_flushed_after_full_batches() {
    let mut store = RecordingStore::new();
    let run = load_with(&mut store, 1000, valid_rows(2500)).unwrap();

    let batch_rows: Vec<usize> = store.inserts().iter().map(|(_, p)| p.len() / 4).collect();
    assert_eq!(batch_rows, vec![1000, 1000, 500]);
    assert_eq!(run.batches_flushed, 3);
    assert_eq!(run.imported, 2500);
    assert_eq!(run.rows_read, 2500);
    assert!(run.is_balanced());
}

#[test]
fn test_flush_count_is_ceiling_of_rows_over_batch_size() {
    for (rows, batch_size) in [(0, 10), (1, 10), (10, 10), (11, 10), (99, 7), (64, 1)] {
        let mut store = RecordingStore::new();
        let run = load_with(&mut store, batch_size, valid_rows(rows)).unwrap();

        let expected = rows.div_ceil(batch_size);
        assert_eq!(store.inserts().len(), expected, "{} rows / {}", rows, batch_size);
        assert_eq!(run.batches_flushed, expected);

        let written: usize = store.inserts().iter().map(|(_, p)| p.len() / 4).sum();
        assert_eq!(written, rows);
    }
}

#[test]
fn test_exact_multiple_has_no_empty_flush() {
    let mut store = RecordingStore::new();
    load_with(&mut store, 500, valid_rows(1000)).unwrap();
    assert_eq!(store.inserts().len(), 2);
    assert!(store.inserts().iter().all(|(_, p)| !p.is_empty()));
}

#[test]
fn test_skips_counted_and_not_written() {
    let mut rows = valid_rows(3);
    rows.insert(1, skipped_row());
    rows.push(skipped_row());

    let mut store = RecordingStore::new();
    let run = load_with(&mut store, 1000, rows).unwrap();

    assert_eq!(run.rows_read, 5);
    assert_eq!(run.imported, 3);
    assert_eq!(run.skipped, 2);
    assert_eq!(run.lost, 0);
    assert_eq!(store.inserts()[0].1.len(), 12);
}

#[test]
fn test_batch_params_in_input_order() {
    let mut store = RecordingStore::new();
    load_with(&mut store, 2, valid_rows(3)).unwrap();

    let inserts = store.inserts();
    assert_eq!(inserts[0].1[0], "00000");
    assert_eq!(inserts[0].1[4], "00001");
    assert_eq!(inserts[1].1[0], "00002");
    assert!(inserts[1].0.ends_with("VALUES (?, ?, ?, ?)"));
}

#[test]
fn test_session_statement_order() {
    let mut store = RecordingStore::new();
    load_with(&mut store, 10, valid_rows(5)).unwrap();

    let begin = store.raw_position("BEGIN").unwrap();
    let truncate = store.raw_position("DELETE FROM postal_codes").unwrap();
    let commit = store.raw_position("COMMIT").unwrap();

    for statement in RELAX_STATEMENTS {
        assert!(store.raw_position(statement).unwrap() < begin);
    }
    assert!(begin < truncate);
    assert!(truncate < commit);
    for statement in RESTORE_STATEMENTS {
        assert!(store.raw_position(statement).unwrap() > commit);
    }

    let first_create = store
        .raw
        .iter()
        .position(|s| s.starts_with("CREATE INDEX IF NOT EXISTS"))
        .unwrap();
    let last_drop = store
        .raw
        .iter()
        .rposition(|s| s.starts_with("DROP INDEX IF EXISTS"))
        .unwrap();
    assert!(last_drop < begin);
    assert!(first_create > commit);
}

#[test]
fn test_empty_input_still_refreshes() {
    let mut store = RecordingStore::new();
    let run = load_with(&mut store, 1000, Vec::new()).unwrap();

    assert_eq!(run.rows_read, 0);
    assert_eq!(run.batches_flushed, 0);
    assert!(store.inserts().is_empty());
    assert!(store.raw_position("DELETE FROM postal_codes").is_some());
    assert!(store.raw_position("COMMIT").is_some());
}

#[test]
fn test_invalid_batch_size_rejected_before_touching_store() {
    let mut store = RecordingStore::new();
    let result = load_with(&mut store, 0, valid_rows(1));
    assert!(matches!(result, Err(Error::Configuration { .. })));
    assert!(store.raw.is_empty());
}

#[test]
fn test_progress_reporter_disabled_by_default() {
    let reporter = super::super::ProgressReporter::new();
    assert!(!reporter.is_enabled());
    assert_eq!(reporter.suspend(|| 7), 7);
}
