//! Persistence behaviour of the recorder against fault-injecting and
//! file-backed worksheets.

use hoardrisk::record::columns;
use hoardrisk::testkit::{form_with, memory_recorder, record_with, FaultyStore, FixedClock};
use hoardrisk::{
    append_record, assert_contains_error, assert_error_code, submit, Cell, Dataset, Error, JsonWorkbookStore,
    Recorder, SheetLayout, SubmissionOutcome, ValidationError,
};
use hoardrisk::record::DEFAULT_TIMESTAMP_FORMAT;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn seeded(rows: &[(&str, [u8; 5])]) -> Dataset {
    rows.iter().fold(Dataset::default(), |data, (name, answers)| {
        append_record(data, &record_with(name, *answers), SheetLayout::Basic)
    })
}

#[test]
fn test_append_preserves_existing_rows_in_order() {
    let store = Arc::new(FaultyStore::with_dataset(
        "S",
        seeded(&[("Ana", [0, 0, 0, 0, 0]), ("Bia", [1, 1, 1, 1, 1])]),
    ));
    let before = store.snapshot();
    let recorder = memory_recorder(&store);

    let receipt = recorder
        .append_and_persist(&record_with("Caio", [2, 2, 2, 2, 2]))
        .unwrap();

    let after = store.snapshot();
    assert_eq!(receipt.row_index, 2);
    assert_eq!(receipt.total_rows, 3);
    assert_eq!(&after.rows()[..2], before.rows());
    assert_eq!(after.cell(2, columns::RESIDENT_NAME), Some(&Cell::from("Caio")));
    assert_eq!(after.cell(2, columns::TOTAL_SCORE), Some(&Cell::Integer(10)));
}

#[test]
fn test_read_failure_writes_nothing() {
    let store = Arc::new(FaultyStore::with_dataset("S", seeded(&[("Ana", [0; 5])])));
    let recorder = memory_recorder(&store);
    store.fail_reads(true);

    let result = recorder.append_and_persist(&record_with("Bia", [1; 5]));

    let err = assert_contains_error!(result, "connection reset");
    assert!(matches!(err, Error::StoreRead { .. }));
    assert_eq!(store.write_count(), 0);
    assert_eq!(store.snapshot().len(), 1);
}

#[test]
fn test_write_failure_leaves_store_and_cache_untouched() {
    let store = Arc::new(FaultyStore::with_dataset("S", seeded(&[("Ana", [0; 5])])));
    let recorder = memory_recorder(&store);
    let cached_before = recorder.dataset().unwrap();
    store.fail_writes(true);

    let result = recorder.append_and_persist(&record_with("Bia", [1; 5]));

    let err = assert_error_code!(result, "E002");
    assert!(err.to_string().contains("write quota exceeded"));
    assert_eq!(store.snapshot(), cached_before);
    assert!(recorder.store().is_cached());
    assert_eq!(recorder.dataset().unwrap(), cached_before);
}

#[test]
fn test_successful_write_invalidates_cache() {
    let store = Arc::new(FaultyStore::new("S"));
    let recorder = memory_recorder(&store);
    assert!(recorder.dataset().unwrap().is_empty());
    assert!(recorder.store().is_cached());

    recorder
        .append_and_persist(&record_with("Ana", [0; 5]))
        .unwrap();

    assert!(!recorder.store().is_cached());
    assert_eq!(recorder.dataset().unwrap().len(), 1);
}

#[test]
fn test_cached_reads_do_not_reach_backend() {
    let store = Arc::new(FaultyStore::new("S"));
    let recorder = memory_recorder(&store);

    recorder.dataset().unwrap();
    recorder.dataset().unwrap();
    recorder.dataset().unwrap();

    assert_eq!(store.read_count(), 1);
}

#[test]
fn test_whitespace_name_is_rejected_and_row_count_unchanged() {
    let store = Arc::new(FaultyStore::with_dataset("S", seeded(&[("Ana", [0; 5])])));
    let recorder = memory_recorder(&store);

    let outcome = submit(
        form_with("   ", [4, 4, 4, 4, 4]),
        &recorder,
        &FixedClock::default(),
        DEFAULT_TIMESTAMP_FORMAT,
    );

    match outcome {
        SubmissionOutcome::Rejected { reason, summary } => {
            assert_eq!(reason, ValidationError::MissingResidentName);
            assert_eq!(summary.total_score, 20);
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(store.snapshot().len(), 1);
    assert_eq!(store.write_count(), 0);
}

#[test]
fn test_failed_submission_can_be_retried() {
    let store = Arc::new(FaultyStore::new("S"));
    let recorder = memory_recorder(&store);
    let form = form_with("Ana", [1, 2, 3, 0, 0]);

    store.fail_writes(true);
    let first = submit(form.clone(), &recorder, &FixedClock::default(), DEFAULT_TIMESTAMP_FORMAT);
    assert!(!first.is_saved());
    assert!(first.notice().message.starts_with("Erro ao salvar:"));

    store.fail_writes(false);
    let second = submit(form, &recorder, &FixedClock::default(), DEFAULT_TIMESTAMP_FORMAT);
    assert!(second.is_saved());
    assert_eq!(store.snapshot().len(), 1);
}

#[test]
fn test_header_check_reports_single_missing_column() {
    let mut columns: Vec<String> = SheetLayout::Basic
        .columns()
        .into_iter()
        .map(String::from)
        .collect();
    columns.retain(|c| c != columns::ADDRESS);
    let store = Arc::new(FaultyStore::with_dataset("S", Dataset::new(columns)));

    let report = memory_recorder(&store).verify_headers().unwrap();

    assert!(!report.is_match());
    assert_eq!(report.missing, vec![columns::ADDRESS.to_string()]);
    assert!(report.extra.is_empty());
}

#[test]
fn test_json_workbook_round_trip_across_recorders() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("campo").join("avaliacoes.json");

    let first = Recorder::new(
        JsonWorkbookStore::new(&path, "Avaliacoes_Acumulacao1"),
        SheetLayout::Detailed,
        Duration::from_secs(300),
    );
    first
        .append_and_persist(&record_with("Ana", [0, 1, 2, 3, 4]))
        .unwrap();

    let second = Recorder::new(
        JsonWorkbookStore::new(&path, "Avaliacoes_Acumulacao1"),
        SheetLayout::Detailed,
        Duration::from_secs(300),
    );
    second
        .append_and_persist(&record_with("Bia", [0, 0, 0, 0, 0]))
        .unwrap();

    let data = second.dataset().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data.cell(0, columns::RESIDENT_NAME), Some(&Cell::from("Ana")));
    assert_eq!(
        data.cell(0, columns::RISK_TIER),
        Some(&Cell::from("RISCO GRAVE (NÍVEL 4)"))
    );
    assert_eq!(data.cell(1, columns::RESIDENT_NAME), Some(&Cell::from("Bia")));
    assert!(second.verify_headers().unwrap().is_match());
}

#[test]
fn test_malformed_workbook_fails_loudly() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wb.json");
    std::fs::write(&path, "{ not json").unwrap();
    let recorder = Recorder::new(
        JsonWorkbookStore::new(&path, "S"),
        SheetLayout::Basic,
        Duration::from_secs(300),
    );

    let result = recorder.append_and_persist(&record_with("Ana", [0; 5]));

    assert_error_code!(result, "E001");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn test_row_wider_than_header_blocks_append_and_keeps_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wb.json");
    let contents = r#"{"sheets":{"S":{"columns":["a"],"rows":[["keep","lost-cell"]]}}}"#;
    std::fs::write(&path, contents).unwrap();
    let recorder = Recorder::new(
        JsonWorkbookStore::new(&path, "S"),
        SheetLayout::Basic,
        Duration::from_secs(300),
    );

    let result = recorder.append_and_persist(&record_with("Ana", [0; 5]));

    let err = assert_error_code!(result, "E001");
    assert!(err.to_string().contains("2 cells but the header has 1 columns"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), contents);
}

proptest! {
    #[test]
    fn prop_append_grows_by_one_and_keeps_prefix(
        existing in prop::collection::vec(prop::array::uniform5(0u8..=4), 0..6),
        new in prop::array::uniform5(0u8..=4),
    ) {
        let rows: Vec<(&str, [u8; 5])> = existing.iter().map(|a| ("X", *a)).collect();
        let before = seeded(&rows);

        let after = append_record(before.clone(), &record_with("Novo", new), SheetLayout::Basic);

        prop_assert_eq!(after.len(), before.len() + 1);
        prop_assert_eq!(&after.rows()[..before.len()], before.rows());
        let total: u32 = new.iter().map(|&v| u32::from(v)).sum();
        prop_assert_eq!(
            after.cell(before.len(), columns::TOTAL_SCORE),
            Some(&Cell::from(total))
        );
    }
}
