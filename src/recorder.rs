//! Append-only persistence of assessment records.
//!
//! The backing store only supports whole-table replacement, so appending a
//! record means: read the current worksheet straight from the store, add the
//! new row at the end, write the combined table back, and drop the cached
//! copy. Concurrent writers are not coordinated; the last replace wins.

use crate::core::{Error, Result};
use crate::record::{AssessmentRecord, SheetLayout};
use crate::store::{verify_headers, CachedStore, Dataset, HeaderReport, TabularStore};
use serde::Serialize;
use std::time::Duration;

/// Where a freshly persisted record landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppendReceipt {
    /// Zero-based row index of the new record
    pub row_index: usize,
    /// Row count after the write
    pub total_rows: usize,
}

/// Concatenate `record` onto `existing` without touching earlier rows.
pub fn append_record(
    mut existing: Dataset,
    record: &AssessmentRecord,
    layout: SheetLayout,
) -> Dataset {
    existing.append_row(record.to_row(layout));
    existing
}

/// Writes assessment records to one worksheet.
#[derive(Debug)]
pub struct Recorder<S> {
    store: CachedStore<S>,
    layout: SheetLayout,
}

impl<S: TabularStore> Recorder<S> {
    pub fn new(store: S, layout: SheetLayout, cache_ttl: Duration) -> Self {
        Self {
            store: CachedStore::new(store, cache_ttl),
            layout,
        }
    }

    pub fn layout(&self) -> SheetLayout {
        self.layout
    }

    pub fn worksheet(&self) -> &str {
        self.store.worksheet()
    }

    pub fn store(&self) -> &CachedStore<S> {
        &self.store
    }

    /// Current worksheet contents, served from the TTL cache when fresh.
    pub fn dataset(&self) -> Result<Dataset> {
        self.store
            .read_all()
            .map_err(|e| Error::store_read(self.worksheet(), e))
    }

    /// Append `record` as the last row and persist the combined worksheet.
    ///
    /// The read bypasses the cache so the append is based on the store's
    /// latest contents. A read failure aborts before anything is written. A
    /// write failure leaves the store as it was. The cache is invalidated
    /// only after a successful write.
    pub fn append_and_persist(&self, record: &AssessmentRecord) -> Result<AppendReceipt> {
        let sheet = self.worksheet().to_string();

        let existing = self
            .store
            .read_fresh()
            .map_err(|e| Error::store_read(&sheet, e))?;
        let previous_rows = existing.len();

        let combined = append_record(existing, record, self.layout);
        let total_rows = combined.len();

        // Write through the cache layer, which invalidates on success.
        self.store
            .replace_all(&combined)
            .map_err(|e| Error::store_write(&sheet, e))?;

        log::info!(
            "Persisted assessment for '{}' to worksheet '{}' ({} -> {} rows, tier {})",
            record.resident_name(),
            sheet,
            previous_rows,
            total_rows,
            record.risk_tier().name()
        );

        Ok(AppendReceipt {
            row_index: previous_rows,
            total_rows,
        })
    }

    /// Compare the worksheet header with the columns of the configured layout.
    pub fn verify_headers(&self) -> Result<HeaderReport> {
        let dataset = self
            .store
            .read_fresh()
            .map_err(|e| Error::store_read(self.worksheet(), e))?;
        Ok(verify_headers(dataset.columns(), &self.layout.columns()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CategoryScores;
    use crate::record::DEFAULT_TIMESTAMP_FORMAT;
    use crate::store::{Cell, MemoryStore};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn record(name: &str) -> AssessmentRecord {
        let at = NaiveDate::from_ymd_opt(2026, 5, 4)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        AssessmentRecord::new(
            at,
            DEFAULT_TIMESTAMP_FORMAT,
            name,
            "",
            CategoryScores::from_values(&[0, 1, 0, 1, 0]).unwrap(),
            None,
        )
        .unwrap()
    }

    fn recorder() -> Recorder<MemoryStore> {
        Recorder::new(
            MemoryStore::new("Avaliacoes"),
            SheetLayout::Basic,
            Duration::from_secs(300),
        )
    }

    #[test]
    fn test_append_to_empty_worksheet() {
        let recorder = recorder();
        let receipt = recorder.append_and_persist(&record("Ana")).unwrap();
        assert_eq!(
            receipt,
            AppendReceipt {
                row_index: 0,
                total_rows: 1
            }
        );
        let dataset = recorder.store().inner().snapshot();
        let expected: Vec<String> = SheetLayout::Basic
            .columns()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(dataset.columns(), expected.as_slice());
    }

    #[test]
    fn test_appends_preserve_order() {
        let recorder = recorder();
        recorder.append_and_persist(&record("Ana")).unwrap();
        recorder.append_and_persist(&record("Bruno")).unwrap();

        let dataset = recorder.dataset().unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.cell(0, "nome_morador"), Some(&Cell::from("Ana")));
        assert_eq!(dataset.cell(1, "nome_morador"), Some(&Cell::from("Bruno")));
    }

    #[test]
    fn test_cached_view_sees_new_row_after_persist() {
        let recorder = recorder();
        assert!(recorder.dataset().unwrap().is_empty());
        assert!(recorder.store().is_cached());

        recorder.append_and_persist(&record("Ana")).unwrap();
        assert!(!recorder.store().is_cached());
        assert_eq!(recorder.dataset().unwrap().len(), 1);
    }

    #[test]
    fn test_append_record_is_pure_concatenation() {
        let mut existing = Dataset::new(vec!["timestamp".into(), "legacy".into()]);
        existing.append_row(vec![
            ("timestamp".to_string(), Cell::from("old")),
            ("legacy".to_string(), Cell::from("kept")),
        ]);

        let combined = append_record(existing.clone(), &record("Ana"), SheetLayout::Basic);

        assert_eq!(combined.len(), 2);
        assert_eq!(&combined.columns()[..2], existing.columns());
        assert_eq!(combined.cell(0, "legacy"), Some(&Cell::from("kept")));
        assert_eq!(combined.cell(1, "legacy"), Some(&Cell::Empty));
    }

    #[test]
    fn test_verify_headers_on_fresh_sheet_reports_all_missing() {
        let recorder = recorder();
        let report = recorder.verify_headers().unwrap();
        assert_eq!(report.missing.len(), SheetLayout::Basic.columns().len());

        recorder.append_and_persist(&record("Ana")).unwrap();
        assert!(recorder.verify_headers().unwrap().is_match());
    }
}
