//! Test helper functions for creating test data.
//!
//! | Helper | Purpose |
//! |--------|---------|
//! | [`FixedClock`] | Deterministic timestamps for records |
//! | [`form_with`] | Form with a name and five raw answers |
//! | [`record_with`] | Scored record stamped by [`FixedClock`] |
//! | [`memory_recorder`] | Basic-layout recorder over a [`FaultyStore`] |

use super::FaultyStore;
use crate::core::CategoryScores;
use crate::form::AssessmentForm;
use crate::record::{AssessmentRecord, Clock, SheetLayout, DEFAULT_TIMESTAMP_FORMAT};
use crate::recorder::Recorder;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;
use std::time::Duration;

/// Clock frozen at a given instant. Defaults to 2026-03-02 09:30:00.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Default for FixedClock {
    fn default() -> Self {
        let at = NaiveDate::from_ymd_opt(2026, 3, 2)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap_or_default();
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// # Panics
///
/// Panics if any answer is outside `0..=4`.
pub fn form_with(name: &str, answers: [u8; 5]) -> AssessmentForm {
    let scores = CategoryScores::from_values(&answers)
        .unwrap_or_else(|e| panic!("invalid test answers {answers:?}: {e}"));
    AssessmentForm::new(name, "").with_scores(scores)
}

/// # Panics
///
/// Panics if any answer is outside `0..=4`.
pub fn record_with(name: &str, answers: [u8; 5]) -> AssessmentRecord {
    let form = form_with(name, answers);
    AssessmentRecord::new(
        FixedClock::default().now(),
        DEFAULT_TIMESTAMP_FORMAT,
        &form.resident_name,
        &form.address,
        form.scores,
        None,
    )
    .unwrap_or_else(|e| panic!("default timestamp pattern rejected: {e}"))
}

/// Recorder with a long TTL over a shared fault-injecting store.
pub fn memory_recorder(store: &Arc<FaultyStore>) -> Recorder<Arc<FaultyStore>> {
    Recorder::new(
        Arc::clone(store),
        SheetLayout::Basic,
        Duration::from_secs(300),
    )
}
