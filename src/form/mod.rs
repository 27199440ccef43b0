//! The assessment form as an explicit request object.
//!
//! All input travels in an [`AssessmentForm`] passed by value to
//! [`submit`]; there is no ambient UI state. Clearing the form after a save
//! is a separate [`AssessmentForm::reset`] call the caller issues when its
//! configuration asks for it.

pub mod prompt;

use crate::core::{CategoryKey, CategoryScore, CategoryScores, Error, ValidationError};
use crate::record::{AssessmentRecord, Clock, VectorDetails};
use crate::recorder::{AppendReceipt, Recorder};
use crate::scoring::{summarize, ScoreSummary};
use crate::store::TabularStore;
use serde::{Deserialize, Serialize};

/// Everything the field worker entered for one household.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssessmentForm {
    pub resident_name: String,
    pub address: String,
    pub scores: CategoryScores,
    pub details: Option<VectorDetails>,
}

impl AssessmentForm {
    pub fn new(resident_name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            resident_name: resident_name.into(),
            address: address.into(),
            ..Default::default()
        }
    }

    pub fn with_score(mut self, key: CategoryKey, score: CategoryScore) -> Self {
        self.scores.set(key, score);
        self
    }

    pub fn with_scores(mut self, scores: CategoryScores) -> Self {
        self.scores = scores;
        self
    }

    pub fn with_details(mut self, details: VectorDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// Live total, tier and intervention for the current answers.
    pub fn preview(&self) -> ScoreSummary {
        summarize(&self.scores)
    }

    /// Check the form can be submitted. Only the resident name is required.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.resident_name.trim().is_empty() {
            return Err(ValidationError::MissingResidentName);
        }
        Ok(())
    }

    /// Post-commit reset: back to a blank form with every answer at zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn into_record(
        self,
        clock: &dyn Clock,
        timestamp_format: &str,
    ) -> Result<AssessmentRecord, ValidationError> {
        AssessmentRecord::new(
            clock.now(),
            timestamp_format,
            &self.resident_name,
            &self.address,
            self.scores,
            self.details,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// Message shown to the field worker after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Result of one submit attempt. Every variant carries the score summary
/// so it can be displayed whether or not the save went through.
#[derive(Debug)]
pub enum SubmissionOutcome {
    Saved {
        record: AssessmentRecord,
        receipt: AppendReceipt,
    },
    Rejected {
        summary: ScoreSummary,
        reason: ValidationError,
    },
    Failed {
        summary: ScoreSummary,
        error: Error,
    },
}

impl SubmissionOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    pub fn summary(&self) -> ScoreSummary {
        match self {
            Self::Saved { record, .. } => *record.summary(),
            Self::Rejected { summary, .. } | Self::Failed { summary, .. } => *summary,
        }
    }

    pub fn notice(&self) -> Notice {
        match self {
            Self::Saved { .. } => Notice {
                level: NoticeLevel::Success,
                message: "Avaliação salva com sucesso!".to_string(),
            },
            Self::Rejected {
                reason: ValidationError::MissingResidentName,
                ..
            } => Notice {
                level: NoticeLevel::Warning,
                message: "Preencha o nome antes de salvar.".to_string(),
            },
            Self::Rejected { reason, .. } => Notice {
                level: NoticeLevel::Warning,
                message: reason.to_string(),
            },
            Self::Failed { error, .. } => Notice {
                level: NoticeLevel::Error,
                message: format!("Erro ao salvar: {error}"),
            },
        }
    }
}

/// Validate, score and persist one form.
///
/// Validation failures return before the store is touched. Store failures
/// are reported with their cause and the form can simply be resubmitted.
pub fn submit<S: TabularStore>(
    form: AssessmentForm,
    recorder: &Recorder<S>,
    clock: &dyn Clock,
    timestamp_format: &str,
) -> SubmissionOutcome {
    let summary = form.preview();

    let record = match form
        .validate()
        .and_then(|()| form.into_record(clock, timestamp_format))
    {
        Ok(record) => record,
        Err(reason) => {
            log::debug!("Submission rejected: {}", reason);
            return SubmissionOutcome::Rejected { summary, reason };
        }
    };
    match recorder.append_and_persist(&record) {
        Ok(receipt) => SubmissionOutcome::Saved { record, receipt },
        Err(error) => {
            log::warn!("Failed to persist assessment [{}]: {}", error.code(), error);
            SubmissionOutcome::Failed { summary, error }
        }
    }
}
