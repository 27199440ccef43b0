//! Shared error types for the application

use crate::core::CategoryKey;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by a tabular store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File system failure while reading or writing the workbook
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Workbook exists but cannot be decoded
    #[error("Malformed workbook {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A row holds more cells than the header names
    #[error("Row {row} of {path} has {cells} cells but the header has {columns} columns")]
    RowTooWide {
        path: PathBuf,
        row: usize,
        cells: usize,
        columns: usize,
    },

    /// The workbook could not be encoded for writing
    #[error("Failed to encode workbook {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Backend refused or could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Malformed {
            path: path.into(),
            source,
        }
    }

    pub fn encode(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Encode {
            path: path.into(),
            source,
        }
    }
}

/// Input problems that block a submission before the store is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Resident name is required")]
    MissingResidentName,

    #[error("Score {value} for {category} is outside 0..=4")]
    ScoreOutOfRange { category: CategoryKey, value: u8 },

    #[error("Expected {expected} category scores, got {actual}")]
    WrongScoreCount { expected: usize, actual: usize },

    #[error("Timestamp pattern '{0}' cannot be rendered")]
    TimestampFormat(String),
}

/// Main error type for hoardrisk operations
#[derive(Debug, Error)]
pub enum Error {
    /// Submission rejected by input validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The current dataset could not be loaded
    #[error("Failed to read worksheet '{sheet}': {source}")]
    StoreRead {
        sheet: String,
        #[source]
        source: StoreError,
    },

    /// The combined dataset could not be written back
    #[error("Failed to write worksheet '{sheet}': {source}")]
    StoreWrite {
        sheet: String,
        #[source]
        source: StoreError,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn store_read(sheet: impl Into<String>, source: StoreError) -> Self {
        Self::StoreRead {
            sheet: sheet.into(),
            source,
        }
    }

    pub fn store_write(sheet: impl Into<String>, source: StoreError) -> Self {
        Self::StoreWrite {
            sheet: sheet.into(),
            source,
        }
    }

    /// Stable error code for programmatic handling.
    ///
    /// - E001-E009: store errors
    /// - E020-E029: configuration errors
    /// - E050-E059: validation errors
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::StoreRead { .. } => "E001",
            Self::StoreWrite { .. } => "E002",
            Self::Io(_) => "E009",
            Self::Json(_) => "E009",
            Self::Configuration(_) => "E020",
            Self::Validation(ValidationError::MissingResidentName) => "E050",
            Self::Validation(ValidationError::ScoreOutOfRange { .. }) => "E051",
            Self::Validation(ValidationError::WrongScoreCount { .. }) => "E052",
            Self::Validation(ValidationError::TimestampFormat(_)) => "E053",
        }
    }

    /// Whether the person filling in the form can fix this by editing input.
    pub fn is_user_fixable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Configuration(_))
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
