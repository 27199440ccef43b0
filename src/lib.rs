// Export modules for library usage
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod form;
pub mod formatting;
pub mod record;
pub mod recorder;
pub mod scoring;
pub mod store;
pub mod testkit;

// Re-export commonly used types
pub use crate::core::{
    CategoryKey, CategoryScore, CategoryScores, Error, Result, StoreError, ValidationError,
};

pub use crate::scoring::{classify, classify_tier, summarize, Classification, RiskTier, ScoreSummary};

pub use crate::record::{AssessmentRecord, Clock, SheetLayout, SystemClock, VectorDetails};

pub use crate::form::{submit, AssessmentForm, Notice, NoticeLevel, SubmissionOutcome};

pub use crate::recorder::{append_record, AppendReceipt, Recorder};

pub use crate::store::{
    verify_headers, CachedStore, Cell, Dataset, HeaderReport, JsonWorkbookStore, MemoryStore,
    TabularStore,
};

pub use crate::config::{load_config, HoardriskConfig};
