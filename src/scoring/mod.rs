pub mod tiers;

pub use tiers::{classify, classify_tier, Classification, RiskTier, TierColor};

use crate::core::CategoryScores;
use serde::Serialize;

/// Total, critical flag and classification for one set of answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreSummary {
    pub total_score: u32,
    pub has_critical_item: bool,
    pub classification: Classification,
}

impl ScoreSummary {
    pub fn tier(&self) -> RiskTier {
        self.classification.tier
    }
}

/// Pure scoring entry point used by the form preview and the recorder.
pub fn summarize(scores: &CategoryScores) -> ScoreSummary {
    let total_score = scores.total();
    let has_critical_item = scores.has_critical_item();
    ScoreSummary {
        total_score,
        has_critical_item,
        classification: classify(total_score, has_critical_item),
    }
}
