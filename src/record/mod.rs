//! Assessment records and the worksheet layouts they are written with.

pub mod clock;

pub use clock::{Clock, SystemClock};

use crate::core::{CategoryKey, CategoryScores, ValidationError};
use crate::scoring::{summarize, RiskTier, ScoreSummary};
use crate::store::Cell;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render `at` with a strftime pattern.
///
/// Returns `None` for patterns chrono cannot render for a naive local time,
/// which includes unknown specifiers and offset specifiers like `%z`.
pub fn render_timestamp(at: NaiveDateTime, format: &str) -> Option<String> {
    let mut rendered = String::new();
    write!(rendered, "{}", at.format(format)).ok()?;
    Some(rendered)
}

pub mod columns {
    pub const TIMESTAMP: &str = "timestamp";
    pub const RESIDENT_NAME: &str = "nome_morador";
    pub const ADDRESS: &str = "endereco";
    pub const TOTAL_SCORE: &str = "total_pontos";
    pub const RISK_TIER: &str = "status_risco";
    pub const INTERVENTION: &str = "intervencao";

    pub const ANIMAL_COUNT: &str = "qtd_animais";
    pub const SPECIES: &str = "especies";
    pub const COCKROACHES: &str = "v_baratas";
    pub const RATS: &str = "v_ratos";
    pub const SCORPIONS: &str = "v_escorpioes";
    pub const FLIES: &str = "v_moscas";
    pub const OTHER_VECTORS: &str = "v_outros";
    pub const ANIMAL_CONDITION: &str = "cond_animais";
    pub const UNUSABLE_ROOMS: &str = "comodos_inutilizados";
    pub const LIVES_ALONE: &str = "mora_sozinho";
    pub const HEALTH_FOLLOW_UP: &str = "acomp_saude";
    pub const OBSERVATIONS: &str = "observacoes";

    pub const DETAIL: [&str; 12] = [
        ANIMAL_COUNT,
        SPECIES,
        COCKROACHES,
        RATS,
        SCORPIONS,
        FLIES,
        OTHER_VECTORS,
        ANIMAL_CONDITION,
        UNUSABLE_ROOMS,
        LIVES_ALONE,
        HEALTH_FOLLOW_UP,
        OBSERVATIONS,
    ];
}

/// Which column set the worksheet uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetLayout {
    /// Identification, five category scores and the classification
    #[default]
    Basic,
    /// Basic columns plus the vector/animal detail block
    Detailed,
}

impl SheetLayout {
    /// Expected worksheet header, in write order.
    pub fn columns(&self) -> Vec<&'static str> {
        let mut cols = vec![columns::TIMESTAMP, columns::RESIDENT_NAME, columns::ADDRESS];
        cols.extend(CategoryKey::ALL.iter().map(CategoryKey::column));
        if *self == SheetLayout::Detailed {
            cols.extend(columns::DETAIL);
        }
        cols.extend([columns::TOTAL_SCORE, columns::RISK_TIER, columns::INTERVENTION]);
        cols
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "detailed" => Some(Self::Detailed),
            _ => None,
        }
    }
}

/// Vector, animal and household detail collected by the detailed form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VectorDetails {
    pub animal_count: u32,
    pub species: String,
    pub cockroaches: bool,
    pub rats: bool,
    pub scorpions: bool,
    pub flies: bool,
    pub other_vectors: String,
    pub animal_condition: String,
    pub unusable_rooms: u32,
    pub lives_alone: bool,
    pub health_follow_up: bool,
    pub observations: String,
}

impl VectorDetails {
    fn cells(&self) -> Vec<(&'static str, Cell)> {
        vec![
            (columns::ANIMAL_COUNT, self.animal_count.into()),
            (columns::SPECIES, self.species.trim().into()),
            (columns::COCKROACHES, self.cockroaches.into()),
            (columns::RATS, self.rats.into()),
            (columns::SCORPIONS, self.scorpions.into()),
            (columns::FLIES, self.flies.into()),
            (columns::OTHER_VECTORS, self.other_vectors.trim().into()),
            (columns::ANIMAL_CONDITION, self.animal_condition.trim().into()),
            (columns::UNUSABLE_ROOMS, self.unusable_rooms.into()),
            (columns::LIVES_ALONE, self.lives_alone.into()),
            (columns::HEALTH_FOLLOW_UP, self.health_follow_up.into()),
            (columns::OBSERVATIONS, self.observations.trim().into()),
        ]
    }
}

/// One immutable worksheet row.
///
/// Constructed only through [`AssessmentRecord::new`], which derives the total,
/// critical flag and classification from the scores so they cannot disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentRecord {
    timestamp: String,
    resident_name: String,
    address: String,
    scores: CategoryScores,
    details: Option<VectorDetails>,
    summary: ScoreSummary,
}

impl AssessmentRecord {
    pub fn new(
        created_at: NaiveDateTime,
        timestamp_format: &str,
        resident_name: &str,
        address: &str,
        scores: CategoryScores,
        details: Option<VectorDetails>,
    ) -> Result<Self, ValidationError> {
        let timestamp = render_timestamp(created_at, timestamp_format)
            .ok_or_else(|| ValidationError::TimestampFormat(timestamp_format.to_string()))?;
        Ok(Self {
            timestamp,
            resident_name: resident_name.trim().to_string(),
            address: address.trim().to_string(),
            scores,
            details,
            summary: summarize(&scores),
        })
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn resident_name(&self) -> &str {
        &self.resident_name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn scores(&self) -> &CategoryScores {
        &self.scores
    }

    pub fn details(&self) -> Option<&VectorDetails> {
        self.details.as_ref()
    }

    pub fn summary(&self) -> &ScoreSummary {
        &self.summary
    }

    pub fn total_score(&self) -> u32 {
        self.summary.total_score
    }

    pub fn has_critical_item(&self) -> bool {
        self.summary.has_critical_item
    }

    pub fn risk_tier(&self) -> RiskTier {
        self.summary.tier()
    }

    pub fn recommended_intervention(&self) -> &'static str {
        self.summary.classification.intervention
    }

    /// Row cells keyed by column name, in `layout` order.
    ///
    /// The detail block is emitted only for the detailed layout; a record
    /// without details leaves those columns empty.
    ///
    /// `status_risco` holds the plain tier label, e.g. `RISCO GRAVE (NÍVEL 4)`.
    /// Older worksheets may carry the same label prefixed with a colored
    /// circle emoji; `RiskTier::from_label` reads both forms.
    pub fn to_row(&self, layout: SheetLayout) -> Vec<(String, Cell)> {
        let mut cells: Vec<(&'static str, Cell)> = vec![
            (columns::TIMESTAMP, self.timestamp.as_str().into()),
            (columns::RESIDENT_NAME, self.resident_name.as_str().into()),
            (columns::ADDRESS, self.address.as_str().into()),
        ];
        cells.extend(
            self.scores
                .iter()
                .map(|(key, score)| (key.column(), Cell::from(score.value()))),
        );

        if layout == SheetLayout::Detailed {
            match &self.details {
                Some(details) => cells.extend(details.cells()),
                None => cells.extend(columns::DETAIL.iter().map(|c| (*c, Cell::Empty))),
            }
        }

        cells.extend([
            (columns::TOTAL_SCORE, Cell::from(self.summary.total_score)),
            (columns::RISK_TIER, Cell::from(self.summary.classification.label)),
            (
                columns::INTERVENTION,
                Cell::from(self.summary.classification.intervention),
            ),
        ]);

        cells
            .into_iter()
            .map(|(name, cell)| (name.to_string(), cell))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(9, 14, 5)
            .unwrap()
    }

    fn record(details: Option<VectorDetails>) -> AssessmentRecord {
        AssessmentRecord::new(
            at(),
            DEFAULT_TIMESTAMP_FORMAT,
            "  Maria da Silva ",
            "Rua A, 10",
            CategoryScores::from_values(&[1, 2, 3, 2, 1]).unwrap(),
            details,
        )
        .unwrap()
    }

    #[test]
    fn test_basic_row_matches_layout_columns() {
        let row = record(None).to_row(SheetLayout::Basic);
        let names: Vec<&str> = row.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, SheetLayout::Basic.columns());
    }

    #[test]
    fn test_detailed_row_matches_layout_columns() {
        let row = record(Some(VectorDetails::default())).to_row(SheetLayout::Detailed);
        let names: Vec<&str> = row.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, SheetLayout::Detailed.columns());
    }

    #[test]
    fn test_derived_fields() {
        let record = record(None);
        assert_eq!(record.timestamp(), "2026-03-02 09:14:05");
        assert_eq!(record.resident_name(), "Maria da Silva");
        assert_eq!(record.total_score(), 9);
        assert!(!record.has_critical_item());
        assert_eq!(record.risk_tier(), RiskTier::Moderado);
    }

    #[test]
    fn test_row_values() {
        let row = record(None).to_row(SheetLayout::Basic);
        let value = |name: &str| row.iter().find(|(n, _)| n == name).map(|(_, c)| c.clone());
        assert_eq!(value("estrutural"), Some(Cell::Integer(1)));
        assert_eq!(value("total_pontos"), Some(Cell::Integer(9)));
        assert_eq!(
            value("status_risco"),
            Some(Cell::from("RISCO MODERADO (NÍVEL 2)"))
        );
    }

    #[test]
    fn test_detailed_layout_without_details_leaves_blanks() {
        let row = record(None).to_row(SheetLayout::Detailed);
        let rats = row.iter().find(|(n, _)| n == columns::RATS).unwrap();
        assert_eq!(rats.1, Cell::Empty);
    }

    #[test]
    fn test_stored_tier_label_has_no_emoji() {
        let row = record(None).to_row(SheetLayout::Basic);
        let (_, label) = row.iter().find(|(n, _)| n == columns::RISK_TIER).unwrap();
        assert!(label.as_text().unwrap().starts_with("RISCO "));
    }

    #[test]
    fn test_offset_specifier_is_rejected_instead_of_panicking() {
        let result = AssessmentRecord::new(
            at(),
            "%Y-%m-%d %z",
            "Ana",
            "",
            CategoryScores::default(),
            None,
        );
        assert_eq!(
            result.unwrap_err(),
            ValidationError::TimestampFormat("%Y-%m-%d %z".to_string())
        );
    }

    #[test]
    fn test_render_timestamp() {
        assert_eq!(
            render_timestamp(at(), "%d/%m/%Y %H:%M").as_deref(),
            Some("02/03/2026 09:14")
        );
        assert_eq!(render_timestamp(at(), "%:z"), None);
        assert_eq!(render_timestamp(at(), "%Z"), None);
        assert_eq!(render_timestamp(at(), "%Q"), None);
    }

    #[test]
    fn test_layout_parse() {
        assert_eq!(SheetLayout::parse("Detailed"), Some(SheetLayout::Detailed));
        assert_eq!(SheetLayout::parse("basic"), Some(SheetLayout::Basic));
        assert_eq!(SheetLayout::parse("wide"), None);
    }
}
