pub mod errors;

use serde::{Deserialize, Serialize};

pub use errors::{Error, Result, StoreError, ValidationError};

/// Highest value a single category can take. Any category at this value
/// marks the household as having a critical item.
pub const MAX_CATEGORY_SCORE: u8 = 4;

/// Number of scored categories on the form.
pub const CATEGORY_COUNT: usize = 5;

/// The five fixed assessment categories, in form order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Copy, Ord, PartialOrd)]
pub enum CategoryKey {
    #[serde(rename = "estrutural")]
    Structural,
    #[serde(rename = "sanitario")]
    Sanitary,
    #[serde(rename = "animais")]
    Animals,
    #[serde(rename = "obstrucao")]
    Obstruction,
    #[serde(rename = "psicossocial")]
    Psychosocial,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; CATEGORY_COUNT] = [
        CategoryKey::Structural,
        CategoryKey::Sanitary,
        CategoryKey::Animals,
        CategoryKey::Obstruction,
        CategoryKey::Psychosocial,
    ];

    /// Column name used for this category in the worksheet.
    pub fn column(&self) -> &'static str {
        match self {
            CategoryKey::Structural => "estrutural",
            CategoryKey::Sanitary => "sanitario",
            CategoryKey::Animals => "animais",
            CategoryKey::Obstruction => "obstrucao",
            CategoryKey::Psychosocial => "psicossocial",
        }
    }

    /// Position of the category on the form.
    pub fn index(&self) -> usize {
        match self {
            CategoryKey::Structural => 0,
            CategoryKey::Sanitary => 1,
            CategoryKey::Animals => 2,
            CategoryKey::Obstruction => 3,
            CategoryKey::Psychosocial => 4,
        }
    }

    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.column() == column)
    }
}

impl std::fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// A single category answer, guaranteed to be within `0..=4`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Copy, Default, Ord, PartialOrd)]
#[serde(try_from = "u8", into = "u8")]
pub struct CategoryScore(u8);

impl CategoryScore {
    pub const MIN: CategoryScore = CategoryScore(0);
    pub const MAX: CategoryScore = CategoryScore(MAX_CATEGORY_SCORE);

    pub fn new(category: CategoryKey, value: u8) -> std::result::Result<Self, ValidationError> {
        if value > MAX_CATEGORY_SCORE {
            return Err(ValidationError::ScoreOutOfRange { category, value });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_critical(&self) -> bool {
        self.0 == MAX_CATEGORY_SCORE
    }
}

impl TryFrom<u8> for CategoryScore {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        if value > MAX_CATEGORY_SCORE {
            return Err(format!("category score {value} is outside 0..=4"));
        }
        Ok(Self(value))
    }
}

impl From<CategoryScore> for u8 {
    fn from(score: CategoryScore) -> u8 {
        score.0
    }
}

/// Exactly one score per category, stored in [`CategoryKey::ALL`] order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Copy, Default)]
pub struct CategoryScores([CategoryScore; CATEGORY_COUNT]);

impl CategoryScores {
    pub fn new(scores: [CategoryScore; CATEGORY_COUNT]) -> Self {
        Self(scores)
    }

    /// Build from raw answers in form order, rejecting out-of-range values.
    pub fn from_values(values: &[u8]) -> std::result::Result<Self, ValidationError> {
        if values.len() != CATEGORY_COUNT {
            return Err(ValidationError::WrongScoreCount {
                expected: CATEGORY_COUNT,
                actual: values.len(),
            });
        }
        let mut scores = [CategoryScore::MIN; CATEGORY_COUNT];
        for (slot, (key, value)) in scores
            .iter_mut()
            .zip(CategoryKey::ALL.iter().zip(values.iter()))
        {
            *slot = CategoryScore::new(*key, *value)?;
        }
        Ok(Self(scores))
    }

    pub fn get(&self, key: CategoryKey) -> CategoryScore {
        self.0[key.index()]
    }

    pub fn set(&mut self, key: CategoryKey, score: CategoryScore) {
        self.0[key.index()] = score;
    }

    pub fn iter(&self) -> impl Iterator<Item = (CategoryKey, CategoryScore)> + '_ {
        CategoryKey::ALL.iter().copied().zip(self.0.iter().copied())
    }

    pub fn total(&self) -> u32 {
        self.0.iter().map(|s| u32::from(s.value())).sum()
    }

    pub fn has_critical_item(&self) -> bool {
        self.0.iter().any(CategoryScore::is_critical)
    }
}
