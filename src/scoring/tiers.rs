/// Risk tier classification for household assessments
///
/// The composite total and the critical-item flag map onto four ordered
/// tiers. Rules are evaluated top-down and the first match wins, so a single
/// category at the maximum value lands in `Grave` even when the total alone
/// would sit in a lower bracket.
use serde::{Deserialize, Serialize};

/// Totals at or above this value are `Grave` regardless of the critical flag.
pub const GRAVE_MIN_TOTAL: u32 = 21;
pub const ALTO_MIN_TOTAL: u32 = 13;
pub const MODERADO_MIN_TOTAL: u32 = 8;

/// Risk tier, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    /// Level 1: total <= 7 and no critical item
    Baixo,
    /// Level 2: total in 8..=12
    Moderado,
    /// Level 3: total in 13..=20
    Alto,
    /// Level 4: total >= 21 or any category at the maximum
    Grave,
}

/// Display color tag attached to a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierColor {
    Green,
    Yellow,
    Orange,
    Red,
}

impl TierColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TierColor::Green => "green",
            TierColor::Yellow => "yellow",
            TierColor::Orange => "orange",
            TierColor::Red => "red",
        }
    }
}

impl RiskTier {
    /// Numeric level, 1 (lowest) to 4 (highest)
    pub fn level(&self) -> u8 {
        match self {
            RiskTier::Baixo => 1,
            RiskTier::Moderado => 2,
            RiskTier::Alto => 3,
            RiskTier::Grave => 4,
        }
    }

    /// Short tier name
    pub fn name(&self) -> &'static str {
        match self {
            RiskTier::Baixo => "BAIXO",
            RiskTier::Moderado => "MODERADO",
            RiskTier::Alto => "ALTO",
            RiskTier::Grave => "GRAVE",
        }
    }

    /// Label written to the `status_risco` column
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Baixo => "RISCO BAIXO (NÍVEL 1)",
            RiskTier::Moderado => "RISCO MODERADO (NÍVEL 2)",
            RiskTier::Alto => "RISCO ALTO (NÍVEL 3)",
            RiskTier::Grave => "RISCO GRAVE (NÍVEL 4)",
        }
    }

    /// Marker shown before the label on emoji-capable terminals
    pub fn emoji(&self) -> &'static str {
        match self {
            RiskTier::Baixo => "🟢",
            RiskTier::Moderado => "🟡",
            RiskTier::Alto => "🟠",
            RiskTier::Grave => "🔴",
        }
    }

    pub fn color(&self) -> TierColor {
        match self {
            RiskTier::Baixo => TierColor::Green,
            RiskTier::Moderado => TierColor::Yellow,
            RiskTier::Alto => TierColor::Orange,
            RiskTier::Grave => TierColor::Red,
        }
    }

    /// Recommended intervention for households in this tier
    pub fn intervention(&self) -> &'static str {
        match self {
            RiskTier::Baixo => "Monitoramento periódico trimestral.",
            RiskTier::Moderado => {
                "Plano de cuidado individualizado com visitas bimestrais."
            }
            RiskTier::Alto => "Visitas mensais e acompanhamento intensivo da equipe.",
            RiskTier::Grave => {
                "Acompanhamento intensivo e contínuo por equipe multidisciplinar."
            }
        }
    }

    /// Recover a tier from a stored `status_risco` cell.
    ///
    /// Accepts the plain label, the emoji-prefixed label, or the short name.
    pub fn from_label(text: &str) -> Option<Self> {
        let upper = text.to_uppercase();
        [
            RiskTier::Grave,
            RiskTier::Alto,
            RiskTier::Moderado,
            RiskTier::Baixo,
        ]
        .into_iter()
        .find(|tier| upper.contains(tier.name()))
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Full result of classifying a household
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Classification {
    pub tier: RiskTier,
    pub label: &'static str,
    pub color: TierColor,
    pub intervention: &'static str,
}

impl From<RiskTier> for Classification {
    fn from(tier: RiskTier) -> Self {
        Self {
            tier,
            label: tier.label(),
            color: tier.color(),
            intervention: tier.intervention(),
        }
    }
}

/// Classify a composite total into a risk tier.
pub fn classify_tier(total: u32, has_critical: bool) -> RiskTier {
    if total >= GRAVE_MIN_TOTAL || has_critical {
        return RiskTier::Grave;
    }

    if total >= ALTO_MIN_TOTAL {
        return RiskTier::Alto;
    }

    if total >= MODERADO_MIN_TOTAL {
        return RiskTier::Moderado;
    }

    RiskTier::Baixo
}

/// Classify and attach label, color and intervention text.
pub fn classify(total: u32, has_critical: bool) -> Classification {
    classify_tier(total, has_critical).into()
}
