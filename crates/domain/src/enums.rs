use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative withdrawal-ease bucket attached to a protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquidityTier {
    VeryHigh,
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

impl LiquidityTier {
    /// Numeric score used by the confidence metric.
    #[must_use]
    pub fn score(&self) -> f64 {
        match self {
            Self::VeryHigh => 5.0,
            Self::High => 4.0,
            Self::Medium => 3.0,
            Self::Low => 2.0,
            Self::Unknown => 1.0,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryHigh => "very_high",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LiquidityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskLevel {
    /// Maps a caller tolerance score onto a risk level.
    ///
    /// The score is expected to be validated to `[1, 10]` upstream; anything
    /// above 7 resolves to aggressive.
    #[must_use]
    pub fn from_tolerance(tolerance: u8) -> Self {
        if tolerance <= 3 {
            Self::Conservative
        } else if tolerance <= 7 {
            Self::Moderate
        } else {
            Self::Aggressive
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liquidity_scores() {
        assert_eq!(LiquidityTier::VeryHigh.score(), 5.0);
        assert_eq!(LiquidityTier::High.score(), 4.0);
        assert_eq!(LiquidityTier::Medium.score(), 3.0);
        assert_eq!(LiquidityTier::Low.score(), 2.0);
        assert_eq!(LiquidityTier::Unknown.score(), 1.0);
    }

    #[test]
    fn test_liquidity_wire_names() {
        let tier: LiquidityTier = serde_json::from_str("\"very_high\"").unwrap();
        assert_eq!(tier, LiquidityTier::VeryHigh);

        let other: LiquidityTier = serde_json::from_str("\"frozen\"").unwrap();
        assert_eq!(other, LiquidityTier::Unknown);

        assert_eq!(
            serde_json::to_string(&LiquidityTier::Medium).unwrap(),
            "\"medium\""
        );
    }

    #[test]
    fn test_risk_level_thresholds() {
        assert_eq!(RiskLevel::from_tolerance(1), RiskLevel::Conservative);
        assert_eq!(RiskLevel::from_tolerance(3), RiskLevel::Conservative);
        assert_eq!(RiskLevel::from_tolerance(4), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_tolerance(7), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_tolerance(8), RiskLevel::Aggressive);
        assert_eq!(RiskLevel::from_tolerance(10), RiskLevel::Aggressive);
    }
}
