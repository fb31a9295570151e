use crate::enums::RiskLevel;
use serde::{Deserialize, Serialize};

/// Risk ceiling and diversification pressure for one tolerance band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub level: RiskLevel,
    /// Highest protocol risk score admitted by this profile.
    pub max_risk: u8,
    /// Strength of the positional penalty, in `(0, 1]`.
    pub diversification_factor: f64,
}

impl RiskProfile {
    pub const CONSERVATIVE: Self = Self {
        level: RiskLevel::Conservative,
        max_risk: 3,
        diversification_factor: 0.8,
    };

    pub const MODERATE: Self = Self {
        level: RiskLevel::Moderate,
        max_risk: 6,
        diversification_factor: 0.6,
    };

    pub const AGGRESSIVE: Self = Self {
        level: RiskLevel::Aggressive,
        max_risk: 10,
        diversification_factor: 0.4,
    };

    #[must_use]
    pub fn for_level(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Conservative => Self::CONSERVATIVE,
            RiskLevel::Moderate => Self::MODERATE,
            RiskLevel::Aggressive => Self::AGGRESSIVE,
        }
    }

    /// Checks whether a protocol risk score fits under this profile.
    #[must_use]
    pub fn admits(&self, risk_score: u8) -> bool {
        risk_score <= self.max_risk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_constants() {
        let conservative = RiskProfile::for_level(RiskLevel::Conservative);
        assert_eq!(conservative.max_risk, 3);
        assert_eq!(conservative.diversification_factor, 0.8);

        let moderate = RiskProfile::for_level(RiskLevel::Moderate);
        assert_eq!(moderate.max_risk, 6);
        assert_eq!(moderate.diversification_factor, 0.6);

        let aggressive = RiskProfile::for_level(RiskLevel::Aggressive);
        assert_eq!(aggressive.max_risk, 10);
        assert_eq!(aggressive.diversification_factor, 0.4);
    }

    #[test]
    fn test_admits() {
        assert!(RiskProfile::CONSERVATIVE.admits(3));
        assert!(!RiskProfile::CONSERVATIVE.admits(4));
        assert!(RiskProfile::AGGRESSIVE.admits(10));
    }
}
