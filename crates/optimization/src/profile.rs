use btcyield_domain::enums::RiskLevel;
use btcyield_domain::value_objects::risk_profile::RiskProfile;

/// Resolves a tolerance score to one of the fixed risk profiles.
///
/// Range checking belongs to the caller; see
/// [`OptimizationRequest::validate`](crate::optimizer::OptimizationRequest::validate).
#[must_use]
pub fn resolve_risk_profile(tolerance: u8) -> RiskProfile {
    RiskProfile::for_level(RiskLevel::from_tolerance(tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_bands() {
        for tolerance in 1..=3 {
            assert_eq!(resolve_risk_profile(tolerance), RiskProfile::CONSERVATIVE);
        }
        for tolerance in 4..=7 {
            assert_eq!(resolve_risk_profile(tolerance), RiskProfile::MODERATE);
        }
        for tolerance in 8..=10 {
            assert_eq!(resolve_risk_profile(tolerance), RiskProfile::AGGRESSIVE);
        }
    }
}
