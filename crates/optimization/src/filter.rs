use btcyield_domain::entities::protocol::Protocol;
use btcyield_domain::value_objects::risk_profile::RiskProfile;

/// Returns the protocols `profile` admits.
///
/// Builds a fresh collection in catalog order; `protocols` is left untouched.
#[must_use]
pub fn filter_by_risk(protocols: &[Protocol], profile: &RiskProfile) -> Vec<Protocol> {
    protocols
        .iter()
        .filter(|p| profile.admits(p.risk_score))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use btcyield_domain::enums::LiquidityTier;

    fn catalog() -> Vec<Protocol> {
        vec![
            Protocol::new("CoreDAO Staking", 12.8, 3, 125_000_000.0, LiquidityTier::High),
            Protocol::new("CORE-BTC LP", 15.2, 7, 45_000_000.0, LiquidityTier::Medium),
            Protocol::new("Lightning Yield", 6.8, 1, 210_000_000.0, LiquidityTier::VeryHigh),
        ]
    }

    #[test]
    fn test_filter_preserves_order() {
        let source = catalog();
        let filtered = filter_by_risk(&source, &RiskProfile::CONSERVATIVE);

        let names: Vec<&str> = filtered.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["CoreDAO Staking", "Lightning Yield"]);
        assert_eq!(filtered[0], source[0]);
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn test_filter_can_be_empty() {
        let closed = RiskProfile {
            max_risk: 0,
            ..RiskProfile::CONSERVATIVE
        };
        assert!(filter_by_risk(&catalog(), &closed).is_empty());
        assert_eq!(filter_by_risk(&catalog(), &RiskProfile::AGGRESSIVE).len(), 3);
        assert_eq!(filter_by_risk(&catalog(), &RiskProfile::MODERATE).len(), 2);
    }
}
