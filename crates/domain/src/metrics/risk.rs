use crate::value_objects::allocation::Allocation;

/// Percentage-weighted risk score of the allocation. Zero when empty.
#[must_use]
pub fn calculate_portfolio_risk(allocation: &Allocation) -> f64 {
    allocation
        .iter()
        .map(|e| f64::from(e.risk) * e.weight())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::protocol::Protocol;
    use crate::enums::LiquidityTier;
    use crate::value_objects::allocation::AllocationEntry;

    #[test]
    fn test_portfolio_risk() {
        let lp = Protocol::new("CORE-BTC LP", 15.2, 7, 45_000_000.0, LiquidityTier::Medium);
        let bridge = Protocol::new("Bitcoin Bridge", 8.5, 2, 89_000_000.0, LiquidityTier::High);
        let allocation: Allocation = vec![
            AllocationEntry::from_protocol(&lp, 25.0, 250.0),
            AllocationEntry::from_protocol(&bridge, 75.0, 750.0),
        ]
        .into_iter()
        .collect();

        assert!((calculate_portfolio_risk(&allocation) - 3.25).abs() < 1e-9);
        assert_eq!(calculate_portfolio_risk(&Allocation::new()), 0.0);
    }
}
