use crate::math::rounding::round_currency;
use crate::value_objects::allocation::Allocation;
use crate::value_objects::optimization_result::ProjectedYield;

/// Percentage-weighted APY of the allocation. Zero when empty.
#[must_use]
pub fn calculate_weighted_apy(allocation: &Allocation) -> f64 {
    allocation.iter().map(|e| e.apy * e.weight()).sum()
}

/// Projects yearly, monthly, weekly and daily earnings on `amount`.
///
/// Every horizon is derived from the unrounded yearly figure and then
/// rounded to cents independently.
#[must_use]
pub fn calculate_projected_yield(amount: f64, allocation: &Allocation) -> ProjectedYield {
    let yearly = amount * calculate_weighted_apy(allocation) / 100.0;

    ProjectedYield {
        daily: round_currency(yearly / 365.0),
        weekly: round_currency(yearly / 52.0),
        monthly: round_currency(yearly / 12.0),
        yearly: round_currency(yearly),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::protocol::Protocol;
    use crate::enums::LiquidityTier;
    use crate::value_objects::allocation::AllocationEntry;

    fn allocation() -> Allocation {
        let core = Protocol::new("CoreDAO Staking", 12.8, 3, 125_000_000.0, LiquidityTier::High);
        let lightning = Protocol::new("Lightning Yield", 6.8, 1, 210_000_000.0, LiquidityTier::VeryHigh);
        vec![
            AllocationEntry::from_protocol(&lightning, 60.0, 600.0),
            AllocationEntry::from_protocol(&core, 40.0, 400.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_weighted_apy() {
        // 6.8 * 0.6 + 12.8 * 0.4 = 4.08 + 5.12
        assert!((calculate_weighted_apy(&allocation()) - 9.2).abs() < 1e-9);
        assert_eq!(calculate_weighted_apy(&Allocation::new()), 0.0);
    }

    #[test]
    fn test_projected_yield() {
        let projected = calculate_projected_yield(1000.0, &allocation());
        assert_eq!(projected.yearly, 92.0);
        assert_eq!(projected.monthly, 7.67);
        assert_eq!(projected.weekly, 1.77);
        assert_eq!(projected.daily, 0.25);
    }

    #[test]
    fn test_projected_yield_empty() {
        assert_eq!(
            calculate_projected_yield(5000.0, &Allocation::new()),
            ProjectedYield::default()
        );
    }
}
