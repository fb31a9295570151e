//! Simulation configuration and inputs.

use crate::error::SimulationError;
use btcyield_domain::error::ValidationError;
use btcyield_domain::value_objects::allocation::Allocation;
use btcyield_domain::value_objects::simulation_result::SimulationPosition;
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;

/// Default projection horizon in days.
pub const DEFAULT_SIMULATION_DAYS: u32 = 30;
/// Longest accepted projection horizon in days.
pub const MAX_SIMULATION_DAYS: u32 = 3650;

/// Positions to simulate, keyed by protocol name.
pub type Positions = BTreeMap<String, SimulationPosition>;

/// Builds simulation positions from an optimized allocation.
#[must_use]
pub fn positions_from_allocation(allocation: &Allocation) -> Positions {
    allocation
        .iter()
        .map(|entry| (entry.protocol.clone(), SimulationPosition::from(entry)))
        .collect()
}

/// Checks that `positions` is non-empty and every position is usable.
///
/// # Errors
/// Returns [`ValidationError::EmptyAllocation`] for an empty map and
/// [`ValidationError::InvalidPosition`] for negative or non-finite fields.
pub fn validate_positions(positions: &Positions) -> Result<(), SimulationError> {
    if positions.is_empty() {
        return Err(ValidationError::EmptyAllocation.into());
    }

    for (protocol, position) in positions {
        let reason = if !position.amount.is_finite() || position.amount < 0.0 {
            Some(format!("amount must be a non-negative number, got {}", position.amount))
        } else if !position.apy.is_finite() {
            Some(format!("apy must be a number, got {}", position.apy))
        } else if !position.risk.is_finite() || position.risk < 0.0 {
            Some(format!("risk must be a non-negative number, got {}", position.risk))
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(ValidationError::InvalidPosition {
                protocol: protocol.clone(),
                reason,
            }
            .into());
        }
    }
    Ok(())
}

/// Configuration for a projection run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Number of days to project.
    pub days: u32,
    /// Date of the first simulated day.
    pub start_date: NaiveDate,
    /// Upper bound accepted for `days`.
    pub max_days: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

impl SimulationConfig {
    /// Creates a config starting at `start_date` with the default horizon.
    #[must_use]
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            days: DEFAULT_SIMULATION_DAYS,
            start_date,
            max_days: MAX_SIMULATION_DAYS,
        }
    }

    /// Sets the number of days.
    #[must_use]
    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    /// Sets the maximum accepted horizon.
    #[must_use]
    pub fn with_max_days(mut self, max_days: u32) -> Self {
        self.max_days = max_days;
        self
    }

    /// Checks the horizon bounds.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidHorizon`] if `days` is zero or above
    /// `max_days`.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.days == 0 || self.days > self.max_days {
            return Err(ValidationError::InvalidHorizon {
                days: self.days,
                max: self.max_days,
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use btcyield_domain::entities::protocol::Protocol;
    use btcyield_domain::enums::LiquidityTier;
    use btcyield_domain::value_objects::allocation::AllocationEntry;

    #[test]
    fn test_config_defaults() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let config = SimulationConfig::new(start);
        assert_eq!(config.days, 30);
        assert_eq!(config.max_days, 3650);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_horizon_bounds() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert!(SimulationConfig::new(start).with_days(0).validate().is_err());
        assert!(SimulationConfig::new(start).with_days(3651).validate().is_err());
        assert!(
            SimulationConfig::new(start)
                .with_days(400)
                .with_max_days(365)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_positions_from_allocation() {
        let core = Protocol::new("CoreDAO Staking", 12.8, 3, 0.0, LiquidityTier::High);
        let allocation: Allocation =
            std::iter::once(AllocationEntry::from_protocol(&core, 100.0, 1000.0)).collect();

        let positions = positions_from_allocation(&allocation);
        assert_eq!(
            positions.get("CoreDAO Staking"),
            Some(&SimulationPosition::new(1000.0, 12.8, 3.0))
        );
    }

    #[test]
    fn test_validate_positions() {
        assert!(matches!(
            validate_positions(&Positions::new()),
            Err(SimulationError::Validation(ValidationError::EmptyAllocation))
        ));

        let mut positions = Positions::new();
        positions.insert("X".to_string(), SimulationPosition::new(-1.0, 12.0, 3.0));
        assert!(matches!(
            validate_positions(&positions),
            Err(SimulationError::Validation(ValidationError::InvalidPosition { .. }))
        ));

        positions.insert("X".to_string(), SimulationPosition::new(1000.0, f64::NAN, 3.0));
        assert!(validate_positions(&positions).is_err());

        positions.insert("X".to_string(), SimulationPosition::new(1000.0, 12.0, 3.0));
        assert!(validate_positions(&positions).is_ok());
    }
}
