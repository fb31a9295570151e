//! Day-by-day projection of portfolio value.
//!
//! Each day draws a fresh return for every position and compounds it over
//! the elapsed days against the initial principal. Days are therefore not
//! chained: day `i` does not depend on the value realized on day `i - 1`.

use crate::error::SimulationError;
use crate::state::{Positions, SimulationConfig, validate_positions};
use btcyield_domain::math::rounding::{round_currency, round_dp};
use btcyield_domain::random::RandomSource;
use btcyield_domain::value_objects::simulation_result::{ProtocolReturn, SimulationDay};
use chrono::Days;
use std::collections::BTreeMap;
use tracing::debug;

const DAYS_PER_YEAR: f64 = 365.0;
/// Daily volatility band, in percent, per point of risk score.
const VOLATILITY_PER_RISK_POINT: f64 = 0.01;

/// Projects positions forward under stochastic daily returns.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    config: SimulationConfig,
}

impl SimulationEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs the projection.
    ///
    /// Draws one value from `rng` per position per day, positions visited in
    /// name order.
    ///
    /// # Errors
    /// Returns a validation error for an empty or malformed position map or
    /// an out-of-range horizon.
    pub fn run<R: RandomSource + ?Sized>(
        &self,
        positions: &Positions,
        rng: &mut R,
    ) -> Result<Vec<SimulationDay>, SimulationError> {
        self.config.validate()?;
        validate_positions(positions)?;

        debug!(
            days = self.config.days,
            positions = positions.len(),
            start = %self.config.start_date,
            "Running portfolio simulation"
        );

        let mut simulation = Vec::with_capacity(self.config.days as usize);

        for day in 0..self.config.days {
            let date = self
                .config
                .start_date
                .checked_add_days(Days::new(u64::from(day)))
                .ok_or(SimulationError::DateOverflow(day))?;

            let mut total_value = 0.0;
            let mut returns = BTreeMap::new();

            for (protocol, position) in positions {
                let daily_return = daily_return(position.apy, position.risk, rng.next_uniform());
                let value = project_value(position.amount, daily_return, day + 1);
                total_value += value;

                returns.insert(
                    protocol.clone(),
                    ProtocolReturn {
                        value: round_currency(value),
                        return_pct: round_dp(daily_return, 4),
                    },
                );
            }

            simulation.push(SimulationDay {
                date,
                total_value: round_currency(total_value),
                per_protocol_returns: returns,
            });
        }

        Ok(simulation)
    }
}

/// Daily return in percent for a position.
///
/// `draw` is a uniform value in `[0, 1)` mapped onto the symmetric
/// volatility band `[-risk * 0.01, risk * 0.01)` around the daily yield.
#[must_use]
pub fn daily_return(apy: f64, risk: f64, draw: f64) -> f64 {
    let daily_apy = apy / DAYS_PER_YEAR;
    let volatility = risk * VOLATILITY_PER_RISK_POINT;
    let random_return = (draw - 0.5) * volatility * 2.0;
    daily_apy + random_return
}

/// Value of `principal` after compounding `daily_return_pct` for
/// `elapsed_days` days.
#[must_use]
pub fn project_value(principal: f64, daily_return_pct: f64, elapsed_days: u32) -> f64 {
    let exponent = i32::try_from(elapsed_days).unwrap_or(i32::MAX);
    principal * (1.0 + daily_return_pct / 100.0).powi(exponent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use btcyield_domain::error::ValidationError;
    use btcyield_domain::random::{FixedSequence, StdRandomSource};
    use btcyield_domain::value_objects::simulation_result::SimulationPosition;
    use chrono::NaiveDate;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 26).unwrap()
    }

    fn single(amount: f64, apy: f64, risk: f64) -> Positions {
        let mut positions = Positions::new();
        positions.insert("X".to_string(), SimulationPosition::new(amount, apy, risk));
        positions
    }

    #[test]
    fn test_daily_return_band() {
        let base: f64 = 12.0 / 365.0;
        assert!((daily_return(12.0, 3.0, 0.5) - base).abs() < 1e-15);
        assert!((daily_return(12.0, 3.0, 0.0) - (base - 0.03)).abs() < 1e-15);
        assert!(daily_return(12.0, 3.0, 0.999_999) < base + 0.03);
    }

    #[test]
    fn test_neutral_draws_follow_compounding_formula() {
        let engine = SimulationEngine::new(SimulationConfig::new(start()).with_days(5));
        let days = engine
            .run(&single(1000.0, 12.0, 3.0), &mut FixedSequence::constant(0.5))
            .unwrap();

        assert_eq!(days.len(), 5);
        let daily: f64 = 12.0 / 365.0;
        for (i, day) in days.iter().enumerate() {
            let expected = 1000.0 * (1.0 + daily / 100.0).powi(i as i32 + 1);
            assert!((day.total_value - expected).abs() <= 0.005 + 1e-9);
            let x = day.per_protocol_returns.get("X").unwrap();
            assert_eq!(x.return_pct, 0.0329);
            assert_eq!(x.value, day.total_value);
        }
        assert_eq!(days[0].total_value, 1000.33);
    }

    #[test]
    fn test_dates_are_consecutive() {
        let engine = SimulationEngine::new(SimulationConfig::new(start()).with_days(5));
        let days = engine
            .run(&single(1000.0, 12.0, 3.0), &mut StdRandomSource::seeded(4))
            .unwrap();

        let dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2026, 2, 26).unwrap(),
                NaiveDate::from_ymd_opt(2026, 2, 27).unwrap(),
                NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
                NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            ]
        );
    }

    #[test]
    fn test_days_recompute_from_principal() {
        // Day 0 draws the bottom of the band, day 1 the midpoint. Day 1 must
        // not carry day 0's loss forward.
        let engine = SimulationEngine::new(SimulationConfig::new(start()).with_days(2));
        let days = engine
            .run(&single(1000.0, 12.0, 3.0), &mut FixedSequence::new(vec![0.0, 0.5]))
            .unwrap();

        let daily: f64 = 12.0 / 365.0;
        let day0 = 1000.0 * (1.0 + (daily - 0.03) / 100.0);
        let day1 = 1000.0 * (1.0 + daily / 100.0).powi(2);
        assert!((days[0].total_value - day0).abs() <= 0.005 + 1e-9);
        assert!((days[1].total_value - day1).abs() <= 0.005 + 1e-9);
    }

    #[test]
    fn test_total_sums_positions() {
        let mut positions = single(1000.0, 12.0, 3.0);
        positions.insert("Y".to_string(), SimulationPosition::new(500.0, 8.5, 2.0));
        let engine = SimulationEngine::new(SimulationConfig::new(start()).with_days(10));
        let mut rng = FixedSequence::new(vec![0.2, 0.7, 0.9, 0.1]);
        let days = engine.run(&positions, &mut rng).unwrap();

        assert_eq!(rng.draws(), 20);
        for day in &days {
            let sum: f64 = day.per_protocol_returns.values().map(|r| r.value).sum();
            assert!((day.total_value - sum).abs() <= 0.011);
            assert!(day.total_value > 0.0);
        }
    }

    #[test]
    fn test_positive_inputs_stay_positive() {
        let engine = SimulationEngine::new(SimulationConfig::new(start()).with_days(365));
        let mut positions = single(250.0, 18.5, 9.0);
        positions.insert("Z".to_string(), SimulationPosition::new(0.0, 6.8, 1.0));
        let days = engine
            .run(&positions, &mut StdRandomSource::seeded(8))
            .unwrap();
        assert_eq!(days.len(), 365);
        assert!(days.iter().all(|d| d.total_value > 0.0));
    }

    #[test]
    fn test_rejects_bad_input() {
        let engine = SimulationEngine::new(SimulationConfig::new(start()));
        let err = engine
            .run(&Positions::new(), &mut FixedSequence::constant(0.5))
            .unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Validation(ValidationError::EmptyAllocation)
        ));

        let zero_days = SimulationEngine::new(SimulationConfig::new(start()).with_days(0));
        let err = zero_days
            .run(&single(1000.0, 12.0, 3.0), &mut FixedSequence::constant(0.5))
            .unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Validation(ValidationError::InvalidHorizon { days: 0, .. })
        ));
    }
}
