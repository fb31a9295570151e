use crate::engine::SimulationEngine;
use crate::error::SimulationError;
use crate::state::Positions;
use btcyield_domain::error::ValidationError;
use btcyield_domain::math::rounding::round_currency;
use btcyield_domain::random::RandomSource;
use serde::Serialize;
use tracing::info;

/// Repeats a projection and summarizes the final portfolio values.
pub struct MonteCarloRunner {
    pub engine: SimulationEngine,
    pub iterations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub mean_final_value: f64,
    pub median_final_value: f64,
    pub var_95_final_value: f64, // Value at Risk (5th percentile)
    pub min_final_value: f64,
    pub max_final_value: f64,
    pub iterations: usize,
}

impl MonteCarloRunner {
    pub fn new(engine: SimulationEngine, iterations: usize) -> Self {
        Self { engine, iterations }
    }

    /// Runs every iteration off the same random stream.
    ///
    /// # Errors
    /// Fails on zero iterations or if the underlying projection rejects its
    /// inputs.
    pub fn run<R: RandomSource + ?Sized>(
        &self,
        positions: &Positions,
        rng: &mut R,
    ) -> Result<AggregateResult, SimulationError> {
        if self.iterations == 0 {
            return Err(ValidationError::Other(
                "Monte Carlo iterations must be positive".to_string(),
            )
            .into());
        }

        let mut finals = Vec::with_capacity(self.iterations);
        for _ in 0..self.iterations {
            let days = self.engine.run(positions, rng)?;
            if let Some(last) = days.last() {
                finals.push(last.total_value);
            }
        }

        let result = aggregate(finals);
        info!(
            iterations = result.iterations,
            mean = result.mean_final_value,
            var_95 = result.var_95_final_value,
            "Monte Carlo run complete"
        );
        Ok(result)
    }
}

fn aggregate(mut values: Vec<f64>) -> AggregateResult {
    let count = values.len();
    if count == 0 {
        return AggregateResult {
            mean_final_value: 0.0,
            median_final_value: 0.0,
            var_95_final_value: 0.0,
            min_final_value: 0.0,
            max_final_value: 0.0,
            iterations: 0,
        };
    }

    let mean = values.iter().sum::<f64>() / count as f64;

    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let median = values[count / 2];
    let var_idx = (count as f64 * 0.05).floor() as usize;
    let var_95 = values[var_idx.min(count - 1)];

    AggregateResult {
        mean_final_value: round_currency(mean),
        median_final_value: median,
        var_95_final_value: var_95,
        min_final_value: values[0],
        max_final_value: values[count - 1],
        iterations: count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SimulationConfig;
    use btcyield_domain::random::{FixedSequence, StdRandomSource};
    use btcyield_domain::value_objects::simulation_result::SimulationPosition;
    use chrono::NaiveDate;

    fn positions() -> Positions {
        let mut positions = Positions::new();
        positions.insert(
            "CoreDAO Staking".to_string(),
            SimulationPosition::new(600.0, 12.8, 3.0),
        );
        positions.insert(
            "Lightning Yield".to_string(),
            SimulationPosition::new(400.0, 6.8, 1.0),
        );
        positions
    }

    fn engine(days: u32) -> SimulationEngine {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        SimulationEngine::new(SimulationConfig::new(start).with_days(days))
    }

    #[test]
    fn test_aggregate_statistics_are_ordered() {
        let runner = MonteCarloRunner::new(engine(30), 200);
        let result = runner
            .run(&positions(), &mut StdRandomSource::seeded(11))
            .unwrap();

        assert_eq!(result.iterations, 200);
        assert!(result.min_final_value <= result.var_95_final_value);
        assert!(result.var_95_final_value <= result.median_final_value);
        assert!(result.median_final_value <= result.max_final_value);
        assert!(result.mean_final_value >= result.min_final_value);
        assert!(result.mean_final_value <= result.max_final_value);
    }

    #[test]
    fn test_constant_draws_collapse_distribution() {
        let runner = MonteCarloRunner::new(engine(10), 5);
        let result = runner
            .run(&positions(), &mut FixedSequence::constant(0.5))
            .unwrap();

        assert_eq!(result.min_final_value, result.max_final_value);
        assert_eq!(result.median_final_value, result.var_95_final_value);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let runner = MonteCarloRunner::new(engine(10), 0);
        let err = runner
            .run(&positions(), &mut FixedSequence::constant(0.5))
            .unwrap_err();
        assert!(matches!(err, SimulationError::Validation(_)));
    }

    #[test]
    fn test_propagates_projection_errors() {
        let runner = MonteCarloRunner::new(engine(10), 3);
        let err = runner
            .run(&Positions::new(), &mut FixedSequence::constant(0.5))
            .unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Validation(ValidationError::EmptyAllocation)
        ));
    }
}
