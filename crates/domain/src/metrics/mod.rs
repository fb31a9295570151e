//! Summary metrics derived from an allocation.
//!
//! All functions here are pure and total: an empty allocation yields the
//! documented default instead of an error.

use crate::value_objects::allocation::Allocation;
use crate::value_objects::optimization_result::ProjectedYield;
use serde::{Deserialize, Serialize};

pub mod confidence;
pub mod diversification;
pub mod risk;
pub mod yield_projection;

pub use confidence::calculate_confidence;
pub use diversification::calculate_diversification;
pub use risk::calculate_portfolio_risk;
pub use yield_projection::{calculate_projected_yield, calculate_weighted_apy};

/// All derived metrics for one allocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    pub expected_apy: f64,
    pub risk_score: f64,
    pub diversification_score: f64,
    pub projected_yield: ProjectedYield,
    pub confidence: u8,
}

impl PortfolioMetrics {
    /// Computes every metric for `allocation` given the invested `amount`.
    #[must_use]
    pub fn compute(amount: f64, allocation: &Allocation) -> Self {
        Self {
            expected_apy: calculate_weighted_apy(allocation),
            risk_score: calculate_portfolio_risk(allocation),
            diversification_score: calculate_diversification(allocation),
            projected_yield: calculate_projected_yield(amount, allocation),
            confidence: calculate_confidence(allocation),
        }
    }
}
