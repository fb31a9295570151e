use crate::value_objects::allocation::Allocation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Projected earnings of a portfolio, rounded to cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectedYield {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
    pub yearly: f64,
}

/// Allocation plus the summary metrics derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    pub allocation: Allocation,
    #[serde(rename = "expectedAPY")]
    pub expected_apy: f64,
    #[serde(rename = "riskScore")]
    pub risk_score: f64,
    #[serde(rename = "diversificationScore")]
    pub diversification_score: f64,
    #[serde(rename = "projectedYield")]
    pub projected_yield: ProjectedYield,
    /// Informational only; nothing schedules the rebalance.
    #[serde(rename = "rebalanceDate")]
    pub rebalance_date: DateTime<Utc>,
    /// Confidence score, 0 to 100.
    pub confidence: u8,
}

impl OptimizationResult {
    /// Whether any protocol passed the allocation gate.
    #[must_use]
    pub fn is_allocated(&self) -> bool {
        !self.allocation.is_empty()
    }
}
