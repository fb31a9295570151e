use btcyield_domain::entities::protocol::Protocol;
use std::cmp::Ordering;

/// Annual risk-free rate, in percent, subtracted before risk adjustment.
pub const DEFAULT_RISK_FREE_RATE: f64 = 2.0;

/// Ranks protocols for allocation. Higher scores are allocated first.
pub trait ScoringFunction {
    fn score(&self, protocol: &Protocol) -> f64;

    /// Orders `a` before `b` when `a` scores higher.
    fn compare(&self, a: &Protocol, b: &Protocol) -> Ordering {
        self.score(b)
            .partial_cmp(&self.score(a))
            .unwrap_or(Ordering::Equal)
    }
}

/// Sharpe-like ranking: `(apy - risk_free_rate) / max(1, risk_score)`.
#[derive(Debug, Clone, Copy)]
pub struct RiskAdjustedReturn {
    pub risk_free_rate: f64,
}

impl Default for RiskAdjustedReturn {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
        }
    }
}

impl ScoringFunction for RiskAdjustedReturn {
    fn score(&self, protocol: &Protocol) -> f64 {
        protocol.risk_adjusted_return(self.risk_free_rate)
    }
}
