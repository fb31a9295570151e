use crate::enums::LiquidityTier;
use serde::{Deserialize, Serialize};

/// A yield-bearing protocol offered in the catalog.
///
/// Protocols are reference data: they are loaded once and only ever read by
/// the allocation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Protocol {
    /// Unique display name, used as the allocation key.
    pub name: String,
    /// Annual percentage yield (e.g. `12.8` for 12.8%).
    pub apy: f64,
    /// Risk score from 1 (safest) to 10.
    pub risk_score: u8,
    /// Total value locked in USD. Descriptive only.
    pub tvl: f64,
    pub liquidity: LiquidityTier,
}

impl Protocol {
    pub fn new(
        name: impl Into<String>,
        apy: f64,
        risk_score: u8,
        tvl: f64,
        liquidity: LiquidityTier,
    ) -> Self {
        Self {
            name: name.into(),
            apy,
            risk_score,
            tvl,
            liquidity,
        }
    }

    /// Sharpe-like score: excess yield over the risk-free rate per unit of risk.
    ///
    /// There is no variance term, so this is a ranking heuristic rather than a
    /// real Sharpe ratio.
    #[must_use]
    pub fn risk_adjusted_return(&self, risk_free_rate: f64) -> f64 {
        (self.apy - risk_free_rate) / f64::from(self.risk_score.max(1))
    }
}
