//! End-to-end portfolio optimization.

use crate::allocation::AllocationEngine;
use crate::error::OptimizationError;
use crate::filter::filter_by_risk;
use crate::objective::{RiskAdjustedReturn, ScoringFunction};
use crate::profile::resolve_risk_profile;
use btcyield_domain::entities::protocol::Protocol;
use btcyield_domain::error::ValidationError;
use btcyield_domain::metrics::PortfolioMetrics;
use btcyield_domain::random::RandomSource;
use btcyield_domain::value_objects::optimization_result::OptimizationResult;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Smallest amount accepted for optimization.
pub const MIN_INVESTMENT: f64 = 100.0;
/// Lowest accepted risk tolerance.
pub const MIN_RISK_TOLERANCE: i64 = 1;
/// Highest accepted risk tolerance.
pub const MAX_RISK_TOLERANCE: i64 = 10;
/// Days between optimization and the suggested rebalance.
pub const REBALANCE_INTERVAL_DAYS: i64 = 30;

/// Free-form caller preferences. Accepted and currently ignored.
pub type Preferences = serde_json::Map<String, serde_json::Value>;

/// A validated optimization request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub amount: f64,
    pub risk_tolerance: u8,
    #[serde(default)]
    pub preferences: Preferences,
}

impl OptimizationRequest {
    /// Validates raw inputs into a request.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] if `amount` is below [`MIN_INVESTMENT`]
    /// (or not finite) or `risk_tolerance` is outside `[1, 10]`.
    pub fn validate(amount: f64, risk_tolerance: i64) -> Result<Self, ValidationError> {
        if !amount.is_finite() || amount < MIN_INVESTMENT {
            return Err(ValidationError::AmountTooSmall {
                amount,
                minimum: MIN_INVESTMENT,
            });
        }
        if !(MIN_RISK_TOLERANCE..=MAX_RISK_TOLERANCE).contains(&risk_tolerance) {
            return Err(ValidationError::RiskToleranceOutOfRange(risk_tolerance));
        }

        Ok(Self {
            amount,
            // Range checked above.
            risk_tolerance: risk_tolerance as u8,
            preferences: Preferences::new(),
        })
    }

    /// Attaches caller preferences.
    #[must_use]
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }
}

/// Resolves a profile, filters the catalog, allocates and scores.
#[derive(Debug, Clone)]
pub struct PortfolioOptimizer<S = RiskAdjustedReturn> {
    engine: AllocationEngine<S>,
    rebalance_interval: Duration,
}

impl Default for PortfolioOptimizer<RiskAdjustedReturn> {
    fn default() -> Self {
        Self::new(AllocationEngine::default())
    }
}

impl<S: ScoringFunction> PortfolioOptimizer<S> {
    pub fn new(engine: AllocationEngine<S>) -> Self {
        Self {
            engine,
            rebalance_interval: Duration::days(REBALANCE_INTERVAL_DAYS),
        }
    }

    /// Sets the interval used for the suggested rebalance date.
    #[must_use]
    pub fn with_rebalance_interval(mut self, interval: Duration) -> Self {
        self.rebalance_interval = interval;
        self
    }

    #[must_use]
    pub fn engine(&self) -> &AllocationEngine<S> {
        &self.engine
    }

    /// Optimizes `request` against `catalog`, stamping the result with now.
    ///
    /// # Errors
    /// See [`PortfolioOptimizer::optimize_at`].
    pub fn optimize<R: RandomSource + ?Sized>(
        &self,
        request: &OptimizationRequest,
        catalog: &[Protocol],
        rng: &mut R,
    ) -> Result<OptimizationResult, OptimizationError> {
        self.optimize_at(request, catalog, rng, Utc::now())
    }

    /// Optimizes `request` against `catalog` as of `now`.
    ///
    /// `catalog` may already be narrowed by a catalog query; it is only read.
    ///
    /// # Errors
    /// Returns [`OptimizationError::Validation`] for out-of-range inputs and
    /// [`OptimizationError::CorruptedProtocol`] if an eligible protocol
    /// carries a non-finite yield.
    pub fn optimize_at<R: RandomSource + ?Sized>(
        &self,
        request: &OptimizationRequest,
        catalog: &[Protocol],
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<OptimizationResult, OptimizationError> {
        let request = OptimizationRequest::validate(request.amount, i64::from(request.risk_tolerance))?;

        let profile = resolve_risk_profile(request.risk_tolerance);
        let eligible = filter_by_risk(catalog, &profile);
        check_protocols(&eligible)?;

        debug!(
            profile = %profile.level,
            max_risk = profile.max_risk,
            eligible = eligible.len(),
            "Resolved risk profile"
        );

        let allocation = self
            .engine
            .allocate(request.amount, &eligible, &profile, rng);
        let metrics = PortfolioMetrics::compute(request.amount, &allocation);

        info!(
            amount = request.amount,
            risk_tolerance = request.risk_tolerance,
            positions = allocation.len(),
            expected_apy = metrics.expected_apy,
            "Portfolio optimized"
        );

        Ok(OptimizationResult {
            allocation,
            expected_apy: metrics.expected_apy,
            risk_score: metrics.risk_score,
            diversification_score: metrics.diversification_score,
            projected_yield: metrics.projected_yield,
            rebalance_date: now + self.rebalance_interval,
            confidence: metrics.confidence,
        })
    }
}

fn check_protocols(protocols: &[Protocol]) -> Result<(), OptimizationError> {
    for protocol in protocols {
        if !protocol.apy.is_finite() {
            return Err(OptimizationError::CorruptedProtocol {
                name: protocol.name.clone(),
                reason: format!("non-finite apy {}", protocol.apy),
            });
        }
    }
    Ok(())
}
