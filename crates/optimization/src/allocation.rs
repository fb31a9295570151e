//! Heuristic allocation of an amount across ranked protocols.
//!
//! The engine works in two passes:
//! 1. Rank protocols by score, derive a positional weight for each, jitter it
//!    with the injected random source and gate it on a minimum lot size and
//!    the remaining budget.
//! 2. Rescale the admitted entries so they add up to the invested amount.
//!
//! The gate only looks at the budget at assignment time. Normalization can
//! therefore resize entries past the point where they would have been
//! admitted.

use crate::objective::{RiskAdjustedReturn, ScoringFunction};
use btcyield_domain::entities::protocol::Protocol;
use btcyield_domain::math::rounding::{round_currency, round_dp};
use btcyield_domain::random::RandomSource;
use btcyield_domain::value_objects::allocation::{Allocation, AllocationEntry};
use btcyield_domain::value_objects::risk_profile::RiskProfile;
use tracing::debug;

/// Smallest amount a single position may receive.
pub const MIN_POSITION_AMOUNT: f64 = 100.0;
/// Lower bound on a raw position percentage.
pub const MIN_PERCENTAGE: f64 = 5.0;
/// Upper bound on a raw position percentage.
pub const MAX_PERCENTAGE: f64 = 60.0;
/// Floor applied to the positional base weight.
pub const MIN_BASE_WEIGHT: f64 = 0.1;

const RANDOM_FACTOR_MIN: f64 = 0.8;
const RANDOM_FACTOR_SPAN: f64 = 0.4;

/// Allocates an amount across protocols using a [`ScoringFunction`].
#[derive(Debug, Clone)]
pub struct AllocationEngine<S = RiskAdjustedReturn> {
    objective: S,
    min_position_amount: f64,
}

impl Default for AllocationEngine<RiskAdjustedReturn> {
    fn default() -> Self {
        Self::new(RiskAdjustedReturn::default())
    }
}

impl<S: ScoringFunction> AllocationEngine<S> {
    /// Creates an engine ranking protocols with `objective`.
    pub fn new(objective: S) -> Self {
        Self {
            objective,
            min_position_amount: MIN_POSITION_AMOUNT,
        }
    }

    /// Sets the minimum lot size.
    #[must_use]
    pub fn with_min_position_amount(mut self, amount: f64) -> Self {
        self.min_position_amount = amount;
        self
    }

    /// Returns the scoring function.
    pub fn objective(&self) -> &S {
        &self.objective
    }

    /// Sorts protocols by descending score.
    ///
    /// The sort is stable, so equal scores keep their catalog order. This
    /// order feeds the positional weights and is therefore observable.
    pub fn rank<'a>(&self, protocols: &'a [Protocol]) -> Vec<&'a Protocol> {
        let mut ranked: Vec<&Protocol> = protocols.iter().collect();
        ranked.sort_by(|a, b| self.objective.compare(a, b));
        ranked
    }

    /// Allocates `amount` across `protocols` under `profile`.
    ///
    /// Draws exactly one value from `rng` per protocol, in rank order.
    /// Returns an empty allocation when no protocol clears the gate.
    pub fn allocate<R: RandomSource + ?Sized>(
        &self,
        amount: f64,
        protocols: &[Protocol],
        profile: &RiskProfile,
        rng: &mut R,
    ) -> Allocation {
        let ranked = self.rank(protocols);
        let count = ranked.len();

        let mut allocation = Allocation::new();
        let mut remaining = amount;

        for (index, protocol) in ranked.into_iter().enumerate() {
            let weight = positional_weight(index, count, profile.diversification_factor);
            let random_factor = RANDOM_FACTOR_MIN + rng.next_uniform() * RANDOM_FACTOR_SPAN;
            let percentage = (weight * 100.0 * random_factor).clamp(MIN_PERCENTAGE, MAX_PERCENTAGE);
            let allocated = amount * percentage / 100.0;

            if allocated >= self.min_position_amount && remaining >= allocated {
                allocation.insert(AllocationEntry::from_protocol(
                    protocol,
                    round_dp(percentage, 2),
                    round_currency(allocated),
                ));
                remaining -= allocated;
            } else {
                debug!(
                    protocol = %protocol.name,
                    allocated,
                    remaining,
                    "Protocol did not clear allocation gate"
                );
            }
        }

        normalize(&mut allocation, amount);
        allocation
    }
}

/// Weight of the protocol ranked at `index` out of `count`.
///
/// Earlier ranks get a larger base weight; the diversification factor then
/// penalizes later ranks progressively harder.
#[must_use]
pub fn positional_weight(index: usize, count: usize, diversification_factor: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let n = count as f64;
    let base = ((n - index as f64) / n).max(MIN_BASE_WEIGHT);
    let penalty = diversification_factor * (index as f64 + 1.0) / n;
    base * (1.0 - penalty)
}

/// Rescales entries so their amounts sum to `amount`.
///
/// Amounts and percentages are rounded to two decimals. An allocation whose
/// amounts sum to zero is left untouched.
pub fn normalize(allocation: &mut Allocation, amount: f64) {
    let total = allocation.total_amount();
    if total <= 0.0 || amount <= 0.0 {
        return;
    }

    for entry in allocation.iter_mut() {
        let normalized = entry.amount / total * amount;
        entry.amount = round_currency(normalized);
        entry.percentage = round_dp(normalized / amount * 100.0, 2);
    }
}
