use crate::value_objects::allocation::Allocation;

/// Positions needed for full diversification credit.
const FULL_DIVERSIFICATION_POSITIONS: f64 = 5.0;
const DIVERSIFICATION_WEIGHT: f64 = 0.4;
const LIQUIDITY_WEIGHT: f64 = 0.6;

/// Confidence in the allocation, 0 to 100.
///
/// Blends position count with the percentage-weighted liquidity tier score.
#[must_use]
pub fn calculate_confidence(allocation: &Allocation) -> u8 {
    let positions = allocation.len() as f64;
    let avg_liquidity: f64 = allocation
        .iter()
        .map(|e| e.liquidity.score() * e.weight())
        .sum();

    let diversification = (positions / FULL_DIVERSIFICATION_POSITIONS).min(1.0);
    let liquidity = avg_liquidity / 5.0;

    let score = (diversification * DIVERSIFICATION_WEIGHT + liquidity * LIQUIDITY_WEIGHT) * 100.0;
    score.round().clamp(0.0, 100.0) as u8
}
