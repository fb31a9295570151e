use rust_decimal::prelude::*;

/// Rounds `value` to `dp` decimal places, halves away from zero.
///
/// Goes through `Decimal` so that values such as `1.005` round the way they
/// read instead of the way their binary representation happens to fall.
/// Non-finite inputs are returned unchanged.
#[must_use]
pub fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Rounds a currency amount to cents.
#[must_use]
pub fn round_currency(value: f64) -> f64 {
    round_dp(value, 2)
}
