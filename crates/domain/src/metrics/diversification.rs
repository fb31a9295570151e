use crate::value_objects::allocation::Allocation;

/// Diversification score in `[0, 10]`.
///
/// Two points per position plus a concentration bonus that shrinks as the
/// largest single share grows. The largest share of an empty allocation is
/// taken as zero.
#[must_use]
pub fn calculate_diversification(allocation: &Allocation) -> f64 {
    let positions = allocation.len() as f64;
    let max_concentration = allocation
        .iter()
        .map(|e| e.percentage)
        .fold(0.0_f64, f64::max);

    (positions * 2.0 + (10.0 - max_concentration / 10.0)).clamp(0.0, 10.0)
}
