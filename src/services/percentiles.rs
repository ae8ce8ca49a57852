//! Percentile helpers for already-sorted slices.
//!
//! - Empty input => `None`.
//! - `percentile <= 0` => first element.
//! - `percentile >= 100` => last element.
//! - Otherwise the position `percentile / 100 * (len - 1)` is computed and the
//!   value is linearly interpolated between the two neighbouring order
//!   statistics.

/// Returns the interpolated percentile from a slice that is already sorted in
/// ascending order.
pub fn value_sorted(sorted_values: &[f64], percentile: f64) -> Option<f64> {
    let last = sorted_values.len().checked_sub(1)?;

    if percentile <= 0.0 {
        return sorted_values.first().copied();
    }
    if percentile >= 100.0 {
        return sorted_values.get(last).copied();
    }

    let position = (percentile / 100.0) * last as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    let low_value = *sorted_values.get(lower)?;
    let high_value = *sorted_values.get(upper)?;
    Some(low_value + (high_value - low_value) * fraction)
}
