//! Numeric aggregators over quote values.
//!
//! `None` is the "not computable" signal (empty input, zero mean); none of
//! these functions panic or return errors.

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median: middle element for odd counts, mean of the two middle elements
/// for even counts.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Population standard deviation divided by the mean.
///
/// `None` for empty input or when the mean is exactly zero.
pub fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    if m == 0.0 {
        return None;
    }
    let variance = values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt() / m)
}

/// Rounds half away from zero to `decimals` places. Precision beyond what an
/// `f64` can scale leaves the value unrounded.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = i32::try_from(decimals).map_or(f64::INFINITY, |d| 10f64.powi(d));
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}
