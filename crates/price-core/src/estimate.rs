//! Automatic estimate for a list of raw quotes.
//!
//! Small samples (fewer than `min_quotes`) keep every quote and pick the mean
//! or the median by dispersion. Larger samples drop outliers in two passes,
//! each comparing a value with the mean of the *other* values of the pass:
//! excessively high values first, then unfeasibly low values among the
//! survivors. The estimate is the mean of what remains.

use tracing::debug;

use price_model::{
    AutoEstimate, EstimateRule, Exclusion, ExclusionLimits, LineItem, MEDIAN_CV_THRESHOLD, Method,
    PricingOptions, QuoteEntry,
};

use crate::stats::{coefficient_of_variation, mean, median, round_to};

pub fn estimate(entries: &[QuoteEntry], limits: &ExclusionLimits) -> AutoEstimate {
    if entries.is_empty() {
        return AutoEstimate {
            rule: EstimateRule::NoQuotes,
            kept_indices: Vec::new(),
            excluded_high: Vec::new(),
            excluded_low: Vec::new(),
            method: None,
            cv: None,
            value: None,
        };
    }

    if entries.len() < limits.min_quotes {
        let values: Vec<f64> = entries.iter().map(|entry| entry.value).collect();
        let cv = coefficient_of_variation(&values);
        let method = if cv.is_some_and(|c| c < MEDIAN_CV_THRESHOLD) {
            Method::Mean
        } else {
            Method::Median
        };
        let value = match method {
            Method::Mean => mean(&values),
            Method::Median => median(&values),
        };
        return AutoEstimate {
            rule: EstimateRule::AllKept,
            kept_indices: entries.iter().map(|entry| entry.index).collect(),
            excluded_high: Vec::new(),
            excluded_low: Vec::new(),
            method: Some(method),
            cv,
            value,
        };
    }

    let (after_high, excluded_high) = exclusion_pass(entries, |ratio| ratio > limits.high_ratio);
    let (kept, excluded_low) = exclusion_pass(&after_high, |ratio| ratio < limits.low_ratio);
    let values: Vec<f64> = kept.iter().map(|entry| entry.value).collect();
    AutoEstimate {
        rule: EstimateRule::OutlierExclusion,
        kept_indices: kept.iter().map(|entry| entry.index).collect(),
        excluded_high,
        excluded_low,
        method: Some(Method::Mean),
        cv: coefficient_of_variation(&values),
        value: mean(&values),
    }
}

/// Splits `entries` into survivors and exclusions. A value with no usable
/// comparison (single value, zero mean of others) always survives.
fn exclusion_pass(
    entries: &[QuoteEntry],
    excluded: impl Fn(f64) -> bool,
) -> (Vec<QuoteEntry>, Vec<Exclusion>) {
    let total: f64 = entries.iter().map(|entry| entry.value).sum();
    let mut kept = Vec::new();
    let mut removed = Vec::new();
    for entry in entries {
        let Some(mean_of_others) = mean_of_others(total, entry.value, entries.len()) else {
            kept.push(entry.clone());
            continue;
        };
        let ratio = entry.value / mean_of_others;
        if excluded(ratio) {
            removed.push(Exclusion {
                index: entry.index,
                value: entry.value,
                mean_of_others,
                ratio,
            });
        } else {
            kept.push(entry.clone());
        }
    }
    (kept, removed)
}

fn mean_of_others(total: f64, value: f64, count: usize) -> Option<f64> {
    if count <= 1 {
        return None;
    }
    let m = (total - value) / (count - 1) as f64;
    (m != 0.0).then_some(m)
}

/// Runs the automatic estimate on `item` and stores its result in the
/// item's `auto_*` fields. The value is rounded to the configured decimals.
pub fn apply_estimate(item: &mut LineItem, options: &PricingOptions) -> AutoEstimate {
    let result = estimate(&item.raw_entries, &options.exclusion);
    item.auto_kept_indices = result.kept_indices.iter().copied().collect();
    item.auto_excluded_high_indices = result.excluded_high.iter().map(|e| e.index).collect();
    item.auto_excluded_low_indices = result.excluded_low.iter().map(|e| e.index).collect();
    item.auto_computed_value = result
        .value
        .map(|value| round_to(value, options.final_value_decimals));
    item.auto_method = result.method;
    debug!(
        item_id = %item.item_id,
        raw = item.raw_entries.len(),
        kept = result.kept_indices.len(),
        excluded_high = result.excluded_high.len(),
        excluded_low = result.excluded_low.len(),
        "automatic estimate"
    );
    result
}
