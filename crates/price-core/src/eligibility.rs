//! Eligibility rule for manual overrides and the row classification derived
//! from it.

use price_model::{AdjustState, ELIGIBILITY_RATIO};

/// Manual override may be created only when the last awarded price is known
/// and positive, the automatic estimate is known and finite, and the estimate
/// does not exceed the last price by more than the tolerance band.
pub fn is_eligible(last_quoted_price: Option<f64>, auto_computed_value: Option<f64>) -> bool {
    match (last_quoted_price, auto_computed_value) {
        (Some(last), Some(auto)) if last.is_finite() && last > 0.0 && auto.is_finite() => {
            to_cents(auto) <= to_cents(ELIGIBILITY_RATIO * last)
        }
        _ => false,
    }
}

/// Prices are cent-valued, so the band limit is compared in whole cents to keep
/// exact multiples such as `1.2 * 3.00` inside it.
fn to_cents(value: f64) -> f64 {
    (value * 100.0).round()
}

/// Classifies a row. An existing override always wins, whatever the current
/// eligibility.
pub fn classify(
    last_quoted_price: Option<f64>,
    auto_computed_value: Option<f64>,
    has_override: bool,
) -> AdjustState {
    if has_override {
        return AdjustState::Overridden;
    }
    if !is_eligible(last_quoted_price, auto_computed_value) {
        return AdjustState::Locked;
    }
    match (last_quoted_price, auto_computed_value) {
        (Some(last), Some(auto)) if auto < last => AdjustState::NeedsAttention,
        _ => AdjustState::WithinTolerance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_band_is_inclusive() {
        assert!(is_eligible(Some(100.0), Some(120.0)));
        assert!(!is_eligible(Some(100.0), Some(120.01)));
    }

    #[test]
    fn band_limit_holds_at_cent_multiples() {
        assert!(is_eligible(Some(3.0), Some(3.6)));
        assert!(is_eligible(Some(10.5), Some(12.6)));
        assert!(is_eligible(Some(0.1), Some(0.12)));
        assert!(!is_eligible(Some(3.0), Some(3.61)));
        assert!(!is_eligible(Some(10.5), Some(12.61)));
        assert_eq!(classify(Some(3.0), Some(3.6), false), AdjustState::WithinTolerance);
    }

    #[test]
    fn missing_or_non_positive_inputs_are_ineligible() {
        assert!(!is_eligible(None, Some(10.0)));
        assert!(!is_eligible(Some(10.0), None));
        assert!(!is_eligible(Some(0.0), Some(0.0)));
        assert!(!is_eligible(Some(-5.0), Some(-6.0)));
        assert!(!is_eligible(Some(10.0), Some(f64::NAN)));
        assert!(!is_eligible(Some(f64::INFINITY), Some(10.0)));
    }

    #[test]
    fn classification_precedence() {
        assert_eq!(
            classify(Some(100.0), Some(90.0), false),
            AdjustState::NeedsAttention
        );
        assert_eq!(
            classify(Some(100.0), Some(110.0), false),
            AdjustState::WithinTolerance
        );
        assert_eq!(
            classify(Some(100.0), Some(100.0), false),
            AdjustState::WithinTolerance
        );
        assert_eq!(classify(Some(100.0), Some(130.0), false), AdjustState::Locked);
        assert_eq!(classify(None, None, false), AdjustState::Locked);
        assert_eq!(
            classify(Some(100.0), Some(130.0), true),
            AdjustState::Overridden
        );
        assert_eq!(classify(None, None, true), AdjustState::Overridden);
    }
}
