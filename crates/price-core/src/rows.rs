//! Row materialization: final value and difference for one line item.

use price_model::{ComputedRow, LineItem, ManualOverride, Method, Mode};

use crate::eligibility::{classify, is_eligible};
use crate::stats::{mean, median};

/// Final value of a row: the automatic value, or the override's aggregate of
/// its included quotes. A stale override that matches no quote yields `None`.
pub fn final_value(item: &LineItem, over: Option<&ManualOverride>) -> Option<f64> {
    let Some(over) = over else {
        return item.auto_computed_value;
    };
    let values = item.values_for(&over.included_set());
    match over.method {
        Method::Mean => mean(&values),
        Method::Median => median(&values),
    }
}

/// `final - last` when both are present and finite.
pub fn difference(final_value: Option<f64>, last_quoted_price: Option<f64>) -> Option<f64> {
    match (final_value, last_quoted_price) {
        (Some(value), Some(last)) if value.is_finite() && last.is_finite() => Some(value - last),
        _ => None,
    }
}

pub fn materialize_row(
    item: &LineItem,
    over: Option<&ManualOverride>,
    last_quoted_price: Option<f64>,
) -> ComputedRow {
    let final_value = final_value(item, over);
    ComputedRow {
        item_id: item.item_id.clone(),
        product_code: item.product_code.clone(),
        mode: if over.is_some() {
            Mode::Manual
        } else {
            Mode::Automatic
        },
        final_value,
        auto_computed_value: item.auto_computed_value,
        last_quoted_price,
        difference: difference(final_value, last_quoted_price),
        eligible_for_override: is_eligible(last_quoted_price, item.auto_computed_value),
        adjust_state: classify(last_quoted_price, item.auto_computed_value, over.is_some()),
    }
}
