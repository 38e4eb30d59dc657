use serde::{Deserialize, Serialize};

use crate::enums::{AdjustState, Mode};

/// Materialized view of one line item; derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedRow {
    pub item_id: String,
    pub product_code: String,
    pub mode: Mode,
    pub final_value: Option<f64>,
    pub auto_computed_value: Option<f64>,
    pub last_quoted_price: Option<f64>,
    /// `final_value - last_quoted_price` when both are present and finite.
    pub difference: Option<f64>,
    pub eligible_for_override: bool,
    pub adjust_state: AdjustState,
}
