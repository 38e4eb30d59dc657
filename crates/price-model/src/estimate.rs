//! Result of the automatic estimate over a list of raw quotes.

use serde::{Deserialize, Serialize};

use crate::enums::Method;

/// Which branch of the automatic rule produced an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateRule {
    /// Nothing to estimate.
    NoQuotes,
    /// Small sample: every quote is kept, method chosen by dispersion.
    AllKept,
    /// Large sample: high then low outliers removed, mean of the rest.
    OutlierExclusion,
}

impl EstimateRule {
    /// Human-readable description used in the calculation memory.
    pub fn description(&self, min_quotes: usize, high_ratio: f64, low_ratio: f64) -> String {
        match self {
            EstimateRule::NoQuotes => "Sem cotações".to_string(),
            EstimateRule::AllKept => format!(
                "N bruto < {min_quotes}: CV < 0,25 => Média; senão => Mediana"
            ),
            EstimateRule::OutlierExclusion => format!(
                "N bruto >= {min_quotes}: remove altos (> {}), depois baixos (< {}), e calcula Média final",
                ratio_label(high_ratio),
                ratio_label(low_ratio)
            ),
        }
    }
}

fn ratio_label(ratio: f64) -> String {
    format!("{ratio:.2}").replace('.', ",")
}

/// A quote removed by the automatic rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exclusion {
    pub index: u32,
    pub value: f64,
    /// Mean of the other values in the pass that excluded this one.
    pub mean_of_others: f64,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoEstimate {
    pub rule: EstimateRule,
    pub kept_indices: Vec<u32>,
    pub excluded_high: Vec<Exclusion>,
    pub excluded_low: Vec<Exclusion>,
    pub method: Option<Method>,
    /// Coefficient of variation of the kept values.
    pub cv: Option<f64>,
    /// Unrounded estimate.
    pub value: Option<f64>,
}
