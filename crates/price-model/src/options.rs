//! Configuration options for price estimation.

use serde::{Deserialize, Serialize};

/// Manual override is only allowed while `auto <= ELIGIBILITY_RATIO * last`.
pub const ELIGIBILITY_RATIO: f64 = 1.2;

/// CV at or above which the median is preferred over the mean.
pub const MEDIAN_CV_THRESHOLD: f64 = 0.25;

/// Largest accepted `final_value_decimals`.
pub const MAX_FINAL_VALUE_DECIMALS: u32 = 10;

/// Thresholds of the automatic outlier exclusion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionLimits {
    /// A value is "excessively high" when `value / mean_of_others` exceeds this.
    pub high_ratio: f64,
    /// A value is "unfeasibly low" when `value / mean_of_others` is below this.
    pub low_ratio: f64,
    /// Raw quote count from which outliers are excluded.
    pub min_quotes: usize,
}

impl Default for ExclusionLimits {
    fn default() -> Self {
        Self {
            high_ratio: 1.25,
            low_ratio: 0.75,
            min_quotes: 5,
        }
    }
}

/// One fixed justification option offered in the adjustment dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CannedJustification {
    pub code: String,
    pub text: String,
}

impl CannedJustification {
    pub fn new(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            text: text.into(),
        }
    }
}

/// Options controlling estimation and report generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingOptions {
    pub exclusion: ExclusionLimits,
    /// Decimal places the automatic final value is rounded to.
    pub final_value_decimals: u32,
    pub justifications: Vec<CannedJustification>,
}

impl Default for PricingOptions {
    fn default() -> Self {
        Self {
            exclusion: ExclusionLimits::default(),
            final_value_decimals: 2,
            justifications: default_justifications(),
        }
    }
}

impl PricingOptions {
    pub fn justification(&self, code: &str) -> Option<&CannedJustification> {
        self.justifications.iter().find(|j| j.code == code)
    }
}

/// Canned justifications shipped with the tool.
pub fn default_justifications() -> Vec<CannedJustification> {
    vec![
        CannedJustification::new(
            "discrepantes",
            "Exclusão de valores que destoam significativamente dos demais preços obtidos na pesquisa.",
        ),
        CannedJustification::new(
            "mercado",
            "Os valores selecionados refletem a realidade de mercado verificada para o item.",
        ),
        CannedJustification::new(
            "ultimo_licitado",
            "Ajuste realizado com base no último preço licitado para o item.",
        ),
        CannedJustification::new(
            "fontes_oficiais",
            "Priorização de cotações provenientes de fontes oficiais (Compras.gov.br e contratações similares).",
        ),
    ]
}
