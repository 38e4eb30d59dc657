//! Records of the external "last awarded price" lookup.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupStatus {
    /// A result with a unit price was found.
    #[serde(rename = "ok")]
    Ok,
    /// The last procurement for this code failed (no awarded price).
    #[serde(rename = "fracassado")]
    Failed,
    #[serde(rename = "nao_encontrado")]
    NotFound,
}

/// Last awarded price for one CATMAT code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastPriceRecord {
    #[serde(default)]
    pub catmat: String,
    pub status: LookupStatus,
    #[serde(default, alias = "valor_unitario_resultado_num")]
    pub value: Option<f64>,
    /// ISO date of the result, when known.
    #[serde(default, alias = "data_resultado_iso")]
    pub date: Option<String>,
}

impl LastPriceRecord {
    /// The usable price: status ok with a finite positive value.
    pub fn usable_value(&self) -> Option<f64> {
        match self.status {
            LookupStatus::Ok => self.value.filter(|v| v.is_finite() && *v > 0.0),
            LookupStatus::Failed | LookupStatus::NotFound => None,
        }
    }
}
