//! Payload handed to the document generation step.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::adjustment::ManualOverride;
use crate::enums::Method;

/// Identification of the procurement list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMeta {
    #[serde(default, alias = "numero")]
    pub numero_lista: String,
    #[serde(default, alias = "nome", skip_serializing_if = "Option::is_none")]
    pub nome_lista: Option<String>,
    #[serde(default, alias = "sei", skip_serializing_if = "Option::is_none")]
    pub processo_sei: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsavel: Option<String>,
}

/// Override decision for one item as consumed by generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverridePayload {
    pub included_indices: Vec<u32>,
    pub method: Method,
    /// Canned option code, when the justification came from the catalogue.
    pub justification_code: Option<String>,
    pub justification: String,
}

impl From<&ManualOverride> for OverridePayload {
    fn from(over: &ManualOverride) -> Self {
        Self {
            included_indices: over.included_indices.clone(),
            method: over.method,
            justification_code: over.justification_code.clone(),
            justification: over.justification.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationPayload {
    #[serde(default)]
    pub lista_meta: ListMeta,
    /// Every item with an active override, by item id.
    #[serde(default)]
    pub overrides: BTreeMap<String, OverridePayload>,
    /// Every item where a last quoted price is set, by item id.
    #[serde(default)]
    pub last_quoted_prices: BTreeMap<String, f64>,
}
