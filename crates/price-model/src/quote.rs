//! Quotation line items as delivered by the extraction service.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::Method;
use crate::error::{ModelError, Result};

/// One raw price data point of a line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteEntry {
    /// Stable identity within the line item; not necessarily contiguous.
    #[serde(alias = "idx")]
    pub index: u32,
    #[serde(alias = "valor")]
    pub value: f64,
    /// Provenance label (e.g. "Compras.gov.br"); may be empty.
    #[serde(default, alias = "fonte")]
    pub source: String,
}

impl QuoteEntry {
    pub fn new(index: u32, value: f64, source: impl Into<String>) -> Self {
        Self {
            index,
            value,
            source: source.into(),
        }
    }
}

/// One row of the procurement list.
///
/// The `auto_*` fields are produced upstream by the automatic-exclusion rule
/// and are taken as given here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(alias = "item", alias = "itemId")]
    pub item_id: String,
    /// CATMAT code; opaque to the pricing logic.
    #[serde(default, alias = "catmat", alias = "productCode")]
    pub product_code: String,
    #[serde(default, alias = "valores_brutos", alias = "rawEntries")]
    pub raw_entries: Vec<QuoteEntry>,
    #[serde(default, alias = "autoKeptIndices")]
    pub auto_kept_indices: BTreeSet<u32>,
    #[serde(default, alias = "autoExcludedHighIndices")]
    pub auto_excluded_high_indices: BTreeSet<u32>,
    #[serde(default, alias = "autoExcludedLowIndices")]
    pub auto_excluded_low_indices: BTreeSet<u32>,
    #[serde(default, alias = "valor_calculado", alias = "autoComputedValue")]
    pub auto_computed_value: Option<f64>,
    /// Aggregation the automatic rule used, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_method: Option<Method>,
}

impl LineItem {
    /// Builds a line item with no automatic estimate yet.
    pub fn new(
        item_id: impl Into<String>,
        product_code: impl Into<String>,
        raw_entries: Vec<QuoteEntry>,
    ) -> Result<Self> {
        let item = Self {
            item_id: item_id.into(),
            product_code: product_code.into(),
            raw_entries,
            auto_kept_indices: BTreeSet::new(),
            auto_excluded_high_indices: BTreeSet::new(),
            auto_excluded_low_indices: BTreeSet::new(),
            auto_computed_value: None,
            auto_method: None,
        };
        item.validate()?;
        Ok(item)
    }

    /// Checks the invariants of the entry list: non-empty id, unique indices
    /// and finite values.
    pub fn validate(&self) -> Result<()> {
        if self.item_id.trim().is_empty() {
            return Err(ModelError::EmptyItemId);
        }
        let mut seen = BTreeSet::new();
        for entry in &self.raw_entries {
            if !entry.value.is_finite() {
                return Err(ModelError::NonFiniteValue {
                    item_id: self.item_id.clone(),
                    index: entry.index,
                });
            }
            if !seen.insert(entry.index) {
                return Err(ModelError::DuplicateIndex {
                    item_id: self.item_id.clone(),
                    index: entry.index,
                });
            }
        }
        Ok(())
    }

    pub fn entry(&self, index: u32) -> Option<&QuoteEntry> {
        self.raw_entries.iter().find(|entry| entry.index == index)
    }

    pub fn has_index(&self, index: u32) -> bool {
        self.entry(index).is_some()
    }

    pub fn indices(&self) -> BTreeSet<u32> {
        self.raw_entries.iter().map(|entry| entry.index).collect()
    }

    /// Values of the entries whose index is in `indices`, in entry order.
    pub fn values_for(&self, indices: &BTreeSet<u32>) -> Vec<f64> {
        self.raw_entries
            .iter()
            .filter(|entry| indices.contains(&entry.index))
            .map(|entry| entry.value)
            .collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.raw_entries.iter().map(|entry| entry.value).collect()
    }
}
