//! Session-scoped pricing state.
//!
//! A [`PricingSession`] owns one list's line items together with the user's
//! decisions (overrides, last quoted prices). Rows are always derived from it;
//! nothing derived is stored.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use price_common::{normalize_catmat, parse_localized_amount};
use price_model::{
    AdjustState, ComputedRow, GenerationPayload, Justification, LastPriceRecord, LineItem,
    ListMeta, ManualOverride, ModelError, OverridePayload, PricingOptions, ValidationError,
};

use crate::draft::AdjustmentDraft;
use crate::eligibility::classify;
use crate::rows::materialize_row;
use crate::store::OverrideStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingSession {
    #[serde(default)]
    pub lista_meta: ListMeta,
    items: Vec<LineItem>,
    #[serde(default)]
    overrides: OverrideStore,
    #[serde(default)]
    last_quoted_prices: BTreeMap<String, f64>,
}

impl PricingSession {
    /// Creates a session over validated line items with unique ids.
    pub fn new(items: Vec<LineItem>) -> Result<Self, ModelError> {
        let session = Self {
            items,
            ..Self::default()
        };
        session.validate()?;
        Ok(session)
    }

    /// Re-checks item invariants, e.g. after loading a session file.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = BTreeSet::new();
        for item in &self.items {
            item.validate()?;
            if !seen.insert(item.item_id.as_str()) {
                return Err(ModelError::DuplicateItem {
                    item_id: item.item_id.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn with_list_meta(mut self, meta: ListMeta) -> Self {
        self.lista_meta = meta;
        self
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn item(&self, item_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.item_id == item_id)
    }

    fn require_item(&self, item_id: &str) -> Result<&LineItem, ValidationError> {
        self.item(item_id)
            .ok_or_else(|| ValidationError::UnknownItem(item_id.to_string()))
    }

    pub fn overrides(&self) -> &OverrideStore {
        &self.overrides
    }

    pub fn last_quoted_price(&self, item_id: &str) -> Option<f64> {
        self.last_quoted_prices.get(item_id).copied()
    }

    /// Sets the last quoted price from user text.
    ///
    /// Blank text clears the price. Text that does not parse is rejected and
    /// the previous price is kept.
    pub fn set_last_quoted_price(
        &mut self,
        item_id: &str,
        text: &str,
    ) -> Result<Option<f64>, ValidationError> {
        self.require_item(item_id)?;
        if text.trim().is_empty() {
            self.last_quoted_prices.remove(item_id);
            debug!(item_id, "last quoted price cleared");
            return Ok(None);
        }
        let value = parse_localized_amount(text)
            .ok_or_else(|| ValidationError::InvalidAmount(text.to_string()))?;
        self.last_quoted_prices.insert(item_id.to_string(), value);
        debug!(item_id, value, "last quoted price set");
        Ok(Some(value))
    }

    /// Fills missing last quoted prices from lookup records matched by CATMAT.
    ///
    /// Prices already present (user-entered or previously hydrated) are kept.
    /// Returns the number of items that received a price.
    pub fn hydrate_last_prices(&mut self, records: &[LastPriceRecord]) -> usize {
        let by_catmat: BTreeMap<String, f64> = records
            .iter()
            .filter_map(|record| {
                let catmat = normalize_catmat(&record.catmat)?;
                Some((catmat, record.usable_value()?))
            })
            .collect();
        let mut filled = 0;
        for item in &self.items {
            if self.last_quoted_prices.contains_key(&item.item_id) {
                continue;
            }
            let Some(catmat) = normalize_catmat(&item.product_code) else {
                continue;
            };
            if let Some(value) = by_catmat.get(&catmat) {
                self.last_quoted_prices.insert(item.item_id.clone(), *value);
                filled += 1;
            }
        }
        info!(records = records.len(), filled, "last prices hydrated");
        filled
    }

    pub fn adjust_state(&self, item_id: &str) -> Result<AdjustState, ValidationError> {
        let item = self.require_item(item_id)?;
        Ok(classify(
            self.last_quoted_price(item_id),
            item.auto_computed_value,
            self.overrides.contains(item_id),
        ))
    }

    /// Opens the adjustment dialog; rejected while the row is locked.
    pub fn open_adjustment(&self, item_id: &str) -> Result<AdjustmentDraft, ValidationError> {
        if !self.adjust_state(item_id)?.is_adjustable() {
            return Err(ValidationError::AdjustmentLocked(item_id.to_string()));
        }
        let item = self.require_item(item_id)?;
        Ok(AdjustmentDraft::open(item, self.overrides.get(item_id)))
    }

    /// Validates `draft` and replaces any override of its item.
    ///
    /// On error the override collection is left untouched.
    pub fn save_adjustment(
        &mut self,
        draft: &AdjustmentDraft,
        justification: &Justification,
        options: &PricingOptions,
    ) -> Result<ManualOverride, ValidationError> {
        let item_id = draft.item_id().to_string();
        if !self.adjust_state(&item_id)?.is_adjustable() {
            return Err(ValidationError::AdjustmentLocked(item_id));
        }
        let over = draft.finish(justification, options)?;
        let item = self.require_item(&item_id)?;
        if let Some(index) = over
            .included_indices
            .iter()
            .copied()
            .find(|index| !item.has_index(*index))
        {
            return Err(ValidationError::UnknownIndex { item_id, index });
        }
        debug!(
            item_id = %item_id,
            method = %over.method,
            included = over.included_indices.len(),
            "override saved"
        );
        self.overrides.set(item_id, over.clone());
        Ok(over)
    }

    /// Removes the override of `item_id`; the row reverts to automatic.
    pub fn clear_override(
        &mut self,
        item_id: &str,
    ) -> Result<Option<ManualOverride>, ValidationError> {
        self.require_item(item_id)?;
        let removed = self.overrides.remove(item_id);
        debug!(item_id, removed = removed.is_some(), "override cleared");
        Ok(removed)
    }

    pub fn row(&self, item_id: &str) -> Option<ComputedRow> {
        let item = self.item(item_id)?;
        Some(self.materialize(item))
    }

    pub fn rows(&self) -> Vec<ComputedRow> {
        self.items.iter().map(|item| self.materialize(item)).collect()
    }

    fn materialize(&self, item: &LineItem) -> ComputedRow {
        materialize_row(
            item,
            self.overrides.get(&item.item_id),
            self.last_quoted_price(&item.item_id),
        )
    }

    /// Builds the payload for the generation step: every active override and
    /// every set last quoted price.
    pub fn generation_payload(&self) -> GenerationPayload {
        GenerationPayload {
            lista_meta: self.lista_meta.clone(),
            overrides: self
                .overrides
                .iter()
                .map(|(id, over)| (id.to_string(), OverridePayload::from(over)))
                .collect(),
            last_quoted_prices: self.last_quoted_prices.clone(),
        }
    }
}
