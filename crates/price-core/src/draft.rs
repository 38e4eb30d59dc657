//! In-memory state of the adjustment dialog.
//!
//! Every toggle recomputes the statistics from scratch; nothing here does I/O.

use std::collections::BTreeSet;

use serde::Serialize;

use price_model::{
    Justification, LineItem, MEDIAN_CV_THRESHOLD, ManualOverride, Method, PricingOptions,
    QuoteEntry, ValidationError,
};

use crate::justification::resolve_justification;
use crate::stats::{coefficient_of_variation, mean, median};

/// Suggests the median for dispersed samples (CV at or above the threshold),
/// the mean otherwise.
pub fn suggest_method(values: &[f64]) -> Method {
    match coefficient_of_variation(values) {
        Some(cv) if cv >= MEDIAN_CV_THRESHOLD => Method::Median,
        _ => Method::Mean,
    }
}

/// Live statistics of the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftStats {
    pub included_count: usize,
    pub excluded_count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub cv: Option<f64>,
    /// Mean or median of the included values, per the selected method.
    pub final_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentDraft {
    item_id: String,
    entries: Vec<QuoteEntry>,
    included: BTreeSet<u32>,
    method: Method,
    suggested_method: Method,
}

impl AdjustmentDraft {
    /// Opens the dialog for `item`.
    ///
    /// The selection starts from the existing override, else from the
    /// automatically kept quotes, else from every quote. Indices of a stale
    /// override that no longer match a quote are dropped from the selection.
    pub fn open(item: &LineItem, existing: Option<&ManualOverride>) -> Self {
        let available = item.indices();
        let included: BTreeSet<u32> = match existing {
            Some(over) => over
                .included_indices
                .iter()
                .copied()
                .filter(|index| available.contains(index))
                .collect(),
            None if !item.auto_kept_indices.is_empty() => item
                .auto_kept_indices
                .intersection(&available)
                .copied()
                .collect(),
            None => available,
        };
        let suggested_method = suggest_method(&item.values_for(&included));
        Self {
            item_id: item.item_id.clone(),
            entries: item.raw_entries.clone(),
            included,
            method: suggested_method,
            suggested_method,
        }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn entries(&self) -> &[QuoteEntry] {
        &self.entries
    }

    pub fn included(&self) -> &BTreeSet<u32> {
        &self.included
    }

    pub fn is_included(&self, index: u32) -> bool {
        self.included.contains(&index)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Method suggested when the dialog was opened.
    pub fn suggested_method(&self) -> Method {
        self.suggested_method
    }

    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    /// Flips the inclusion of one quote and returns its new state.
    pub fn toggle(&mut self, index: u32) -> Result<bool, ValidationError> {
        self.ensure_index(index)?;
        if self.included.remove(&index) {
            Ok(false)
        } else {
            self.included.insert(index);
            Ok(true)
        }
    }

    /// Replaces the whole selection. Every index must reference a quote.
    pub fn select(&mut self, indices: impl IntoIterator<Item = u32>) -> Result<(), ValidationError> {
        let selection: BTreeSet<u32> = indices.into_iter().collect();
        for index in &selection {
            self.ensure_index(*index)?;
        }
        self.included = selection;
        Ok(())
    }

    fn ensure_index(&self, index: u32) -> Result<(), ValidationError> {
        if self.entries.iter().any(|entry| entry.index == index) {
            Ok(())
        } else {
            Err(ValidationError::UnknownIndex {
                item_id: self.item_id.clone(),
                index,
            })
        }
    }

    fn included_values(&self) -> Vec<f64> {
        self.entries
            .iter()
            .filter(|entry| self.included.contains(&entry.index))
            .map(|entry| entry.value)
            .collect()
    }

    pub fn stats(&self) -> DraftStats {
        let values = self.included_values();
        let mean = mean(&values);
        let median = median(&values);
        let final_value = match self.method {
            Method::Mean => mean,
            Method::Median => median,
        };
        DraftStats {
            included_count: values.len(),
            excluded_count: self.entries.len() - values.len(),
            mean,
            median,
            cv: coefficient_of_variation(&values),
            final_value,
        }
    }

    /// Validates the draft and turns it into an override.
    ///
    /// The selection is checked before the justification, so an empty
    /// selection is always the reported problem when both are missing.
    pub fn finish(
        &self,
        justification: &Justification,
        options: &PricingOptions,
    ) -> Result<ManualOverride, ValidationError> {
        if self.included.is_empty() {
            return Err(ValidationError::EmptySelection);
        }
        let (text, code) = resolve_justification(justification, options)?;
        ManualOverride::new(self.included.iter().copied(), self.method, text, code)
    }
}
