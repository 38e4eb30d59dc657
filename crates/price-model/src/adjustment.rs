//! Manual overrides of the automatic estimate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::Method;
use crate::error::ValidationError;

/// Justification chosen in the adjustment dialog.
///
/// Canned codes are resolved against the configured catalogue only when the
/// override is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Justification {
    /// One of the fixed justification options, by code.
    Canned(String),
    /// The "Other" option with free text.
    Custom(String),
}

/// A saved user decision for one line item.
///
/// Overrides are replaced wholesale; there is no partial edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualOverride {
    /// Sorted ascending, deduplicated, never empty.
    pub included_indices: Vec<u32>,
    pub method: Method,
    /// Resolved justification text; never empty.
    pub justification: String,
    /// Code of the canned option the text came from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification_code: Option<String>,
}

impl ManualOverride {
    /// Builds an override from an already-resolved justification.
    ///
    /// Indices are sorted and deduplicated. Fails when no index is given or
    /// the justification is blank.
    pub fn new(
        included: impl IntoIterator<Item = u32>,
        method: Method,
        justification: impl Into<String>,
        justification_code: Option<String>,
    ) -> Result<Self, ValidationError> {
        let included_indices: Vec<u32> = included
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if included_indices.is_empty() {
            return Err(ValidationError::EmptySelection);
        }
        let justification = justification.into().trim().to_string();
        if justification.is_empty() {
            return Err(ValidationError::MissingJustification);
        }
        Ok(Self {
            included_indices,
            method,
            justification,
            justification_code,
        })
    }

    pub fn included_set(&self) -> BTreeSet<u32> {
        self.included_indices.iter().copied().collect()
    }
}
