use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use price_model::ManualOverride;

/// Active overrides keyed by item id.
///
/// Writes replace; there are no merge semantics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideStore {
    overrides: BTreeMap<String, ManualOverride>,
}

impl OverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, item_id: &str) -> Option<&ManualOverride> {
        self.overrides.get(item_id)
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.overrides.contains_key(item_id)
    }

    /// Stores `over` for `item_id`, returning the override it replaced.
    pub fn set(&mut self, item_id: impl Into<String>, over: ManualOverride) -> Option<ManualOverride> {
        self.overrides.insert(item_id.into(), over)
    }

    pub fn remove(&mut self, item_id: &str) -> Option<ManualOverride> {
        self.overrides.remove(item_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ManualOverride)> {
        self.overrides.iter().map(|(id, over)| (id.as_str(), over))
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}
