use std::path::PathBuf;

use price_core::DraftStats;
use price_model::{ManualOverride, Method};

#[derive(Debug)]
pub struct InitResult {
    pub session_path: PathBuf,
    pub items: usize,
    pub quotes: usize,
    /// Items without any automatic value.
    pub unpriced: usize,
}

#[derive(Debug)]
pub struct AdjustResult {
    pub item_id: String,
    pub method: Method,
    pub suggested_method: Method,
    pub stats: DraftStats,
    /// `None` for a dry run.
    pub saved: Option<ManualOverride>,
}

#[derive(Debug)]
pub struct ParsedAmount {
    pub input: String,
    pub value: Option<f64>,
}
