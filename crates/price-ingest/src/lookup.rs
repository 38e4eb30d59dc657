//! Last-awarded-price lookup ingestion.
//!
//! Accepts the lookup service's `{ "by_catmat": { "<code>": record } }`
//! document or a plain array of records.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use price_common::normalize_catmat;
use price_model::LastPriceRecord;

use crate::error::{IngestError, Result};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LookupDocument {
    ByCatmat {
        by_catmat: BTreeMap<String, LastPriceRecord>,
    },
    Records(Vec<LastPriceRecord>),
}

/// Parses lookup JSON. Records keyed by CATMAT take the key as their code
/// when the record itself carries none.
pub fn parse_lookup(content: &str, path: &Path) -> Result<Vec<LastPriceRecord>> {
    let document: LookupDocument =
        serde_json::from_str(content).map_err(|source| IngestError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    let records = match document {
        LookupDocument::ByCatmat { by_catmat } => by_catmat
            .into_iter()
            .map(|(key, mut record)| {
                if record.catmat.trim().is_empty() {
                    record.catmat = normalize_catmat(&key).unwrap_or(key);
                }
                record
            })
            .collect(),
        LookupDocument::Records(records) => records,
    };
    Ok(records)
}

pub fn load_lookup(path: &Path) -> Result<Vec<LastPriceRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_lookup(&content, path)?;
    let usable = records
        .iter()
        .filter(|record| record.usable_value().is_some())
        .count();
    info!(path = %path.display(), records = records.len(), usable, "lookup loaded");
    Ok(records)
}
