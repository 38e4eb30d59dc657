//! Preview JSON ingestion.
//!
//! The extraction service returns `{ "items": [...] }`; a bare array of line
//! items is accepted too. The automatic sets and value are taken as given.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use price_model::{LineItem, ModelError};

use crate::error::{IngestError, Result};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PreviewDocument {
    Wrapped { items: Vec<LineItem> },
    Bare(Vec<LineItem>),
}

impl PreviewDocument {
    fn into_items(self) -> Vec<LineItem> {
        match self {
            Self::Wrapped { items } | Self::Bare(items) => items,
        }
    }
}

/// Parses preview JSON text and validates every line item.
pub fn parse_preview(content: &str, path: &Path) -> Result<Vec<LineItem>> {
    let document: PreviewDocument =
        serde_json::from_str(content).map_err(|source| IngestError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    let items = document.into_items();
    items
        .iter()
        .try_for_each(LineItem::validate)
        .map_err(|source: ModelError| IngestError::InvalidData {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(items)
}

pub fn load_preview(path: &Path) -> Result<Vec<LineItem>> {
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let items = parse_preview(&content, path)?;
    info!(path = %path.display(), items = items.len(), "preview loaded");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_array() {
        let items = parse_preview(
            r#"[{"item": "Item 1", "valores_brutos": [{"idx": 0, "valor": 2.5}]}]"#,
            Path::new("preview.json"),
        )
        .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].raw_entries[0].value, 2.5);
    }

    #[test]
    fn rejects_duplicate_indices() {
        let err = parse_preview(
            r#"{"items": [{"item": "Item 1", "valores_brutos": [
                {"idx": 0, "valor": 1.0}, {"idx": 0, "valor": 2.0}]}]}"#,
            Path::new("preview.json"),
        )
        .unwrap_err();
        assert!(matches!(err, IngestError::InvalidData { .. }));
    }
}
