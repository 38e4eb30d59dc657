//! Run manifest: what was generated, when, and from which input.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use price_model::{GenerationPayload, ListMeta};

use crate::error::{ReportError, Result};

/// Identity of the file the line items were read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDigest {
    pub name: String,
    pub sha256: String,
    pub size_bytes: u64,
}

impl InputDigest {
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            name: name.into(),
            sha256: sha256_hex(bytes),
            size_bytes: bytes.len() as u64,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::from_bytes(name, &bytes))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub run_id: String,
    pub saved_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<InputDigest>,
    pub lista_meta: ListMeta,
    pub artefacts: Vec<String>,
    pub payload: GenerationPayload,
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Run id: the first 16 hex digits of a hash over the list number, the
/// timestamp and the input digest. Stable for the same inputs and instant.
pub fn run_id(meta: &ListMeta, saved_at: DateTime<Utc>, input: Option<&InputDigest>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(meta.numero_lista.trim().as_bytes());
    hasher.update(saved_at.to_rfc3339().as_bytes());
    if let Some(input) = input {
        hasher.update(input.sha256.as_bytes());
    }
    let digest = hex::encode(hasher.finalize());
    digest[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_of_known_input() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn run_id_depends_on_input() {
        let meta = ListMeta::default();
        let at = DateTime::parse_from_rfc3339("2026-01-05T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let a = InputDigest::from_bytes("a.csv", b"a");
        let b = InputDigest::from_bytes("b.csv", b"b");
        assert_eq!(run_id(&meta, at, Some(&a)), run_id(&meta, at, Some(&a)));
        assert_ne!(run_id(&meta, at, Some(&a)), run_id(&meta, at, Some(&b)));
        assert_eq!(run_id(&meta, at, None).len(), 16);
    }
}
