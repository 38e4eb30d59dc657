//! Session file persistence.
//!
//! The CLI keeps a [`PricingSession`] in a JSON file between invocations.

use std::path::Path;

use tracing::debug;

use price_core::PricingSession;

use crate::error::{IngestError, Result};

/// Loads a session file and re-checks line item invariants.
pub fn load_session(path: &Path) -> Result<PricingSession> {
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let session: PricingSession =
        serde_json::from_str(&content).map_err(|source| IngestError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    session
        .validate()
        .map_err(|source| IngestError::InvalidData {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(
        path = %path.display(),
        items = session.items().len(),
        overrides = session.overrides().len(),
        "session loaded"
    );
    Ok(session)
}

/// Writes the session as pretty JSON, creating parent directories.
pub fn save_session(path: &Path, session: &PricingSession) -> Result<()> {
    let json = serde_json::to_string_pretty(session).map_err(|source| IngestError::JsonWrite {
        what: "session".to_string(),
        source,
    })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| IngestError::FileWrite {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, json).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "session saved");
    Ok(())
}
