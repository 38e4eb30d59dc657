//! Generation artefacts for a priced list.
//!
//! - **Final price table**: one CSV row per item with its final value
//! - **Calculation memory**: plain-text audit of the automatic rule and of
//!   every manual adjustment
//! - **Payload**: overrides and last quoted prices consumed by generation
//! - **Manifest**: run id, timestamp, input digest and artefact names

mod error;
mod generate;
mod manifest;
mod memory;
mod table;

pub use error::{ReportError, Result};
pub use generate::{
    GenerationRequest, GenerationResult, MANIFEST_FILE, OutputNames, PAYLOAD_FILE, write_outputs,
};
pub use manifest::{InputDigest, Manifest, run_id, sha256_hex};
pub use memory::{MEMORY_TITLE, calculation_memory};
pub use table::{TABLE_HEADERS, final_table_csv};
