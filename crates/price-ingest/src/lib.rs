//! Reading and writing the files the pricing workflow exchanges.
//!
//! Line items come either from the quote-row CSV (estimated here) or from the
//! extraction service's preview JSON (estimated upstream).

pub mod config;
pub mod error;
pub mod lookup;
pub mod preview;
pub mod quote_rows;
pub mod session_file;

use std::path::Path;

use price_model::{LineItem, PricingOptions};

pub use config::{load_options, parse_options};
pub use error::{IngestError, Result};
pub use lookup::{load_lookup, parse_lookup};
pub use preview::{load_preview, parse_preview};
pub use quote_rows::{
    INCISO_SOURCES, QuoteRow, build_line_items, load_quote_rows, parse_quote_rows,
    read_quote_rows, source_for_inciso,
};
pub use session_file::{load_session, save_session};

/// Loads line items, choosing the reader from the file extension.
pub fn load_line_items(path: &Path, options: &PricingOptions) -> Result<Vec<LineItem>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("csv") => load_quote_rows(path, options),
        Some("json") => load_preview(path),
        _ => Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}
