//! Shared utilities for the price estimation crates.
//!
//! This crate provides the helpers every other crate needs at its edges:
//! pt-BR amount parsing and formatting, CATMAT code normalization and
//! filesystem-safe slugs for generated artefacts.

pub mod amount;
pub mod catmat;
pub mod naming;

// Re-export commonly used functions at crate root for convenience
pub use amount::{format_ptbr, parse_localized_amount};
pub use catmat::normalize_catmat;
pub use naming::safe_slug;
