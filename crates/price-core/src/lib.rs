//! Price estimation core.
//!
//! Everything here is synchronous and referentially transparent: the same
//! inputs always produce the same rows, so callers can recompute on every
//! interaction. The only mutable state is [`PricingSession`], owned by the
//! caller and passed explicitly.

pub mod draft;
pub mod eligibility;
pub mod estimate;
pub mod justification;
pub mod rows;
pub mod session;
pub mod stats;
pub mod store;

pub use draft::{AdjustmentDraft, DraftStats, suggest_method};
pub use eligibility::{classify, is_eligible};
pub use estimate::{apply_estimate, estimate};
pub use justification::resolve_justification;
pub use rows::{difference, final_value, materialize_row};
pub use session::PricingSession;
pub use stats::{coefficient_of_variation, mean, median, round_to};
pub use store::OverrideStore;
