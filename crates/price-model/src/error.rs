use thiserror::Error;

/// Structural problems in line items received from upstream.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("item {item_id}: quote {index} has a non-finite value")]
    NonFiniteValue { item_id: String, index: u32 },
    #[error("item {item_id}: quote index {index} appears more than once")]
    DuplicateIndex { item_id: String, index: u32 },
    #[error("item {item_id} appears more than once")]
    DuplicateItem { item_id: String },
    #[error("item id must not be empty")]
    EmptyItemId,
}

/// User-facing validation failures.
///
/// These are recoverable: callers show the message and keep the previous
/// state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("select at least one value")]
    EmptySelection,
    #[error("a justification text is required when \"Other\" is selected")]
    MissingJustification,
    #[error("unknown justification code: {0}")]
    UnknownJustification(String),
    #[error("item {item_id} has no quote with index {index}")]
    UnknownIndex { item_id: String, index: u32 },
    #[error("unknown item: {0}")]
    UnknownItem(String),
    #[error("could not read an amount from {0:?}")]
    InvalidAmount(String),
    #[error("manual adjustment is locked for item {0}")]
    AdjustmentLocked(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
