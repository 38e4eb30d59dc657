pub mod adjustment;
pub mod enums;
pub mod error;
pub mod estimate;
pub mod lookup;
pub mod options;
pub mod payload;
pub mod quote;
pub mod row;

pub use adjustment::{Justification, ManualOverride};
pub use enums::{AdjustState, Method, Mode};
pub use error::{ModelError, Result, ValidationError};
pub use estimate::{AutoEstimate, EstimateRule, Exclusion};
pub use lookup::{LastPriceRecord, LookupStatus};
pub use options::{
    CannedJustification, ELIGIBILITY_RATIO, ExclusionLimits, MAX_FINAL_VALUE_DECIMALS,
    MEDIAN_CV_THRESHOLD, PricingOptions,
};
pub use payload::{GenerationPayload, ListMeta, OverridePayload};
pub use quote::{LineItem, QuoteEntry};
pub use row::ComputedRow;
