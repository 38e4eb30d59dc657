//! CLI library components for the price estimator.

pub mod logging;
