//! Type-safe enumerations for the pricing workflow.
//!
//! Reports print the pt-BR labels the procurement team works with; logs and
//! JSON use the lowercase identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aggregation used to turn a set of quotes into a single price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Arithmetic mean of the included quotes.
    Mean,
    /// Median of the included quotes; preferred when dispersion is high.
    Median,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Mean => "mean",
            Method::Median => "median",
        }
    }

    /// Label used in generated reports.
    pub fn label(&self) -> &'static str {
        match self {
            Method::Mean => "Média",
            Method::Median => "Mediana",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    /// Accepts the identifiers and the pt-BR labels, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mean" | "media" | "média" => Ok(Method::Mean),
            "median" | "mediana" => Ok(Method::Median),
            _ => Err(format!("Unknown method: {s}")),
        }
    }
}

/// Where a row's final value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Automatic,
    Manual,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Automatic => "automatic",
            Mode::Manual => "manual",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Automatic => "Automático",
            Mode::Manual => "Manual",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Visual state of the per-row adjustment action.
///
/// States are mutually exclusive and evaluated in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustState {
    /// A manual override exists; it stays editable even if the item is no
    /// longer eligible.
    Overridden,
    /// Eligible, and the automatic estimate fell below the last awarded price.
    NeedsAttention,
    /// Eligible, and the automatic estimate is at or above the last awarded
    /// price (but within the tolerance band).
    WithinTolerance,
    /// Not eligible; manual adjustment is disabled.
    Locked,
}

impl AdjustState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustState::Overridden => "overridden",
            AdjustState::NeedsAttention => "needs_attention",
            AdjustState::WithinTolerance => "within_tolerance",
            AdjustState::Locked => "locked",
        }
    }

    /// Whether the adjustment action is enabled in this state.
    pub fn is_adjustable(&self) -> bool {
        !matches!(self, AdjustState::Locked)
    }
}

impl fmt::Display for AdjustState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
