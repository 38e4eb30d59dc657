//! Pricing options loaded from TOML.
//!
//! ```toml
//! final_value_decimals = 2
//!
//! [exclusion]
//! high_ratio = 1.25
//! low_ratio = 0.75
//! min_quotes = 5
//!
//! [[justifications]]
//! code = "mercado"
//! text = "..."
//! ```
//!
//! Missing keys fall back to the defaults.

use std::path::Path;

use tracing::debug;

use price_model::{MAX_FINAL_VALUE_DECIMALS, PricingOptions};

use crate::error::{IngestError, Result};

pub fn parse_options(content: &str, path: &Path) -> Result<PricingOptions> {
    let options: PricingOptions =
        toml::from_str(content).map_err(|source| IngestError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
    if options.final_value_decimals > MAX_FINAL_VALUE_DECIMALS {
        return Err(IngestError::InvalidConfig {
            path: path.to_path_buf(),
            message: format!(
                "final_value_decimals must be at most {MAX_FINAL_VALUE_DECIMALS}, got {}",
                options.final_value_decimals
            ),
        });
    }
    Ok(options)
}

/// Loads options from `path`, or returns the defaults when no file is given.
pub fn load_options(path: Option<&Path>) -> Result<PricingOptions> {
    let Some(path) = path else {
        return Ok(PricingOptions::default());
    };
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let options = parse_options(&content, path)?;
    debug!(
        path = %path.display(),
        justifications = options.justifications.len(),
        "options loaded"
    );
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let options = parse_options("[exclusion]\nmin_quotes = 3\n", Path::new("c.toml")).unwrap();
        assert_eq!(options.exclusion.min_quotes, 3);
        assert_eq!(options.exclusion.high_ratio, 1.25);
        assert_eq!(options.final_value_decimals, 2);
        assert!(options.justification("mercado").is_some());
    }

    #[test]
    fn rejects_wrong_types() {
        let err = parse_options("final_value_decimals = \"two\"", Path::new("c.toml")).unwrap_err();
        assert!(matches!(err, IngestError::ConfigParse { .. }));
    }

    #[test]
    fn rejects_out_of_range_decimals() {
        let err = parse_options("final_value_decimals = 400", Path::new("c.toml")).unwrap_err();
        assert!(matches!(err, IngestError::InvalidConfig { .. }));
        assert!(err.to_string().contains("at most 10"));

        let options = parse_options("final_value_decimals = 10", Path::new("c.toml")).unwrap();
        assert_eq!(options.final_value_decimals, 10);
    }
}
