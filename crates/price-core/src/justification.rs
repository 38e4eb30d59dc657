use price_model::{Justification, PricingOptions, ValidationError};

/// Resolves a dialog justification to its final text.
///
/// Returns the text and, for canned options, the code it came from.
pub fn resolve_justification(
    justification: &Justification,
    options: &PricingOptions,
) -> Result<(String, Option<String>), ValidationError> {
    match justification {
        Justification::Canned(code) => options
            .justification(code)
            .map(|canned| (canned.text.clone(), Some(canned.code.clone())))
            .ok_or_else(|| ValidationError::UnknownJustification(code.clone())),
        Justification::Custom(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Err(ValidationError::MissingJustification)
            } else {
                Ok((trimmed.to_string(), None))
            }
        }
    }
}
