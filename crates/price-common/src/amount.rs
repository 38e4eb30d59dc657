//! pt-BR currency amount parsing and formatting.
//!
//! Every user-entered amount (most importantly the last awarded price) crosses
//! this boundary, so the parsing contract is deliberately narrow:
//!
//! 1. trim, reject empty input;
//! 2. strip a leading `R$` currency symbol;
//! 3. drop whitespace that sits between two digits (`6 750,00`);
//! 4. drop `.` thousands separators and turn the `,` decimal separator into `.`;
//! 5. reject anything that does not parse to a finite number.

/// Currency symbol accepted in front of an amount.
pub const CURRENCY_SYMBOL: &str = "R$";

/// Parses a localized amount such as `R$ 1.234,56` or `1234,56`.
///
/// Returns `None` for empty input or when the cleaned text is not a finite
/// number.
///
/// # Examples
///
/// ```
/// use price_common::parse_localized_amount;
///
/// assert_eq!(parse_localized_amount("R$ 1.234,56"), Some(1234.56));
/// assert_eq!(parse_localized_amount("11,00"), Some(11.0));
/// assert_eq!(parse_localized_amount(""), None);
/// assert_eq!(parse_localized_amount("abc"), None);
/// ```
pub fn parse_localized_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let unprefixed = trimmed
        .strip_prefix(CURRENCY_SYMBOL)
        .unwrap_or(trimmed)
        .trim();
    if unprefixed.is_empty() {
        return None;
    }
    let compact = remove_digit_group_spaces(unprefixed);
    let normalized = compact.replace('.', "").replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Removes whitespace runs that are surrounded by digits on both sides.
fn remove_digit_group_spaces(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if ch.is_whitespace() {
            let start = i;
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            let before_digit = start > 0 && chars[start - 1].is_ascii_digit();
            let after_digit = i < chars.len() && chars[i].is_ascii_digit();
            if !(before_digit && after_digit) {
                out.extend(&chars[start..i]);
            }
            continue;
        }
        out.push(ch);
        i += 1;
    }
    out
}

/// Formats a value with a fixed number of decimals and a `,` decimal separator.
///
/// No thousands separator is emitted.
///
/// ```
/// use price_common::format_ptbr;
///
/// assert_eq!(format_ptbr(1234.5, 2), "1234,50");
/// assert_eq!(format_ptbr(0.0912, 4), "0,0912");
/// ```
pub fn format_ptbr(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}").replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_currency_with_thousands() {
        assert_eq!(parse_localized_amount("R$ 1.234,56"), Some(1234.56));
        assert_eq!(parse_localized_amount("R$1.234,56"), Some(1234.56));
        assert_eq!(parse_localized_amount("  1234,56  "), Some(1234.56));
    }

    #[test]
    fn parses_spaced_digit_groups() {
        assert_eq!(parse_localized_amount("6 750,0000"), Some(6750.0));
        assert_eq!(parse_localized_amount("R$ 9.309,0000"), Some(9309.0));
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert_eq!(parse_localized_amount(""), None);
        assert_eq!(parse_localized_amount("   "), None);
        assert_eq!(parse_localized_amount("R$"), None);
        assert_eq!(parse_localized_amount("abc"), None);
        assert_eq!(parse_localized_amount("12 ,5 x"), None);
    }

    #[test]
    fn rejects_non_finite() {
        assert_eq!(parse_localized_amount("inf"), None);
        assert_eq!(parse_localized_amount("NaN"), None);
    }

    #[test]
    fn dot_is_always_a_thousands_separator() {
        assert_eq!(parse_localized_amount("1.234"), Some(1234.0));
    }

    #[test]
    fn formats_ptbr() {
        assert_eq!(format_ptbr(11.0, 2), "11,00");
        assert_eq!(format_ptbr(-0.5, 1), "-0,5");
    }
}
