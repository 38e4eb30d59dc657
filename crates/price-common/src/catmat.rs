//! CATMAT material code normalization.

/// Number of digits in a CATMAT code.
pub const CATMAT_DIGITS: usize = 6;

/// Normalizes a CATMAT code to its six-digit form.
///
/// Accepts the bare code or any text whose digits form exactly six digits
/// (`"455302 - CANETA"` is not accepted, `"455.302"` is).
///
/// ```
/// use price_common::normalize_catmat;
///
/// assert_eq!(normalize_catmat(" 455302 "), Some("455302".to_string()));
/// assert_eq!(normalize_catmat("455.302"), Some("455302".to_string()));
/// assert_eq!(normalize_catmat("12345"), None);
/// ```
pub fn normalize_catmat(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    (digits.len() == CATMAT_DIGITS).then_some(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_lengths() {
        assert_eq!(normalize_catmat(""), None);
        assert_eq!(normalize_catmat("1234567"), None);
        assert_eq!(normalize_catmat("455302 - 12"), None);
    }
}
