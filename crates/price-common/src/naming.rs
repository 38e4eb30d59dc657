//! Filesystem-safe names for generated artefacts.

use std::sync::LazyLock;

use regex::Regex;

static SLUG_FORBIDDEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z._-]+").expect("valid slug regex"));
static REPEATED_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("valid underscore regex"));

/// Fallback slug when nothing usable remains.
pub const EMPTY_SLUG: &str = "SEM_NUMERO";

/// Reduces a list number or label to `[0-9A-Za-z._-]`, collapsing runs of
/// other characters into a single `_`.
///
/// ```
/// use price_common::safe_slug;
///
/// assert_eq!(safe_slug("123/2025"), "123_2025");
/// assert_eq!(safe_slug("  "), "SEM_NUMERO");
/// ```
pub fn safe_slug(raw: &str) -> String {
    let replaced = SLUG_FORBIDDEN.replace_all(raw.trim(), "_");
    let collapsed = REPEATED_UNDERSCORE.replace_all(&replaced, "_");
    let slug = collapsed.trim_matches('_');
    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_underscores() {
        assert_eq!(safe_slug("__a  b__"), "a_b");
        assert_eq!(safe_slug("Lista nº 7"), "Lista_n_7");
    }
}
