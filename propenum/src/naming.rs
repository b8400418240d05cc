//! Property key to enum field name conversion.
//!
//! Converts `camelCase` to `CAMEL_CASE` and `dotted.names` to `DOTTED_NAMES`.
//! The rules are applied in order, each one operating on the output of the
//! previous one:
//!
//! 1. strip `prefix.` from the start of the key,
//! 2. insert `_` between a lowercase letter or digit and an uppercase letter,
//!    then uppercase everything,
//! 3. replace `.`, whitespace and `-` between two uppercase letters or digits
//!    with `_`.
//!
//! The result is only a candidate; see [`crate::validation`] for the check
//! against the configured field pattern.

use lazy_static::lazy_static;
use regex::Regex;

/// Separator between the configured prefix and the rest of a key.
pub const PREFIX_SEPARATOR: &str = ".";

lazy_static! {
    static ref CAMEL_BOUNDARY_REGEX: Regex = Regex::new(r"([a-z0-9])([A-Z])").unwrap();
    static ref SEPARATOR_REGEX: Regex = Regex::new(r"([A-Z0-9])[.\s-]([A-Z0-9])").unwrap();
}

/// Builds the candidate enum field name for `key`.
///
/// If the key starts with `prefix` followed by [`PREFIX_SEPARATOR`], that
/// leading part is skipped. With an empty prefix that is a leading `.`.
///
/// # Example
///
/// ```rust
/// use propenum::naming::normalize_key;
///
/// assert_eq!(normalize_key("com.example.myLongKey", ""), "COM_EXAMPLE_MY_LONG_KEY");
/// assert_eq!(normalize_key("com.example.myLongKey", "com.example"), "MY_LONG_KEY");
/// ```
pub fn normalize_key(key: &str, prefix: &str) -> String {
    let stripped = strip_prefix(key, prefix);
    let upper = CAMEL_BOUNDARY_REGEX
        .replace_all(stripped, "${1}_${2}")
        .to_uppercase();
    collapse_separators(upper)
}

/// Returns `key` without its leading `prefix.`, or `key` unchanged.
pub fn strip_prefix<'a>(key: &'a str, prefix: &str) -> &'a str {
    key.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix(PREFIX_SEPARATOR))
        .unwrap_or(key)
}

// Matches never overlap, so `A.B.C` needs a second pass to become `A_B_C`.
fn collapse_separators(mut name: String) -> String {
    while SEPARATOR_REGEX.is_match(&name) {
        name = SEPARATOR_REGEX.replace_all(&name, "${1}_${2}").into_owned();
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_keys() {
        assert_eq!(normalize_key("key", ""), "KEY");
        assert_eq!(normalize_key("myKey", ""), "MY_KEY");
        assert_eq!(normalize_key("myLongKey", ""), "MY_LONG_KEY");
        assert_eq!(normalize_key("aQuietLongKey", ""), "A_QUIET_LONG_KEY");
        assert_eq!(normalize_key("value1", ""), "VALUE1");
        assert_eq!(normalize_key("value1Key", ""), "VALUE1_KEY");
    }

    #[test]
    fn test_dotted_keys() {
        assert_eq!(normalize_key("com.example.key", ""), "COM_EXAMPLE_KEY");
        assert_eq!(
            normalize_key("com.example.myLongKey", ""),
            "COM_EXAMPLE_MY_LONG_KEY"
        );
        assert_eq!(
            normalize_key("com.example.myDottedKey", ""),
            "COM_EXAMPLE_MY_DOTTED_KEY"
        );
    }

    #[test]
    fn test_single_character_segments_collapse() {
        assert_eq!(normalize_key("a.b.c", ""), "A_B_C");
        assert_eq!(normalize_key("x-y z", ""), "X_Y_Z");
    }

    #[test]
    fn test_spaces_and_dashes_behave_like_dots() {
        assert_eq!(normalize_key("key with spaces", ""), "KEY_WITH_SPACES");
        assert_eq!(normalize_key("key-with-dashes", ""), "KEY_WITH_DASHES");
        assert_eq!(normalize_key("key\twith\ttabs", ""), "KEY_WITH_TABS");
    }

    #[test]
    fn test_underscores_pass_through() {
        assert_eq!(
            normalize_key("key_with_underscores", ""),
            "KEY_WITH_UNDERSCORES"
        );
        assert_eq!(normalize_key("underscore_", ""), "UNDERSCORE_");
    }

    #[test]
    fn test_separators_at_edges_are_kept() {
        // Nothing on one side, so the rule does not apply.
        assert_eq!(normalize_key("trailing-", ""), "TRAILING-");
        assert_eq!(normalize_key("-leading", ""), "-LEADING");
        assert_eq!(normalize_key("double..dot", ""), "DOUBLE..DOT");
    }

    #[test]
    fn test_empty_prefix_strips_leading_dot() {
        assert_eq!(normalize_key(".leading", ""), "LEADING");
        assert_eq!(normalize_key("..twice", ""), ".TWICE");
        assert_eq!(normalize_key(".leading", "app"), ".LEADING");
    }

    #[test]
    fn test_invalid_characters_survive_normalization() {
        assert_eq!(normalize_key("dollar$key", ""), "DOLLAR$KEY");
        assert_eq!(normalize_key("plus+key", ""), "PLUS+KEY");
    }

    #[test]
    fn test_prefix_is_stripped_only_with_separator() {
        let prefix = "com.example.prefix";
        assert_eq!(normalize_key("com.example.prefix.key1", prefix), "KEY1");
        assert_eq!(
            normalize_key("com.example.prefixKey", prefix),
            "COM_EXAMPLE_PREFIX_KEY"
        );
        assert_eq!(normalize_key("other.key", prefix), "OTHER_KEY");
    }

    #[test]
    fn test_strip_prefix() {
        assert_eq!(strip_prefix("app.title", "app"), "title");
        assert_eq!(strip_prefix("app.title", ""), "app.title");
        assert_eq!(strip_prefix(".title", ""), "title");
        assert_eq!(strip_prefix("application", "app"), "application");
        assert_eq!(strip_prefix("app", "app"), "app");
    }
}
