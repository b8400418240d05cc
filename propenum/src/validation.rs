//! Validation of generated enum field names against the configured pattern.

use regex::Regex;

use crate::error::Error;

/// Default pattern for enum field names: an uppercase letter, then uppercase
/// letters and digits, optionally split by single underscores. One trailing
/// underscore is allowed so keys such as `underscore_` stay usable.
pub const DEFAULT_FIELD_PATTERN: &str = "^[A-Z][A-Z0-9]*(_[A-Z0-9]+)*_?$";

/// A compiled enum field pattern.
///
/// The pattern always has to match the whole identifier, even when the
/// configured expression is not anchored.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    source: String,
    regex: Regex,
}

impl FieldPattern {
    /// Compiles `pattern`.
    ///
    /// Returns [`Error::InvalidPattern`] if it is not a valid regular expression.
    pub fn new(pattern: &str) -> Result<Self, Error> {
        let regex =
            Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as it was configured.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, identifier: &str) -> bool {
        self.regex.is_match(identifier)
    }

    /// Checks `identifier`, which was built from `key`.
    ///
    /// Returns [`Error::InvalidKey`] carrying the key, the identifier and
    /// the pattern if it does not match.
    pub fn validate(&self, key: &str, identifier: &str) -> Result<(), Error> {
        if self.is_match(identifier) {
            Ok(())
        } else {
            Err(Error::invalid_key(key, identifier, &self.source))
        }
    }
}

impl Default for FieldPattern {
    fn default() -> Self {
        Self::new(DEFAULT_FIELD_PATTERN).expect("default field pattern is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pattern_accepts_upper_snake_case() {
        let pattern = FieldPattern::default();
        for identifier in [
            "KEY",
            "MY_KEY",
            "VALUE1",
            "COM_EXAMPLE_MY_LONG_KEY",
            "UNDERSCORE_",
            "A1_2B",
        ] {
            assert!(pattern.is_match(identifier), "{identifier} should match");
        }
    }

    #[test]
    fn test_default_pattern_rejects_malformed_names() {
        let pattern = FieldPattern::default();
        for identifier in [
            "",
            "_KEY",
            "1KEY",
            "MY__KEY",
            "KEY__",
            "DOLLAR$KEY",
            "PLUS+KEY",
            "lower",
            "A.B",
        ] {
            assert!(
                !pattern.is_match(identifier),
                "{identifier} should not match"
            );
        }
    }

    #[test]
    fn test_validate_reports_key_identifier_and_pattern() {
        let pattern = FieldPattern::default();
        let err = pattern.validate("dollar$key", "DOLLAR$KEY").unwrap_err();
        match err {
            Error::InvalidKey {
                key,
                identifier,
                pattern,
            } => {
                assert_eq!(key, "dollar$key");
                assert_eq!(identifier, "DOLLAR$KEY");
                assert_eq!(pattern, DEFAULT_FIELD_PATTERN);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unanchored_pattern_matches_whole_identifier() {
        let pattern = FieldPattern::new("[A-Z]+").unwrap();
        assert!(pattern.is_match("KEY"));
        assert!(!pattern.is_match("KEY_1"));
        assert_eq!(pattern.as_str(), "[A-Z]+");
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = FieldPattern::new("([A-Z]").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }
}
