//! Duplicate enum field detection.

use std::collections::HashMap;

use crate::error::Error;

/// Remembers which property key produced which enum field, per enum type.
///
/// One tracker lives for one generation run and is passed into every
/// emission. Entries are keyed by the fully qualified type name, so fields of
/// different types never collide; [`DuplicateTracker::begin_type`] clears a
/// type before it is (re)generated.
#[derive(Debug, Default)]
pub struct DuplicateTracker {
    fields: HashMap<(String, String), String>,
}

impl DuplicateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets everything registered for `type_name`.
    pub fn begin_type(&mut self, type_name: &str) {
        self.fields.retain(|(owner, _), _| owner != type_name);
    }

    /// Records that `key` produced `identifier` in `type_name`.
    ///
    /// Returns [`Error::DuplicateField`] naming both keys if another key
    /// already produced the same identifier in that type.
    pub fn register(&mut self, type_name: &str, identifier: &str, key: &str) -> Result<(), Error> {
        let slot = (type_name.to_string(), identifier.to_string());
        if let Some(previous_key) = self.fields.get(&slot) {
            return Err(Error::duplicate_field(
                type_name,
                identifier,
                key,
                previous_key.as_str(),
            ));
        }
        self.fields.insert(slot, key.to_string());
        Ok(())
    }

    /// Number of fields registered across all types.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_distinct_fields() {
        let mut tracker = DuplicateTracker::new();
        tracker.register("Messages", "MY_KEY", "myKey").unwrap();
        tracker.register("Messages", "VALUE1", "value1").unwrap();
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_duplicate_names_both_keys() {
        let mut tracker = DuplicateTracker::new();
        tracker.register("Messages", "MY_KEY", "myKey").unwrap();
        let err = tracker.register("Messages", "MY_KEY", "my.key").unwrap_err();
        match err {
            Error::DuplicateField {
                type_name,
                identifier,
                key,
                previous_key,
            } => {
                assert_eq!(type_name, "Messages");
                assert_eq!(identifier, "MY_KEY");
                assert_eq!(key, "my.key");
                assert_eq!(previous_key, "myKey");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // The first registration is kept.
        let err = tracker.register("Messages", "MY_KEY", "MyKey").unwrap_err();
        assert!(matches!(err, Error::DuplicateField { previous_key, .. } if previous_key == "myKey"));
    }

    #[test]
    fn test_same_identifier_in_different_types() {
        let mut tracker = DuplicateTracker::new();
        tracker.register("a.Messages", "MY_KEY", "myKey").unwrap();
        tracker.register("b.Messages", "MY_KEY", "myKey").unwrap();
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_begin_type_resets_only_that_type() {
        let mut tracker = DuplicateTracker::new();
        tracker.register("A", "X", "x").unwrap();
        tracker.register("B", "X", "x").unwrap();

        tracker.begin_type("A");
        assert_eq!(tracker.len(), 1);
        tracker.register("A", "X", "x").unwrap();
        assert!(tracker.register("B", "X", "x").is_err());
    }
}
