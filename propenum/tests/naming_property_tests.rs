use propenum::javadoc::{build_javadoc, word_wrap};
use propenum::naming::normalize_key;
use propenum::validation::FieldPattern;
use proptest::prelude::*;

fn camel_key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-zA-Z0-9]{0,12}").expect("valid key regex")
}

fn dotted_key_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(camel_key_strategy(), 1..5).prop_map(|segments| segments.join("."))
}

fn text_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 ,\\.\n]{0,200}").expect("valid text regex")
}

proptest! {
    #[test]
    fn normalized_keys_match_default_pattern(key in dotted_key_strategy()) {
        let identifier = normalize_key(&key, "");
        prop_assert!(
            FieldPattern::default().is_match(&identifier),
            "{} -> {}",
            key,
            identifier
        );
    }

    #[test]
    fn normalized_keys_have_no_lowercase_or_separators(key in dotted_key_strategy()) {
        let identifier = normalize_key(&key, "");
        prop_assert!(!identifier.chars().any(|c| c.is_ascii_lowercase() || c == '.'));
    }

    #[test]
    fn prefix_is_stripped(prefix in dotted_key_strategy(), key in camel_key_strategy()) {
        let prefixed = format!("{}.{}", prefix, key);
        prop_assert_eq!(normalize_key(&prefixed, &prefix), normalize_key(&key, ""));
    }

    #[test]
    fn wrapped_lines_respect_width(text in text_strategy(), width in 10usize..80) {
        for line in word_wrap(&text, width) {
            let tokens = line.split_whitespace().count();
            prop_assert!(line.chars().count() <= width || tokens == 1, "{:?}", line);
        }
    }

    #[test]
    fn wrapping_keeps_every_token(text in text_strategy(), width in 10usize..80) {
        let wrapped = word_wrap(&text, width).join(" ");
        let original: Vec<&str> = text.split_whitespace().collect();
        let rewrapped: Vec<&str> = wrapped.split_whitespace().collect();
        prop_assert_eq!(original, rewrapped);
    }

    #[test]
    fn javadoc_is_a_closed_block(text in text_strategy(), line_length in 20usize..120) {
        let javadoc = build_javadoc(&text, "  ", line_length);
        let lines: Vec<&str> = javadoc.lines().collect();
        prop_assert_eq!(lines.first().copied(), Some("  /**"));
        prop_assert_eq!(lines.last().copied(), Some("   */"));
        for line in &lines[1..lines.len() - 1] {
            prop_assert!(line.starts_with("   *"));
        }
    }
}
