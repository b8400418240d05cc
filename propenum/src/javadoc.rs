//! Javadoc block rendering with greedy word wrapping.

/// Continuation marker of every javadoc body line, after the indentation.
const LINE_PREFIX: &str = " * ";

/// Wraps `text` into lines of at most `width` characters.
///
/// Tokens are separated by whitespace and packed greedily. Whitespace between
/// two tokens on the same line is kept as written; at a wrap it is dropped. A
/// token that is longer than `width` on its own is put on a line by itself,
/// unbroken.
/// Newlines in `text` always start a new line; the leading whitespace of such
/// a line is kept, also on the lines it wraps into. Blank input lines yield
/// empty strings.
///
/// Widths are counted in `char`s, so the result does not depend on locale or
/// terminal settings.
pub fn word_wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw_line in text.split('\n') {
        let raw_line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let indent: String = raw_line.chars().take_while(|c| c.is_whitespace()).collect();
        let indent_len = indent.chars().count();

        let mut current = indent.clone();
        let mut current_len = indent_len;
        let mut has_token = false;

        for (gap, token) in spaced_tokens(&raw_line[indent.len()..]) {
            let gap_len = gap.chars().count();
            let token_len = token.chars().count();
            if has_token && current_len + gap_len + token_len > width {
                lines.push(std::mem::replace(&mut current, indent.clone()));
                current_len = indent_len;
                has_token = false;
            }
            if has_token {
                current.push_str(gap);
                current_len += gap_len;
            }
            current.push_str(token);
            current_len += token_len;
            has_token = true;
        }

        if has_token {
            lines.push(current);
        } else {
            lines.push(String::new());
        }
    }

    lines
}

/// Splits `line` into tokens, each paired with the whitespace before it.
fn spaced_tokens(line: &str) -> impl Iterator<Item = (&str, &str)> {
    let mut rest = line;
    std::iter::from_fn(move || {
        let token_start = rest.find(|c: char| !c.is_whitespace())?;
        let gap = &rest[..token_start];
        let after_gap = &rest[token_start..];
        let token_end = after_gap.find(char::is_whitespace).unwrap_or(after_gap.len());
        rest = &after_gap[token_end..];
        Some((gap, &after_gap[..token_end]))
    })
}

/// Builds a javadoc comment for `description`.
///
/// `indent` is prepended to every line of the comment (e.g. two spaces for
/// enum members). Body lines are wrapped so that they do not exceed
/// `line_length` characters including `indent` and the ` * ` marker.
///
/// # Example
///
/// ```rust
/// use propenum::javadoc::build_javadoc;
///
/// let javadoc = build_javadoc("This is an indented javadoc.", "  ", 80);
/// assert_eq!(javadoc, "  /**\n   * This is an indented javadoc.\n   */\n");
/// ```
pub fn build_javadoc(description: &str, indent: &str, line_length: usize) -> String {
    let prefix = format!("{}{}", indent, LINE_PREFIX);
    let width = line_length.saturating_sub(prefix.chars().count());

    let mut javadoc = String::new();
    javadoc.push_str(indent);
    javadoc.push_str("/**\n");

    for line in word_wrap(description, width) {
        if line.is_empty() {
            javadoc.push_str(prefix.trim_end());
        } else {
            javadoc.push_str(&prefix);
            javadoc.push_str(&line);
        }
        javadoc.push('\n');
    }

    javadoc.push_str(indent);
    javadoc.push_str(" */\n");
    javadoc
}
