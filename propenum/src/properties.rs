//! Support for Java `.properties` files.
//!
//! Implements the standard property-file syntax: `#`/`!` comments, `=`, `:`
//! or whitespace separators, backslash line continuations and escapes
//! (`\t`, `\n`, `\r`, `\f`, `\uXXXX`). Unlike a hash table based loader, the
//! order of the entries is preserved.

use std::collections::HashMap;

use tracing::warn;

use crate::{error::Error, traits::Parser, types::PropertyEntry};

/// Whitespace as understood by the property-file syntax.
const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// Represents a parsed `.properties` file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    /// All entries in file order.
    ///
    /// If a key occurs more than once, the last value wins and the entry keeps
    /// the position of the first occurrence.
    pub entries: Vec<PropertyEntry>,
}

impl Format {
    /// Parses properties text.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
        let lines: Vec<&str> = normalized.split('\n').collect();

        let mut entries: Vec<PropertyEntry> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut index = 0usize;

        while index < lines.len() {
            let line_number = index + 1;
            let line = lines[index].trim_start_matches(WHITESPACE);
            index += 1;

            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let mut logical = String::new();
            let mut current = line;
            loop {
                if !ends_with_continuation(current) {
                    logical.push_str(current);
                    break;
                }
                logical.push_str(&current[..current.len() - 1]);
                match lines.get(index) {
                    Some(next) => {
                        current = next.trim_start_matches(WHITESPACE);
                        index += 1;
                    }
                    None => break,
                }
            }

            let (raw_key, raw_value) = split_key_value(&logical);
            let key = unescape(raw_key, line_number)?;
            let value = unescape(raw_value, line_number)?;

            if let Some(&position) = positions.get(&key) {
                warn!(key = %key, line = line_number, "duplicate property key, last value wins");
                entries[position].value = value;
            } else {
                positions.insert(key.clone(), entries.len());
                entries.push(PropertyEntry { key, value });
            }
        }

        Ok(Format { entries })
    }
}

impl Parser for Format {
    fn from_reader<R: std::io::BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        std::io::Read::read_to_string(&mut reader, &mut content)?;
        Format::parse(&content)
    }
}

impl From<Format> for Vec<PropertyEntry> {
    fn from(value: Format) -> Self {
        value.entries
    }
}

/// A line continues if it ends with an odd number of backslashes.
fn ends_with_continuation(line: &str) -> bool {
    line.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

/// Splits a logical line into raw (still escaped) key and value.
///
/// The key ends at the first unescaped `=`, `:` or whitespace. Whitespace
/// around the separator, and at most one `=`/`:` after whitespace, are
/// skipped.
fn split_key_value(line: &str) -> (&str, &str) {
    let bytes = line.as_bytes();
    let mut key_end = bytes.len();
    let mut value_start = bytes.len();
    let mut has_separator = false;
    let mut preceding_backslash = false;

    for (i, &b) in bytes.iter().enumerate() {
        if !preceding_backslash {
            if b == b'=' || b == b':' {
                key_end = i;
                value_start = i + 1;
                has_separator = true;
                break;
            }
            if b == b' ' || b == b'\t' || b == 0x0c {
                key_end = i;
                value_start = i + 1;
                break;
            }
        }
        preceding_backslash = b == b'\\' && !preceding_backslash;
    }

    while value_start < bytes.len() {
        let b = bytes[value_start];
        if b != b' ' && b != b'\t' && b != 0x0c {
            if !has_separator && (b == b'=' || b == b':') {
                has_separator = true;
            } else {
                break;
            }
        }
        value_start += 1;
    }

    (&line[..key_end], &line[value_start..])
}

/// Resolves escape sequences. `\uXXXX` escapes are UTF-16 code units, so
/// surrogate pairs written as two escapes combine into one character.
fn unescape(raw: &str, line_number: usize) -> Result<String, Error> {
    let mut out = String::with_capacity(raw.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_units(&mut units, &mut out, line_number)?;
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            break;
        };
        if escaped == 'u' {
            let hex: String = chars.by_ref().take(4).collect();
            let unit = (hex.len() == 4)
                .then(|| u16::from_str_radix(&hex, 16).ok())
                .flatten()
                .ok_or_else(|| Error::parse_error(line_number, "malformed \\uxxxx encoding"))?;
            units.push(unit);
            continue;
        }
        flush_units(&mut units, &mut out, line_number)?;
        out.push(match escaped {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\x0c',
            other => other,
        });
    }

    flush_units(&mut units, &mut out, line_number)?;
    Ok(out)
}

fn flush_units(units: &mut Vec<u16>, out: &mut String, line_number: usize) -> Result<(), Error> {
    if units.is_empty() {
        return Ok(());
    }
    for decoded in char::decode_utf16(units.drain(..)) {
        let c = decoded
            .map_err(|_| Error::parse_error(line_number, "unpaired surrogate in \\u escape"))?;
        out.push(c);
    }
    Ok(())
}
