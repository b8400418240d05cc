//! Expansion of the per-field javadoc template.
//!
//! The template uses `printf`-style string conversions with two arguments,
//! the property key and the property value:
//!
//! - `%1$s` / `%2$s` reference the key / value by position,
//! - `%s` takes the next argument in order,
//! - `%S` variants upper-case the argument,
//! - `%%` is a literal percent sign and `%n` a line break.
//!
//! Templates are parsed once per run so a broken template is reported before
//! any file is generated.

use crate::error::Error;

/// Default template for enum field javadocs.
pub const DEFAULT_ENUM_JAVADOC: &str = "Key \"%1$s\" for property with value \"%2$s\".";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Argument {
    Key,
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Argument { argument: Argument, upper: bool },
}

/// A parsed javadoc template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavadocTemplate {
    segments: Vec<Segment>,
}

impl JavadocTemplate {
    /// Parses `template`.
    ///
    /// Returns [`Error::Config`] for unknown conversions, argument positions
    /// other than 1 and 2, more than two sequential `%s`, or a dangling `%`.
    pub fn parse(template: &str) -> Result<Self, Error> {
        let bytes = template.as_bytes();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut next_sequential = 0usize;
        let mut literal_start = 0usize;
        let mut i = 0usize;

        while i < bytes.len() {
            if bytes[i] != b'%' {
                i += 1;
                continue;
            }
            literal.push_str(&template[literal_start..i]);

            let mut j = i + 1;
            // Optional positional index: digits followed by '$'
            let start_digits = j;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            let position = if j > start_digits && j < bytes.len() && bytes[j] == b'$' {
                let index = template[start_digits..j]
                    .parse::<usize>()
                    .map_err(|_| template_error(template, i))?;
                j += 1; // skip '$'
                Some(index)
            } else {
                j = i + 1;
                None
            };

            let conversion = *bytes.get(j).ok_or_else(|| template_error(template, i))?;
            match (conversion, position) {
                (b'%', None) => literal.push('%'),
                (b'n', None) => literal.push('\n'),
                (b's' | b'S', _) => {
                    let index = match position {
                        Some(index) => index,
                        None => {
                            next_sequential += 1;
                            next_sequential
                        }
                    };
                    let argument = match index {
                        1 => Argument::Key,
                        2 => Argument::Value,
                        _ => return Err(template_error(template, i)),
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Argument {
                        argument,
                        upper: conversion == b'S',
                    });
                }
                _ => return Err(template_error(template, i)),
            }

            i = j + 1;
            literal_start = i;
        }

        literal.push_str(&template[literal_start..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Expands the template for one property.
    pub fn render(&self, key: &str, value: &str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Argument { argument, upper } => {
                    let text = match argument {
                        Argument::Key => key,
                        Argument::Value => value,
                    };
                    if *upper {
                        out.push_str(&text.to_uppercase());
                    } else {
                        out.push_str(text);
                    }
                }
            }
        }
        out
    }
}

impl Default for JavadocTemplate {
    fn default() -> Self {
        Self::parse(DEFAULT_ENUM_JAVADOC).expect("default javadoc template is valid")
    }
}

fn template_error(template: &str, offset: usize) -> Error {
    Error::config_error(format!(
        "invalid javadoc template {:?}: unsupported conversion at byte {}",
        template, offset
    ))
}
