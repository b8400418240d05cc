//! All error types for the propenum crate.
//!
//! These are returned from all fallible operations (parsing, key validation,
//! emission, file generation).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "the key \"{key}\" is invalid: the resulting enum field `{identifier}` must match the pattern {pattern}"
    )]
    InvalidKey {
        key: String,
        identifier: String,
        pattern: String,
    },

    #[error(
        "duplicate enum field `{identifier}` in {type_name}: both \"{key}\" and \"{previous_key}\" result in it"
    )]
    DuplicateField {
        type_name: String,
        identifier: String,
        key: String,
        previous_key: String,
    },

    #[error("unsupported encoding `{0}`")]
    UnsupportedEncoding(String),

    #[error("source file {} could not be found", .0.display())]
    MissingSource(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("source file {} is not located below the base directory {}", .path.display(), .base.display())]
    InvalidSourcePath { path: PathBuf, base: PathBuf },

    #[error("invalid enum field pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error(
        "source file {} would overwrite {}, already generated from {}",
        .source_file.display(),
        .output.display(),
        .previous_source.display()
    )]
    OutputConflict {
        output: PathBuf,
        source_file: PathBuf,
        previous_source: PathBuf,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{} source file(s) failed", .0.len())]
    Batch(Vec<(PathBuf, Error)>),
}

impl Error {
    /// Creates a new invalid key error.
    pub fn invalid_key(
        key: impl Into<String>,
        identifier: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        Error::InvalidKey {
            key: key.into(),
            identifier: identifier.into(),
            pattern: pattern.into(),
        }
    }

    /// Creates a new duplicate field error.
    pub fn duplicate_field(
        type_name: impl Into<String>,
        identifier: impl Into<String>,
        key: impl Into<String>,
        previous_key: impl Into<String>,
    ) -> Self {
        Error::DuplicateField {
            type_name: type_name.into(),
            identifier: identifier.into(),
            key: key.into(),
            previous_key: previous_key.into(),
        }
    }

    /// Creates a new parse error for a 1-based line number.
    pub fn parse_error(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }

    /// Creates a new configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }
}
