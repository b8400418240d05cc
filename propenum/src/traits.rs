//! Traits for reading source files in propenum.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use encoding_rs::Encoding;
use encoding_rs_io::DecodeReaderBytesBuilder;

use crate::error::Error;

/// A trait for parsing one source file.
///
/// # Example
///
/// ```rust,no_run
/// use propenum::traits::Parser;
/// let format = propenum::properties::Format::read_from_with_encoding(
///     "messages.properties",
///     encoding_rs::WINDOWS_1252,
/// )?;
/// println!("{} entries", format.entries.len());
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader yielding UTF-8 text.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path, decoding `encoding`.
    ///
    /// A byte order mark at the start of the file takes precedence over
    /// `encoding`.
    fn read_from_with_encoding<P: AsRef<Path>>(
        path: P,
        encoding: &'static Encoding,
    ) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let decoder = DecodeReaderBytesBuilder::new()
            .encoding(Some(encoding))
            .bom_override(true)
            .strip_bom(true)
            .build(file);
        Self::from_reader(BufReader::new(decoder))
    }
}
