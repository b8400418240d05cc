#![forbid(unsafe_code)]
//! Java enum generation from `.properties` files.
//!
//! Every key of a properties file becomes one constant of a generated Java
//! enum type. The constant keeps the original key, so code can refer to
//! messages through a typed constant instead of a string literal.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use propenum::{Config, generate};
//!
//! let config = Config::new()
//!     .with_base_dir("src/main/resources")
//!     .with_files(["com/example/messages.properties"]);
//!
//! // Writes target/generated-sources/enum/com/example/Messages.java
//! let written = generate(config)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Naming
//!
//! Keys are turned into constant names by [`naming::normalize_key`]:
//!
//! - `myKey` becomes `MY_KEY`,
//! - `com.example.key` becomes `COM_EXAMPLE_KEY`,
//! - spaces and dashes are treated like dots.
//!
//! A constant name that does not match the configured field pattern, or two
//! keys producing the same constant name, fail the generation of that type.

pub mod config;
pub mod emitter;
pub mod encoding;
pub mod error;
pub mod generator;
pub mod javadoc;
pub mod naming;
pub mod paths;
pub mod properties;
pub mod template;
pub mod tracker;
pub mod traits;
pub mod types;
pub mod validation;

use std::path::PathBuf;

// Re-export most used types for easy consumption
pub use crate::{
    config::Config,
    emitter::{Emission, EnumEmitter},
    error::Error,
    generator::{GenerationReport, Generator},
    naming::normalize_key,
    tracker::DuplicateTracker,
    types::{EnumSpec, GeneratedField, PropertyEntry},
};

/// Runs generation for `config` and returns the written files.
///
/// Collected failures (with `continue-on-error`) are returned as
/// [`Error::Batch`].
pub fn generate(config: Config) -> Result<Vec<PathBuf>, Error> {
    Generator::new(config)?.generate()?.into_result()
}
