//! Generation settings.
//!
//! A [`Config`] describes one generation run. It is plain data: it can be
//! deserialized (the CLI reads it from TOML with kebab-case keys), built with
//! the `with_*` methods, or filled in directly. It is only read after
//! [`Config::validate`] has accepted it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::template::DEFAULT_ENUM_JAVADOC;
use crate::validation::DEFAULT_FIELD_PATTERN;

pub const DEFAULT_BASE_DIR: &str = "src/main/resources";
pub const DEFAULT_OUTPUT_DIR: &str = "target/generated-sources/enum";
pub const DEFAULT_LINE_LENGTH: usize = 80;
pub const DEFAULT_SOURCE_ENCODING: &str = "ISO-8859-1";
pub const DEFAULT_TARGET_ENCODING: &str = "UTF-8";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Directory the source files are relative to; also the root of package
    /// derivation.
    pub base_dir: PathBuf,
    /// Source files to process, relative to `base_dir`.
    pub files: Vec<String>,
    /// Directory to generate the enum sources in.
    pub output_dir: PathBuf,
    /// Package of all generated types. Derived from each file's directory
    /// below `base_dir` when unset.
    pub package_name: Option<String>,
    /// Key prefix skipped when building field names (`prefix.` is stripped).
    pub prefix: String,
    /// Only keep keys starting with `prefix`.
    pub prefixed_only: bool,
    /// Fully qualified name of an interface all generated enums implement.
    pub implement: Option<String>,
    /// Maximum length of generated javadoc lines.
    pub line_length: usize,
    /// Javadoc template for enum constants; `%1$s` is the key and `%2$s` the
    /// value.
    pub enum_javadoc: String,
    /// Regular expression generated field names must match.
    pub field_pattern: String,
    pub source_encoding: String,
    pub target_encoding: String,
    /// Keep generating the remaining files after a failure and report all
    /// failures at the end.
    pub continue_on_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            files: Vec::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            package_name: None,
            prefix: String::new(),
            prefixed_only: false,
            implement: None,
            line_length: DEFAULT_LINE_LENGTH,
            enum_javadoc: DEFAULT_ENUM_JAVADOC.to_string(),
            field_pattern: DEFAULT_FIELD_PATTERN.to_string(),
            source_encoding: DEFAULT_SOURCE_ENCODING.to_string(),
            target_encoding: DEFAULT_TARGET_ENCODING.to_string(),
            continue_on_error: false,
        }
    }
}

impl Config {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_package_name(mut self, package_name: Option<String>) -> Self {
        self.package_name = package_name;
        self
    }

    /// Sets the key prefix and whether keys without it are dropped.
    pub fn with_prefix(mut self, prefix: impl Into<String>, prefixed_only: bool) -> Self {
        self.prefix = prefix.into();
        self.prefixed_only = prefixed_only;
        self
    }

    pub fn with_interface(mut self, implement: Option<String>) -> Self {
        self.implement = implement;
        self
    }

    pub fn with_line_length(mut self, line_length: usize) -> Self {
        self.line_length = line_length;
        self
    }

    pub fn with_enum_javadoc(mut self, enum_javadoc: impl Into<String>) -> Self {
        self.enum_javadoc = enum_javadoc.into();
        self
    }

    pub fn with_field_pattern(mut self, field_pattern: impl Into<String>) -> Self {
        self.field_pattern = field_pattern.into();
        self
    }

    pub fn with_encodings(
        mut self,
        source_encoding: impl Into<String>,
        target_encoding: impl Into<String>,
    ) -> Self {
        self.source_encoding = source_encoding.into();
        self.target_encoding = target_encoding.into();
        self
    }

    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// Makes relative `base_dir` and `output_dir` relative to `root`.
    pub fn resolve_relative_to(mut self, root: &Path) -> Self {
        if self.base_dir.is_relative() {
            self.base_dir = root.join(&self.base_dir);
        }
        if self.output_dir.is_relative() {
            self.output_dir = root.join(&self.output_dir);
        }
        self
    }

    /// Checks settings that do not depend on the file system.
    ///
    /// Field pattern, javadoc template and encodings are checked when the
    /// generator compiles them.
    pub fn validate(&self) -> Result<(), Error> {
        if self.line_length == 0 {
            return Err(Error::config_error("line-length must be greater than 0"));
        }
        if self.prefixed_only && self.prefix.is_empty() {
            return Err(Error::config_error(
                "prefixed-only requires a non-empty prefix",
            ));
        }
        if let Some(package) = &self.package_name {
            if package.split('.').any(str::is_empty) && !package.is_empty() {
                return Err(Error::config_error(format!(
                    "package-name `{}` contains an empty segment",
                    package
                )));
            }
        }
        if self.implement.as_deref().is_some_and(|i| i.trim().is_empty()) {
            return Err(Error::config_error("implement must not be blank"));
        }
        Ok(())
    }
}
