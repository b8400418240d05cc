//! Loading the TOML configuration and applying command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use propenum::Config;
use tracing::debug;

/// Configuration file looked up in the working directory when `--config` is
/// not given.
pub const DEFAULT_CONFIG_FILE: &str = "propenum.toml";

/// Settings that override the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct Overrides {
    /// Directory the source files are relative to
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Directory to write the generated sources to
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Package of all generated types (derived from the source directory by default)
    #[arg(long = "package", value_name = "NAME")]
    pub package_name: Option<String>,

    /// Key prefix that is stripped from field names
    #[arg(long)]
    pub prefix: Option<String>,

    /// Only generate fields for keys starting with the prefix
    #[arg(long)]
    pub prefixed_only: bool,

    /// Fully qualified interface all generated enums implement
    #[arg(long, value_name = "INTERFACE")]
    pub implement: Option<String>,

    /// Maximum javadoc line length
    #[arg(long, value_name = "N")]
    pub line_length: Option<usize>,

    /// Javadoc template for fields; %1$s is the key, %2$s the value
    #[arg(long, value_name = "TEMPLATE")]
    pub enum_javadoc: Option<String>,

    /// Regular expression field names must match
    #[arg(long, value_name = "REGEX")]
    pub field_pattern: Option<String>,

    /// Encoding of the properties files
    #[arg(long, value_name = "LABEL")]
    pub source_encoding: Option<String>,

    /// Encoding of the generated files
    #[arg(long, value_name = "LABEL")]
    pub target_encoding: Option<String>,

    /// Generate the remaining files after a failure
    #[arg(long)]
    pub continue_on_error: bool,
}

impl Overrides {
    /// Applies every override that was given to `config`.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(base_dir) = &self.base_dir {
            config.base_dir = base_dir.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if self.package_name.is_some() {
            config.package_name = self.package_name.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.prefix = prefix.clone();
        }
        if self.prefixed_only {
            config.prefixed_only = true;
        }
        if self.implement.is_some() {
            config.implement = self.implement.clone();
        }
        if let Some(line_length) = self.line_length {
            config.line_length = line_length;
        }
        if let Some(template) = &self.enum_javadoc {
            config.enum_javadoc = template.clone();
        }
        if let Some(pattern) = &self.field_pattern {
            config.field_pattern = pattern.clone();
        }
        if let Some(encoding) = &self.source_encoding {
            config.source_encoding = encoding.clone();
        }
        if let Some(encoding) = &self.target_encoding {
            config.target_encoding = encoding.clone();
        }
        if self.continue_on_error {
            config.continue_on_error = true;
        }
        config
    }
}

/// Parses a configuration file. Relative directories in it are resolved
/// against the file's own directory.
pub fn read_config_file(path: &Path) -> Result<Config, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;
    let config: Config = toml::from_str(&content)
        .map_err(|e| format!("Invalid config file '{}': {}", path.display(), e))?;
    let root = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(config.resolve_relative_to(root))
}

/// Builds the effective configuration.
///
/// An explicit `config_path` must exist. Without one, `propenum.toml` in the
/// working directory is used if present, otherwise the defaults.
pub fn load_config(config_path: Option<&Path>, overrides: &Overrides) -> Result<Config, String> {
    let config = match config_path {
        Some(path) => read_config_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            read_config_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => Config::default(),
    };
    let config = overrides.apply(config);
    debug!(?config, "effective configuration");
    Ok(config)
}
