//! Building blocks of the `propenum` command-line tool.

pub mod config;
pub mod logger;
pub mod path_glob;

pub use config::{DEFAULT_CONFIG_FILE, Overrides, load_config, read_config_file};
pub use path_glob::expand_source_globs;
