//! Logging setup for the propenum CLI.
//!
//! Log records go to stderr through a compact `tracing-subscriber` formatter,
//! so generated source printed by `preview` and `inspect` stays clean on
//! stdout.
//!
//! The level is chosen in this order:
//! 1. `--verbose`: debug for the propenum crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`
//! 4. info for the propenum crates

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "propenum=debug,propenum_cli=debug";
const QUIET_FILTER: &str = "propenum=error,propenum_cli=error";
const DEFAULT_FILTER: &str = "propenum=info,propenum_cli=info";

/// Builds the filter for the given flags. `verbose` wins over `quiet`.
pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Installs the global subscriber. Call once, before anything logs.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && std::env::var_os("NO_COLOR").is_none())
        .with_writer(std::io::stderr)
        .compact();

    // A second initialization (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}
