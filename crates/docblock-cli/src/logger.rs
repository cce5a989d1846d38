//! Logging setup for the docblock CLI.
//!
//! Log lines go to stderr so the preface and summary boxes on stdout stay
//! readable when piped.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crates whose events are shown
const CRATES: &[&str] = &["docblock", "docblock_core", "docblock_cli"];

/// Build the filter for the given verbosity.
///
/// `verbose` wins over `quiet`; without either flag `RUST_LOG` is honored,
/// falling back to info.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    let directives = |level: &str| {
        CRATES
            .iter()
            .map(|c| format!("{c}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    };

    if verbose {
        EnvFilter::new(directives("debug"))
    } else if quiet {
        EnvFilter::new(directives("error"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives("info")))
    }
}

/// Initialize the tracing subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && std::env::var_os("NO_COLOR").is_none())
        .compact();

    tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .init();
}
