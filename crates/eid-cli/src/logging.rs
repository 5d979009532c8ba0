//! Console log sink.
//!
//! Lines are tagged by severity and written to stderr so stdout only carries
//! the rendered report. FATAL entries are `error!` events on
//! [`FATAL_TARGET`].

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::constants::env;

/// Target used for fatal, run-ending events.
pub const FATAL_TARGET: &str = "eid::fatal";

/// Default filter for the given verbosity flags.
pub fn default_filter(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `EID_LOG` overrides the flags.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_env(env::LOG)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, quiet)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .try_init();
}
