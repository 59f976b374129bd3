//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with command output on stdout.

use std::io;

use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding an `EnvFilter` directive, e.g. `sift_query=trace`.
pub const LOG_ENV: &str = "SIFT_LOG";

/// Maps the `-v` count to a default filter directive.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber.
///
/// `SIFT_LOG` wins over `-v` when it holds a valid directive.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let installed = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .without_time()
        .try_init();
    // A second install (tests, embedding) keeps the first subscriber
    if let Err(e) = installed {
        debug!(error = %e, "log subscriber already installed");
    }
}
