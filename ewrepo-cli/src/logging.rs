//! Logging setup for the CLI.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::CliError;

/// Install a stderr subscriber.
///
/// `RUST_LOG` takes precedence over the configured level; `verbose` forces
/// `debug`.
pub fn init_logging(level: &str, verbose: bool) -> Result<(), CliError> {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}
