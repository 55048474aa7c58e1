//! Structured logging setup.
//!
//! Installs a `tracing` subscriber writing to stderr, so command output on
//! stdout stays clean for scripts. `RUST_LOG` takes precedence over the
//! configured `[logging].level`.

use anyhow::{anyhow, Result};
use std::env;
use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the filter directive is malformed or a global
/// subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let directive = env::var("RUST_LOG").unwrap_or_else(|_| config.level.clone());
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| anyhow!("invalid log filter '{}': {}", directive, e))?
        .add_directive("sqlx=warn".parse()?);

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .try_init(),
    }
    .map_err(|e| anyhow!("failed to install log subscriber: {}", e))
}
