// file: src/logging/logger.rs
// version: 1.0.0
// guid: 708192a3-b3c4-4d5e-6f70-0718293a4b52

//! Logger initialization and configuration

use crate::error::AdminError;
use crate::Result;
use tracing::Instrument;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Pick the filter directive from the CLI flags and the configured level
fn filter_directive(verbose: bool, quiet: bool, level: &str) -> String {
    if quiet {
        "error".to_string()
    } else if verbose {
        "debug".to_string()
    } else {
        level.to_string()
    }
}

/// Initialize the logging system
pub fn init_logger(verbose: bool, quiet: bool, level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter_directive(verbose, quiet, level))
        .map_err(|e| AdminError::config(format!("Invalid log level '{}': {}", level, e)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| AdminError::config(format!("Failed to initialize logger: {}", e)))?;

    Ok(())
}

/// Initialize structured JSON logging (for services)
pub fn init_json_logger(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| AdminError::config(format!("Failed to initialize JSON logger: {}", e)))?;

    Ok(())
}

/// Run an async operation inside a named span
pub async fn with_async_operation_span<F, Fut, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = R>,
{
    let span = tracing::info_span!("operation", name = operation);
    async move { f().await }.instrument(span).await
}
