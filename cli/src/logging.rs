use anyhow::{anyhow, Context, Result};
use giftwise_core::ConfigSource;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Logs go to stderr unless `log_path` is
/// set, keeping stdout for results.
pub fn init_logging(debug: bool, log_path: Option<&Path>) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let installed = match log_path {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };
    installed.map_err(|e| anyhow!("failed to initialise logging: {e}"))?;

    if let Some(path) = log_path {
        tracing::info!("Logging initialized to: {}", path.display());
    }
    Ok(())
}

/// Records where the configuration came from. Call after [`init_logging`].
pub fn log_config_source(source: &ConfigSource) {
    match source {
        ConfigSource::Defaults => tracing::info!("Using default configuration"),
        ConfigSource::File(path) => {
            tracing::info!("Loaded configuration from {}", path.display())
        }
    }
}
