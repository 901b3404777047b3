//! Subcommand implementations.

pub mod configure;
pub mod disconnect;
pub mod list;
pub mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;
use uartctl_core::{ConfigStore, ErrorKind, UartManager};

/// Build the process-wide manager from the config file.
pub async fn load_manager(config_path: Option<PathBuf>) -> Result<UartManager> {
    let store = match config_path {
        Some(path) => ConfigStore::with_path(path),
        None => ConfigStore::new()?,
    };

    let config = store
        .load()
        .await
        .with_context(|| format!("loading {}", store.path().display()))?;
    debug!(ports = ?config.ports, timeout_ms = config.read_timeout_ms, "config loaded");

    Ok(UartManager::from_config(&config)?)
}

/// HTTP status the JSON API answers a result with.
pub fn http_status(error: Option<ErrorKind>) -> u16 {
    match error {
        None => 200,
        Some(kind) if kind.is_client_error() => 400,
        Some(_) => 500,
    }
}

/// Print an envelope as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
