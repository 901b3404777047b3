//! Startup configuration: which UART ports exist and how handles are opened.
//!
//! Stored in JSON format at `~/.uartctl/config.json`. Read once when the
//! process starts; port state itself is never written back.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::domain::PortId;
use crate::error::{Error, Result};

/// Configuration data stored in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Device paths of the ports this host exposes.
    #[serde(default = "default_ports")]
    pub ports: Vec<String>,

    /// Read timeout applied to every opened handle, in milliseconds.
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

fn default_ports() -> Vec<String> {
    vec![
        "/dev/ttyAMA0".to_string(),
        "/dev/ttyAMA1".to_string(),
        "/dev/ttyAMA2".to_string(),
    ]
}

fn default_read_timeout_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ports: default_ports(),
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

impl Config {
    /// The fixed port set as typed identifiers.
    pub fn port_ids(&self) -> Vec<PortId> {
        self.ports.iter().map(|p| PortId::new(p.as_str())).collect()
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Reject configurations the manager cannot be built from.
    pub fn validate(&self) -> Result<()> {
        if self.ports.is_empty() {
            return Err(Error::Config("At least one port must be configured".to_string()));
        }

        let mut seen = HashSet::new();
        for port in &self.ports {
            if port.trim().is_empty() {
                return Err(Error::Config("Port path must not be empty".to_string()));
            }
            if !seen.insert(port.as_str()) {
                return Err(Error::Config(format!("Port {} is listed twice", port)));
            }
        }

        if self.read_timeout_ms == 0 {
            return Err(Error::Config("readTimeoutMs must be greater than zero".to_string()));
        }

        Ok(())
    }
}

/// Configuration store for loading startup settings.
///
/// Reads configuration from `~/.uartctl/config.json`.
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a new config store with the default path.
    ///
    /// Default path: `~/.uartctl/config.json`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

        let config_path = home.join(".uartctl").join("config.json");

        Ok(Self { config_path })
    }

    /// Create a config store with a custom path.
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Path to the configuration file.
    pub fn path(&self) -> &std::path::Path {
        &self.config_path
    }

    /// Load configuration from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub async fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_store() -> (ConfigStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("uartctl").join("config.json");
        (ConfigStore::with_path(path), dir)
    }

    #[tokio::test]
    async fn test_load_nonexistent() {
        let (store, _dir) = test_store();
        let config = store.load().await.unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.port_ids().len(), 3);
        assert_eq!(config.read_timeout(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_load_written_file() {
        let (store, _dir) = test_store();

        let config = Config {
            ports: vec!["/dev/ttyS0".to_string(), "/dev/ttyUSB0".to_string()],
            read_timeout_ms: 250,
        };
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.port_ids()[1], PortId::from("/dev/ttyUSB0"));
    }

    #[tokio::test]
    async fn test_partial_file_uses_defaults() {
        let (store, _dir) = test_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), r#"{"readTimeoutMs": 50}"#).unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.ports, default_ports());
        assert_eq!(loaded.read_timeout_ms, 50);
    }

    #[tokio::test]
    async fn test_invalid_file_is_config_error() {
        let (store, _dir) = test_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "not json").unwrap();

        assert!(matches!(store.load().await, Err(Error::Config(_))));

        std::fs::write(store.path(), r#"{"ports": []}"#).unwrap();
        assert!(matches!(store.load().await, Err(Error::Config(_))));
    }

    #[test]
    fn test_validate() {
        let empty = Config {
            ports: vec![],
            ..Config::default()
        };
        assert!(empty.validate().is_err());

        let duplicate = Config {
            ports: vec!["/dev/ttyS0".to_string(), "/dev/ttyS0".to_string()],
            ..Config::default()
        };
        assert!(duplicate.validate().is_err());

        let zero_timeout = Config {
            read_timeout_ms: 0,
            ..Config::default()
        };
        assert!(zero_timeout.validate().is_err());

        assert!(Config::default().validate().is_ok());
    }
}
