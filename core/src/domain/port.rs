//! Port identity and state models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{BaudRate, Parity};

// ============================================================================
// PortId
// ============================================================================

/// Identifier of a UART port: the device path it lives at (e.g. `/dev/ttyAMA0`).
///
/// Any string can be wrapped. Whether it names a known port is decided by the
/// manager that owns the fixed set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortId(String);

impl PortId {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The device path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PortId {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for PortId {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl std::fmt::Display for PortId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// PortStatus
// ============================================================================

/// Connection status of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PortStatus {
    /// No handle is open.
    #[default]
    Disconnected,
    /// A handle is open with the recorded settings.
    Connected,
    /// The last configure attempt failed; no handle is open.
    Error,
}

impl std::fmt::Display for PortStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PortStatus::Disconnected => "disconnected",
            PortStatus::Connected => "connected",
            PortStatus::Error => "error",
        };
        f.write_str(s)
    }
}

// ============================================================================
// PortConfig
// ============================================================================

/// Declared configuration and current status of one port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PortConfig {
    pub baud_rate: BaudRate,
    pub parity: Parity,
    pub status: PortStatus,
}

impl PortConfig {
    pub fn is_connected(&self) -> bool {
        self.status == PortStatus::Connected
    }
}

impl std::fmt::Display for PortConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} baud, {} parity ({})", self.baud_rate, self.parity, self.status)
    }
}

// ============================================================================
// Operation results
// ============================================================================

/// What a liveness probe saw on an open handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestDetails {
    /// Baud rate the OS reports for the handle.
    pub baudrate: u32,
    /// Parity the OS reports for the handle.
    pub parity: Parity,
    pub is_open: bool,
}

/// Status of every known port plus the values they can be configured with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortsSnapshot {
    pub ports: BTreeMap<PortId, PortConfig>,
    pub available_baud_rates: Vec<u32>,
    pub available_parity: Vec<Parity>,
}

impl PortsSnapshot {
    /// Build a snapshot around the given port records.
    pub fn new(ports: BTreeMap<PortId, PortConfig>) -> Self {
        Self {
            ports,
            available_baud_rates: BaudRate::SUPPORTED.to_vec(),
            available_parity: Parity::ALL.to_vec(),
        }
    }
}
