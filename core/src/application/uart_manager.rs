//! UART port connection management.
//!
//! Owns the fixed set of ports, their declared settings and status, and the
//! open OS handle of every connected port.

use std::collections::BTreeMap;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::adapters::SystemSerialConnector;
use crate::api::ConfigureRequest;
use crate::config::Config;
use crate::domain::{
    BaudRate, Parity, PortConfig, PortId, PortStatus, PortsSnapshot, SerialSettings, TestDetails,
};
use crate::error::{Error, Field, Result};
use crate::ports::{SerialConnector, SerialHandle};

/// Record and live handle of one port.
///
/// The only mutators are `attach`, `fail` and `detach`, so a handle is
/// present exactly when the status is `Connected`.
struct PortSlot {
    config: PortConfig,
    connection: Option<Box<dyn SerialHandle>>,
}

impl PortSlot {
    fn new() -> Self {
        Self {
            config: PortConfig::default(),
            connection: None,
        }
    }

    /// Store a freshly opened handle, closing any previous one first.
    fn attach(&mut self, port: &PortId, handle: Box<dyn SerialHandle>, settings: &SerialSettings) {
        self.release(port);
        self.connection = Some(handle);
        self.config.baud_rate = settings.baud_rate;
        self.config.parity = settings.parity;
        self.config.status = PortStatus::Connected;
    }

    /// Record a failed configure attempt.
    fn fail(&mut self, port: &PortId) {
        self.release(port);
        self.config.status = PortStatus::Error;
    }

    fn detach(&mut self, port: &PortId) {
        self.release(port);
        self.config.status = PortStatus::Disconnected;
    }

    /// Close the current handle, if any. Close errors are logged only.
    fn release(&mut self, port: &PortId) {
        if let Some(handle) = self.connection.take() {
            match handle.close() {
                Ok(()) => debug!(port = %port, "closed serial handle"),
                Err(e) => warn!(port = %port, error = %e, "error while closing serial handle"),
            }
        }
    }
}

/// Manages the connections of a fixed set of UART ports.
///
/// Every port has its own lock: operations on one port run one at a time,
/// operations on different ports never wait for each other. The set of ports
/// is fixed at construction.
pub struct UartManager<C: SerialConnector = SystemSerialConnector> {
    connector: C,
    read_timeout: Duration,
    slots: BTreeMap<PortId, Mutex<PortSlot>>,
}

impl UartManager<SystemSerialConnector> {
    /// Create a manager for the host's real devices from startup configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            SystemSerialConnector::new(),
            config.port_ids(),
            config.read_timeout(),
        ))
    }
}

impl<C: SerialConnector> UartManager<C> {
    /// Create a manager over the given ports, all starting disconnected at
    /// 9600 baud with no parity.
    pub fn new(connector: C, ports: impl IntoIterator<Item = PortId>, read_timeout: Duration) -> Self {
        let slots = ports
            .into_iter()
            .map(|port| (port, Mutex::new(PortSlot::new())))
            .collect();

        Self {
            connector,
            read_timeout,
            slots,
        }
    }

    // =========================================================================
    // Registry
    // =========================================================================

    /// The fixed set of known ports, ordered by device path.
    pub fn port_ids(&self) -> Vec<PortId> {
        self.slots.keys().cloned().collect()
    }

    /// Whether `port` belongs to the fixed set.
    pub fn is_known(&self, port: &PortId) -> bool {
        self.slots.contains_key(port)
    }

    /// Current record of a single port.
    pub fn port_config(&self, port: &PortId) -> Result<PortConfig> {
        Ok(self.slot(port)?.lock().config)
    }

    /// Snapshot of every port plus the supported baud rates and parities.
    pub fn list_status(&self) -> PortsSnapshot {
        let ports = self
            .slots
            .iter()
            .map(|(port, slot)| (port.clone(), slot.lock().config))
            .collect();
        PortsSnapshot::new(ports)
    }

    // =========================================================================
    // Connection Lifecycle
    // =========================================================================

    /// Open `port` with the requested settings.
    ///
    /// Any handle already open on the port is closed first. On failure the
    /// port is left in `Error` status with no handle.
    pub fn configure(&self, port: &PortId, baud_rate: BaudRate, parity: Parity) -> Result<PortConfig> {
        let mut slot = self.slot(port)?.lock();
        slot.release(port);

        if !self.connector.device_exists(port) {
            warn!(port = %port, "device does not exist");
            slot.fail(port);
            return Err(Error::DeviceNotFound { port: port.clone() });
        }

        let settings = SerialSettings {
            baud_rate,
            parity,
            read_timeout: self.read_timeout,
        };

        match self.connector.open(port, &settings) {
            Ok(handle) => {
                slot.attach(port, handle, &settings);
                info!(port = %port, baud = %baud_rate, parity = %parity, "port configured");
                Ok(slot.config)
            }
            Err(e) => {
                let err = match e {
                    e @ Error::OpenFailed { .. } => e,
                    other => Error::OpenFailed {
                        port: port.clone(),
                        reason: other.to_string(),
                    },
                };
                error!(port = %port, error = %err, "failed to open port");
                slot.fail(port);
                Err(err)
            }
        }
    }

    /// Validate untyped transport input, then [`configure`](Self::configure).
    ///
    /// Fields are checked in order port, baud rate, parity; the first bad one
    /// is reported and nothing is changed.
    pub fn configure_request(&self, request: &ConfigureRequest) -> Result<PortConfig> {
        if request.is_empty() {
            return Err(Error::Validation {
                field: Field::Request,
                value: "no data provided".to_string(),
            });
        }

        let port = match &request.port {
            Some(Value::String(path)) => PortId::new(path.as_str()),
            Some(other) => return Err(invalid(Field::Port, other)),
            None => return Err(missing(Field::Port)),
        };
        if !self.is_known(&port) {
            return Err(Error::invalid_port(&port));
        }

        let baud_rate = match &request.baud_rate {
            Some(value) => match value.as_u64().and_then(|r| u32::try_from(r).ok()) {
                Some(rate) => BaudRate::try_from(rate)?,
                None => return Err(invalid(Field::BaudRate, value)),
            },
            None => return Err(missing(Field::BaudRate)),
        };

        let parity = match &request.parity {
            Some(Value::String(p)) => p.parse::<Parity>()?,
            Some(other) => return Err(invalid(Field::Parity, other)),
            None => return Err(missing(Field::Parity)),
        };

        self.configure(&port, baud_rate, parity)
    }

    /// Close `port`'s handle, if any, and mark it disconnected.
    ///
    /// Always succeeds for a known port, including when it is already
    /// disconnected or the device has vanished.
    pub fn disconnect(&self, port: &PortId) -> Result<PortConfig> {
        let mut slot = self.slot(port)?.lock();
        slot.detach(port);
        info!(port = %port, "port disconnected");
        Ok(slot.config)
    }

    /// Disconnect every port. Used at shutdown so no handle outlives the process.
    pub fn disconnect_all(&self) {
        for (port, slot) in &self.slots {
            slot.lock().detach(port);
        }
        debug!(count = self.slots.len(), "all ports disconnected");
    }

    /// Probe the liveness of `port`'s handle.
    ///
    /// A handle that reports itself closed is an error, but the port's status
    /// is left as it is; a later disconnect or configure reconciles it.
    pub fn test(&self, port: &PortId) -> Result<TestDetails> {
        let slot = self.slot(port)?.lock();
        let handle = slot
            .connection
            .as_ref()
            .ok_or_else(|| Error::NotConnected { port: port.clone() })?;

        if !handle.is_open() {
            warn!(port = %port, "handle reports closed");
            return Err(Error::ProbeFailed { port: port.clone() });
        }

        let probe = handle
            .baud_rate()
            .and_then(|baudrate| Ok((baudrate, handle.parity()?)));

        match probe {
            Ok((baudrate, parity)) => {
                debug!(port = %port, baudrate, parity = %parity, "probe ok");
                Ok(TestDetails {
                    baudrate,
                    parity,
                    is_open: true,
                })
            }
            Err(e) => {
                warn!(port = %port, error = %e, "probe failed");
                Err(Error::ProbeFailed { port: port.clone() })
            }
        }
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    fn slot(&self, port: &PortId) -> Result<&Mutex<PortSlot>> {
        self.slots.get(port).ok_or_else(|| Error::invalid_port(port))
    }
}

fn missing(field: Field) -> Error {
    Error::Validation {
        field,
        value: "(missing)".to_string(),
    }
}

/// A value of the wrong JSON type.
fn invalid(field: Field, value: &Value) -> Error {
    Error::Validation {
        field,
        value: value.to_string(),
    }
}
