//! Error types for the uartctl-core library.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PortId;

/// Result type alias for uartctl operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Request field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The request as a whole (missing or unreadable body).
    Request,
    Port,
    BaudRate,
    Parity,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Field::Request => "request",
            Field::Port => "port",
            Field::BaudRate => "baud rate",
            Field::Parity => "parity setting",
        };
        f.write_str(s)
    }
}

/// Errors that can occur while managing UART ports.
#[derive(Error, Debug)]
pub enum Error {
    /// A request value lies outside its allowed set. Nothing was changed.
    #[error("Invalid {field} specified: {value}")]
    Validation { field: Field, value: String },

    /// The device path is not present on the host.
    #[error("Port {port} does not exist")]
    DeviceNotFound { port: PortId },

    /// The OS or driver refused to open the device.
    #[error("Failed to configure {port}: {reason}")]
    OpenFailed { port: PortId, reason: String },

    /// The port has no open handle.
    #[error("Port {port} not connected")]
    NotConnected { port: PortId },

    /// The port's handle reports itself closed.
    #[error("Port {port} is not open")]
    ProbeFailed { port: PortId },

    /// Error reported by the serial driver on an open handle.
    #[error("Serial error: {0}")]
    Serial(#[from] serialport::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Classify this error for a transport layer.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } => ErrorKind::Validation,
            Error::DeviceNotFound { .. } => ErrorKind::DeviceNotFound,
            Error::OpenFailed { .. } => ErrorKind::OpenFailure,
            Error::NotConnected { .. } => ErrorKind::NotConnected,
            Error::ProbeFailed { .. } => ErrorKind::ProbeFailure,
            Error::Serial(_) | Error::Io(_) | Error::Json(_) | Error::Config(_) => {
                ErrorKind::Internal
            }
        }
    }

    pub(crate) fn invalid_port(port: &PortId) -> Self {
        Error::Validation {
            field: Field::Port,
            value: port.to_string(),
        }
    }
}

/// Machine-readable category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    DeviceNotFound,
    OpenFailure,
    NotConnected,
    ProbeFailure,
    Internal,
}

impl ErrorKind {
    /// Whether the caller can fix this by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ErrorKind::Validation | ErrorKind::NotConnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_port_and_field() {
        let port = PortId::from("/dev/ttyAMA1");

        let err = Error::DeviceNotFound { port: port.clone() };
        assert_eq!(err.to_string(), "Port /dev/ttyAMA1 does not exist");

        let err = Error::Validation {
            field: Field::BaudRate,
            value: "1234".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid baud rate specified: 1234");

        let err = Error::invalid_port(&PortId::from("/dev/ttyUSB9"));
        assert_eq!(err.to_string(), "Invalid port specified: /dev/ttyUSB9");
    }

    #[test]
    fn test_kind_mapping() {
        let port = PortId::from("/dev/ttyAMA0");
        assert!(Error::NotConnected { port: port.clone() }
            .kind()
            .is_client_error());
        assert!(!Error::ProbeFailed { port: port.clone() }
            .kind()
            .is_client_error());
        assert_eq!(
            Error::OpenFailed {
                port,
                reason: "busy".to_string()
            }
            .kind(),
            ErrorKind::OpenFailure
        );
        assert_eq!(
            Error::Config("bad".to_string()).kind(),
            ErrorKind::Internal
        );
    }
}
