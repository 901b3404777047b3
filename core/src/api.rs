//! JSON contract between the manager and a transport layer.
//!
//! Request bodies arrive untyped and are validated by
//! [`UartManager::configure_request`](crate::UartManager::configure_request).
//! Every operation result is turned into one of the envelopes below; the
//! transport only picks a status code from [`ErrorKind`] and encodes them.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{PortConfig, TestDetails};
use crate::error::{Error, ErrorKind, Result};

/// Body of a configure request.
///
/// Fields are kept as raw JSON so a missing or mistyped value is reported as
/// a validation error naming the field instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigureRequest {
    #[serde(default)]
    pub port: Option<Value>,
    #[serde(default)]
    pub baud_rate: Option<Value>,
    #[serde(default)]
    pub parity: Option<Value>,
}

impl ConfigureRequest {
    /// A fully populated request.
    pub fn new(port: &str, baud_rate: u32, parity: &str) -> Self {
        Self {
            port: Some(Value::from(port)),
            baud_rate: Some(Value::from(baud_rate)),
            parity: Some(Value::from(parity)),
        }
    }

    /// The port as given, if it is a string.
    pub fn port_str(&self) -> Option<&str> {
        self.port.as_ref().and_then(Value::as_str)
    }

    /// True when no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.port.is_none() && self.baud_rate.is_none() && self.parity.is_none()
    }
}

/// Reply to configure and disconnect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<PortConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl ConfigResponse {
    /// Envelope for the outcome of a configure call.
    pub fn configured(port: impl Display, result: Result<PortConfig>) -> Self {
        match result {
            Ok(config) => Self::ok(format!("Port {} configured successfully", port), config),
            Err(e) => Self::failed(&e),
        }
    }

    /// Envelope for the outcome of a disconnect call.
    pub fn disconnected(port: impl Display, result: Result<PortConfig>) -> Self {
        match result {
            Ok(config) => Self::ok(format!("Port {} disconnected", port), config),
            Err(e) => Self::failed(&e),
        }
    }

    fn ok(message: String, config: PortConfig) -> Self {
        Self {
            success: true,
            message,
            config: Some(config),
            error: None,
        }
    }

    /// Envelope for an error raised before any operation ran.
    pub fn failed(error: &Error) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            config: None,
            error: Some(error.kind()),
        }
    }
}

/// Reply to a liveness probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<TestDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl TestResponse {
    pub fn tested(port: impl Display, result: Result<TestDetails>) -> Self {
        match result {
            Ok(details) => Self {
                success: true,
                message: format!("Port {} is active and ready", port),
                details: Some(details),
                error: None,
            },
            Err(e) => Self {
                success: false,
                message: e.to_string(),
                details: None,
                error: Some(e.kind()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BaudRate, Parity, PortId, PortStatus};
    use serde_json::json;

    #[test]
    fn test_configure_request_decoding() {
        let request: ConfigureRequest = serde_json::from_value(json!({
            "port": "/dev/ttyAMA0",
            "baud_rate": 115200,
            "parity": "even"
        }))
        .unwrap();
        assert_eq!(request.port_str(), Some("/dev/ttyAMA0"));
        assert_eq!(request, ConfigureRequest::new("/dev/ttyAMA0", 115200, "even"));
        assert!(!request.is_empty());

        // Mistyped values still decode; the manager names the bad field.
        let mistyped: ConfigureRequest = serde_json::from_value(json!({
            "port": 7,
            "baud_rate": "9600",
            "parity": 1
        }))
        .unwrap();
        assert_eq!(mistyped.port_str(), None);
        assert_eq!(mistyped.baud_rate, Some(json!("9600")));

        let empty: ConfigureRequest = serde_json::from_value(json!({})).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_configured_envelope() {
        let config = PortConfig {
            baud_rate: BaudRate::try_from(115200).unwrap(),
            parity: Parity::Even,
            status: PortStatus::Connected,
        };
        let response = ConfigResponse::configured("/dev/ttyAMA0", Ok(config));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "success": true,
                "message": "Port /dev/ttyAMA0 configured successfully",
                "config": {"baud_rate": 115200, "parity": "even", "status": "connected"}
            })
        );
    }

    #[test]
    fn test_failure_envelope_has_no_config() {
        let port = PortId::from("/dev/ttyAMA1");
        let response =
            ConfigResponse::configured(&port, Err(Error::DeviceNotFound { port: port.clone() }));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "Port /dev/ttyAMA1 does not exist");
        assert_eq!(value["error"], "device_not_found");
        assert!(value.get("config").is_none());
    }

    #[test]
    fn test_tested_envelope() {
        let details = TestDetails {
            baudrate: 9600,
            parity: Parity::None,
            is_open: true,
        };
        let response = TestResponse::tested("/dev/ttyAMA2", Ok(details));
        assert_eq!(response.message, "Port /dev/ttyAMA2 is active and ready");
        assert_eq!(
            serde_json::to_value(&response).unwrap()["details"],
            json!({"baudrate": 9600, "parity": "none", "is_open": true})
        );

        let port = PortId::from("/dev/ttyAMA2");
        let response = TestResponse::tested(&port, Err(Error::NotConnected { port: port.clone() }));
        assert!(!response.success);
        assert_eq!(response.error, Some(ErrorKind::NotConnected));
    }
}
