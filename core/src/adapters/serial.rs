//! Serial device adapter backed by the `serialport` crate.

use std::io::Write;
use std::path::Path;

use serialport::{DataBits, FlowControl, SerialPort, StopBits};
use tracing::debug;

use crate::domain::{Parity, PortId, SerialSettings};
use crate::error::{Error, Result};
use crate::ports::{SerialConnector, SerialHandle};

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert our Parity enum to serialport crate's Parity type
fn to_serialport_parity(p: Parity) -> serialport::Parity {
    match p {
        Parity::None => serialport::Parity::None,
        Parity::Even => serialport::Parity::Even,
        Parity::Odd => serialport::Parity::Odd,
    }
}

/// Convert serialport crate's Parity type back to ours
fn from_serialport_parity(p: serialport::Parity) -> Parity {
    match p {
        serialport::Parity::None => Parity::None,
        serialport::Parity::Even => Parity::Even,
        serialport::Parity::Odd => Parity::Odd,
    }
}

// ============================================================================
// Connector
// ============================================================================

/// Opens real UART devices on the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSerialConnector;

impl SystemSerialConnector {
    pub fn new() -> Self {
        Self
    }
}

impl SerialConnector for SystemSerialConnector {
    fn device_exists(&self, port: &PortId) -> bool {
        Path::new(port.as_str()).exists()
    }

    fn open(&self, port: &PortId, settings: &SerialSettings) -> Result<Box<dyn SerialHandle>> {
        debug!(
            port = %port,
            baud = %settings.baud_rate,
            parity = %settings.parity,
            "opening serial device"
        );

        let serial = serialport::new(port.as_str(), settings.baud_rate.get())
            .parity(to_serialport_parity(settings.parity))
            .stop_bits(StopBits::One)
            .data_bits(DataBits::Eight)
            .flow_control(FlowControl::None)
            .timeout(settings.read_timeout)
            .open()
            .map_err(|e| Error::OpenFailed {
                port: port.clone(),
                reason: e.to_string(),
            })?;

        Ok(Box::new(SystemSerialHandle { port: serial }))
    }
}

// ============================================================================
// Handle
// ============================================================================

/// An open UART device.
pub struct SystemSerialHandle {
    port: Box<dyn SerialPort>,
}

impl SerialHandle for SystemSerialHandle {
    /// A handle is live while the driver still answers a settings query.
    /// Once the device is unplugged the query fails.
    fn is_open(&self) -> bool {
        self.port.baud_rate().is_ok()
    }

    fn baud_rate(&self) -> Result<u32> {
        Ok(self.port.baud_rate()?)
    }

    fn parity(&self) -> Result<Parity> {
        Ok(from_serialport_parity(self.port.parity()?))
    }

    fn close(mut self: Box<Self>) -> Result<()> {
        // Dropping `self` releases the descriptor whether or not the flush succeeds.
        self.port.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_parity_conversion() {
        for p in Parity::ALL {
            assert_eq!(from_serialport_parity(to_serialport_parity(p)), p);
        }
        assert!(matches!(
            to_serialport_parity(Parity::Even),
            serialport::Parity::Even
        ));
    }

    #[test]
    fn test_missing_device() {
        let connector = SystemSerialConnector::new();
        let port = PortId::from("/dev/uartctl-test-does-not-exist");
        assert!(!connector.device_exists(&port));

        let settings = SerialSettings {
            baud_rate: Default::default(),
            parity: Parity::None,
            read_timeout: Duration::from_millis(100),
        };
        let result = connector.open(&port, &settings);
        assert!(matches!(result, Err(Error::OpenFailed { .. })));
    }
}
