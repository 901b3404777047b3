//! Serial device port (interface).

use crate::domain::{Parity, PortId, SerialSettings};
use crate::error::Result;

/// Port for opening serial devices.
///
/// This trait defines how the manager reaches the host's UART devices.
/// Implementations handle the OS specifics; tests inject in-memory fakes.
pub trait SerialConnector: Send + Sync {
    /// Whether the device path is present on the host.
    fn device_exists(&self, port: &PortId) -> bool;

    /// Open the device with the given settings.
    ///
    /// Framing is eight data bits, one stop bit and no flow control.
    fn open(&self, port: &PortId, settings: &SerialSettings) -> Result<Box<dyn SerialHandle>>;
}

/// An open OS handle to a serial device.
pub trait SerialHandle: Send {
    /// Liveness flag. `false` once the device stopped answering.
    fn is_open(&self) -> bool;

    /// Baud rate the driver reports for this handle.
    fn baud_rate(&self) -> Result<u32>;

    /// Parity the driver reports for this handle.
    fn parity(&self) -> Result<Parity>;

    /// Release the handle. The OS handle is gone even when this returns an error.
    fn close(self: Box<Self>) -> Result<()>;
}
