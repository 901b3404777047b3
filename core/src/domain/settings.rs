//! Line settings a UART port can be configured with.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Field};

// ============================================================================
// BaudRate
// ============================================================================

/// A baud rate from the supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BaudRate(u32);

impl BaudRate {
    /// Every rate a port may be configured with, ascending.
    pub const SUPPORTED: [u32; 8] = [9600, 19200, 38400, 57600, 115200, 230400, 460800, 921600];

    /// The rate every port starts with.
    pub const DEFAULT: BaudRate = BaudRate(9600);

    /// The rate in bits per second.
    pub fn get(self) -> u32 {
        self.0
    }

    /// All supported rates as typed values.
    pub fn all() -> impl Iterator<Item = BaudRate> {
        Self::SUPPORTED.into_iter().map(BaudRate)
    }
}

impl Default for BaudRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for BaudRate {
    type Error = Error;

    fn try_from(rate: u32) -> Result<Self, Self::Error> {
        if Self::SUPPORTED.contains(&rate) {
            Ok(BaudRate(rate))
        } else {
            Err(Error::Validation {
                field: Field::BaudRate,
                value: rate.to_string(),
            })
        }
    }
}

impl From<BaudRate> for u32 {
    fn from(rate: BaudRate) -> Self {
        rate.0
    }
}

impl std::fmt::Display for BaudRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Parity
// ============================================================================

/// Parity bit setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    #[default]
    None,
    Even,
    Odd,
}

impl Parity {
    /// All available parity settings.
    pub const ALL: [Parity; 3] = [Parity::None, Parity::Even, Parity::Odd];

    /// Wire name of this setting.
    pub fn as_str(&self) -> &'static str {
        match self {
            Parity::None => "none",
            Parity::Even => "even",
            Parity::Odd => "odd",
        }
    }
}

impl FromStr for Parity {
    type Err = Error;

    /// Only the exact lowercase names are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parity::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| Error::Validation {
                field: Field::Parity,
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for Parity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SerialSettings
// ============================================================================

/// Parameters a connector opens a device with.
///
/// Framing is always eight data bits and one stop bit, with no software or
/// hardware flow control. Only the fields below vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialSettings {
    pub baud_rate: BaudRate,
    pub parity: Parity,
    /// Upper bound on any blocking read against the open handle.
    pub read_timeout: Duration,
}
