//! uartctl Core Library
//!
//! Connection manager for a fixed set of UART (serial) ports on a host.
//! Provides functionality to:
//! - List the status of every known port
//! - Configure a port (validate baud rate and parity, then open the device)
//! - Disconnect a port
//! - Probe the liveness of an open port
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure business logic and data models
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations
//! - `application`: Use case services
//!
//! Transport layers (HTTP, CLI) talk to [`UartManager`] and encode the
//! envelopes from [`api`].

// Hexagonal architecture layers
pub mod domain;
pub mod ports;
pub mod adapters;
pub mod application;

pub mod api;
pub mod config;
pub mod error;

// Re-export domain types (primary API)
pub use domain::{
    BaudRate, Parity, PortConfig, PortId, PortStatus, PortsSnapshot, SerialSettings, TestDetails,
};

// Re-export other commonly used types
pub use adapters::SystemSerialConnector;
pub use api::{ConfigResponse, ConfigureRequest, TestResponse};
pub use application::UartManager;
pub use config::{Config, ConfigStore};
pub use error::{Error, ErrorKind, Field, Result};
pub use ports::{SerialConnector, SerialHandle};
