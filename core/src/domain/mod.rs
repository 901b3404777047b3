//! Domain layer - Pure business logic and data models.
//!
//! This module contains domain entities that represent core business concepts.
//! These types have no I/O dependencies and can be tested in isolation.

mod port;
mod settings;

// Re-export all domain types
pub use port::{PortConfig, PortId, PortStatus, PortsSnapshot, TestDetails};
pub use settings::{BaudRate, Parity, SerialSettings};
