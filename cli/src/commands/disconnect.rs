//! Disconnect command - close a port.

use anyhow::{bail, Result};
use uartctl_core::{ConfigResponse, PortId, SerialConnector, UartManager};

use super::print_json;

pub fn run<C: SerialConnector>(manager: &UartManager<C>, port: String, json: bool) -> Result<()> {
    let port = PortId::from(port);
    let response = ConfigResponse::disconnected(&port, manager.disconnect(&port));

    if json {
        print_json(&response)?;
    } else if response.success {
        println!("{}", response.message);
    }

    if !response.success {
        bail!(response.message);
    }
    Ok(())
}
