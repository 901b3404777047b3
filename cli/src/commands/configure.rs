//! Configure command - open a port with the given settings.

use anyhow::{bail, Result};
use uartctl_core::{ConfigResponse, ConfigureRequest, SerialConnector, UartManager};

use super::print_json;

pub fn run<C: SerialConnector>(
    manager: &UartManager<C>,
    port: String,
    baud: u32,
    parity: String,
    json: bool,
) -> Result<()> {
    let request = ConfigureRequest::new(&port, baud, &parity);
    let response = ConfigResponse::configured(&port, manager.configure_request(&request));

    if json {
        print_json(&response)?;
    } else if let Some(config) = &response.config {
        println!("{}: {}", response.message, config);
    }

    if !response.success {
        bail!(response.message);
    }
    Ok(())
}
