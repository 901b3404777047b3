//! List command - show every configured port.

use anyhow::Result;
use uartctl_core::{SerialConnector, UartManager};

use super::print_json;

pub fn run<C: SerialConnector>(manager: &UartManager<C>, json: bool) -> Result<()> {
    let snapshot = manager.list_status();

    if json {
        return print_json(&snapshot);
    }

    // Table header
    println!("{:<16} {:<8} {:<8} STATUS", "PORT", "BAUD", "PARITY");
    println!("{}", "-".repeat(48));

    for (port, config) in &snapshot.ports {
        println!(
            "{:<16} {:<8} {:<8} {}",
            port.as_str(),
            config.baud_rate.get(),
            config.parity.as_str(),
            config.status
        );
    }

    let rates: Vec<String> = snapshot
        .available_baud_rates
        .iter()
        .map(|r| r.to_string())
        .collect();
    let parities: Vec<&str> = snapshot.available_parity.iter().map(|p| p.as_str()).collect();

    println!("\nBaud rates: {}", rates.join(", "));
    println!("Parity:     {}", parities.join(", "));
    Ok(())
}
