//! Example: Open every configured port at 9600/none, probe it and close it again.

use uartctl_core::{BaudRate, ConfigStore, Parity, UartManager};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = match ConfigStore::new() {
        Ok(store) => match store.load().await {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                return;
            }
        },
        Err(e) => {
            eprintln!("Error locating config: {}", e);
            return;
        }
    };

    let manager = match UartManager::from_config(&config) {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("Error creating manager: {}", e);
            return;
        }
    };

    println!("{:<16} {:<14} {}", "PORT", "STATUS", "DETAILS");
    println!("{}", "-".repeat(60));

    for port in manager.port_ids() {
        let details = match manager.configure(&port, BaudRate::DEFAULT, Parity::None) {
            Ok(_) => match manager.test(&port) {
                Ok(d) => format!("{} baud, {} parity", d.baudrate, d.parity),
                Err(e) => e.to_string(),
            },
            Err(e) => e.to_string(),
        };

        let status = manager
            .port_config(&port)
            .map(|c| c.status.to_string())
            .unwrap_or_default();

        println!("{:<16} {:<14} {}", port, status, details);
    }

    manager.disconnect_all();
    println!("\nTotal: {} ports", manager.port_ids().len());
}
