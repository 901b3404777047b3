//! uartctl CLI - Configure and monitor UART ports
//!
//! A command-line front end for the UART connection manager: list port
//! status, configure, disconnect and probe ports, or drive a long-lived
//! manager through JSON request lines.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "uartctl")]
#[command(author, version, about = "Configure and monitor UART ports")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Path to the config file (default: ~/.uartctl/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the status of every configured port
    #[command(alias = "ls")]
    List,

    /// Open a port with the given settings
    Configure {
        /// Device path of the port (e.g. /dev/ttyAMA0)
        port: String,

        /// Baud rate
        #[arg(short, long, default_value_t = 9600)]
        baud: u32,

        /// Parity: none, even or odd
        #[arg(short, long, default_value = "none")]
        parity: String,
    },

    /// Close a port
    Disconnect {
        /// Device path of the port
        port: String,
    },

    /// Open a port and check that it answers
    Test {
        /// Device path of the port
        port: String,

        /// Baud rate
        #[arg(short, long, default_value_t = 9600)]
        baud: u32,

        /// Parity: none, even or odd
        #[arg(short, long, default_value = "none")]
        parity: String,
    },

    /// Serve JSON requests from stdin, one per line
    Session,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let manager = commands::load_manager(cli.config).await?;

    let result = match cli.command {
        Commands::List => commands::list::run(&manager, cli.json),
        Commands::Configure { port, baud, parity } => {
            commands::configure::run(&manager, port, baud, parity, cli.json)
        }
        Commands::Disconnect { port } => commands::disconnect::run(&manager, port, cli.json),
        Commands::Test { port, baud, parity } => {
            commands::test::run(&manager, port, baud, parity, cli.json)
        }
        Commands::Session => commands::session::run(&manager).await,
    };

    manager.disconnect_all();
    result
}
