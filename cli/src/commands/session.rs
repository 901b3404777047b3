//! Session command - JSON request lines on stdin, one reply line per request.
//!
//! Keeps one manager alive for the whole session so ports stay open between
//! requests. Request lines mirror the HTTP API:
//!
//! ```text
//! {"op":"ports"}
//! {"op":"configure","port":"/dev/ttyAMA0","baud_rate":115200,"parity":"even"}
//! {"op":"disconnect","port":"/dev/ttyAMA0"}
//! {"op":"test","port":"/dev/ttyAMA0"}
//! ```
//!
//! Each reply carries the status code the HTTP API would answer with.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};
use uartctl_core::{
    ConfigResponse, ConfigureRequest, Error, Field, PortId, SerialConnector, TestResponse,
    UartManager,
};

use super::http_status;

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Request {
    Ports,
    Configure(ConfigureRequest),
    Disconnect { port: String },
    Test { port: String },
}

#[derive(Serialize)]
struct Reply<T> {
    status: u16,
    #[serde(flatten)]
    body: T,
}

pub async fn run<C: SerialConnector>(manager: &UartManager<C>) -> Result<()> {
    let mut reader = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut buf = Vec::new();
    let mut served = 0usize;

    info!(ports = manager.port_ids().len(), "session started");

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let Some(mut reply) = handle_bytes(manager, &buf)? else {
            continue;
        };
        reply.push('\n');
        stdout.write_all(reply.as_bytes()).await?;
        stdout.flush().await?;
        served += 1;
    }

    info!(requests = served, "session ended");
    Ok(())
}

/// Serve one raw input line. Blank lines get no reply.
///
/// A line that is not valid UTF-8 is answered like any other malformed
/// request and the session carries on.
pub fn handle_bytes<C: SerialConnector>(
    manager: &UartManager<C>,
    raw: &[u8],
) -> Result<Option<String>> {
    let line = match std::str::from_utf8(raw) {
        Ok(line) => line.trim(),
        Err(e) => {
            debug!(error = %e, "request line is not valid UTF-8");
            return malformed(e).map(Some);
        }
    };

    if line.is_empty() {
        return Ok(None);
    }
    handle_line(manager, line).map(Some)
}

/// Serve one request line and return the encoded reply.
pub fn handle_line<C: SerialConnector>(manager: &UartManager<C>, line: &str) -> Result<String> {
    let request = match serde_json::from_str::<Request>(line) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "malformed request line");
            return malformed(e);
        }
    };

    match request {
        Request::Ports => Ok(serde_json::to_string(&Reply {
            status: http_status(None),
            body: manager.list_status(),
        })?),
        Request::Configure(body) => {
            let port = body.port_str().unwrap_or_default().to_string();
            let response = ConfigResponse::configured(port, manager.configure_request(&body));
            encode(response, |r| r.error)
        }
        Request::Disconnect { port } => {
            let port = PortId::from(port);
            let response = ConfigResponse::disconnected(&port, manager.disconnect(&port));
            encode(response, |r| r.error)
        }
        Request::Test { port } => {
            let port = PortId::from(port);
            let response = TestResponse::tested(&port, manager.test(&port));
            encode(response, |r| r.error)
        }
    }
}

fn malformed(reason: impl std::fmt::Display) -> Result<String> {
    let error = Error::Validation {
        field: Field::Request,
        value: reason.to_string(),
    };
    encode(ConfigResponse::failed(&error), |r| r.error)
}

fn encode<T: Serialize>(
    body: T,
    error: impl FnOnce(&T) -> Option<uartctl_core::ErrorKind>,
) -> Result<String> {
    let status = http_status(error(&body));
    Ok(serde_json::to_string(&Reply { status, body })?)
}
