//! HTTP transport to the UI service.
//!
//! Every report is one short-lived `POST /api/input` request with a JSON
//! body. The forwarder keeps no connection state: the UI service restarts
//! independently of the bridge, and a fresh connection per action is cheap
//! at human input rates.
//!
//! The whole request (connect, write, status line) runs under one deadline.
//! Anything late, refused, or answered with an error status comes back as a
//! [`ForwardError`] and the caller drops that report; there is no retry and
//! no queue, because the hardware keeps emitting live state and stale
//! actions would desynchronize it from the consumer.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use bridge_core::InputReport;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time;
use tracing::debug;

use crate::application::pump::ActionSink;

/// Request path the UI service accepts input reports on.
const INPUT_ENDPOINT: &str = "/api/input";

/// Errors that can occur while forwarding one report.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// TCP connection to the UI service failed.
    #[error("failed to connect to UI service at {addr}: {source}")]
    ConnectFailed {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// An I/O error occurred on the established connection.
    #[error("request I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The request did not complete within the configured deadline.
    #[error("request timed out after {0:?}")]
    TimedOut(Duration),
    /// The service answered with an error status.
    #[error("UI service answered with status {0}")]
    ErrorStatus(u16),
    /// The status line could not be parsed.
    #[error("malformed response: {0:?}")]
    MalformedResponse(String),
    /// The report could not be serialized.
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Posts reports to the UI service, one request per report.
pub struct HttpForwarder {
    server_addr: SocketAddr,
    request_timeout: Duration,
}

impl HttpForwarder {
    /// Creates a forwarder for the given service address and per-request
    /// deadline.
    pub fn new(server_addr: SocketAddr, request_timeout: Duration) -> Self {
        Self {
            server_addr,
            request_timeout,
        }
    }

    /// Sends one report and interprets the status line.
    ///
    /// Any status below 400 is success; the response body is never read.
    ///
    /// # Errors
    ///
    /// Every transport problem comes back as a [`ForwardError`]. The method
    /// never retries and holds no state between calls.
    pub async fn send(&self, report: &InputReport) -> Result<(), ForwardError> {
        let body = serde_json::to_vec(report)?;

        match time::timeout(self.request_timeout, self.post(&body)).await {
            Ok(result) => result,
            Err(_) => Err(ForwardError::TimedOut(self.request_timeout)),
        }
    }

    /// One full request cycle: connect, write, read the status line.
    async fn post(&self, body: &[u8]) -> Result<(), ForwardError> {
        let mut stream =
            TcpStream::connect(self.server_addr)
                .await
                .map_err(|source| ForwardError::ConnectFailed {
                    addr: self.server_addr,
                    source,
                })?;

        let head = render_request_head(self.server_addr, body.len());
        stream.write_all(head.as_bytes()).await?;
        stream.write_all(body).await?;

        let mut reader = BufReader::new(stream);
        let mut status_line = String::new();
        reader.read_line(&mut status_line).await?;

        let status = parse_status(&status_line)?;
        debug!("UI service answered {status}");
        if status < 400 {
            Ok(())
        } else {
            Err(ForwardError::ErrorStatus(status))
        }
    }
}

#[async_trait]
impl ActionSink for HttpForwarder {
    async fn forward(&self, report: &InputReport) -> Result<(), String> {
        self.send(report).await.map_err(|e| e.to_string())
    }
}

/// Renders the request line and headers for one report post.
fn render_request_head(addr: SocketAddr, content_length: usize) -> String {
    format!(
        "POST {INPUT_ENDPOINT} HTTP/1.1\r\n\
         Host: {addr}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {content_length}\r\n\
         Connection: close\r\n\
         \r\n"
    )
}

/// Extracts the numeric status code from an HTTP/1.1 status line.
fn parse_status(line: &str) -> Result<u16, ForwardError> {
    line.split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .ok_or_else(|| ForwardError::MalformedResponse(line.trim_end().to_string()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
