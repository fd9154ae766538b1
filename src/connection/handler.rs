//! Per-connection request loop.
//!
//! ## Lifecycle of a Connection
//!
//! ```text
//! 1. Client connects
//!        │
//!        ▼
//! 2. ConnectionHandler created (RespReader + RespWriter over the socket halves)
//!        │
//!        ▼
//! 3. Main loop:
//!    ┌──────────────────────────────┐
//!    │ a. Read one RESP value       │
//!    │ b. Dispatch it               │
//!    │ c. Write the reply (if any)  │
//!    └──────────────────────────────┘
//!        │
//!        ▼
//! 4. Client disconnects / protocol or I/O error
//!        │
//!        ▼
//! 5. Handler task ends
//! ```
//!
//! Malformed-but-framed requests (not an array, empty array) are skipped
//! without a reply. Unknown commands get an empty simple string (`+\r\n`).
//! Framing errors end the connection; the shared stores are untouched.

use crate::commands::{CommandHandler, Dispatch};
use crate::protocol::{ParseError, RespReader, RespWriter, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::BufWriter;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::{debug, trace, warn};

/// Counters shared by all connections.
#[derive(Debug, Default)]
pub struct ConnectionStats {
    /// Total number of connections accepted
    pub connections_accepted: AtomicU64,
    /// Currently active connections
    pub active_connections: AtomicU64,
    /// Requests answered by a command handler
    pub commands_processed: AtomicU64,
    /// Requests naming a command with no handler
    pub unknown_commands: AtomicU64,
    /// Requests dropped without a reply
    pub skipped_requests: AtomicU64,
    /// Total reply bytes written
    pub bytes_written: AtomicU64,
}

impl ConnectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_opened(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
        self.active_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn command_processed(&self) {
        self.commands_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn unknown_command(&self) {
        self.unknown_commands.fetch_add(1, Ordering::Relaxed);
    }

    pub fn request_skipped(&self) {
        self.skipped_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bytes_written(&self, count: usize) {
        self.bytes_written.fetch_add(count as u64, Ordering::Relaxed);
    }
}

/// Handles a single client connection.
pub struct ConnectionHandler {
    reader: RespReader<OwnedReadHalf>,
    writer: RespWriter<BufWriter<OwnedWriteHalf>>,

    /// Client's address (for logging)
    addr: SocketAddr,

    command_handler: CommandHandler,

    stats: Arc<ConnectionStats>,
}

impl ConnectionHandler {
    pub fn new(
        stream: TcpStream,
        addr: SocketAddr,
        command_handler: CommandHandler,
        stats: Arc<ConnectionStats>,
    ) -> Self {
        stats.connection_opened();

        let (read_half, write_half) = stream.into_split();
        Self {
            reader: RespReader::new(read_half),
            writer: RespWriter::new(BufWriter::new(write_half)),
            addr,
            command_handler,
            stats,
        }
    }

    /// Runs the connection until the client disconnects or an error occurs.
    pub async fn run(mut self) -> Result<(), ConnectionError> {
        debug!(client = %self.addr, "Client connected");

        let result = self.main_loop().await;

        match &result {
            Ok(()) => debug!(client = %self.addr, "Client disconnected"),
            Err(ConnectionError::Io(io_err))
                if io_err.kind() == std::io::ErrorKind::ConnectionReset =>
            {
                debug!(client = %self.addr, "Connection reset by client")
            }
            Err(e) => warn!(client = %self.addr, error = %e, "Connection error"),
        }

        self.stats.connection_closed();
        result
    }

    /// The read-dispatch-reply loop.
    async fn main_loop(&mut self) -> Result<(), ConnectionError> {
        loop {
            let request = match self.reader.read_value().await {
                Ok(request) => request,
                Err(e) if e.is_connection_closed() => return Ok(()),
                Err(e) => return Err(e.into()),
            };
            trace!(client = %self.addr, request = ?request, "Received request");

            let reply = match self.command_handler.dispatch(request) {
                Dispatch::Reply(reply) => {
                    self.stats.command_processed();
                    reply
                }
                Dispatch::UnknownCommand(name) => {
                    debug!(client = %self.addr, command = %name, "Unknown command");
                    self.stats.unknown_command();
                    Value::simple_string("")
                }
                Dispatch::Skip(reason) => {
                    warn!(client = %self.addr, reason, "Skipping request");
                    self.stats.request_skipped();
                    continue;
                }
            };

            self.send_response(&reply).await?;
        }
    }

    async fn send_response(&mut self, response: &Value) -> Result<(), ConnectionError> {
        let written = self.writer.write_value(response).await?;
        self.stats.bytes_written(written);
        trace!(client = %self.addr, bytes = written, "Sent response");
        Ok(())
    }
}

/// Errors that end a connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// I/O error while writing a reply
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed RESP framing, or an I/O error while reading
    #[error("Parse error: {0}")]
    Parse(ParseError),
}

impl From<ParseError> for ConnectionError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Io(io_err) => ConnectionError::Io(io_err),
            other => ConnectionError::Parse(other),
        }
    }
}

/// Creates a `ConnectionHandler` and runs it to completion.
///
/// Errors are already logged by the handler.
pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    command_handler: CommandHandler,
    stats: Arc<ConnectionStats>,
) {
    let handler = ConnectionHandler::new(stream, addr, command_handler, stats);
    if let Err(e) = handler.run().await {
        trace!(client = %addr, error = %e, "Connection task finished with error");
    }
}
