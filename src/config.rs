//! Server configuration.
//!
//! Every option can be given as a command-line flag or through the
//! matching `RESPKV_*` environment variable; flags win.

use clap::Parser;

use crate::{DEFAULT_HOST, DEFAULT_PORT};

/// Runtime configuration for the server binary.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "respkv", version, about = "In-memory key-value server speaking RESP")]
pub struct Config {
    /// Host to bind to
    #[arg(short = 'H', long, env = "RESPKV_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "RESPKV_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Log filter, e.g. `info` or `respkv=trace`
    #[arg(long, env = "RESPKV_LOG", default_value = "info")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Returns the bind address as `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
