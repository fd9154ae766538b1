//! # respkv - A Minimal In-Memory Key-Value Server
//!
//! respkv speaks a subset of the Redis serialization protocol (RESP) and keeps
//! two kinds of data in memory: plain strings and hashes (field → value maps).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                             respkv                               │
//! │                                                                  │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────────┐       │
//! │  │ TCP Server  │───>│ Connection  │───>│ CommandHandler  │       │
//! │  │ (Listener)  │    │  Handler    │    │ (registry)      │       │
//! │  └─────────────┘    └──────┬──────┘    └────────┬────────┘       │
//! │                            │                    │                │
//! │                            ▼                    ▼                │
//! │                     ┌─────────────┐    ┌─────────────────────┐   │
//! │                     │ RespReader  │    │      Database       │   │
//! │                     │ RespWriter  │    │ ┌───────┐ ┌───────┐ │   │
//! │                     └─────────────┘    │ │Strings│ │Hashes │ │   │
//! │                                        │ │RwLock │ │RwLock │ │   │
//! │                                        │ └───────┘ └───────┘ │   │
//! │                                        └─────────────────────┘   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use respkv::commands::CommandHandler;
//! use respkv::connection::{handle_connection, ConnectionStats};
//! use respkv::storage::Database;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() {
//!     let handler = CommandHandler::new(Arc::new(Database::new()));
//!     let stats = Arc::new(ConnectionStats::new());
//!     let listener = TcpListener::bind("127.0.0.1:6379").await.unwrap();
//!
//!     loop {
//!         let (stream, addr) = listener.accept().await.unwrap();
//!         tokio::spawn(handle_connection(stream, addr, handler.clone(), Arc::clone(&stats)));
//!     }
//! }
//! ```
//!
//! ## Supported Commands
//!
//! - `PING [message]`
//! - `SET key value`
//! - `GET key`
//! - `HSET hash field value`
//! - `HGET hash field`
//! - `HGETALL hash`
//!
//! ## Module Overview
//!
//! - [`protocol`]: RESP value type, streaming reader and writer
//! - [`storage`]: The string and hash stores
//! - [`commands`]: Command registry, dispatcher and handlers
//! - [`connection`]: Per-client request loop
//! - [`config`]: Command-line / environment configuration

pub mod commands;
pub mod config;
pub mod connection;
pub mod protocol;
pub mod storage;

// Re-export commonly used types for convenience
pub use commands::{CommandHandler, CommandRegistry, Dispatch};
pub use config::Config;
pub use connection::{handle_connection, ConnectionStats};
pub use protocol::{ParseError, RespReader, RespWriter, Value};
pub use storage::{Database, HashStore, StringStore};

/// The default port (same as Redis)
pub const DEFAULT_PORT: u16 = 6379;

/// The default host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Version of respkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
