//! Connection Handler Module
//!
//! This module manages individual client connections. Each connection runs
//! in its own Tokio task and shares the command handler (and through it the
//! database) with every other connection.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     TCP Listener                            │
//! │                    (main.rs)                                │
//! └──────────────────────┬──────────────────────────────────────┘
//!                        │
//!                        │ accept() + spawn task
//!                        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 ConnectionHandler                           │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐      │
//! │  │ RespReader  │───>│  Dispatch   │───>│ RespWriter  │      │
//! │  └─────────────┘    └─────────────┘    └─────────────┘      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use respkv::connection::{handle_connection, ConnectionStats};
//! use respkv::commands::CommandHandler;
//! use respkv::storage::Database;
//! use std::sync::Arc;
//!
//! let db = Arc::new(Database::new());
//! let stats = Arc::new(ConnectionStats::new());
//! let handler = CommandHandler::new(db);
//!
//! // For each accepted connection...
//! let (stream, addr) = listener.accept().await?;
//! tokio::spawn(handle_connection(stream, addr, handler.clone(), stats));
//! ```

pub mod handler;

pub use handler::{handle_connection, ConnectionError, ConnectionHandler, ConnectionStats};
