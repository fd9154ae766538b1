//! Command Module
//!
//! This module maps parsed requests onto the storage layer.
//!
//! ## Architecture
//!
//! ```text
//! Client Request
//!       │
//!       ▼
//! ┌─────────────────┐
//! │  RespReader     │  (protocol module)
//! └────────┬────────┘
//!          │  Value::Array of bulk strings
//!          ▼
//! ┌─────────────────┐
//! │ CommandHandler  │  (this module)
//! │                 │
//! │  - Uppercase    │
//! │  - Lookup       │
//! │  - Execute      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Database     │  (storage module)
//! └─────────────────┘
//! ```
//!
//! ## Supported Commands
//!
//! - `PING [message]`
//! - `SET key value`, `GET key`
//! - `HSET hash field value`, `HGET hash field`, `HGETALL hash`
//!
//! Handlers never fail: arity and argument problems come back as
//! `Value::Error` replies.

pub mod handler;
pub mod hashes;
pub mod server;
pub mod strings;

pub use handler::{CommandHandler, CommandRegistry, Dispatch, Handler};

use crate::protocol::Value;
use bytes::Bytes;

/// The reply for a call with the wrong number of arguments.
pub(crate) fn wrong_arity(command: &str) -> Value {
    Value::error(format!(
        "ERR wrong number of arguments for '{}' command",
        command
    ))
}

pub(crate) fn invalid_argument() -> Value {
    Value::error("ERR invalid argument")
}

/// The payload of a bulk string argument. A null bulk string reads as empty;
/// simple strings, errors and arrays are not arguments.
pub(crate) fn bulk_payload(arg: &Value) -> Option<Bytes> {
    match arg {
        Value::BulkString(data) => Some(data.clone().unwrap_or_default()),
        _ => None,
    }
}

/// Checks that exactly `N` arguments were given and that each one is a
/// bulk string, returning their payloads.
pub(crate) fn bulk_args<const N: usize>(
    command: &str,
    args: &[Value],
) -> Result<[Bytes; N], Value> {
    let args: &[Value; N] = args.try_into().map_err(|_| wrong_arity(command))?;

    let mut payloads: [Bytes; N] = std::array::from_fn(|_| Bytes::new());
    for (payload, arg) in payloads.iter_mut().zip(args) {
        *payload = bulk_payload(arg).ok_or_else(invalid_argument)?;
    }

    Ok(payloads)
}
