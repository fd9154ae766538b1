//! RESP Protocol Implementation
//!
//! This module implements the subset of the Redis Serialization Protocol (RESP)
//! the server speaks: simple strings, errors, bulk strings and arrays.
//!
//! ## Modules
//!
//! - `types`: Defines the `Value` enum and its wire serialization
//! - `reader`: Streaming decoder over any `AsyncRead`
//! - `writer`: Writes serialized values to any `AsyncWrite`
//!
//! ## Example
//!
//! ```
//! use respkv::protocol::{RespReader, Value};
//! use bytes::Bytes;
//!
//! # tokio_test::block_on(async {
//! // Decoding an incoming request
//! let mut reader = RespReader::new(&b"*2\r\n$3\r\nGET\r\n$4\r\nname\r\n"[..]);
//! let request = reader.read_value().await.unwrap();
//! assert_eq!(request.as_array().map(|a| a.len()), Some(2));
//!
//! // Creating responses
//! let response = Value::bulk_string(Bytes::from("Ariz"));
//! assert_eq!(response.serialize(), b"$4\r\nAriz\r\n");
//! # });
//! ```

pub mod reader;
pub mod types;
pub mod writer;

// Re-export commonly used types for convenience
pub use reader::{ParseError, ParseResult, RespReader};
pub use types::Value;
pub use writer::RespWriter;
