//! RESP (Redis Serialization Protocol) Data Types
//!
//! This module defines the values exchanged on the wire and how they are
//! serialized back into bytes.
//!
//! ## Protocol Format
//!
//! Each RESP value starts with a type prefix byte:
//! - `+` Simple String
//! - `-` Error
//! - `$` Bulk String
//! - `*` Array
//!
//! Headers are terminated with CRLF (`\r\n`).
//!
//! ## Examples
//!
//! Simple String: `+OK\r\n`
//! Error: `-ERR wrong number of arguments for 'get' command\r\n`
//! Bulk String: `$5\r\nhello\r\n`
//! Empty Bulk String: `$0\r\n\r\n`
//! Null Bulk String: `$-1\r\n`
//! Array: `*2\r\n$3\r\nGET\r\n$4\r\nname\r\n`

use bytes::Bytes;
use std::fmt;

/// The CRLF terminator used in RESP protocol
pub const CRLF: &[u8] = b"\r\n";

/// RESP protocol type prefixes
pub mod prefix {
    pub const SIMPLE_STRING: u8 = b'+';
    pub const ERROR: u8 = b'-';
    pub const BULK_STRING: u8 = b'$';
    pub const ARRAY: u8 = b'*';
}

/// A single RESP value.
///
/// Requests arrive as an `Array` of `BulkString`s; replies can be any variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Short status text. Must not contain CR or LF.
    /// Format: `+<string>\r\n`
    SimpleString(String),

    /// Error message.
    /// Format: `-<error message>\r\n`
    Error(String),

    /// Length-prefixed, binary-safe string.
    ///
    /// `None` is the null bulk string (`$-1\r\n`) and is distinct from
    /// `Some(Bytes::new())`, the empty bulk string (`$0\r\n\r\n`).
    BulkString(Option<Bytes>),

    /// Ordered sequence of values, possibly nested.
    /// Format: `*<count>\r\n<element1><element2>...`
    Array(Vec<Value>),
}

impl Value {
    /// Creates a new simple string value.
    ///
    /// # Example
    /// ```
    /// use respkv::protocol::Value;
    /// let ok = Value::simple_string("OK");
    /// assert_eq!(ok.serialize(), b"+OK\r\n");
    /// ```
    pub fn simple_string(s: impl Into<String>) -> Self {
        Value::SimpleString(s.into())
    }

    /// Creates a new error value.
    pub fn error(s: impl Into<String>) -> Self {
        Value::Error(s.into())
    }

    /// Creates a new (non-null) bulk string value.
    ///
    /// # Example
    /// ```
    /// use respkv::protocol::Value;
    /// use bytes::Bytes;
    /// let bulk = Value::bulk_string(Bytes::from("hello"));
    /// assert_eq!(bulk.serialize(), b"$5\r\nhello\r\n");
    /// ```
    pub fn bulk_string(data: impl Into<Bytes>) -> Self {
        Value::BulkString(Some(data.into()))
    }

    /// The null bulk string, used for "absent".
    pub fn null() -> Self {
        Value::BulkString(None)
    }

    pub fn array(values: Vec<Value>) -> Self {
        Value::Array(values)
    }

    pub fn ok() -> Self {
        Value::SimpleString("OK".to_string())
    }

    pub fn pong() -> Self {
        Value::SimpleString("PONG".to_string())
    }

    /// Serializes the value to its wire format.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.serialize_into(&mut buf);
        buf
    }

    /// Serializes the value into an existing buffer.
    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        match self {
            Value::SimpleString(s) => {
                buf.push(prefix::SIMPLE_STRING);
                buf.extend_from_slice(s.as_bytes());
                buf.extend_from_slice(CRLF);
            }
            Value::Error(s) => {
                buf.push(prefix::ERROR);
                buf.extend_from_slice(s.as_bytes());
                buf.extend_from_slice(CRLF);
            }
            Value::BulkString(Some(data)) => {
                buf.push(prefix::BULK_STRING);
                buf.extend_from_slice(data.len().to_string().as_bytes());
                buf.extend_from_slice(CRLF);
                buf.extend_from_slice(data);
                buf.extend_from_slice(CRLF);
            }
            Value::BulkString(None) => {
                buf.push(prefix::BULK_STRING);
                buf.extend_from_slice(b"-1");
                buf.extend_from_slice(CRLF);
            }
            Value::Array(values) => {
                buf.push(prefix::ARRAY);
                buf.extend_from_slice(values.len().to_string().as_bytes());
                buf.extend_from_slice(CRLF);
                for value in values {
                    value.serialize_into(buf);
                }
            }
        }
    }

    /// Returns true for the null bulk string.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::BulkString(None))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Returns the payload of a non-null bulk string.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::BulkString(Some(b)) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Consumes self and returns the elements if this is an `Array`.
    pub fn into_array(self) -> Option<Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::SimpleString(s) => write!(f, "{}", s),
            Value::Error(s) => write!(f, "(error) {}", s),
            Value::BulkString(Some(data)) => match std::str::from_utf8(data) {
                Ok(s) => write!(f, "\"{}\"", s),
                Err(_) => write!(f, "(binary data, {} bytes)", data.len()),
            },
            Value::BulkString(None) => write!(f, "(nil)"),
            Value::Array(values) => {
                if values.is_empty() {
                    return write!(f, "(empty array)");
                }
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}) {}", i + 1, v)?;
                }
                Ok(())
            }
        }
    }
}
