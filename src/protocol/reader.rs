//! Streaming RESP Decoder
//!
//! `RespReader` pulls exactly one RESP value at a time from any
//! `tokio::io::AsyncRead`. It never looks further ahead than one header line
//! or one bulk payload, so several pipelined requests can share the same
//! buffered stream.
//!
//! ## How the Reader Works
//!
//! 1. Read one type byte (`*`, `$`, `+` or `-`).
//! 2. Read the CRLF-terminated header line that follows it.
//! 3. For a bulk string, read exactly `length` payload bytes plus the trailing CRLF.
//!    CR and LF bytes inside the payload are data.
//! 4. For an array, push a frame onto an explicit stack and keep reading
//!    elements until the declared count is reached.
//!
//! Nested arrays are decoded without recursion, so the nesting limit is a
//! plain counter rather than a stack-depth concern.

use crate::protocol::types::{prefix, Value, CRLF};
use bytes::Bytes;
use std::io;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};

/// Errors that can occur while decoding a RESP value from a stream.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The peer closed the stream, either between values or in the middle of one.
    #[error("connection closed")]
    ConnectionClosed,

    /// Unknown type prefix byte
    #[error("unknown type prefix: {0:#04x}")]
    UnknownPrefix(u8),

    /// A length or count line is not a decimal integer
    #[error("invalid integer: {0}")]
    InvalidInteger(String),

    /// Invalid UTF-8 in a simple string or error line
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(String),

    /// Bulk string length is negative (but not -1 for null)
    #[error("invalid bulk string length: {0}")]
    InvalidBulkLength(i64),

    /// Array length is negative
    #[error("invalid array length: {0}")]
    InvalidArrayLength(i64),

    /// Framing violation (missing CRLF, nesting too deep, ...)
    #[error("protocol error: {0}")]
    ProtocolError(String),

    /// A declared length exceeds the configured maximum
    #[error("message too large: {size} (max: {max})")]
    MessageTooLarge { size: usize, max: usize },

    /// I/O failure on the underlying stream
    #[error("I/O error: {0}")]
    Io(io::Error),
}

impl ParseError {
    /// Returns true when the error only means the peer went away.
    pub fn is_connection_closed(&self) -> bool {
        matches!(self, ParseError::ConnectionClosed)
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            ParseError::ConnectionClosed
        } else {
            ParseError::Io(err)
        }
    }
}

/// Result type for decoding operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum size for a single bulk string (512 MB, same as Redis)
pub const MAX_BULK_SIZE: usize = 512 * 1024 * 1024;

/// Maximum number of elements a single array may declare
pub const MAX_ARRAY_LEN: usize = 1024 * 1024;

/// Maximum length of a header or simple-string line, excluding CRLF
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

/// Maximum array nesting depth
pub const MAX_NESTING_DEPTH: usize = 32;

/// Upper bound on speculative preallocation for a declared array count.
const PREALLOC_LIMIT: usize = 1024;

/// One decoded frame header: either a complete leaf value or the start of an array.
enum Frame {
    Complete(Value),
    ArrayStart(usize),
}

/// Decodes RESP values from a byte stream.
///
/// # Example
///
/// ```
/// use respkv::protocol::{RespReader, Value};
///
/// # tokio_test::block_on(async {
/// let mut reader = RespReader::new(&b"*1\r\n$4\r\nPING\r\n"[..]);
/// let value = reader.read_value().await.unwrap();
/// assert_eq!(value, Value::array(vec![Value::bulk_string("PING")]));
/// assert!(reader.read_value().await.unwrap_err().is_connection_closed());
/// # });
/// ```
#[derive(Debug)]
pub struct RespReader<R> {
    reader: BufReader<R>,
}

impl<R: AsyncRead + Unpin> RespReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
        }
    }

    /// Reads exactly one RESP value from the stream.
    ///
    /// Returns `ParseError::ConnectionClosed` when the stream ends, whether
    /// that happens before the value starts or part-way through it.
    pub async fn read_value(&mut self) -> ParseResult<Value> {
        // Arrays still being filled: (elements so far, declared count)
        let mut pending: Vec<(Vec<Value>, usize)> = Vec::new();

        'frames: loop {
            let mut value = match self.read_frame().await? {
                Frame::Complete(value) => value,
                Frame::ArrayStart(0) => Value::Array(Vec::new()),
                Frame::ArrayStart(count) => {
                    if pending.len() >= MAX_NESTING_DEPTH {
                        return Err(ParseError::ProtocolError(format!(
                            "maximum nesting depth exceeded: {}",
                            MAX_NESTING_DEPTH
                        )));
                    }
                    pending.push((Vec::with_capacity(count.min(PREALLOC_LIMIT)), count));
                    continue;
                }
            };

            // Fold the finished value into its parents, closing every array it completes.
            while let Some((mut elements, count)) = pending.pop() {
                elements.push(value);
                if elements.len() < count {
                    pending.push((elements, count));
                    continue 'frames;
                }
                value = Value::Array(elements);
            }

            return Ok(value);
        }
    }

    /// Reads a type byte and everything belonging to it, except array elements.
    async fn read_frame(&mut self) -> ParseResult<Frame> {
        let type_byte = self.reader.read_u8().await?;

        match type_byte {
            prefix::SIMPLE_STRING => Ok(Frame::Complete(Value::SimpleString(
                self.read_text_line().await?,
            ))),
            prefix::ERROR => Ok(Frame::Complete(Value::Error(self.read_text_line().await?))),
            prefix::BULK_STRING => self.read_bulk_string().await.map(Frame::Complete),
            prefix::ARRAY => self.read_array_len().await.map(Frame::ArrayStart),
            other => Err(ParseError::UnknownPrefix(other)),
        }
    }

    /// Parses a bulk string body: `<length>\r\n<data>\r\n` or `-1\r\n`
    async fn read_bulk_string(&mut self) -> ParseResult<Value> {
        let length = self.read_integer_line().await?;

        if length == -1 {
            return Ok(Value::null());
        }
        if length < 0 {
            return Err(ParseError::InvalidBulkLength(length));
        }

        let length = usize::try_from(length).map_err(|_| ParseError::MessageTooLarge {
            size: usize::MAX,
            max: MAX_BULK_SIZE,
        })?;
        if length > MAX_BULK_SIZE {
            return Err(ParseError::MessageTooLarge {
                size: length,
                max: MAX_BULK_SIZE,
            });
        }

        // Grows with the bytes that actually arrive, not with the declared length.
        let mut data = Vec::new();
        let read = (&mut self.reader)
            .take(length as u64)
            .read_to_end(&mut data)
            .await?;
        if read < length {
            return Err(ParseError::ConnectionClosed);
        }

        let mut terminator = [0u8; 2];
        self.reader.read_exact(&mut terminator).await?;
        if terminator[..] != *CRLF {
            return Err(ParseError::ProtocolError(
                "bulk string missing trailing CRLF".to_string(),
            ));
        }

        Ok(Value::BulkString(Some(Bytes::from(data))))
    }

    /// Parses an array header body: `<count>\r\n`
    async fn read_array_len(&mut self) -> ParseResult<usize> {
        let count = self.read_integer_line().await?;

        if count < 0 {
            return Err(ParseError::InvalidArrayLength(count));
        }

        match usize::try_from(count) {
            Ok(count) if count <= MAX_ARRAY_LEN => Ok(count),
            _ => Err(ParseError::MessageTooLarge {
                size: usize::try_from(count).unwrap_or(usize::MAX),
                max: MAX_ARRAY_LEN,
            }),
        }
    }

    async fn read_integer_line(&mut self) -> ParseResult<i64> {
        let line = self.read_line().await?;
        let text = std::str::from_utf8(&line)
            .map_err(|_| ParseError::InvalidInteger(String::from_utf8_lossy(&line).into_owned()))?;

        text.parse::<i64>()
            .map_err(|e| ParseError::InvalidInteger(format!("{:?}: {}", text, e)))
    }

    async fn read_text_line(&mut self) -> ParseResult<String> {
        let line = self.read_line().await?;
        String::from_utf8(line).map_err(|e| ParseError::InvalidUtf8(e.to_string()))
    }

    /// Reads one CRLF-terminated line and strips the terminator.
    async fn read_line(&mut self) -> ParseResult<Vec<u8>> {
        let limit = (MAX_LINE_LENGTH + CRLF.len()) as u64;
        let mut line = Vec::new();
        let read = (&mut self.reader)
            .take(limit)
            .read_until(b'\n', &mut line)
            .await?;

        if !line.ends_with(b"\n") {
            if read as u64 == limit {
                return Err(ParseError::ProtocolError(format!(
                    "line exceeds {} bytes",
                    MAX_LINE_LENGTH
                )));
            }
            return Err(ParseError::ConnectionClosed);
        }
        if !line.ends_with(CRLF) {
            return Err(ParseError::ProtocolError(
                "line not terminated by CRLF".to_string(),
            ));
        }

        line.truncate(line.len() - CRLF.len());
        Ok(line)
    }
}
