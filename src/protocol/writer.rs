//! RESP Response Writer
//!
//! Serializes one `Value` at a time onto any `tokio::io::AsyncWrite` and
//! flushes it, so a reply is on the wire before the next request is read.

use crate::protocol::types::Value;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Writes RESP values to a byte stream.
#[derive(Debug)]
pub struct RespWriter<W> {
    writer: W,
    /// Scratch buffer reused across replies
    buf: Vec<u8>,
}

impl<W: AsyncWrite + Unpin> RespWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buf: Vec::with_capacity(256),
        }
    }

    /// Serializes `value`, writes it and flushes the stream.
    ///
    /// Returns the number of bytes written.
    pub async fn write_value(&mut self, value: &Value) -> std::io::Result<usize> {
        self.buf.clear();
        value.serialize_into(&mut self.buf);
        self.writer.write_all(&self.buf).await?;
        self.writer.flush().await?;
        Ok(self.buf.len())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use tokio_test::io::Builder;

    #[tokio::test]
    async fn test_write_value_into_buffer() {
        let mut writer = RespWriter::new(Vec::new());

        let n = writer.write_value(&Value::ok()).await.unwrap();
        assert_eq!(n, 5);
        writer
            .write_value(&Value::bulk_string(Bytes::from("Ariz")))
            .await
            .unwrap();
        writer.write_value(&Value::null()).await.unwrap();

        assert_eq!(writer.into_inner(), b"+OK\r\n$4\r\nAriz\r\n$-1\r\n");
    }

    #[tokio::test]
    async fn test_write_value_to_stream() {
        let stream = Builder::new()
            .write(b"*2\r\n$1\r\nf\r\n$1\r\nv\r\n")
            .build();
        let mut writer = RespWriter::new(stream);

        writer
            .write_value(&Value::array(vec![
                Value::bulk_string("f"),
                Value::bulk_string("v"),
            ]))
            .await
            .unwrap();
    }
}
