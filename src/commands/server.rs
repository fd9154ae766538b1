//! Connection-level commands.

use crate::commands::{bulk_payload, invalid_argument};
use crate::protocol::Value;
use crate::storage::Database;

/// PING [message ...]
///
/// Replies `PONG`, or echoes the first argument as a simple string; any
/// further arguments are ignored. A message that contains CR or LF cannot be
/// framed as a simple string and is echoed as a bulk string instead.
pub fn ping(_db: &Database, args: &[Value]) -> Value {
    let Some(message) = args.first() else {
        return Value::pong();
    };

    match bulk_payload(message) {
        Some(msg) if msg.iter().any(|&b| b == b'\r' || b == b'\n') => Value::bulk_string(msg),
        Some(msg) => Value::simple_string(String::from_utf8_lossy(&msg)),
        None => invalid_argument(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping() {
        let db = Database::new();

        assert_eq!(ping(&db, &[]), Value::simple_string("PONG"));
        assert_eq!(
            ping(&db, &[Value::bulk_string("hello")]),
            Value::simple_string("hello")
        );
    }

    #[test]
    fn test_ping_multiline_message() {
        let db = Database::new();
        assert_eq!(
            ping(&db, &[Value::bulk_string("a\r\nb")]),
            Value::bulk_string("a\r\nb")
        );
    }

    #[test]
    fn test_ping_echoes_first_of_many() {
        let db = Database::new();
        let reply = ping(&db, &[Value::bulk_string("a"), Value::bulk_string("b")]);
        assert_eq!(reply, Value::simple_string("a"));
        assert_eq!(reply.serialize(), b"+a\r\n".to_vec());
    }

    #[test]
    fn test_ping_null_message() {
        let db = Database::new();
        assert_eq!(ping(&db, &[Value::null()]), Value::simple_string(""));
        assert!(ping(&db, &[Value::array(vec![])]).is_error());
    }
}
