//! String commands: SET and GET.

use crate::commands::bulk_args;
use crate::protocol::Value;
use crate::storage::Database;

/// SET key value
pub fn set(db: &Database, args: &[Value]) -> Value {
    match bulk_args::<2>("set", args) {
        Ok([key, value]) => {
            db.strings.set(key, value);
            Value::ok()
        }
        Err(reply) => reply,
    }
}

/// GET key
pub fn get(db: &Database, args: &[Value]) -> Value {
    match bulk_args::<1>("get", args) {
        Ok([key]) => match db.strings.get(&key) {
            Some(value) => Value::bulk_string(value),
            None => Value::null(),
        },
        Err(reply) => reply,
    }
}
