//! Hash commands: HSET, HGET and HGETALL.

use crate::commands::bulk_args;
use crate::protocol::Value;
use crate::storage::Database;

/// HSET hash field value
pub fn hset(db: &Database, args: &[Value]) -> Value {
    match bulk_args::<3>("hset", args) {
        Ok([hash, field, value]) => {
            db.hashes.hset(hash, field, value);
            Value::ok()
        }
        Err(reply) => reply,
    }
}

/// HGET hash field
pub fn hget(db: &Database, args: &[Value]) -> Value {
    match bulk_args::<2>("hget", args) {
        Ok([hash, field]) => match db.hashes.hget(&hash, &field) {
            Some(value) => Value::bulk_string(value),
            None => Value::null(),
        },
        Err(reply) => reply,
    }
}

/// HGETALL hash
///
/// Replies with `field1, value1, field2, value2, ...` in no particular order,
/// or an empty array when the hash does not exist.
pub fn hgetall(db: &Database, args: &[Value]) -> Value {
    match bulk_args::<1>("hgetall", args) {
        Ok([hash]) => Value::array(
            db.hashes
                .hgetall(&hash)
                .into_iter()
                .flat_map(|(field, value)| [Value::bulk_string(field), Value::bulk_string(value)])
                .collect(),
        ),
        Err(reply) => reply,
    }
}
