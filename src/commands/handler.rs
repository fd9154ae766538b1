//! Command Registry and Dispatcher
//!
//! The registry is a table from uppercase command name to a plain function
//! pointer, built once at startup. `CommandHandler` pairs it with the shared
//! `Database` and turns one decoded request into a `Dispatch` outcome.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CommandHandler                          │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐      │
//! │  │  unpack()   │───>│  lookup()   │───>│  handler()  │      │
//! │  └─────────────┘    └─────────────┘    └─────────────┘      │
//! │                                               │             │
//! │                                               ▼             │
//! │                                          Database           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use crate::commands::{bulk_payload, hashes, server, strings};
use crate::protocol::Value;
use crate::storage::Database;
use std::collections::HashMap;
use std::sync::Arc;

/// A command implementation: receives the arguments after the command name.
pub type Handler = fn(&Database, &[Value]) -> Value;

/// Maps uppercase command names to their handlers.
#[derive(Clone)]
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Handler>,
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Builds the registry with every supported command.
    pub fn new() -> Self {
        let mut registry = Self {
            handlers: HashMap::new(),
        };

        registry.register("PING", server::ping);
        registry.register("SET", strings::set);
        registry.register("GET", strings::get);
        registry.register("HSET", hashes::hset);
        registry.register("HGET", hashes::hget);
        registry.register("HGETALL", hashes::hgetall);

        registry
    }

    fn register(&mut self, name: &'static str, handler: Handler) {
        debug_assert_eq!(name, name.to_ascii_uppercase());
        self.handlers.insert(name, handler);
    }

    /// Looks up a handler by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<Handler> {
        self.handlers
            .get(name.to_ascii_uppercase().as_str())
            .copied()
    }

    /// Registered command names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// What the connection should do with one decoded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A handler ran; send this reply.
    Reply(Value),
    /// No handler is registered under this name.
    UnknownCommand(String),
    /// The request is not a non-empty array.
    Skip(&'static str),
}

/// Dispatches requests to the registered handlers.
///
/// Cloning is cheap: both the database and the registry are shared.
#[derive(Debug, Clone)]
pub struct CommandHandler {
    db: Arc<Database>,
    registry: Arc<CommandRegistry>,
}

impl CommandHandler {
    /// Creates a command handler with the default registry.
    pub fn new(db: Arc<Database>) -> Self {
        Self::with_registry(db, Arc::new(CommandRegistry::new()))
    }

    pub fn with_registry(db: Arc<Database>, registry: Arc<CommandRegistry>) -> Self {
        Self { db, registry }
    }

    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    /// Runs one request.
    ///
    /// The first array element, uppercased, selects the command; the rest are
    /// passed to its handler as arguments. A null or non-bulk first element
    /// names no command and comes back as `UnknownCommand`.
    pub fn dispatch(&self, request: Value) -> Dispatch {
        let args = match request {
            Value::Array(args) => args,
            _ => return Dispatch::Skip("request is not an array"),
        };

        let Some((name, args)) = args.split_first() else {
            return Dispatch::Skip("empty request array");
        };

        let name = bulk_payload(name).unwrap_or_default();
        let name = String::from_utf8_lossy(&name);
        match self.registry.get(&name) {
            Some(handler) => Dispatch::Reply(handler(&self.db, args)),
            None => Dispatch::UnknownCommand(name.into_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn create_handler() -> CommandHandler {
        CommandHandler::new(Arc::new(Database::new()))
    }

    fn make_command(args: &[&str]) -> Value {
        Value::Array(
            args.iter()
                .map(|s| Value::bulk_string(Bytes::from(s.to_string())))
                .collect(),
        )
    }

    fn reply(handler: &CommandHandler, args: &[&str]) -> Value {
        match handler.dispatch(make_command(args)) {
            Dispatch::Reply(value) => value,
            other => panic!("expected a reply, got {:?}", other),
        }
    }

    #[test]
    fn test_registry_contents() {
        let registry = CommandRegistry::new();

        let mut names: Vec<_> = registry.names().collect();
        names.sort_unstable();
        assert_eq!(names, ["GET", "HGET", "HGETALL", "HSET", "PING", "SET"]);
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = CommandRegistry::new();

        assert!(registry.get("hgetall").is_some());
        assert!(registry.get("HgEtAlL").is_some());
        assert!(registry.get("DEL").is_none());
    }

    #[test]
    fn test_ping() {
        let handler = create_handler();

        assert_eq!(reply(&handler, &["PING"]), Value::simple_string("PONG"));
        assert_eq!(
            reply(&handler, &["ping", "hello"]),
            Value::simple_string("hello")
        );
    }

    #[test]
    fn test_set_get() {
        let handler = create_handler();

        assert_eq!(reply(&handler, &["GET", "key"]), Value::null());
        assert_eq!(reply(&handler, &["SET", "key", "value"]), Value::ok());
        assert_eq!(
            reply(&handler, &["get", "key"]),
            Value::bulk_string(Bytes::from("value"))
        );
        assert_eq!(
            handler.database().strings.get(b"key"),
            Some(Bytes::from("value"))
        );
    }

    #[test]
    fn test_hash_commands() {
        let handler = create_handler();

        assert_eq!(reply(&handler, &["HSET", "h", "f", "v"]), Value::ok());
        assert_eq!(
            reply(&handler, &["HGET", "h", "f"]),
            Value::bulk_string(Bytes::from("v"))
        );
        assert_eq!(
            reply(&handler, &["HGETALL", "h"]),
            Value::array(vec![
                Value::bulk_string(Bytes::from("f")),
                Value::bulk_string(Bytes::from("v")),
            ])
        );
    }

    #[test]
    fn test_wrong_arity_is_a_reply() {
        let handler = create_handler();

        let response = reply(&handler, &["SET", "a"]);
        assert!(response.is_error());
        assert_eq!(
            response,
            Value::error("ERR wrong number of arguments for 'set' command")
        );
    }

    #[test]
    fn test_unknown_command() {
        let handler = create_handler();

        assert_eq!(
            handler.dispatch(make_command(&["FLUSHALL"])),
            Dispatch::UnknownCommand("FLUSHALL".to_string())
        );
    }

    #[test]
    fn test_skipped_requests() {
        let handler = create_handler();

        assert!(matches!(
            handler.dispatch(Value::array(vec![])),
            Dispatch::Skip(_)
        ));
        assert!(matches!(
            handler.dispatch(Value::bulk_string(Bytes::from("PING"))),
            Dispatch::Skip(_)
        ));
    }

    #[test]
    fn test_null_command_name_is_unknown() {
        let handler = create_handler();

        assert_eq!(
            handler.dispatch(Value::array(vec![Value::null()])),
            Dispatch::UnknownCommand(String::new())
        );
        assert_eq!(
            handler.dispatch(Value::array(vec![Value::array(vec![]), Value::bulk_string("k")])),
            Dispatch::UnknownCommand(String::new())
        );
    }

    #[test]
    fn test_set_null_value() {
        let handler = create_handler();

        let request = Value::array(vec![
            Value::bulk_string("SET"),
            Value::bulk_string("k"),
            Value::null(),
        ]);
        assert_eq!(handler.dispatch(request), Dispatch::Reply(Value::ok()));
        assert_eq!(handler.database().strings.get(b"k"), Some(Bytes::new()));
    }

    #[test]
    fn test_ping_extra_arguments_ignored() {
        let handler = create_handler();

        assert_eq!(
            reply(&handler, &["PING", "a", "b"]),
            Value::simple_string("a")
        );
    }
}
