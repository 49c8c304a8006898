use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use tracing::debug;

use crate::client::KeyValueClient;
use crate::command::table::lookup;
use crate::command::wire::encode;
use crate::command::{Arg, Command};
use crate::error::{ClientError, ClientResult};
use crate::value::Value;

/// Direct client over a synchronous `redis` connection.
///
/// Replies follow the conventions the instrumented client classifies:
/// nil comes back as `false`, `+OK` as `true`, and an error reply from the
/// server as `false` with the message kept in [`last_error`](Self::last_error).
/// Only transport failures surface as `Err`.
pub struct RedisDriverClient {
    conn: Option<redis::Connection>,
    options: HashMap<String, String>,
    last_error: Option<String>,
}

impl RedisDriverClient {
    pub fn connect(url: &str, timeout: Duration) -> ClientResult<Self> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection_with_timeout(timeout)?;
        conn.set_read_timeout(Some(timeout))?;
        conn.set_write_timeout(Some(timeout))?;
        debug!("connected to {url}");
        Ok(RedisDriverClient::from_connection(conn))
    }

    pub fn from_connection(conn: redis::Connection) -> Self {
        RedisDriverClient {
            conn: Some(conn),
            options: HashMap::new(),
            last_error: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Message of the most recent error reply, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_last_error(&mut self) {
        self.last_error = None;
    }

    fn local(&mut self, command: &Command) -> ClientResult<Value> {
        match command.name() {
            "close" => Ok(Value::Bool(self.conn.take().is_some())),
            "getMode" => Ok(Value::status("atomic")),
            "getOption" => {
                let name = text_param(command, "name")?;
                Ok(match self.options.get(name) {
                    Some(value) => Value::bulk(Bytes::copy_from_slice(value.as_bytes())),
                    None => Value::Bool(false),
                })
            }
            "setOption" => {
                let name = text_param(command, "name")?;
                let value = text_param(command, "value")?;
                self.options.insert(name.to_string(), value.to_string());
                Ok(Value::ok())
            }
            other => Err(ClientError::Unsupported(other.to_string())),
        }
    }
}

fn text_param<'a>(command: &'a Command, label: &str) -> ClientResult<&'a str> {
    match command.param(label) {
        Some(Arg::Text(s)) => Ok(s.as_str()),
        _ => Err(ClientError::invalid_argument(
            command.name(),
            format!("missing '{label}'"),
        )),
    }
}

impl KeyValueClient for RedisDriverClient {
    fn execute(&mut self, command: Command) -> ClientResult<Value> {
        if let Some(reply) = command.settled_reply() {
            return Ok(reply.clone());
        }
        if lookup(command.name()).is_some_and(|spec| spec.wire.is_none()) {
            return self.local(&command);
        }

        let tokens = encode(&command)?;
        let conn = self.conn.as_mut().ok_or(ClientError::NotConnected)?;

        let mut cmd = redis::Cmd::new();
        for token in &tokens {
            cmd.arg(token.as_slice());
        }

        match cmd.query::<redis::Value>(conn) {
            Ok(reply) => Ok(convert(reply)),
            Err(err) if is_error_reply(&err) => {
                debug!(command = command.name(), "error reply: {err}");
                self.last_error = Some(err.to_string());
                Ok(Value::Bool(false))
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// An error the server answered with, as opposed to a failed transport.
fn is_error_reply(err: &redis::RedisError) -> bool {
    err.code().is_some() && !err.is_io_error()
}

/// Convert a driver reply into a [`Value`].
pub fn convert(reply: redis::Value) -> Value {
    match reply {
        redis::Value::Nil => Value::Bool(false),
        redis::Value::Okay => Value::ok(),
        redis::Value::Int(n) => Value::Int(n),
        redis::Value::Double(f) => Value::Float(f),
        redis::Value::Boolean(b) => Value::Bool(b),
        redis::Value::SimpleString(s) => Value::Status(s),
        redis::Value::BulkString(data) => Value::Bulk(Bytes::from(data)),
        redis::Value::VerbatimString { text, .. } => Value::Bulk(Bytes::from(text)),
        redis::Value::Array(items) | redis::Value::Set(items) => {
            Value::Array(items.into_iter().map(convert).collect())
        }
        redis::Value::Map(pairs) => Value::Array(
            pairs
                .into_iter()
                .flat_map(|(k, v)| [convert(k), convert(v)])
                .collect(),
        ),
        redis::Value::Attribute { data, .. } => convert(*data),
        other => Value::Status(format!("{other:?}")),
    }
}
