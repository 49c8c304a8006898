use serde::Serialize;
use std::fmt;

use crate::command::Snapshot;
use crate::error::ClientResult;
use crate::value::Value;

/// Severity an invocation is reported with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Info,
    Warning,
    Error,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Info => "info",
            Outcome::Warning => "warning",
            Outcome::Error => "error",
        }
    }

    pub fn is_failure(&self) -> bool {
        !matches!(self, Outcome::Info)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an operation's reply maps onto an [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// `false` means failure, reported as a warning.
    FalseIsWarning,
    /// `false` means failure, reported as an error.
    FalseIsError,
    /// Any falsy reply means failure, reported as an error.
    FalsyIsError,
    /// `-1` means failure, reported as a warning.
    NegativeOneIsWarning,
    /// No failure path; "not found" is a valid answer.
    Informational,
    /// Best-effort connectivity check. Driver faults are reported as a
    /// warning and swallowed.
    Probe,
}

impl Policy {
    pub fn classify(&self, result: &ClientResult<Value>) -> Outcome {
        let reply = match result {
            Ok(reply) => reply,
            Err(_) if *self == Policy::Probe => return Outcome::Warning,
            Err(_) => return Outcome::Error,
        };
        match self {
            Policy::FalseIsWarning if reply.is_false() => Outcome::Warning,
            Policy::FalseIsError if reply.is_false() => Outcome::Error,
            Policy::FalsyIsError if !reply.is_truthy() => Outcome::Error,
            Policy::NegativeOneIsWarning if matches!(reply, Value::Int(-1)) => Outcome::Warning,
            _ => Outcome::Info,
        }
    }

    /// Whether a driver fault is suppressed instead of propagated.
    pub fn swallows_faults(&self) -> bool {
        matches!(self, Policy::Probe)
    }
}

/// Where the wrapped client is connected; attached to every record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionMetadata {
    pub host: String,
    pub port: Option<u16>,
    pub db: i64,
}

impl ConnectionMetadata {
    pub fn new(host: impl Into<String>, port: Option<u16>, db: i64) -> Self {
        ConnectionMetadata {
            host: host.into(),
            port,
            db,
        }
    }

    /// `host:port`, or just the host when no port is known (unix sockets).
    pub fn address(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{port}", self.host),
            None => self.host.clone(),
        }
    }
}

impl Default for ConnectionMetadata {
    fn default() -> Self {
        ConnectionMetadata::new("127.0.0.1", Some(6379), 0)
    }
}

/// The observation made for one forwarded invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeRecord {
    pub command: &'static str,
    pub duration_ms: f64,
    pub outcome: Outcome,
    pub connection: ConnectionMetadata,
    pub params: Snapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<String>,
}

impl OutcomeRecord {
    pub fn message(&self) -> String {
        format!(
            "Command: \"{}\" Host: {} DB: \"{}\"",
            self.command,
            self.connection.address(),
            self.connection.db
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    fn ok(v: Value) -> ClientResult<Value> {
        Ok(v)
    }

    fn fault() -> ClientResult<Value> {
        Err(ClientError::Driver("connection reset".into()))
    }

    #[test]
    fn test_false_is_warning() {
        let p = Policy::FalseIsWarning;
        assert_eq!(p.classify(&ok(Value::Bool(false))), Outcome::Warning);
        assert_eq!(p.classify(&ok(Value::from("v"))), Outcome::Info);
        // only the literal false counts
        assert_eq!(p.classify(&ok(Value::Int(0))), Outcome::Info);
        assert_eq!(p.classify(&ok(Value::from(""))), Outcome::Info);
    }

    #[test]
    fn test_false_is_error() {
        let p = Policy::FalseIsError;
        assert_eq!(p.classify(&ok(Value::Bool(false))), Outcome::Error);
        assert_eq!(p.classify(&ok(Value::Int(0))), Outcome::Info);
    }

    #[test]
    fn test_falsy_is_error() {
        let p = Policy::FalsyIsError;
        assert_eq!(p.classify(&ok(Value::Int(0))), Outcome::Error);
        assert_eq!(p.classify(&ok(Value::Bool(false))), Outcome::Error);
        assert_eq!(p.classify(&ok(Value::array(vec![]))), Outcome::Error);
        assert_eq!(p.classify(&ok(Value::ok())), Outcome::Info);
        assert_eq!(p.classify(&ok(Value::Int(12))), Outcome::Info);
    }

    #[test]
    fn test_negative_one() {
        let p = Policy::NegativeOneIsWarning;
        assert_eq!(p.classify(&ok(Value::Int(-1))), Outcome::Warning);
        assert_eq!(p.classify(&ok(Value::Int(0))), Outcome::Info);
        assert_eq!(p.classify(&ok(Value::Bool(false))), Outcome::Info);
    }

    #[test]
    fn test_informational() {
        let p = Policy::Informational;
        assert_eq!(p.classify(&ok(Value::Bool(true))), Outcome::Info);
        assert_eq!(p.classify(&ok(Value::Bool(false))), Outcome::Info);
    }

    #[test]
    fn test_faults() {
        assert_eq!(Policy::Informational.classify(&fault()), Outcome::Error);
        assert_eq!(Policy::FalseIsWarning.classify(&fault()), Outcome::Error);
        assert_eq!(Policy::Probe.classify(&fault()), Outcome::Warning);
        assert_eq!(Policy::Probe.classify(&ok(Value::status("PONG"))), Outcome::Info);
    }

    #[test]
    fn test_message_format() {
        let record = OutcomeRecord {
            command: "get",
            duration_ms: 0.5,
            outcome: Outcome::Info,
            connection: ConnectionMetadata::new("cache.local", Some(6380), 2),
            params: Snapshot::default(),
            fault: None,
        };
        assert_eq!(record.message(), "Command: \"get\" Host: cache.local:6380 DB: \"2\"");

        let record = OutcomeRecord {
            connection: ConnectionMetadata::new("/tmp/redis.sock", None, 0),
            ..record
        };
        assert_eq!(record.message(), "Command: \"get\" Host: /tmp/redis.sock DB: \"0\"");
    }

    #[test]
    fn test_record_json() {
        let record = OutcomeRecord {
            command: "get",
            duration_ms: 1.25,
            outcome: Outcome::Warning,
            connection: ConnectionMetadata::default(),
            params: Snapshot::default(),
            fault: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["outcome"], "warning");
        assert_eq!(json["connection"]["port"], 6379);
        assert!(json.get("fault").is_none());
    }
}
