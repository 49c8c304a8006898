use std::sync::Arc;
use std::time::Instant;

use crate::client::KeyValueClient;
use crate::collector::{MemoryCollector, SharedCollector};
use crate::command::table::spec_for;
use crate::command::{Command, ParamValue};
use crate::error::ClientResult;
use crate::outcome::{ConnectionMetadata, OutcomeRecord};
use crate::sink::{LogSink, TracingSink};
use crate::value::Value;

/// Wraps a client and records every call made through it.
///
/// Each call is timed, classified by the policy registered for its
/// operation, logged once through the sink and appended once to the
/// collector. The wrapped client's reply is handed back as is, with one
/// exception: a failed `ping` yields `Value::Nil`.
pub struct InstrumentedClient<C> {
    inner: C,
    metadata: ConnectionMetadata,
    sink: Arc<dyn LogSink>,
    collector: SharedCollector,
}

impl<C: KeyValueClient> InstrumentedClient<C> {
    pub fn new(inner: C, metadata: ConnectionMetadata) -> Self {
        InstrumentedClient {
            inner,
            metadata,
            sink: Arc::new(TracingSink),
            collector: Arc::new(MemoryCollector::new()),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Record into `collector` instead of a private one, e.g. to share it
    /// between several clients.
    pub fn with_collector(mut self, collector: SharedCollector) -> Self {
        self.collector = collector;
        self
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    pub fn metadata(&self) -> &ConnectionMetadata {
        &self.metadata
    }

    pub fn collector(&self) -> &SharedCollector {
        &self.collector
    }

    pub fn commands(&self) -> Vec<OutcomeRecord> {
        self.collector.contents()
    }

    pub fn command_count(&self) -> usize {
        self.collector.count()
    }

    fn instrument(&mut self, command: Command) -> ClientResult<Value> {
        let spec = spec_for(command.name());
        spec.validate(&command)?;

        let mut params = command.snapshot();
        let name = command.name();

        let start = Instant::now();
        let result = self.inner.execute(command);
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

        let outcome = spec.policy.classify(&result);
        if let (Some(label), Ok(reply)) = (spec.reply_label, &result) {
            params.push(label, ParamValue::from_reply(reply));
        }

        let record = OutcomeRecord {
            command: name,
            duration_ms,
            outcome,
            connection: self.metadata.clone(),
            params,
            fault: result.as_ref().err().map(|e| e.to_string()),
        };
        self.sink.log(outcome, &record.message(), &record);
        self.collector.append(record);

        match result {
            Err(_) if spec.policy.swallows_faults() => Ok(Value::Nil),
            other => other,
        }
    }
}

impl<C: KeyValueClient> KeyValueClient for InstrumentedClient<C> {
    fn execute(&mut self, command: Command) -> ClientResult<Value> {
        self.instrument(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Outcome;
    use crate::prelude::*;
    use crate::testing::{StubClient, StubReply};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        lines: Mutex<Vec<(Outcome, String)>>,
    }

    impl LogSink for RecordingSink {
        fn log(&self, severity: Outcome, message: &str, _record: &OutcomeRecord) {
            self.lines.lock().push((severity, message.to_string()));
        }
    }

    fn proxy(stub: StubClient) -> InstrumentedClient<StubClient> {
        InstrumentedClient::new(stub, ConnectionMetadata::new("cache.local", Some(6380), 2))
    }

    #[test]
    fn test_logs_once_per_call() {
        let sink = Arc::new(RecordingSink::default());
        let mut client = proxy(StubClient::new().on("get", StubReply::Value(Value::from("v"))))
            .with_sink(sink.clone());
        client.get("k").unwrap();
        let lines = sink.lines.lock();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], (Outcome::Info, "Command: \"get\" Host: cache.local:6380 DB: \"2\"".to_string()));
    }

    #[test]
    fn test_result_annotation() {
        let mut client = proxy(StubClient::new().on("append", StubReply::Value(Value::Int(11))));
        assert_eq!(client.append("k", "hello world").unwrap(), Value::Int(11));
        let record = &client.commands()[0];
        assert_eq!(record.params.get("stringSize"), Some(&ParamValue::Int(11)));
        assert!(record.params.get("value").is_none());
    }

    #[test]
    fn test_fault_is_recorded_and_propagated() {
        let mut client = proxy(StubClient::new().on("hGet", StubReply::Fail("read error".into())));
        let err = client.h_get("h", "f").unwrap_err();
        assert_eq!(err.to_string(), "read error");
        let record = &client.commands()[0];
        assert_eq!(record.outcome, Outcome::Error);
        assert_eq!(record.fault.as_deref(), Some("read error"));
    }

    #[test]
    fn test_ping_fault_is_swallowed() {
        let mut client = proxy(StubClient::new().on("ping", StubReply::Fail("gone away".into())));
        assert_eq!(client.ping().unwrap(), Value::Nil);
        assert_eq!(client.commands()[0].outcome, Outcome::Warning);
    }

    #[test]
    fn test_invalid_shape_is_not_forwarded() {
        let mut client = proxy(StubClient::new());
        let err = client.bitpos("k", true, None, Some(10)).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(client.inner().received().len(), 0);
        assert_eq!(client.command_count(), 0);
    }

    #[test]
    fn test_unknown_operation_uses_fallback_policy() {
        let mut client = proxy(StubClient::new().with_default(StubReply::Value(Value::Bool(false))));
        client.execute(Command::new("xLen").key("key", "s")).unwrap();
        assert_eq!(client.commands()[0].outcome, Outcome::Warning);
    }

    #[test]
    fn test_into_inner() {
        let mut client = proxy(StubClient::new());
        client.incr("n").unwrap();
        let stub = client.into_inner();
        assert_eq!(stub.calls("incr"), 1);
    }
}
