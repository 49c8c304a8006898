//! A scripted in-memory client for tests and benchmarks.

use std::collections::{HashMap, VecDeque};

use crate::client::KeyValueClient;
use crate::command::Command;
use crate::error::{ClientError, ClientResult};
use crate::value::Value;

/// What the stub answers with.
#[derive(Debug, Clone, PartialEq)]
pub enum StubReply {
    Value(Value),
    /// Fail as a driver fault with this message.
    Fail(String),
}

impl StubReply {
    fn into_result(self) -> ClientResult<Value> {
        match self {
            StubReply::Value(v) => Ok(v),
            StubReply::Fail(msg) => Err(ClientError::Driver(msg)),
        }
    }
}

/// Records every command it receives and replies from a script.
///
/// Replies are chosen per operation name: first any queued one-shot reply,
/// then the standing reply set with [`StubClient::on`], then the default
/// (`true` unless changed).
#[derive(Debug)]
pub struct StubClient {
    queued: HashMap<&'static str, VecDeque<StubReply>>,
    standing: HashMap<&'static str, StubReply>,
    default: StubReply,
    received: Vec<Command>,
}

impl StubClient {
    pub fn new() -> Self {
        StubClient {
            queued: HashMap::new(),
            standing: HashMap::new(),
            default: StubReply::Value(Value::ok()),
            received: Vec::new(),
        }
    }

    pub fn with_default(mut self, reply: StubReply) -> Self {
        self.default = reply;
        self
    }

    /// Always answer `operation` with `reply`.
    pub fn on(mut self, operation: &'static str, reply: StubReply) -> Self {
        self.standing.insert(operation, reply);
        self
    }

    /// Answer the next call of `operation` with `reply`.
    pub fn push_reply(&mut self, operation: &'static str, reply: StubReply) {
        self.queued.entry(operation).or_default().push_back(reply);
    }

    pub fn received(&self) -> &[Command] {
        &self.received
    }

    pub fn last_command(&self) -> Option<Command> {
        self.received.last().cloned()
    }

    pub fn calls(&self, operation: &str) -> usize {
        self.received.iter().filter(|c| c.name() == operation).count()
    }

    fn reply_for(&mut self, operation: &'static str) -> StubReply {
        if let Some(reply) = self.queued.get_mut(operation).and_then(VecDeque::pop_front) {
            return reply;
        }
        self.standing
            .get(operation)
            .unwrap_or(&self.default)
            .clone()
    }
}

impl Default for StubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueClient for StubClient {
    fn execute(&mut self, command: Command) -> ClientResult<Value> {
        if let Some(reply) = command.settled_reply().cloned() {
            self.received.push(command);
            return Ok(reply);
        }
        let reply = self.reply_for(command.name());
        self.received.push(command);
        reply.into_result()
    }
}
