//! # redtrace
//!
//! An instrumented Redis client. [`InstrumentedClient`] wraps any
//! [`KeyValueClient`] and, for every operation that passes through it,
//! measures the call, classifies the reply as info, warning or error, emits
//! one log line and appends one [`OutcomeRecord`] to a metrics collector.
//! Replies reach the caller unchanged.
//!
//! Operations are provided by the extension traits in [`prelude`]; the
//! per-operation outcome policies live in a single table
//! ([`command::table`]).
//!
//! ```no_run
//! use redtrace::prelude::*;
//! use redtrace::{ConnectionMetadata, InstrumentedClient, RedisDriverClient};
//! use std::time::Duration;
//!
//! # fn main() -> redtrace::ClientResult<()> {
//! let driver = RedisDriverClient::connect("redis://127.0.0.1:6379/0", Duration::from_secs(2))?;
//! let mut client = InstrumentedClient::new(driver, ConnectionMetadata::default());
//! client.set("greeting", "hello", 0)?;
//! client.get("greeting")?;
//! assert_eq!(client.command_count(), 2);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod collector;
pub mod command;
pub mod config;
pub mod driver;
pub mod error;
pub mod outcome;
pub mod proxy;
pub mod sink;
pub mod testing;
pub mod value;

pub use client::KeyValueClient;
pub use collector::{CollectorSummary, MemoryCollector, MetricsCollector, SharedCollector};
pub use command::{Arg, Command, ParamValue, Snapshot};
pub use driver::RedisDriverClient;
pub use error::{ClientError, ClientResult};
pub use outcome::{ConnectionMetadata, Outcome, OutcomeRecord, Policy};
pub use proxy::InstrumentedClient;
pub use sink::{LogSink, NullSink, TracingSink};
pub use value::Value;

pub mod prelude {
    pub use crate::client::KeyValueClient;
    pub use crate::command::connection::ConnectionCommands;
    pub use crate::command::hash::HashCommands;
    pub use crate::command::hyperloglog::HyperLogLogCommands;
    pub use crate::command::key::KeyCommands;
    pub use crate::command::list::{InsertPosition, ListCommands};
    pub use crate::command::scan::{ScanCommands, ScanCursor};
    pub use crate::command::server_cmd::ServerCommands;
    pub use crate::command::set::SetCommands;
    pub use crate::command::sorted_set::{Aggregate, ScoreRange, SortedSetCommands};
    pub use crate::command::string::StringCommands;
}
