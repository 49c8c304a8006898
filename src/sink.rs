use tracing::{error, info, warn};

use crate::outcome::{Outcome, OutcomeRecord};

/// Destination for the one log line emitted per invocation.
pub trait LogSink: Send + Sync {
    fn log(&self, severity: Outcome, message: &str, record: &OutcomeRecord);
}

/// Emits records as `tracing` events with the record fields attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, severity: Outcome, message: &str, record: &OutcomeRecord) {
        let host = record.connection.address();
        let db = record.connection.db;
        let duration_ms = record.duration_ms;
        let params = &record.params;
        let fault = record.fault.as_deref().unwrap_or("");
        match severity {
            Outcome::Info => info!(
                command = record.command,
                %host, db, duration_ms, %params,
                "{message}"
            ),
            Outcome::Warning => warn!(
                command = record.command,
                %host, db, duration_ms, %params, fault,
                "{message}"
            ),
            Outcome::Error => error!(
                command = record.command,
                %host, db, duration_ms, %params, fault,
                "{message}"
            ),
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _severity: Outcome, _message: &str, _record: &OutcomeRecord) {}
}
