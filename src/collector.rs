use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

use crate::outcome::{Outcome, OutcomeRecord};

/// Destination for outcome records. Appends may come from several threads.
pub trait MetricsCollector: Send + Sync {
    fn append(&self, record: OutcomeRecord);

    fn count(&self) -> usize;

    /// All records in append order.
    fn contents(&self) -> Vec<OutcomeRecord>;

    fn summary(&self) -> CollectorSummary {
        CollectorSummary::from_records(&self.contents())
    }
}

pub type SharedCollector = Arc<dyn MetricsCollector>;

/// Totals over a collector's records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollectorSummary {
    pub commands: usize,
    pub total_ms: f64,
    pub warnings: usize,
    pub errors: usize,
}

impl CollectorSummary {
    pub fn from_records(records: &[OutcomeRecord]) -> Self {
        let mut summary = CollectorSummary::default();
        for record in records {
            summary.commands += 1;
            summary.total_ms += record.duration_ms;
            match record.outcome {
                Outcome::Warning => summary.warnings += 1,
                Outcome::Error => summary.errors += 1,
                Outcome::Info => {}
            }
        }
        summary
    }
}

/// Append-only in-memory record list.
#[derive(Debug, Default)]
pub struct MemoryCollector {
    records: Mutex<Vec<OutcomeRecord>>,
}

impl MemoryCollector {
    pub fn new() -> Self {
        MemoryCollector::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(MemoryCollector::new())
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl MetricsCollector for MemoryCollector {
    fn append(&self, record: OutcomeRecord) {
        self.records.lock().push(record);
    }

    fn count(&self) -> usize {
        self.records.lock().len()
    }

    fn contents(&self) -> Vec<OutcomeRecord> {
        self.records.lock().clone()
    }

    fn summary(&self) -> CollectorSummary {
        CollectorSummary::from_records(&self.records.lock())
    }
}
