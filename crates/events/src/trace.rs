//! Append-only trace log of a simulation run.
//!
//! Purely diagnostic: nothing in the process branches on it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ProcessStage;

/// One line of the run's terminal log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub sequence: u64,
    pub stage: ProcessStage,
    pub message: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceLog {
    entries: Vec<TraceEntry>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line and mirror it to `tracing`.
    pub fn record(&mut self, stage: ProcessStage, message: impl Into<String>, at: DateTime<Utc>) {
        let message = message.into();
        let sequence = self.entries.len() as u64 + 1;
        tracing::info!(sequence, stage = ?stage, "{message}");
        self.entries.push(TraceEntry {
            sequence,
            stage,
            message,
            at,
        });
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.message.as_str())
    }
}
