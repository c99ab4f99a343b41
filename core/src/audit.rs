//! The audit trail: every screening decision, as structured events.
//!
//! RULE: the matcher never writes to a transport directly.
//! The Screener emits ScreeningEvents into an AuditSink; where they end up
//! (log, memory, SQLite) is the sink's business.
//!
//! Recording is infallible from the caller's point of view. A sink that
//! cannot persist an event logs the failure and carries on.

use crate::{
    matcher::MatchDecision,
    types::{RowIndex, ScreeningId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

pub const AUDIT_LOG_TARGET: &str = "aml_audit";

/// Variants are append-only; stored payloads depend on the tag names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScreeningEvent {
    ScreeningStarted {
        screening_id: ScreeningId,
        candidate: String,
        candidate_norm: String,
        entries: usize,
        started_at: DateTime<Utc>,
    },
    ComparisonEvaluated {
        screening_id: ScreeningId,
        row: RowIndex,
        decision: MatchDecision,
    },
    EntrySkipped {
        screening_id: ScreeningId,
        row: RowIndex,
        reason: String,
    },
    ScreeningCompleted {
        screening_id: ScreeningId,
        scanned: usize,
        skipped: usize,
        matches: usize,
    },
}

impl ScreeningEvent {
    pub fn screening_id(&self) -> ScreeningId {
        match self {
            Self::ScreeningStarted { screening_id, .. }
            | Self::ComparisonEvaluated { screening_id, .. }
            | Self::EntrySkipped { screening_id, .. }
            | Self::ScreeningCompleted { screening_id, .. } => *screening_id,
        }
    }

    /// Stable name used for the event_type column.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ScreeningStarted { .. } => "screening_started",
            Self::ComparisonEvaluated { .. } => "comparison_evaluated",
            Self::EntrySkipped { .. } => "entry_skipped",
            Self::ScreeningCompleted { .. } => "screening_completed",
        }
    }
}

/// Destination for audit events. Must tolerate concurrent `record` calls.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: &ScreeningEvent);
}

/// Writes each event as a JSON line through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl AuditSink for LogSink {
    fn record(&self, event: &ScreeningEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => log::debug!(target: AUDIT_LOG_TARGET, "{payload}"),
            Err(e) => log::warn!(target: AUDIT_LOG_TARGET, "unserializable audit event: {e}"),
        }
    }
}

/// Keeps events in memory. Used in tests and by callers that want the
/// trail handed back to them.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ScreeningEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ScreeningEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn len(&self) -> usize {
        self.events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemorySink {
    fn record(&self, event: &ScreeningEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}
