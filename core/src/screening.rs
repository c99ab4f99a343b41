//! Screening runs: one candidate against one watch-list snapshot.
//!
//! The Screener wraps the Matcher with what a compliance caller needs around
//! a decision: a screening id, a timestamp, skip accounting, and an audit
//! trail written to the configured sink.

use crate::{
    audit::{AuditSink, LogSink, ScreeningEvent},
    config::ScreeningConfig,
    matcher::{MatchDecision, Matcher},
    types::{RowIndex, ScreeningId},
    watchlist::WatchlistEntry,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningMatch {
    pub row: RowIndex,
    pub entry: WatchlistEntry,
    pub decision: MatchDecision,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub screening_id: ScreeningId,
    pub screened_at: DateTime<Utc>,
    pub candidate: String,
    pub candidate_norm: String,
    /// Rows that were compared against the candidate.
    pub scanned: usize,
    /// Rows skipped for lack of a usable full name.
    pub skipped: usize,
    /// Matching rows in watch-list order.
    pub matches: Vec<ScreeningMatch>,
}

impl ScreeningReport {
    pub fn is_hit(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn matched_entries(&self) -> impl Iterator<Item = &WatchlistEntry> {
        self.matches.iter().map(|m| &m.entry)
    }
}

pub struct Screener {
    matcher: Matcher,
    sink: Arc<dyn AuditSink>,
    parallel: bool,
}

impl Screener {
    pub fn new(config: &ScreeningConfig, sink: Arc<dyn AuditSink>) -> Self {
        Self {
            matcher: Matcher::new(config),
            sink,
            parallel: config.parallel_scan,
        }
    }

    /// Screener whose audit trail goes to the `log` facade.
    pub fn with_log_sink(config: &ScreeningConfig) -> Self {
        Self::new(config, Arc::new(LogSink))
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn screen(&self, candidate: &str, entries: &[WatchlistEntry]) -> ScreeningReport {
        let screening_id = Uuid::new_v4();
        let screened_at = Utc::now();
        let candidate_norm = self.matcher.normalizer().normalize(candidate);

        self.sink.record(&ScreeningEvent::ScreeningStarted {
            screening_id,
            candidate: candidate.to_string(),
            candidate_norm: candidate_norm.clone(),
            entries: entries.len(),
            started_at: screened_at,
        });

        let mut report = ScreeningReport {
            screening_id,
            screened_at,
            candidate: candidate.to_string(),
            candidate_norm,
            scanned: 0,
            skipped: 0,
            matches: Vec::new(),
        };

        // An empty candidate sits within edit distance of every short name.
        if report.candidate_norm.is_empty() {
            log::warn!("screening {screening_id}: blank candidate, no comparisons made");
            self.complete(&report);
            return report;
        }

        let outcomes = if self.parallel {
            self.matcher.par_evaluate(candidate, entries)
        } else {
            self.matcher.evaluate(candidate, entries)
        };

        for outcome in outcomes {
            let Some(decision) = outcome.decision else {
                report.skipped += 1;
                self.sink.record(&ScreeningEvent::EntrySkipped {
                    screening_id,
                    row: outcome.row,
                    reason: "missing or blank full name".to_string(),
                });
                continue;
            };

            report.scanned += 1;
            self.sink.record(&ScreeningEvent::ComparisonEvaluated {
                screening_id,
                row: outcome.row,
                decision: decision.clone(),
            });

            if decision.is_match {
                report.matches.push(ScreeningMatch {
                    row: outcome.row,
                    entry: entries[outcome.row].clone(),
                    decision,
                });
            }
        }

        log::info!(
            "screening {screening_id}: '{}' scanned={} skipped={} matches={}",
            report.candidate_norm,
            report.scanned,
            report.skipped,
            report.matches.len()
        );
        self.complete(&report);
        report
    }

    fn complete(&self, report: &ScreeningReport) {
        self.sink.record(&ScreeningEvent::ScreeningCompleted {
            screening_id: report.screening_id,
            scanned: report.scanned,
            skipped: report.skipped,
            matches: report.matches.len(),
        });
    }
}
