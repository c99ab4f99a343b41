//! Multi-signal name matcher.
//!
//! Four independent signals are computed on the normalized pair:
//!   - Jaro–Winkler similarity
//!   - Levenshtein distance
//!   - Soundex equality
//!   - word inversion (see inversion.rs)
//!
//! The threshold policy ORs them into one decision. Every comparison is a
//! pure function of its two inputs; the Matcher holds configuration only and
//! is shared freely across threads.

use crate::{
    config::{ScreeningConfig, ThresholdPolicy},
    inversion::{InversionKind, WordInversion},
    normalizer::Normalizer,
    phonetic::soundex,
    types::RowIndex,
    watchlist::WatchlistEntry,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use strsim::{jaro_winkler, levenshtein};

/// Raw inputs to the threshold policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signals {
    pub jaro: f64,
    pub levenshtein: usize,
    pub soundex_match: bool,
    pub word_inversion: bool,
    /// Character count of the shorter normalized name.
    pub name_length: usize,
}

/// Outcome of one candidate/entry comparison, with the scores behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDecision {
    pub candidate: String,
    pub entry: String,
    pub jaro: f64,
    pub levenshtein: usize,
    pub soundex_match: bool,
    pub word_inversion: bool,
    pub inversion_kind: Option<InversionKind>,
    pub is_match: bool,
}

/// Result for one watch-list row. `decision` is None when the row had no
/// usable full name and was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct RowOutcome {
    pub row: RowIndex,
    pub decision: Option<MatchDecision>,
}

impl RowOutcome {
    pub fn is_match(&self) -> bool {
        self.decision.as_ref().is_some_and(|d| d.is_match)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Matcher {
    normalizer: Normalizer,
    inversion: WordInversion,
    policy: ThresholdPolicy,
}

impl Matcher {
    pub fn new(config: &ScreeningConfig) -> Self {
        Self {
            normalizer: Normalizer::new(config.transliteration.clone()),
            inversion: WordInversion::new(config.inversion),
            policy: config.policy,
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn policy(&self) -> &ThresholdPolicy {
        &self.policy
    }

    /// Normalize both names and compare them. This is the raw pairwise
    /// comparison: two blank names compare as identical. List scans
    /// (`check_list`, `Screener::screen`) reject a blank candidate first.
    pub fn is_similar(&self, candidate: &str, entry: &str) -> MatchDecision {
        let candidate_norm = self.normalizer.normalize(candidate);
        let entry_norm = self.normalizer.normalize(entry);
        self.compare_normalized(&candidate_norm, &entry_norm)
    }

    /// Compare two names that are already normalized.
    pub fn compare_normalized(&self, candidate_norm: &str, entry_norm: &str) -> MatchDecision {
        let inversion_kind = self.inversion.detect(candidate_norm, entry_norm);
        let signals = Signals {
            jaro: jaro_winkler(candidate_norm, entry_norm),
            levenshtein: levenshtein(candidate_norm, entry_norm),
            soundex_match: soundex(candidate_norm) == soundex(entry_norm),
            word_inversion: inversion_kind.is_some(),
            name_length: candidate_norm
                .chars()
                .count()
                .min(entry_norm.chars().count()),
        };
        let is_match = self.policy.decide(&signals);

        log::debug!(
            "compare '{candidate_norm}' vs '{entry_norm}' | jaro={:.3} lev={} soundex={} inversion={}",
            signals.jaro,
            signals.levenshtein,
            signals.soundex_match,
            signals.word_inversion
        );
        if is_match {
            log::info!(
                "match '{candidate_norm}' ~ '{entry_norm}' (jaro={:.3} lev={} soundex={} inversion={:?})",
                signals.jaro,
                signals.levenshtein,
                signals.soundex_match,
                inversion_kind
            );
        }

        MatchDecision {
            candidate: candidate_norm.to_string(),
            entry: entry_norm.to_string(),
            jaro: signals.jaro,
            levenshtein: signals.levenshtein,
            soundex_match: signals.soundex_match,
            word_inversion: signals.word_inversion,
            inversion_kind,
            is_match,
        }
    }

    /// Compare the candidate against every row, in list order.
    pub fn evaluate(&self, candidate: &str, entries: &[WatchlistEntry]) -> Vec<RowOutcome> {
        let candidate_norm = self.normalizer.normalize(candidate);
        entries
            .iter()
            .enumerate()
            .map(|(row, entry)| self.evaluate_row(&candidate_norm, row, entry))
            .collect()
    }

    /// Same as `evaluate`, spread across the rayon pool. Output order is
    /// identical to the sequential scan.
    pub fn par_evaluate(&self, candidate: &str, entries: &[WatchlistEntry]) -> Vec<RowOutcome> {
        let candidate_norm = self.normalizer.normalize(candidate);
        entries
            .par_iter()
            .enumerate()
            .map(|(row, entry)| self.evaluate_row(&candidate_norm, row, entry))
            .collect()
    }

    /// Records whose full name matches the candidate. Rows without a usable
    /// full name are skipped, and a blank candidate matches nothing.
    /// Returned records are unmodified clones.
    pub fn check_list(&self, candidate: &str, entries: &[WatchlistEntry]) -> Vec<WatchlistEntry> {
        if self.is_blank(candidate) {
            return Vec::new();
        }
        collect_matches(self.evaluate(candidate, entries), entries)
    }

    pub fn par_check_list(&self, candidate: &str, entries: &[WatchlistEntry]) -> Vec<WatchlistEntry> {
        if self.is_blank(candidate) {
            return Vec::new();
        }
        collect_matches(self.par_evaluate(candidate, entries), entries)
    }

    /// True when `name` normalizes to the empty string. Such a name sits
    /// within edit distance of every short entry, so list scans refuse it.
    pub fn is_blank(&self, name: &str) -> bool {
        let blank = self.normalizer.normalize(name).is_empty();
        if blank {
            log::warn!("blank candidate name, no comparisons made");
        }
        blank
    }

    fn evaluate_row(&self, candidate_norm: &str, row: RowIndex, entry: &WatchlistEntry) -> RowOutcome {
        let decision = entry.screening_name().map(|name| {
            let entry_norm = self.normalizer.normalize(&name);
            self.compare_normalized(candidate_norm, &entry_norm)
        });
        RowOutcome { row, decision }
    }
}

fn collect_matches(outcomes: Vec<RowOutcome>, entries: &[WatchlistEntry]) -> Vec<WatchlistEntry> {
    outcomes
        .into_iter()
        .filter(RowOutcome::is_match)
        .map(|o| entries[o.row].clone())
        .collect()
}

/// Boolean similarity check with the default configuration.
pub fn is_similar(candidate: &str, entry: &str) -> bool {
    Matcher::default().is_similar(candidate, entry).is_match
}
