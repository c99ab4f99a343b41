//! Watch-list scans and screening reports.
//!
//! Verifies that:
//!   - Blank or missing full names are skipped, never matched
//!   - Matched records keep every original field unmodified
//!   - An empty watch-list yields an empty result
//!   - Parallel and sequential scans agree, in order
//!   - The Screener writes a complete, ordered audit trail

use amlscreen_core::{
    audit::{MemorySink, ScreeningEvent},
    matcher::Matcher,
    name_generator::WatchlistGenerator,
    watchlist::parse_watchlist_json,
    ScreeningConfig, Screener, WatchlistEntry,
};
use serde_json::json;
use std::sync::Arc;

fn sample_list() -> Vec<WatchlistEntry> {
    parse_watchlist_json(
        r#"[
            {"Full Name": "", "Risk Category": "Sanctions", "Source": "OFAC SDN"},
            {"Full Name": "Ali Hassan", "Risk Category": "PEP", "Source": "CTAF",
             "Risk Type": "High", "Notes": "former minister", "Listed": 2019},
            {"Risk Category": "Fraud"},
            {"Full Name": null, "Source": "Internal"},
            {"Full Name": "Vladimir Petrov", "Risk Category": "Sanctions"}
        ]"#,
    )
    .unwrap()
}

#[test]
fn blank_entries_are_skipped() {
    let matches = Matcher::default().check_list("Ali Hassan", &sample_list());
    assert_eq!(matches.len(), 1, "expected one match, got {matches:?}");
    assert_eq!(matches[0].full_name.as_deref(), Some("Ali Hassan"));
}

#[test]
fn matched_records_preserve_every_field() {
    let list = sample_list();
    let matches = Matcher::default().check_list("HASSAN ali", &list);
    assert_eq!(matches.len(), 1);

    let original = &list[1];
    let returned = &matches[0];
    assert_eq!(returned, original);
    assert_eq!(returned.attribute("Notes"), Some(&json!("former minister")));
    assert_eq!(returned.attribute("Listed"), Some(&json!(2019)));
    assert_eq!(returned.attributes.len(), 5);
}

#[test]
fn empty_watchlist_yields_empty_result() {
    assert!(Matcher::default().check_list("Ali Hassan", &[]).is_empty());
}

#[test]
fn no_match_is_an_empty_result() {
    let matches = Matcher::default().check_list("Jean Dupont", &sample_list());
    assert!(matches.is_empty(), "unexpected matches: {matches:?}");
}

#[test]
fn numeric_full_names_are_coerced_to_text() {
    let list = parse_watchlist_json(r#"[{"Full Name": 12345}, {"Full Name": true}]"#).unwrap();
    assert_eq!(list[0].full_name.as_deref(), Some("12345"));
    assert_eq!(list[1].full_name.as_deref(), Some("true"));

    let matches = Matcher::default().check_list("12345", &list);
    assert_eq!(matches.len(), 1);
}

#[test]
fn records_round_trip_through_json() {
    let list = sample_list();
    let json = serde_json::to_string(&list[1]).unwrap();
    let back: WatchlistEntry = serde_json::from_str(&json).unwrap();
    assert_eq!(back, list[1]);
}

#[test]
fn parallel_scan_matches_sequential_scan() {
    let list = WatchlistGenerator::new(2024).generate(500);
    let matcher = Matcher::default();

    for candidate in ["Ahmed Trabelsi", "Ben Ali Mohamed", "محمد منصور", "Sofia Santos"] {
        let sequential = matcher.check_list(candidate, &list);
        let parallel = matcher.par_check_list(candidate, &list);
        assert_eq!(sequential, parallel, "scans diverged for {candidate}");
    }
}

#[test]
fn screener_reports_matches_and_skips() {
    let sink = Arc::new(MemorySink::new());
    let screener = Screener::new(&ScreeningConfig::default(), sink.clone());

    let report = screener.screen("Ali Hassan", &sample_list());
    assert!(report.is_hit());
    assert_eq!(report.candidate_norm, "ali hassan");
    assert_eq!(report.scanned, 2);
    assert_eq!(report.skipped, 3);
    assert_eq!(report.matches.len(), 1);
    assert_eq!(report.matches[0].row, 1);
    assert!(report.matches[0].decision.is_match);
    assert_eq!(
        report.matched_entries().next().and_then(|e| e.full_name.as_deref()),
        Some("Ali Hassan")
    );
}

#[test]
fn audit_trail_covers_every_row_in_order() {
    let sink = Arc::new(MemorySink::new());
    let screener = Screener::new(&ScreeningConfig::default(), sink.clone());
    let list = sample_list();

    let report = screener.screen("Ali Hassan", &list);
    let events = sink.events();

    // started + one per row + completed
    assert_eq!(events.len(), list.len() + 2);
    assert!(events.iter().all(|e| e.screening_id() == report.screening_id));
    assert_eq!(events.first().unwrap().event_type(), "screening_started");
    assert_eq!(events.last().unwrap().event_type(), "screening_completed");

    let rows: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            ScreeningEvent::ComparisonEvaluated { row, .. } | ScreeningEvent::EntrySkipped { row, .. } => {
                Some(*row)
            }
            _ => None,
        })
        .collect();
    assert_eq!(rows, vec![0, 1, 2, 3, 4]);

    match events.last().unwrap() {
        ScreeningEvent::ScreeningCompleted { scanned, skipped, matches, .. } => {
            assert_eq!((*scanned, *skipped, *matches), (2, 3, 1));
        }
        other => panic!("expected completion event, got {other:?}"),
    }
}

#[test]
fn comparison_events_carry_all_signals() {
    let sink = Arc::new(MemorySink::new());
    let screener = Screener::new(&ScreeningConfig::default(), sink.clone());
    screener.screen("Smith John", &[WatchlistEntry::new("John Smith")]);

    let decision = sink
        .events()
        .into_iter()
        .find_map(|e| match e {
            ScreeningEvent::ComparisonEvaluated { decision, .. } => Some(decision),
            _ => None,
        })
        .expect("comparison event");

    assert_eq!(decision.candidate, "smith john");
    assert_eq!(decision.entry, "john smith");
    assert!(decision.word_inversion);
    assert!(decision.is_match);

    let payload = serde_json::to_value(&decision).unwrap();
    for key in ["jaro", "levenshtein", "soundex_match", "word_inversion", "is_match"] {
        assert!(payload.get(key).is_some(), "payload missing {key}: {payload}");
    }
}

#[test]
fn blank_candidate_makes_no_comparisons() {
    let sink = Arc::new(MemorySink::new());
    let screener = Screener::new(&ScreeningConfig::default(), sink.clone());

    let report = screener.screen("   ", &[WatchlistEntry::new("Ali")]);
    assert!(!report.is_hit());
    assert_eq!(report.scanned, 0);
    assert_eq!(sink.len(), 2, "only start and completion events expected");
}

#[test]
fn blank_candidate_matches_nothing_in_a_list_scan() {
    // "" is within three edits of "ali" and would otherwise match.
    let list = vec![WatchlistEntry::new("Ali"), WatchlistEntry::new("Bo")];
    let matcher = Matcher::default();
    assert!(matcher.is_blank("  \t "));
    assert!(matcher.check_list("   ", &list).is_empty());
    assert!(matcher.par_check_list("", &list).is_empty());

    let screener = Screener::with_log_sink(&ScreeningConfig::default());
    assert!(!screener.screen("   ", &list).is_hit());
}

#[test]
fn parallel_screener_produces_the_same_report_body() {
    let list = WatchlistGenerator::new(77).generate(300);
    let sequential = Screener::new(&ScreeningConfig::default(), Arc::new(MemorySink::new()));
    let parallel = Screener::new(
        &ScreeningConfig {
            parallel_scan: true,
            ..ScreeningConfig::default()
        },
        Arc::new(MemorySink::new()),
    );

    let a = sequential.screen("Karim Haddad", &list);
    let b = parallel.screen("Karim Haddad", &list);
    assert_eq!(a.scanned, b.scanned);
    assert_eq!(a.skipped, b.skipped);
    let rows_a: Vec<usize> = a.matches.iter().map(|m| m.row).collect();
    let rows_b: Vec<usize> = b.matches.iter().map(|m| m.row).collect();
    assert_eq!(rows_a, rows_b);
}
