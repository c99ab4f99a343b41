//! Word-inversion detection.
//!
//! Verifies each of the three cases and their fall-through order:
//!   A. identical token sets in another order
//!   B. two-word names matching directly or swapped above 0.75
//!   C. one strong (> 0.85) and one corroborating (> 0.75) token pair

use amlscreen_core::{
    check_word_inversion,
    config::InversionThresholds,
    inversion::{InversionKind, WordInversion},
};

fn detect(a: &str, b: &str) -> Option<InversionKind> {
    WordInversion::default().detect(a, b)
}

#[test]
fn exact_swap_of_two_words() {
    assert!(check_word_inversion("oumeyma sokkeh", "sokkeh oumeyma"));
    assert_eq!(detect("oumeyma sokkeh", "sokkeh oumeyma"), Some(InversionKind::ExactReorder));
}

#[test]
fn known_swaps_are_detected() {
    for (a, b) in [
        ("sokkeh oumeyma", "oumeyma sokkeh"),
        ("john smith", "smith john"),
        ("ahmed ben", "ben ahmed"),
        ("marie dupont", "dupont marie"),
    ] {
        assert!(check_word_inversion(a, b), "{a} / {b} should be an inversion");
    }
}

#[test]
fn three_word_reorder_is_exact() {
    assert_eq!(
        detect("mohamed ben salah", "salah mohamed ben"),
        Some(InversionKind::ExactReorder)
    );
}

#[test]
fn identical_names_count_as_reorder() {
    assert_eq!(detect("ali hassan", "ali hassan"), Some(InversionKind::ExactReorder));
}

#[test]
fn duplicate_tokens_are_ignored_by_set_comparison() {
    // Same count, same distinct set.
    assert_eq!(detect("ali ali hassan", "hassan hassan ali"), Some(InversionKind::ExactReorder));
}

#[test]
fn misspelled_swap_uses_two_word_case() {
    // "sokeh" vs "sokkeh" is close but not identical.
    assert_eq!(detect("oumeyma sokeh", "sokkeh oumeyma"), Some(InversionKind::SwappedPair));
}

#[test]
fn partial_reorder_across_unequal_lengths() {
    // "karim"="karim" anchors, "trabelsi"~"trabelsy" corroborates.
    assert_eq!(
        detect("ahmed karim trabelsi", "karim trabelsy mansour"),
        Some(InversionKind::PartialReorder)
    );
    assert_eq!(
        detect("jean pierre dupont", "dupont jean"),
        Some(InversionKind::PartialReorder)
    );
}

#[test]
fn single_tokens_never_invert_unless_equal() {
    assert_eq!(detect("ahmed", "ahmad"), None);
    assert_eq!(detect("ahmed", "ahmed"), Some(InversionKind::ExactReorder));
}

#[test]
fn unrelated_two_word_names_do_not_invert() {
    assert_eq!(detect("jean dupont", "ali trabelsi"), None);
    assert!(!check_word_inversion("sarah johnson", "mohamed trabelsi"));
}

#[test]
fn one_strong_pair_without_corroboration_is_not_enough() {
    // "ali" anchors but nothing else lines up.
    assert_eq!(detect("ali zzzz qqqq", "ali xxxx"), None);
}

#[test]
fn thresholds_are_configurable() {
    let strict = WordInversion::new(InversionThresholds {
        swapped_pair_above: 0.99,
        strong_token_above: 0.99,
        corroborating_token_above: 0.99,
    });
    assert_eq!(strict.detect("oumeyma sokeh", "sokkeh oumeyma"), None);
    // Case A does not depend on thresholds.
    assert_eq!(
        strict.detect("oumeyma sokkeh", "sokkeh oumeyma"),
        Some(InversionKind::ExactReorder)
    );
}

#[test]
fn partial_reorder_removes_every_copy_of_the_strong_token() {
    // "ali" pairs strongly; with both copies gone only "zz"/"yy" remain.
    assert_eq!(detect("ali ali zz", "ali ali yy"), None);
    assert!(!check_word_inversion("ali ali zz", "ali ali yy"));
}
