//! Normalizer behaviour.
//!
//! Verifies that:
//!   - Whitespace is trimmed and case folded
//!   - Arabic script is transliterated letter by letter
//!   - Non-Arabic characters keep their position
//!   - normalize() is idempotent
//!   - A custom table injected at construction is honoured

use amlscreen_core::{
    config::TransliterationTable,
    normalize,
    normalizer::{contains_arabic, Normalizer},
};
use std::collections::BTreeMap;

#[test]
fn trims_and_lowercases() {
    assert_eq!(normalize("  John SMITH \t"), "john smith");
}

#[test]
fn empty_and_blank_inputs_normalize_to_empty() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("   \n"), "");
}

/// ا→a, ح→h, م→m, د→d.
#[test]
fn transliterates_ahmad() {
    let out = normalize("احمد");
    assert_eq!(out, "ahmd");
    assert!(out.starts_with('a'));
    assert!(out.contains('h'));
    assert!(out.ends_with('d'));
}

#[test]
fn transliteration_is_deterministic() {
    let first = normalize("محمد");
    for _ in 0..10 {
        assert_eq!(normalize("محمد"), first);
    }
    assert_eq!(first, "mhmd");
}

#[test]
fn digraph_letters_expand() {
    // ش→sh, خ→kh, غ→gh, ذ→dh, ث→th
    assert_eq!(normalize("شخغذث"), "shkhghdhth");
}

#[test]
fn hamza_variants() {
    assert_eq!(normalize("أ"), "a");
    assert_eq!(normalize("إ"), "i");
    assert_eq!(normalize("آ"), "aa");
    assert_eq!(normalize("ء"), "");
    assert_eq!(normalize("فاطمة"), "fatma");
}

#[test]
fn mixed_script_keeps_latin_digits_and_punctuation_in_place() {
    assert_eq!(normalize("Ali علي-2"), "ali aly-2");
}

#[test]
fn other_scripts_pass_through() {
    assert_eq!(normalize("Владимир"), "владимир");
    assert_eq!(normalize("王伟"), "王伟");
}

#[test]
fn dropped_hamza_at_the_edge_leaves_no_whitespace() {
    assert_eq!(normalize("ء علي"), "aly");
}

#[test]
fn normalize_is_idempotent() {
    let samples = [
        "",
        "  John Smith  ",
        "OUMEYMA Sokkeh",
        "محمد علي",
        "ء علي ء",
        "Ali علي-2",
        "Владимир Путин",
        "\u{064E}محمد",
    ];
    for s in samples {
        let once = normalize(s);
        assert_eq!(normalize(&once), once, "normalize not idempotent for {s:?}");
    }
}

#[test]
fn detects_arabic_block() {
    assert!(contains_arabic("abc ب"));
    assert!(!contains_arabic("abc"));
    assert!(!contains_arabic("Владимир"));
}

#[test]
fn injected_table_is_used() {
    let mut raw = BTreeMap::new();
    raw.insert("م".to_string(), "M".to_string());
    let table = TransliterationTable::try_from(raw).unwrap();
    let normalizer = Normalizer::new(table);

    // Letters missing from the custom table pass through untouched.
    assert_eq!(normalizer.normalize("محمد"), "MحMد");
}

#[test]
fn multi_character_table_keys_are_rejected() {
    let mut raw = BTreeMap::new();
    raw.insert("مح".to_string(), "mh".to_string());
    assert!(TransliterationTable::try_from(raw).is_err());
}
