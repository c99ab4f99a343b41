//! Screening configuration: threshold policy, inversion thresholds and the
//! Arabic-to-Latin transliteration table.
//!
//! RULE: configuration is read once and handed to the Normalizer and Matcher
//! by value. Nothing mutates it after construction.

use crate::{
    error::{ScreenError, ScreenResult},
    matcher::Signals,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Defaults ─────────────────────────────────────────────────────────────────

const SHORT_NAME_LEN: usize = 8;
const SHORT_JARO_ABOVE: f64 = 0.65;
const SHORT_LEVENSHTEIN_BELOW: usize = 4;
const LONG_JARO_ABOVE: f64 = 0.75;
const LONG_LEVENSHTEIN_BELOW: usize = 5;

const FIXED_JARO_ABOVE: f64 = 0.88;
const FIXED_LEVENSHTEIN_BELOW: usize = 4;

const SWAPPED_PAIR_ABOVE: f64 = 0.75;
const STRONG_TOKEN_ABOVE: f64 = 0.85;
const CORROBORATING_TOKEN_ABOVE: f64 = 0.75;

/// Arabic letters and hamza variants with their Latin approximation.
const ARABIC_TO_LATIN: &[(char, &str)] = &[
    ('ا', "a"), ('ب', "b"), ('ت', "t"), ('ث', "th"), ('ج', "j"),
    ('ح', "h"), ('خ', "kh"), ('د', "d"), ('ذ', "dh"), ('ر', "r"),
    ('ز', "z"), ('س', "s"), ('ش', "sh"), ('ص', "s"), ('ض', "d"),
    ('ط', "t"), ('ظ', "z"), ('ع', "a"), ('غ', "gh"), ('ف', "f"),
    ('ق', "q"), ('ك', "k"), ('ل', "l"), ('م', "m"), ('ن', "n"),
    ('ه', "h"), ('و', "w"), ('ي', "y"),
    // Hamza carriers and final forms
    ('ء', ""), ('ى', "a"), ('ة', "a"), ('أ', "a"), ('إ', "i"), ('آ', "aa"),
];

// ── Threshold policy ─────────────────────────────────────────────────────────

/// One pair of direct-match thresholds. Both comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// A Jaro–Winkler score strictly above this value is a match.
    pub jaro_above: f64,
    /// A Levenshtein distance strictly below this value is a match.
    pub levenshtein_below: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThresholdPolicy {
    /// Looser thresholds for names shorter than `short_name_len` characters.
    /// Soundex equality and word inversion both count as a match.
    LengthDependent {
        short_name_len: usize,
        short: Thresholds,
        long: Thresholds,
    },
    /// One rule for every length. Word inversion is reported but ignored.
    Fixed { thresholds: Thresholds },
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::LengthDependent {
            short_name_len: SHORT_NAME_LEN,
            short: Thresholds {
                jaro_above: SHORT_JARO_ABOVE,
                levenshtein_below: SHORT_LEVENSHTEIN_BELOW,
            },
            long: Thresholds {
                jaro_above: LONG_JARO_ABOVE,
                levenshtein_below: LONG_LEVENSHTEIN_BELOW,
            },
        }
    }
}

impl ThresholdPolicy {
    /// The single-threshold policy of the simpler screening variant.
    pub fn fixed() -> Self {
        Self::Fixed {
            thresholds: Thresholds {
                jaro_above: FIXED_JARO_ABOVE,
                levenshtein_below: FIXED_LEVENSHTEIN_BELOW,
            },
        }
    }

    /// Thresholds that apply when the shorter normalized name has
    /// `name_length` characters.
    pub fn thresholds_for(&self, name_length: usize) -> Thresholds {
        match *self {
            Self::LengthDependent { short_name_len, short, long } => {
                if name_length < short_name_len {
                    short
                } else {
                    long
                }
            }
            Self::Fixed { thresholds } => thresholds,
        }
    }

    pub fn counts_word_inversion(&self) -> bool {
        matches!(self, Self::LengthDependent { .. })
    }

    /// Combine the four signals into the final boolean decision.
    pub fn decide(&self, signals: &Signals) -> bool {
        let t = self.thresholds_for(signals.name_length);
        signals.jaro > t.jaro_above
            || signals.levenshtein < t.levenshtein_below
            || signals.soundex_match
            || (self.counts_word_inversion() && signals.word_inversion)
    }

    fn validate(&self) -> ScreenResult<()> {
        let all = match *self {
            Self::LengthDependent { short, long, .. } => vec![short, long],
            Self::Fixed { thresholds } => vec![thresholds],
        };
        for t in all {
            check_unit_interval("jaro_above", t.jaro_above)?;
        }
        Ok(())
    }
}

// ── Word inversion thresholds ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InversionThresholds {
    /// Two-word names: mean token similarity (direct or swapped) must exceed this.
    pub swapped_pair_above: f64,
    /// Multi-word names: the anchoring token pair must exceed this.
    pub strong_token_above: f64,
    /// Multi-word names: one residual token pair must exceed this.
    pub corroborating_token_above: f64,
}

impl Default for InversionThresholds {
    fn default() -> Self {
        Self {
            swapped_pair_above: SWAPPED_PAIR_ABOVE,
            strong_token_above: STRONG_TOKEN_ABOVE,
            corroborating_token_above: CORROBORATING_TOKEN_ABOVE,
        }
    }
}

impl InversionThresholds {
    fn validate(&self) -> ScreenResult<()> {
        check_unit_interval("swapped_pair_above", self.swapped_pair_above)?;
        check_unit_interval("strong_token_above", self.strong_token_above)?;
        check_unit_interval("corroborating_token_above", self.corroborating_token_above)
    }
}

// ── Transliteration table ────────────────────────────────────────────────────

/// Character-level mapping from Arabic script to a Latin approximation.
/// Serialized as a JSON object of single-character keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct TransliterationTable {
    map: BTreeMap<char, String>,
}

impl Default for TransliterationTable {
    fn default() -> Self {
        Self {
            map: ARABIC_TO_LATIN
                .iter()
                .map(|(c, latin)| (*c, latin.to_string()))
                .collect(),
        }
    }
}

impl TransliterationTable {
    pub fn get(&self, c: char) -> Option<&str> {
        self.map.get(&c).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl TryFrom<BTreeMap<String, String>> for TransliterationTable {
    type Error = ScreenError;

    fn try_from(raw: BTreeMap<String, String>) -> ScreenResult<Self> {
        let mut map = BTreeMap::new();
        for (key, latin) in raw {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    map.insert(c, latin);
                }
                _ => {
                    return Err(ScreenError::InvalidConfig {
                        reason: format!("transliteration key '{key}' must be a single character"),
                    })
                }
            }
        }
        Ok(Self { map })
    }
}

impl From<TransliterationTable> for BTreeMap<String, String> {
    fn from(table: TransliterationTable) -> Self {
        table
            .map
            .into_iter()
            .map(|(c, latin)| (c.to_string(), latin))
            .collect()
    }
}

// ── Top-level config ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScreeningConfig {
    pub policy: ThresholdPolicy,
    pub inversion: InversionThresholds,
    pub transliteration: TransliterationTable,
    /// Scan watch-list entries on the rayon pool instead of sequentially.
    pub parallel_scan: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct MatchPolicyFile {
    policy: ThresholdPolicy,
    inversion: InversionThresholds,
    #[serde(default)]
    parallel_scan: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct TransliterationFile {
    mapping: TransliterationTable,
}

impl ScreeningConfig {
    /// Load from the data/ directory.
    /// In tests, use ScreeningConfig::default().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let policy_path = format!("{data_dir}/screening/match_policy.json");
        let policy_content = std::fs::read_to_string(&policy_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {policy_path}: {e}"))?;
        let policy_file: MatchPolicyFile = serde_json::from_str(&policy_content)?;

        let translit_path = format!("{data_dir}/screening/transliteration.json");
        let translit_content = std::fs::read_to_string(&translit_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {translit_path}: {e}"))?;
        let translit_file: TransliterationFile = serde_json::from_str(&translit_content)?;

        let config = Self {
            policy: policy_file.policy,
            inversion: policy_file.inversion,
            transliteration: translit_file.mapping,
            parallel_scan: policy_file.parallel_scan,
        };
        config.validate()?;

        log::info!(
            "screening config loaded from {data_dir}: policy={:?} translit_entries={}",
            config.policy,
            config.transliteration.len()
        );
        Ok(config)
    }

    pub fn validate(&self) -> ScreenResult<()> {
        self.policy.validate()?;
        self.inversion.validate()
    }
}

fn check_unit_interval(name: &str, value: f64) -> ScreenResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ScreenError::InvalidConfig {
            reason: format!("{name} must lie in [0, 1], got {value}"),
        })
    }
}
