//! Word-inversion detection between two normalized names.
//!
//! Catches given-name/family-name swaps and reordered multi-part names.
//! Three cases are tried in order; the first that fires wins:
//!   A. Same token count and the same set of distinct tokens.
//!   B. Exactly two tokens each, and the better of the direct or swapped
//!      pairing has a mean Jaro–Winkler above `swapped_pair_above`.
//!   C. Two or more tokens each: one token pair above `strong_token_above`,
//!      then, with every copy of those tokens removed, one residual pair
//!      above `corroborating_token_above`. First qualifying pair wins.

use crate::config::InversionThresholds;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strsim::jaro_winkler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InversionKind {
    /// Case A: identical token set in a different order.
    ExactReorder,
    /// Case B: two-word names that line up directly or swapped.
    SwappedPair,
    /// Case C: one strong and one corroborating token pair.
    PartialReorder,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WordInversion {
    thresholds: InversionThresholds,
}

impl WordInversion {
    pub fn new(thresholds: InversionThresholds) -> Self {
        Self { thresholds }
    }

    pub fn detect(&self, input: &str, target: &str) -> Option<InversionKind> {
        let input_words: Vec<&str> = input.split_whitespace().collect();
        let target_words: Vec<&str> = target.split_whitespace().collect();

        if same_token_set(&input_words, &target_words) {
            return Some(InversionKind::ExactReorder);
        }

        if input_words.len() == 2 && target_words.len() == 2 {
            let normal_sim = (jaro_winkler(input_words[0], target_words[0])
                + jaro_winkler(input_words[1], target_words[1]))
                / 2.0;
            let inverse_sim = (jaro_winkler(input_words[0], target_words[1])
                + jaro_winkler(input_words[1], target_words[0]))
                / 2.0;

            if normal_sim.max(inverse_sim) > self.thresholds.swapped_pair_above {
                log::debug!(
                    "inversion: swapped pair normal={normal_sim:.3} inverse={inverse_sim:.3}"
                );
                return Some(InversionKind::SwappedPair);
            }
        }

        if input_words.len() >= 2 && target_words.len() >= 2 {
            return self.partial_reorder(&input_words, &target_words);
        }

        None
    }

    fn partial_reorder(&self, input_words: &[&str], target_words: &[&str]) -> Option<InversionKind> {
        for &i_word in input_words {
            for &t_word in target_words {
                if jaro_winkler(i_word, t_word) <= self.thresholds.strong_token_above {
                    continue;
                }
                let remaining_target: Vec<&str> = target_words
                    .iter()
                    .copied()
                    .filter(|w| *w != t_word)
                    .collect();

                for ri_word in input_words.iter().copied().filter(|w| *w != i_word) {
                    for &rt_word in &remaining_target {
                        if jaro_winkler(ri_word, rt_word) > self.thresholds.corroborating_token_above {
                            log::debug!(
                                "inversion: partial '{i_word}'~'{t_word}' and '{ri_word}'~'{rt_word}'"
                            );
                            return Some(InversionKind::PartialReorder);
                        }
                    }
                }
            }
        }
        None
    }
}

fn same_token_set(a: &[&str], b: &[&str]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let a: HashSet<&str> = a.iter().copied().collect();
    let b: HashSet<&str> = b.iter().copied().collect();
    a == b
}

/// Boolean inversion check with the default thresholds.
pub fn check_word_inversion(input: &str, target: &str) -> bool {
    WordInversion::default().detect(input, target).is_some()
}
