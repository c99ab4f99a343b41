//! Name normalization: trim, lower-case, and transliterate Arabic script.

use crate::config::TransliterationTable;

const ARABIC_BLOCK: std::ops::RangeInclusive<char> = '\u{0600}'..='\u{06FF}';

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    table: TransliterationTable,
}

impl Normalizer {
    pub fn new(table: TransliterationTable) -> Self {
        Self { table }
    }

    /// Produce the comparable form of a name.
    ///
    /// Total over all input: the result may be empty but is never an error.
    /// Characters outside the transliteration table keep their position.
    pub fn normalize(&self, name: &str) -> String {
        let lowered = name.trim().to_lowercase();
        if !contains_arabic(&lowered) {
            return lowered;
        }
        let mut out = String::with_capacity(lowered.len());
        for c in lowered.chars() {
            match self.table.get(c) {
                Some(latin) => out.push_str(latin),
                None => out.push(c),
            }
        }
        // A dropped hamza at either end can expose whitespace.
        if out.trim().len() == out.len() {
            out
        } else {
            out.trim().to_owned()
        }
    }

    pub fn table(&self) -> &TransliterationTable {
        &self.table
    }
}

/// Normalize with the default transliteration table.
pub fn normalize(name: &str) -> String {
    Normalizer::default().normalize(name)
}

pub fn contains_arabic(s: &str) -> bool {
    s.chars().any(|c| ARABIC_BLOCK.contains(&c))
}
