//! Deterministic synthetic watch-list generation.
//!
//! Produces records shaped like a real list: Latin and Arabic-script names,
//! some with swapped order or a dropped letter, plus the usual auxiliary
//! columns. Intended for load testing and fixture data, never for screening
//! real customers.

use crate::{rng::ScreenRng, watchlist::WatchlistEntry};

const ARABIC_SCRIPT_RATE: f64 = 0.25;
const SWAPPED_ORDER_RATE: f64 = 0.15;
const MISSPELLING_RATE: f64 = 0.10;
const BLANK_NAME_RATE: f64 = 0.02;

const FIRST_NAMES: &[&str] = &[
    "Ahmed", "Mohamed", "Ali", "Omar", "Youssef", "Karim", "Hassan", "Mehdi",
    "Fatima", "Amina", "Leila", "Oumeyma", "Salma", "Nour", "Yasmine", "Sarra",
    "John", "David", "Maria", "Elena", "Jean", "Nikolai", "Carlos", "Sofia",
];

const LAST_NAMES: &[&str] = &[
    "Trabelsi", "Ben Ali", "Hassan", "Mansour", "Haddad", "Jaziri", "Sokkeh", "Gharbi",
    "Bouazizi", "Khelifi", "Smith", "Garcia", "Petrov", "Dubois", "Santos", "Volkov",
];

const ARABIC_FIRST_NAMES: &[&str] = &["محمد", "أحمد", "علي", "عمر", "يوسف", "فاطمة", "ليلى", "حسن"];

const ARABIC_LAST_NAMES: &[&str] = &["الطرابلسي", "منصور", "حداد", "الجزيري", "الغربي", "خليفي"];

const RISK_CATEGORIES: &[&str] = &["Sanctions", "PEP", "Adverse Media", "Fraud", "Terrorist Financing"];

const SOURCES: &[&str] = &["OFAC SDN", "UN Consolidated", "EU Consolidated", "CTAF", "Internal"];

const RISK_TYPES: &[&str] = &["High", "Medium", "Low"];

/// Deterministic watch-list generator.
pub struct WatchlistGenerator {
    rng: ScreenRng,
}

impl WatchlistGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ScreenRng::new(seed),
        }
    }

    /// Generate `count` records.
    pub fn generate(&mut self, count: usize) -> Vec<WatchlistEntry> {
        (0..count).map(|i| self.generate_entry(i)).collect()
    }

    fn generate_entry(&mut self, index: usize) -> WatchlistEntry {
        let full_name = if self.rng.chance(BLANK_NAME_RATE) {
            String::new()
        } else {
            self.generate_full_name()
        };

        WatchlistEntry::new(full_name)
            .with_attribute("Risk Category", *self.rng.pick(RISK_CATEGORIES))
            .with_attribute("Source", *self.rng.pick(SOURCES))
            .with_attribute("Risk Type", *self.rng.pick(RISK_TYPES))
            .with_attribute("Notes", format!("synthetic record {index:05}"))
    }

    /// Generate one full name, possibly in Arabic script, reordered, or
    /// misspelled.
    pub fn generate_full_name(&mut self) -> String {
        let (first, last) = if self.rng.chance(ARABIC_SCRIPT_RATE) {
            (*self.rng.pick(ARABIC_FIRST_NAMES), *self.rng.pick(ARABIC_LAST_NAMES))
        } else {
            (*self.rng.pick(FIRST_NAMES), *self.rng.pick(LAST_NAMES))
        };

        let name = if self.rng.chance(SWAPPED_ORDER_RATE) {
            format!("{last} {first}")
        } else {
            format!("{first} {last}")
        };

        if self.rng.chance(MISSPELLING_RATE) {
            self.drop_one_letter(&name)
        } else {
            name
        }
    }

    fn drop_one_letter(&mut self, name: &str) -> String {
        let letters: Vec<usize> = name
            .char_indices()
            .filter(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| i)
            .collect();
        if letters.len() < 2 {
            return name.to_string();
        }
        let drop_at = *self.rng.pick(&letters);
        name.char_indices()
            .filter(|(i, _)| *i != drop_at)
            .map(|(_, c)| c)
            .collect()
    }
}
