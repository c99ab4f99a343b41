//! Fuzzy watch-list name screening.
//!
//! Normalizer → Matcher → Screener:
//!   - normalizer: trim, lower-case, transliterate Arabic script
//!   - matcher:    Jaro–Winkler, Levenshtein, Soundex and word inversion,
//!                 combined under a length-dependent threshold policy
//!   - screening:  one candidate against a list snapshot, with an audit trail

pub mod audit;
pub mod config;
pub mod error;
pub mod inversion;
pub mod matcher;
pub mod name_generator;
pub mod normalizer;
pub mod phonetic;
pub mod rng;
pub mod screening;
pub mod store;
pub mod types;
pub mod watchlist;

pub use config::ScreeningConfig;
pub use error::{ScreenError, ScreenResult};
pub use inversion::check_word_inversion;
pub use matcher::{is_similar, MatchDecision, Matcher};
pub use normalizer::normalize;
pub use screening::{ScreeningReport, Screener};
pub use watchlist::WatchlistEntry;
