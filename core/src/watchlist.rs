//! Watch-list records.
//!
//! A record has one typed field the matcher depends on ("Full Name") and any
//! number of opaque attributes that are carried through untouched.

use crate::{
    error::{ScreenError, ScreenResult},
    types::FULL_NAME_FIELD,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WatchlistEntry {
    #[serde(
        rename = "Full Name",
        default,
        deserialize_with = "coerce_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub full_name: Option<String>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl WatchlistEntry {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: Some(full_name.into()),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        if key == FULL_NAME_FIELD {
            return None;
        }
        self.attributes.get(key)
    }

    /// The trimmed full name, or None when missing or blank.
    pub fn screening_name(&self) -> Option<String> {
        let trimmed = self.full_name.as_deref()?.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Coerce a raw column value into a name. Null means "no name"; any other
/// non-string value is replaced by its textual form.
pub fn value_to_name(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn coerce_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_name(&value))
}

/// Parse a JSON array of records. A non-empty list in which no record
/// carries a "Full Name" key is rejected with the keys that were found.
pub fn parse_watchlist_json(content: &str) -> ScreenResult<Vec<WatchlistEntry>> {
    let rows: Vec<Map<String, Value>> = serde_json::from_str(content)?;
    if !rows.is_empty() && !rows.iter().any(|row| row.contains_key(FULL_NAME_FIELD)) {
        let available: BTreeSet<&String> = rows.iter().flat_map(Map::keys).collect();
        return Err(missing_full_name(available.into_iter().cloned().collect()));
    }
    rows.into_iter()
        .map(|row| {
            serde_json::from_value::<WatchlistEntry>(Value::Object(row)).map_err(ScreenError::from)
        })
        .collect()
}

/// Load a JSON array of records from disk.
pub fn load_watchlist_json(path: impl AsRef<Path>) -> ScreenResult<Vec<WatchlistEntry>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let entries = parse_watchlist_json(&content)?;
    log::info!(
        "watch-list loaded from {}: {} records",
        path.as_ref().display(),
        entries.len()
    );
    Ok(entries)
}

/// Parse a CSV watch-list with a header row. The "Full Name" header is
/// required; every other column becomes a string attribute. An empty
/// "Full Name" cell loads as a missing name.
pub fn parse_watchlist_csv<R: Read>(input: R) -> ScreenResult<Vec<WatchlistEntry>> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();
    if !headers.iter().any(|h| h == FULL_NAME_FIELD) {
        return Err(missing_full_name(headers.iter().map(String::from).collect()));
    }

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut entry = WatchlistEntry::default();
        for (header, field) in headers.iter().zip(record.iter()) {
            if header == FULL_NAME_FIELD {
                entry.full_name = (!field.is_empty()).then(|| field.to_string());
            } else {
                entry.attributes.insert(header.to_string(), Value::from(field));
            }
        }
        entries.push(entry);
    }
    Ok(entries)
}

/// Load a CSV watch-list from disk.
pub fn load_watchlist_csv(path: impl AsRef<Path>) -> ScreenResult<Vec<WatchlistEntry>> {
    let file = std::fs::File::open(path.as_ref())?;
    let entries = parse_watchlist_csv(file)?;
    log::info!(
        "watch-list loaded from {}: {} records",
        path.as_ref().display(),
        entries.len()
    );
    Ok(entries)
}

fn missing_full_name(available: Vec<String>) -> ScreenError {
    log::warn!("watch-list has no '{FULL_NAME_FIELD}' column: {available:?}");
    ScreenError::MissingColumn {
        column: FULL_NAME_FIELD.to_string(),
        available,
    }
}
