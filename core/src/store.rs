//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! The matcher and screener never execute SQL directly.
//!
//! The connection sits behind a Mutex so one store can serve as an
//! AuditSink for parallel scans.

use crate::{
    audit::{AuditSink, ScreeningEvent},
    error::{ScreenError, ScreenResult},
    types::{ScreeningId, FULL_NAME_FIELD},
    watchlist::{value_to_name, WatchlistEntry},
};
use rusqlite::{params, types::ValueRef, Connection};
use serde_json::Value;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const DEFAULT_WATCHLIST_TABLE: &str = "aml_watchlist";

/// Auxiliary columns of the default watch-list table.
const WATCHLIST_ATTRIBUTE_COLUMNS: [&str; 4] = ["Risk Category", "Source", "Risk Type", "Notes"];

#[derive(Debug, Clone, PartialEq)]
pub struct AuditLogEntry {
    pub id: i64,
    pub screening_id: String,
    pub event_type: String,
    pub payload: String,
    pub created_at: String,
}

pub struct ScreenStore {
    conn: Mutex<Connection>,
}

impl ScreenStore {
    /// Open (or create) the screening database at `path`.
    pub fn open(path: &str) -> ScreenResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode: better concurrent read performance.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> ScreenResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> ScreenResult<()> {
        self.conn()
            .execute_batch(include_str!("../../migrations/001_screening.sql"))?;
        Ok(())
    }

    /// Run raw SQL. Used to seed fixture tables and by tooling.
    pub fn execute_batch(&self, sql: &str) -> ScreenResult<()> {
        self.conn().execute_batch(sql)?;
        Ok(())
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Watch-list ─────────────────────────────────────────────

    /// Read every row of `table`. Columns are discovered at runtime; the
    /// "Full Name" column is required, all others become attributes.
    pub fn load_watchlist(&self, table: &str) -> ScreenResult<Vec<WatchlistEntry>> {
        validate_identifier(table)?;
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("SELECT * FROM \"{table}\""))?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        if !columns.iter().any(|c| c == FULL_NAME_FIELD) {
            log::warn!("watch-list table {table} has no '{FULL_NAME_FIELD}' column: {columns:?}");
            return Err(ScreenError::MissingColumn {
                column: FULL_NAME_FIELD.to_string(),
                available: columns,
            });
        }

        let rows = stmt.query_map([], |row| {
            let mut entry = WatchlistEntry::default();
            for (i, column) in columns.iter().enumerate() {
                let value = value_ref_to_json(row.get_ref(i)?);
                if column == FULL_NAME_FIELD {
                    entry.full_name = value_to_name(&value);
                } else {
                    entry.attributes.insert(column.clone(), value);
                }
            }
            Ok(entry)
        })?;
        let entries = rows.collect::<Result<Vec<_>, _>>()?;
        log::info!("watch-list loaded from table {table}: {} records", entries.len());
        Ok(entries)
    }

    /// Insert one record into the default watch-list table. Attributes
    /// outside the standard columns are not stored.
    pub fn insert_watchlist_entry(&self, entry: &WatchlistEntry) -> ScreenResult<()> {
        let [category, source, risk_type, notes] =
            WATCHLIST_ATTRIBUTE_COLUMNS.map(|column| entry.attribute(column).and_then(value_to_name));
        self.conn().execute(
            "INSERT INTO aml_watchlist (\"Full Name\", \"Risk Category\", \"Source\", \"Risk Type\", \"Notes\")
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![entry.full_name, category, source, risk_type, notes],
        )?;
        Ok(())
    }

    pub fn watchlist_count(&self) -> ScreenResult<i64> {
        let count = self
            .conn()
            .query_row("SELECT COUNT(*) FROM aml_watchlist", [], |row| row.get(0))?;
        Ok(count)
    }

    // ── Audit log ──────────────────────────────────────────────

    pub fn append_audit(&self, event: &ScreeningEvent) -> ScreenResult<()> {
        let payload = serde_json::to_string(event)?;
        self.conn().execute(
            "INSERT INTO screening_audit (screening_id, event_type, payload, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                event.screening_id().to_string(),
                event.event_type(),
                payload,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn audit_for_screening(&self, screening_id: ScreeningId) -> ScreenResult<Vec<AuditLogEntry>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, screening_id, event_type, payload, created_at
             FROM screening_audit WHERE screening_id = ?1
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![screening_id.to_string()], |row| {
                Ok(AuditLogEntry {
                    id: row.get(0)?,
                    screening_id: row.get(1)?,
                    event_type: row.get(2)?,
                    payload: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn audit_count(&self) -> ScreenResult<i64> {
        let count = self
            .conn()
            .query_row("SELECT COUNT(*) FROM screening_audit", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl AuditSink for ScreenStore {
    fn record(&self, event: &ScreeningEvent) {
        if let Err(e) = self.append_audit(event) {
            log::warn!(
                "audit: failed to persist {} for screening {}: {e}",
                event.event_type(),
                event.screening_id()
            );
        }
    }
}

fn value_ref_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
    }
}

/// Table names are interpolated into SQL, so only plain identifiers pass.
fn validate_identifier(name: &str) -> ScreenResult<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ScreenError::InvalidIdentifier { name: name.to_string() })
    }
}
