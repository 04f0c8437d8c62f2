//! Roster store trait and the tabular record it exchanges.
//!
//! The trait is implemented by the `examkit-roster` crate (CSV files, and an
//! in-memory store for tests).

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

// ---------------------------------------------------------------------------
// Tabular record
// ---------------------------------------------------------------------------

/// The full contents of a roster store: a header row plus data rows.
///
/// Every row is at least as wide as `headers`. Cells beyond the header
/// width and surrounding whitespace are kept so a write-back reproduces
/// rows it did not update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RosterTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding a short row to the header width.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        if row.len() < self.headers.len() {
            row.resize(self.headers.len(), String::new());
        }
        self.rows.push(row);
    }

    /// Position of the named column, if present. Header whitespace is ignored.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    /// Position of the named column, appending it with empty cells if absent.
    ///
    /// The new column goes after the widest row, so unnamed trailing cells
    /// are never taken over.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column(name) {
            return idx;
        }
        let width = self
            .rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(self.headers.len());
        self.headers.resize(width, String::new());
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.resize(width + 1, String::new());
        }
        width
    }

    /// Cell value at (`row`, `column`).
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column(column)?;
        self.rows.get(row).and_then(|r| r.get(idx)).map(String::as_str)
    }

    /// Set `column` to `value` in every row whose `key_column` equals `key`,
    /// ignoring surrounding whitespace.
    ///
    /// Returns the number of rows updated. `column` is created if missing;
    /// a missing `key_column` matches nothing.
    pub fn set_where(
        &mut self,
        key_column: &str,
        key: &str,
        column: &str,
        value: &str,
    ) -> usize {
        let Some(key_idx) = self.column(key_column) else {
            return 0;
        };
        let target = self.ensure_column(column);
        let key = key.trim();

        let mut updated = 0;
        for row in &mut self.rows {
            if row.get(key_idx).is_some_and(|cell| cell.trim() == key) {
                if row.len() <= target {
                    row.resize(target + 1, String::new());
                }
                row[target] = value.to_string();
                updated += 1;
            }
        }
        updated
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Roster store trait
// ---------------------------------------------------------------------------

/// An external tabular record store holding participant identities and marks.
///
/// Stores are read and written whole. There is no locking: at most one
/// session writes to a store at a time.
pub trait RosterStore: Send + Sync {
    /// Human-readable description used in log messages (e.g. a file path).
    fn describe(&self) -> String;

    /// Read every row of the store.
    fn read_rows(&self) -> Result<RosterTable, StoreError>;

    /// Replace the store contents with `table`.
    fn write_rows(&self, table: &RosterTable) -> Result<(), StoreError>;

    /// Set one cell in every row matching `key`, as a whole-table
    /// read-modify-write. Returns the number of rows updated.
    ///
    /// A store without `key_column` is left untouched.
    fn update_cell_by_key(
        &self,
        key_column: &str,
        key: &str,
        column: &str,
        value: &str,
    ) -> Result<usize, StoreError> {
        let mut table = self.read_rows()?;
        if table.column(key_column).is_none() {
            tracing::warn!("'{key_column}' column not found in {}", self.describe());
            return Ok(0);
        }
        let updated = table.set_where(key_column, key, column, value);
        self.write_rows(&table)?;
        Ok(updated)
    }
}
