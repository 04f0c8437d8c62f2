//! Roster store adapter.
//!
//! Loads the email → roll number identity map used for authentication and
//! writes a participant's final score back into their roster row. Neither
//! operation ever fails the caller: store problems are logged and degrade to
//! an empty identity map or an abandoned write.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::{IdentityMap, IdentityRecord};
use crate::traits::RosterStore;

/// Names of the roster columns examkit reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterColumns {
    #[serde(default = "default_email_column")]
    pub email: String,
    #[serde(default = "default_roll_no_column")]
    pub roll_no: String,
    #[serde(default = "default_marks_column")]
    pub marks: String,
}

fn default_email_column() -> String {
    "Email".to_string()
}
fn default_roll_no_column() -> String {
    "Roll No".to_string()
}
fn default_marks_column() -> String {
    "Marks".to_string()
}

impl Default for RosterColumns {
    fn default() -> Self {
        Self {
            email: default_email_column(),
            roll_no: default_roll_no_column(),
            marks: default_marks_column(),
        }
    }
}

/// Adapter between the exam flow and a [`RosterStore`].
#[derive(Clone)]
pub struct Roster {
    store: Arc<dyn RosterStore>,
    columns: RosterColumns,
}

impl Roster {
    pub fn new(store: Arc<dyn RosterStore>) -> Self {
        Self {
            store,
            columns: RosterColumns::default(),
        }
    }

    /// Use custom column names instead of `Email` / `Roll No` / `Marks`.
    pub fn with_columns(mut self, columns: RosterColumns) -> Self {
        self.columns = columns;
        self
    }

    /// Read identity records from the store.
    ///
    /// A store without the email or roll number column yields no records.
    pub fn try_load_records(&self) -> Result<Vec<IdentityRecord>, StoreError> {
        let table = self.store.read_rows()?;
        tracing::debug!(
            "roster columns in {}: {:?}",
            self.store.describe(),
            table.headers
        );

        let (Some(email_idx), Some(roll_idx)) = (
            table.column(&self.columns.email),
            table.column(&self.columns.roll_no),
        ) else {
            tracing::warn!(
                "'{}' or '{}' column not found in {}",
                self.columns.email,
                self.columns.roll_no,
                self.store.describe()
            );
            return Ok(Vec::new());
        };

        Ok(table
            .rows
            .iter()
            .map(|row| IdentityRecord {
                email: trimmed_cell(row, email_idx),
                roll_number: trimmed_cell(row, roll_idx),
            })
            .collect())
    }

    /// Load the identity map, propagating store errors.
    pub fn try_load_identities(&self) -> Result<IdentityMap, StoreError> {
        let identities = crate::model::identity_map(self.try_load_records()?);
        tracing::debug!("loaded {} roster identities", identities.len());
        Ok(identities)
    }

    /// Load the identity map. Any store error is logged and yields an empty
    /// map, so every login attempt will be rejected.
    pub fn load_identities(&self) -> IdentityMap {
        match self.try_load_identities() {
            Ok(identities) => identities,
            Err(e) => {
                tracing::error!("error loading roster identities: {e}");
                IdentityMap::new()
            }
        }
    }

    /// Write `score` into the marks column of every row matching `email`.
    ///
    /// Returns `true` if the store was written and at least one row matched.
    /// Failures are logged, never raised.
    pub fn record_score(&self, email: &str, score: u32) -> bool {
        let result = self.store.update_cell_by_key(
            &self.columns.email,
            email,
            &self.columns.marks,
            &score.to_string(),
        );

        match result {
            Ok(0) => {
                tracing::warn!(
                    "no roster row in {} matches {email}; score {score} not stored",
                    self.store.describe()
                );
                false
            }
            Ok(updated) => {
                tracing::info!("stored score {score} for {email} ({updated} row(s))");
                true
            }
            Err(e) if e.is_not_found() => {
                tracing::error!("error storing marks: roster store not found ({e})");
                false
            }
            Err(e) => {
                tracing::error!("error storing marks: {e}");
                false
            }
        }
    }
}

fn trimmed_cell(row: &[String], idx: usize) -> String {
    row.get(idx).map(|c| c.trim().to_string()).unwrap_or_default()
}

impl std::fmt::Debug for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Roster")
            .field("store", &self.store.describe())
            .field("columns", &self.columns)
            .finish()
    }
}
