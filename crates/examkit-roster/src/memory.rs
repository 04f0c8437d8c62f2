//! In-memory roster store for testing.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use examkit_core::error::StoreError;
use examkit_core::traits::{RosterStore, RosterTable};

/// A roster store that keeps its table in memory.
///
/// Useful for driving exam sessions without touching the filesystem. The
/// store can be created "missing" to simulate an absent roster, and writes
/// can be made to fail.
pub struct MemoryRosterStore {
    /// `None` means the store does not exist.
    table: Mutex<Option<RosterTable>>,
    /// When set, every write returns an error.
    fail_writes: AtomicBool,
    read_count: AtomicU32,
    write_count: AtomicU32,
}

impl MemoryRosterStore {
    /// Create a store holding `table`.
    pub fn new(table: RosterTable) -> Self {
        Self {
            table: Mutex::new(Some(table)),
            fail_writes: AtomicBool::new(false),
            read_count: AtomicU32::new(0),
            write_count: AtomicU32::new(0),
        }
    }

    /// Create a store from string headers and rows.
    pub fn from_rows(headers: &[&str], rows: &[&[&str]]) -> Self {
        let mut table = RosterTable::new(headers.iter().map(|h| h.to_string()).collect());
        for row in rows {
            table.push_row(row.iter().map(|c| c.to_string()).collect());
        }
        Self::new(table)
    }

    /// Create a store that reports itself as not found.
    pub fn missing() -> Self {
        Self {
            table: Mutex::new(None),
            fail_writes: AtomicBool::new(false),
            read_count: AtomicU32::new(0),
            write_count: AtomicU32::new(0),
        }
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Current contents, or `None` if the store is missing.
    pub fn snapshot(&self) -> Option<RosterTable> {
        self.table.lock().ok().and_then(|table| table.clone())
    }

    /// Number of `read_rows` calls made.
    pub fn read_count(&self) -> u32 {
        self.read_count.load(Ordering::Relaxed)
    }

    /// Number of `write_rows` calls made, including failed ones.
    pub fn write_count(&self) -> u32 {
        self.write_count.load(Ordering::Relaxed)
    }
}

impl RosterStore for MemoryRosterStore {
    fn describe(&self) -> String {
        "in-memory roster".to_string()
    }

    fn read_rows(&self) -> Result<RosterTable, StoreError> {
        self.read_count.fetch_add(1, Ordering::Relaxed);
        self.table
            .lock()
            .map_err(|_| StoreError::Read("roster lock poisoned".into()))?
            .clone()
            .ok_or_else(|| StoreError::NotFound(self.describe()))
    }

    fn write_rows(&self, table: &RosterTable) -> Result<(), StoreError> {
        self.write_count.fetch_add(1, Ordering::Relaxed);
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StoreError::Write("simulated write failure".into()));
        }
        *self
            .table
            .lock()
            .map_err(|_| StoreError::Write("roster lock poisoned".into()))? = Some(table.clone());
        Ok(())
    }
}
