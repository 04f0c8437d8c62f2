//! CSV-backed roster store.
//!
//! The first record is the header row. Cells are kept exactly as read,
//! short rows are padded to the header width and longer rows are kept
//! whole. Writes replace the whole file through a temporary file in the
//! same directory, so a failed write leaves the previous roster in place.

use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use examkit_core::error::StoreError;
use examkit_core::traits::{RosterStore, RosterTable};

/// A roster kept in a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvRosterStore {
    path: PathBuf,
}

impl CsvRosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_error(&self, e: csv::Error) -> StoreError {
        let not_found = matches!(
            e.kind(),
            csv::ErrorKind::Io(err) if err.kind() == io::ErrorKind::NotFound
        );
        if not_found {
            StoreError::NotFound(self.path.display().to_string())
        } else {
            StoreError::Read(format!("{}: {e}", self.path.display()))
        }
    }

    fn write_error(&self, e: impl Display) -> StoreError {
        StoreError::Write(format!("{}: {e}", self.path.display()))
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl RosterStore for CsvRosterStore {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_rows(&self) -> Result<RosterTable, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| self.read_error(e))?;

        let headers = reader
            .headers()
            .map_err(|e| self.read_error(e))?
            .iter()
            .map(str::to_string)
            .collect();
        let mut table = RosterTable::new(headers);

        for record in reader.records() {
            let record = record.map_err(|e| self.read_error(e))?;
            table.push_row(record.iter().map(str::to_string).collect());
        }

        tracing::debug!("read {} roster rows from {}", table.len(), self.path.display());
        Ok(table)
    }

    fn write_rows(&self, table: &RosterTable) -> Result<(), StoreError> {
        let tmp = NamedTempFile::new_in(self.parent_dir()).map_err(|e| self.write_error(e))?;
        if let Ok(meta) = std::fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| self.write_error(e))?;
        }

        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(tmp);
        writer
            .write_record(&table.headers)
            .map_err(|e| self.write_error(e))?;
        for row in &table.rows {
            writer.write_record(row).map_err(|e| self.write_error(e))?;
        }

        let tmp = writer
            .into_inner()
            .map_err(|e| self.write_error(e.error()))?;
        tmp.persist(&self.path)
            .map_err(|e| self.write_error(e.error))?;

        tracing::debug!("wrote {} roster rows to {}", table.len(), self.path.display());
        Ok(())
    }
}
