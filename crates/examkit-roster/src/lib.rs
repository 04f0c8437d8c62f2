//! examkit-roster — Roster store implementations.
//!
//! Implements the `RosterStore` trait for CSV files and for an in-memory
//! table, and provides the TOML configuration that tells examkit where its
//! question, key, and roster files live.

pub mod config;
pub mod csv_store;
pub mod memory;

pub use config::{load_config, load_config_from, open_roster, ExamkitConfig};
pub use csv_store::CsvRosterStore;
pub use memory::MemoryRosterStore;
