//! examkit-core — Question bank, exam session, and scoring.
//!
//! This crate defines the data model, the roster store trait, and the
//! exam-session state machine that the rest of examkit builds on.

pub mod auth;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod roster;
pub mod scoring;
pub mod session;
pub mod traits;
