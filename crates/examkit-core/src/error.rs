//! Error types for loading, roster access, and session operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the question bank.
///
/// These are fatal to session creation: no exam can proceed without a bank.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A question or answer-key source could not be opened or read.
    #[error("source not found: {}", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors that can occur when talking to a roster store.
///
/// The roster adapter never propagates these to the participant; they are
/// logged and degrade to an empty identity map or an abandoned score write.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store does not exist or cannot be opened.
    #[error("roster store not found: {0}")]
    NotFound(String),

    /// The store exists but its contents could not be read.
    #[error("failed to read roster store: {0}")]
    Read(String),

    /// The updated table could not be written back.
    #[error("failed to write roster store: {0}")]
    Write(String),
}

impl StoreError {
    /// Returns `true` if the store itself is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Rejected exam-session operations. State is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session has already been submitted.
    #[error("exam has already been submitted")]
    Completed,

    /// A selection was made for a question other than the displayed one.
    #[error("question {requested} is not the displayed question ({current})")]
    NotCurrentQuestion { requested: usize, current: usize },

    /// The option number is not one of the presented options.
    #[error("option {0} is out of range (expected 1-4)")]
    OptionOutOfRange(u8),

    /// `advance` was called on the final question.
    #[error("already at the last question")]
    AtLastQuestion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_classification() {
        assert!(StoreError::NotFound("roster.csv".into()).is_not_found());
        assert!(!StoreError::Write("disk full".into()).is_not_found());
    }

    #[test]
    fn load_error_names_the_path() {
        let err = LoadError::SourceNotFound {
            path: PathBuf::from("key.txt"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(err.to_string(), "source not found: key.txt");
    }
}
