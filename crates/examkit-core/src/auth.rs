//! Identity verification against the roster identity map.
//!
//! Authentication produces an explicit [`Admission`]; whoever composes exam
//! sessions decides what to do with it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::IdentityMap;

/// Identity fields submitted at login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub name: String,
    pub email: String,
    pub roll_no: String,
}

/// An authenticated participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub email: String,
    pub roll_no: String,
}

/// Why a login was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// One or more of name, email, roll number was empty.
    MissingFields,
    /// The email is unknown or maps to a different roll number.
    Mismatch,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingFields => write!(f, "Please fill in all fields"),
            Rejection::Mismatch => write!(f, "Email and roll number do not match."),
        }
    }
}

/// Result of an authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Admitted(Participant),
    Rejected(Rejection),
}

/// Accept iff all three fields are non-empty and `identities[email] == roll_no`.
pub fn verify(name: &str, email: &str, roll_no: &str, identities: &IdentityMap) -> bool {
    !name.is_empty()
        && !email.is_empty()
        && !roll_no.is_empty()
        && identities.get(email).is_some_and(|r| r == roll_no)
}

/// Check submitted credentials and admit or reject the participant.
pub fn authenticate(credentials: Credentials, identities: &IdentityMap) -> Admission {
    let Credentials {
        name,
        email,
        roll_no,
    } = credentials;

    if name.is_empty() || email.is_empty() || roll_no.is_empty() {
        return Admission::Rejected(Rejection::MissingFields);
    }

    if !verify(&name, &email, &roll_no, identities) {
        tracing::info!("login rejected for {email}");
        return Admission::Rejected(Rejection::Mismatch);
    }

    tracing::info!("login accepted for {email}");
    Admission::Admitted(Participant {
        name,
        email,
        roll_no,
    })
}
