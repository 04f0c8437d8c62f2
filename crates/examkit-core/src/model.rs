//! Core data model types for examkit.
//!
//! These are the fundamental types the rest of examkit uses to represent
//! questions, answer keys, and roster identities.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of options presented for every question.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text shown to the participant.
    pub prompt: String,
    /// The four options, in display order. Option `i` is encoded as `i + 1`.
    pub options: [String; OPTIONS_PER_QUESTION],
}

/// The correct-answer code for one question.
///
/// Holds the 1-based option number, or [`AnswerCode::NONE`] when the key
/// has no answer recorded for the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerCode(i32);

impl AnswerCode {
    /// Sentinel for "no correct answer recorded". Matches no selection.
    pub const NONE: AnswerCode = AnswerCode(-1);

    pub fn new(code: i32) -> Self {
        Self(code)
    }

    pub fn value(self) -> i32 {
        self.0
    }

    /// Returns `true` if the key has no answer for this question.
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if the code names one of the presented options.
    pub fn is_selectable(self) -> bool {
        (1..=OPTIONS_PER_QUESTION as i32).contains(&self.0)
    }

    /// Returns `true` if selecting `option` (1-based) is correct.
    pub fn matches(self, option: u8) -> bool {
        self.0 == i32::from(option)
    }
}

impl fmt::Display for AnswerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AnswerCode {
    type Err = String;

    /// Decode one answer-key line. A blank line is the sentinel.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(AnswerCode::NONE);
        }
        trimmed
            .parse::<i32>()
            .map(AnswerCode)
            .map_err(|_| format!("invalid answer code: {trimmed:?}"))
    }
}

/// An ordered, index-aligned set of questions and their answer key.
///
/// The two lists are deliberately allowed to differ in length; scoring only
/// considers the positions present in both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    questions: Vec<Question>,
    answers: Vec<AnswerCode>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>, answers: Vec<AnswerCode>) -> Self {
        Self { questions, answers }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[AnswerCode] {
        &self.answers
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Returns `true` if there is nothing to score: no questions or no key.
    pub fn has_no_data(&self) -> bool {
        self.questions.is_empty() || self.answers.is_empty()
    }
}

/// One roster row reduced to the fields used for authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub email: String,
    pub roll_number: String,
}

/// Lookup table from email to roll number, loaded once from the roster.
pub type IdentityMap = HashMap<String, String>;

/// Build an [`IdentityMap`] from records. Later duplicates win.
pub fn identity_map<I>(records: I) -> IdentityMap
where
    I: IntoIterator<Item = IdentityRecord>,
{
    records
        .into_iter()
        .map(|r| (r.email, r.roll_number))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_code_parse() {
        assert_eq!("2".parse::<AnswerCode>().unwrap(), AnswerCode::new(2));
        assert_eq!(" 3 ".parse::<AnswerCode>().unwrap(), AnswerCode::new(3));
        assert_eq!("".parse::<AnswerCode>().unwrap(), AnswerCode::NONE);
        assert_eq!("   ".parse::<AnswerCode>().unwrap(), AnswerCode::NONE);
        assert!("b".parse::<AnswerCode>().is_err());
    }

    #[test]
    fn sentinel_matches_nothing() {
        for option in 1..=4 {
            assert!(!AnswerCode::NONE.matches(option));
        }
        assert!(AnswerCode::new(4).matches(4));
        assert!(!AnswerCode::new(4).matches(3));
    }

    #[test]
    fn selectable_range() {
        assert!(AnswerCode::new(1).is_selectable());
        assert!(AnswerCode::new(4).is_selectable());
        assert!(!AnswerCode::new(0).is_selectable());
        assert!(!AnswerCode::new(5).is_selectable());
        assert!(!AnswerCode::NONE.is_selectable());
    }

    #[test]
    fn bank_no_data() {
        assert!(QuestionBank::default().has_no_data());
        let q = Question {
            prompt: "2 + 2?".into(),
            options: ["1".into(), "2".into(), "3".into(), "4".into()],
        };
        assert!(QuestionBank::new(vec![q.clone()], vec![]).has_no_data());
        assert!(!QuestionBank::new(vec![q], vec![AnswerCode::new(4)]).has_no_data());
    }

    #[test]
    fn identity_map_last_duplicate_wins() {
        let map = identity_map(vec![
            IdentityRecord {
                email: "a@x.com".into(),
                roll_number: "R1".into(),
            },
            IdentityRecord {
                email: "a@x.com".into(),
                roll_number: "R9".into(),
            },
        ]);
        assert_eq!(map.len(), 1);
        assert_eq!(map["a@x.com"], "R9");
    }
}
