//! Deterministic exam scoring.

use crate::model::AnswerCode;

/// Count the positions where the participant's selection equals the key.
///
/// Only indices present in both `selections` and `answers` are considered.
/// Unanswered questions and [`AnswerCode::NONE`] entries never score.
pub fn score(selections: &[Option<u8>], answers: &[AnswerCode]) -> u32 {
    selections
        .iter()
        .zip(answers)
        .filter(|(selected, key)| selected.is_some_and(|option| key.matches(option)))
        .count() as u32
}
