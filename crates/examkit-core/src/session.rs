//! The exam-session state machine.
//!
//! A session walks one participant through the question bank in order,
//! records one selection per question, and on submit computes the score and
//! hands it to the roster. Sessions move `InProgress → Completed` exactly
//! once; there is no reset or resume.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Participant;
use crate::error::SessionError;
use crate::model::{QuestionBank, OPTIONS_PER_QUESTION};
use crate::roster::Roster;
use crate::scoring;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    InProgress,
    Completed,
}

/// Terminal result of `submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExamOutcome {
    /// The score was computed. `persisted` reports whether the roster write
    /// succeeded; the score is valid either way.
    Scored {
        score: u32,
        total: usize,
        persisted: bool,
    },
    /// The bank had no questions or no answer key; nothing was scored.
    NoData,
}

impl ExamOutcome {
    pub fn score(&self) -> Option<u32> {
        match self {
            ExamOutcome::Scored { score, .. } => Some(*score),
            ExamOutcome::NoData => None,
        }
    }
}

/// Read-only projection of the displayed question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView<'a> {
    /// Zero-based index, as passed to [`ExamSession::select_option`].
    pub index: usize,
    /// One-based question number for display.
    pub number: usize,
    pub total: usize,
    pub prompt: &'a str,
    pub options: &'a [String; OPTIONS_PER_QUESTION],
    pub selected: Option<u8>,
    /// On the last question the presentation offers "submit" instead of "next".
    pub is_last: bool,
}

/// One participant's pass through a question bank.
#[derive(Debug)]
pub struct ExamSession {
    id: Uuid,
    bank: Arc<QuestionBank>,
    participant: Option<Participant>,
    current: usize,
    selections: Vec<Option<u8>>,
    state: SessionState,
    outcome: Option<ExamOutcome>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl ExamSession {
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        let selections = vec![None; bank.len()];
        Self {
            id: Uuid::new_v4(),
            bank,
            participant: None,
            current: 0,
            selections,
            state: SessionState::InProgress,
            outcome: None,
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Attach the admitted participant whose roster row receives the score.
    pub fn with_participant(mut self, participant: Participant) -> Self {
        self.participant = Some(participant);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn participant(&self) -> Option<&Participant> {
        self.participant.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn selections(&self) -> &[Option<u8>] {
        &self.selections
    }

    pub fn selection(&self, question_index: usize) -> Option<u8> {
        self.selections.get(question_index).copied().flatten()
    }

    pub fn outcome(&self) -> Option<&ExamOutcome> {
        self.outcome.as_ref()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn is_last_question(&self) -> bool {
        self.current + 1 >= self.bank.len()
    }

    /// The displayed question, or `None` for an empty bank.
    pub fn view(&self) -> Option<QuestionView<'_>> {
        let question = self.bank.question(self.current)?;
        Some(QuestionView {
            index: self.current,
            number: self.current + 1,
            total: self.bank.len(),
            prompt: &question.prompt,
            options: &question.options,
            selected: self.selection(self.current),
            is_last: self.is_last_question(),
        })
    }

    /// Record `option` (1-based) for the displayed question. Last call wins.
    pub fn select_option(
        &mut self,
        question_index: usize,
        option: u8,
    ) -> Result<(), SessionError> {
        if self.state == SessionState::Completed {
            return Err(SessionError::Completed);
        }
        if question_index != self.current || question_index >= self.selections.len() {
            return Err(SessionError::NotCurrentQuestion {
                requested: question_index,
                current: self.current,
            });
        }
        if !(1..=OPTIONS_PER_QUESTION as u8).contains(&option) {
            return Err(SessionError::OptionOutOfRange(option));
        }

        tracing::debug!("question {}: selected option {option}", question_index + 1);
        self.selections[question_index] = Some(option);
        Ok(())
    }

    /// Move to the next question. Returns the new index.
    pub fn advance(&mut self) -> Result<usize, SessionError> {
        if self.state == SessionState::Completed {
            return Err(SessionError::Completed);
        }
        if self.is_last_question() {
            return Err(SessionError::AtLastQuestion);
        }
        self.current += 1;
        Ok(self.current)
    }

    /// Score the session and record the result in the roster.
    ///
    /// Allowed from any question. An empty bank or empty key ends the
    /// session with [`ExamOutcome::NoData`] and no roster access. Calling
    /// `submit` again returns the stored outcome without touching the roster.
    pub fn submit(&mut self, roster: &Roster) -> ExamOutcome {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }

        let outcome = if self.bank.has_no_data() {
            tracing::warn!("no questions or answers available; nothing to score");
            ExamOutcome::NoData
        } else {
            let score = scoring::score(&self.selections, self.bank.answers());
            let persisted = match &self.participant {
                Some(participant) => roster.record_score(&participant.email, score),
                None => {
                    tracing::warn!("session {} has no participant; score not stored", self.id);
                    false
                }
            };
            ExamOutcome::Scored {
                score,
                total: self.bank.len(),
                persisted,
            }
        };

        self.state = SessionState::Completed;
        self.completed_at = Some(Utc::now());
        self.outcome = Some(outcome.clone());
        outcome
    }
}
