//! Exam report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Participant;
use crate::session::{ExamOutcome, ExamSession, SessionState};

/// A record of one completed exam session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamReport {
    /// Session identifier.
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    /// Who sat the exam, if anyone was authenticated.
    pub participant: Option<Participant>,
    pub question_count: usize,
    /// Selected option per question (`null` when unanswered).
    pub selections: Vec<Option<u8>>,
    pub outcome: ExamOutcome,
}

impl ExamReport {
    /// Build a report from a completed session. Returns `None` while the
    /// session is still in progress.
    pub fn from_session(session: &ExamSession) -> Option<Self> {
        if session.state() != SessionState::Completed {
            return None;
        }
        Some(Self {
            id: session.id(),
            started_at: session.started_at(),
            completed_at: session.completed_at()?,
            participant: session.participant().cloned(),
            question_count: session.bank().len(),
            selections: session.selections().to_vec(),
            outcome: session.outcome()?.clone(),
        })
    }

    /// Number of questions the participant answered.
    pub fn answered(&self) -> usize {
        self.selections.iter().filter(|s| s.is_some()).count()
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ExamReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::{AnswerCode, Question, QuestionBank};
    use crate::roster::tests::TableStore;
    use crate::roster::Roster;

    fn completed_session() -> ExamSession {
        let question = Question {
            prompt: "Largest planet?".into(),
            options: [
                "Mars".into(),
                "Jupiter".into(),
                "Venus".into(),
                "Earth".into(),
            ],
        };
        let bank = QuestionBank::new(
            vec![question.clone(), question],
            vec![AnswerCode::new(2); 2],
        );
        let roster = Roster::new(Arc::new(TableStore::missing()));

        let mut session = ExamSession::new(Arc::new(bank)).with_participant(Participant {
            name: "Ann".into(),
            email: "a@x.com".into(),
            roll_no: "R1".into(),
        });
        session.select_option(0, 2).unwrap();
        session.submit(&roster);
        session
    }

    #[test]
    fn in_progress_session_has_no_report() {
        let bank = Arc::new(QuestionBank::default());
        assert!(ExamReport::from_session(&ExamSession::new(bank)).is_none());
    }

    #[test]
    fn report_from_completed_session() {
        let session = completed_session();
        let report = ExamReport::from_session(&session).unwrap();
        assert_eq!(report.id, session.id());
        assert_eq!(report.question_count, 2);
        assert_eq!(report.answered(), 1);
        assert_eq!(report.outcome.score(), Some(1));
    }

    #[test]
    fn save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("exam.json");

        let report = ExamReport::from_session(&completed_session()).unwrap();
        report.save_json(&path).unwrap();

        let loaded = ExamReport::load_json(&path).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.selections, vec![Some(2), None]);
        assert_eq!(loaded.participant.unwrap().email, "a@x.com");

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"status\": \"scored\""));
    }
}
