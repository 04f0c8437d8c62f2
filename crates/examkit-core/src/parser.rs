//! Plain-text question bank parser.
//!
//! Loads a question source and an answer-key source into a [`QuestionBank`],
//! and validates the result for common authoring mistakes.

use std::path::Path;

use crate::error::LoadError;
use crate::model::{AnswerCode, Question, QuestionBank, OPTIONS_PER_QUESTION};

/// Parse the question source.
///
/// The source is read as a flat list of non-empty trimmed lines. The first
/// line of a group is the prompt and the next four are its options. Blank
/// lines are ignored wherever they appear. A trailing group with fewer than
/// four options is dropped.
pub fn parse_questions(content: &str) -> Vec<Question> {
    let mut questions = Vec::new();
    let mut prompt: Option<String> = None;
    let mut options: Vec<String> = Vec::with_capacity(OPTIONS_PER_QUESTION);

    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if prompt.is_none() {
            prompt = Some(line.to_string());
        } else {
            options.push(line.to_string());
        }

        if options.len() == OPTIONS_PER_QUESTION {
            let collected = std::mem::take(&mut options);
            if let (Some(prompt), Ok(options)) = (
                prompt.take(),
                <[String; OPTIONS_PER_QUESTION]>::try_from(collected),
            ) {
                questions.push(Question { prompt, options });
            }
        }
    }

    if let Some(prompt) = prompt {
        tracing::debug!(
            "dropping incomplete trailing question {:?} ({} of {} options)",
            prompt,
            options.len(),
            OPTIONS_PER_QUESTION
        );
    }

    questions
}

/// Parse the answer-key source, one code per line.
///
/// Blank lines decode to [`AnswerCode::NONE`]. Lines that are not integers
/// are logged and also treated as having no recorded answer.
pub fn parse_answer_key(content: &str) -> Vec<AnswerCode> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| {
            line.parse::<AnswerCode>().unwrap_or_else(|e| {
                tracing::warn!("answer key line {}: {}; treating as unanswered", i + 1, e);
                AnswerCode::NONE
            })
        })
        .collect()
}

/// Build a bank from in-memory sources (useful for testing).
pub fn load_question_bank_str(questions: &str, key: &str) -> QuestionBank {
    let questions = parse_questions(questions);
    let answers = parse_answer_key(key);

    if questions.len() != answers.len() {
        tracing::warn!(
            "answer key has {} entries for {} questions; only the first {} will be scored",
            answers.len(),
            questions.len(),
            questions.len().min(answers.len())
        );
    }

    QuestionBank::new(questions, answers)
}

/// Load a bank from a question file and an answer-key file.
pub fn load_question_bank(
    question_path: &Path,
    key_path: &Path,
) -> Result<QuestionBank, LoadError> {
    let questions = read_source(question_path)?;
    let key = read_source(key_path)?;

    let bank = load_question_bank_str(&questions, &key);
    tracing::info!(
        "loaded {} questions from {}",
        bank.len(),
        question_path.display()
    );
    Ok(bank)
}

fn read_source(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::SourceNotFound {
        path: path.to_path_buf(),
        source,
    })
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Zero-based question index (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a question bank for common issues.
///
/// None of these stop an exam from running; they flag sources that will
/// produce surprising scores.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "no complete questions found".into(),
        });
    }

    if bank.answers().is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "answer key is empty".into(),
        });
    }

    if !bank.is_empty() && !bank.answers().is_empty() && bank.len() != bank.answers().len() {
        warnings.push(ValidationWarning {
            question: None,
            message: format!(
                "answer key has {} entries but the bank has {} questions; only the first {} are scored",
                bank.answers().len(),
                bank.len(),
                bank.len().min(bank.answers().len())
            ),
        });
    }

    for (i, code) in bank.answers().iter().take(bank.len()).enumerate() {
        if code.is_none() {
            warnings.push(ValidationWarning {
                question: Some(i),
                message: "no correct answer recorded".into(),
            });
        } else if !code.is_selectable() {
            warnings.push(ValidationWarning {
                question: Some(i),
                message: format!("answer code {code} matches none of the 4 options"),
            });
        }
    }

    warnings
}
