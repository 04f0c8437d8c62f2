//! Line-oriented terminal front end for login and exam delivery.

use std::io::{BufRead, Write};

use anyhow::Result;

use examkit_core::auth::{authenticate, Admission, Credentials, Participant};
use examkit_core::model::IdentityMap;
use examkit_core::roster::Roster;
use examkit_core::session::{ExamOutcome, ExamSession, QuestionView};

/// One participant's terminal: reads answers from `input`, writes the exam
/// transcript to `output`.
pub struct Console<R, W> {
    input: R,
    output: W,
}

/// A parsed line of exam input.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Select(u8),
    Next,
    Submit,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    match line.trim().to_lowercase().as_str() {
        "n" | "next" => Command::Next,
        "s" | "submit" => Command::Submit,
        other => other
            .parse::<u8>()
            .map(Command::Select)
            .unwrap_or(Command::Unknown),
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `label` and read one line. Returns `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask for name, email, and roll number until the roster admits them.
    pub fn login(&mut self, identities: &IdentityMap) -> Result<Participant> {
        writeln!(self.output, "Online Examination")?;
        loop {
            let (Some(name), Some(email), Some(roll_no)) = (
                self.prompt("Name: ")?,
                self.prompt("Email: ")?,
                self.prompt("Roll No: ")?,
            ) else {
                anyhow::bail!("login aborted");
            };

            let credentials = Credentials {
                name,
                email,
                roll_no,
            };
            match authenticate(credentials, identities) {
                Admission::Admitted(participant) => {
                    writeln!(
                        self.output,
                        "Name: {}\nEmail: {}\nRoll No: {}\n",
                        participant.name, participant.email, participant.roll_no
                    )?;
                    return Ok(participant);
                }
                Admission::Rejected(reason) => writeln!(self.output, "{reason}\n")?,
            }
        }
    }

    fn render(&mut self, view: &QuestionView<'_>) -> Result<()> {
        writeln!(self.output, "Question {}: {}", view.number, view.prompt)?;
        for (i, option) in view.options.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, option)?;
        }
        Ok(())
    }

    /// Drive `session` until the participant submits.
    ///
    /// Submission is accepted on any question; the prompt only offers it on
    /// the last one. Running out of input abandons the exam unscored.
    pub fn take_exam(
        &mut self,
        session: &mut ExamSession,
        roster: &Roster,
    ) -> Result<ExamOutcome> {
        let mut rendered = None;

        loop {
            let Some(view) = session.view() else {
                break;
            };
            let (index, is_last) = (view.index, view.is_last);
            if rendered != Some(index) {
                self.render(&view)?;
                rendered = Some(index);
            }

            let label = if is_last {
                "Choose 1-4, or 's' to submit: "
            } else {
                "Choose 1-4, or 'n' for next: "
            };
            let Some(line) = self.prompt(label)? else {
                anyhow::bail!("exam abandoned before submission");
            };

            match parse_command(&line) {
                Command::Select(option) => match session.select_option(index, option) {
                    Ok(()) => writeln!(self.output, "Selected Option {option}")?,
                    Err(e) => writeln!(self.output, "{e}")?,
                },
                Command::Next => {
                    if let Err(e) = session.advance() {
                        writeln!(self.output, "{e}; enter 's' to submit")?;
                    }
                }
                Command::Submit => break,
                Command::Unknown => writeln!(self.output, "Unrecognized input: {line}")?,
            }
        }

        let outcome = session.submit(roster);
        self.show_outcome(&outcome)?;
        Ok(outcome)
    }

    fn show_outcome(&mut self, outcome: &ExamOutcome) -> Result<()> {
        match outcome {
            ExamOutcome::Scored { score, .. } => writeln!(self.output, "Your marks: {score}")?,
            ExamOutcome::NoData => {
                writeln!(self.output, "Error: No questions or answers available")?
            }
        }
        Ok(())
    }
}
