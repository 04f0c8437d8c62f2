//! The `examkit run` command.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use examkit_core::parser;
use examkit_core::report::ExamReport;
use examkit_core::session::ExamSession;
use examkit_roster::open_roster;

use crate::commands::SourceArgs;
use crate::console::Console;

pub fn execute(sources: SourceArgs, report_path: Option<PathBuf>) -> Result<()> {
    let config = sources.resolve()?;

    // A missing bank blocks the exam entirely
    let bank = parser::load_question_bank(&config.question_file, &config.key_file)
        .context("Files not found")?;

    let roster = open_roster(&config);
    let identities = roster.load_identities();
    if identities.is_empty() {
        tracing::warn!(
            "no identities loaded from {}; every login will be rejected",
            config.roster_file.display()
        );
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    let participant = console.login(&identities)?;
    let mut session = ExamSession::new(Arc::new(bank)).with_participant(participant);
    console.take_exam(&mut session, &roster)?;

    let report_path = report_path.or_else(|| {
        config
            .report_dir
            .as_ref()
            .map(|dir| dir.join(format!("exam-{}.json", session.id())))
    });
    if let (Some(path), Some(report)) = (report_path, ExamReport::from_session(&session)) {
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}
