//! The `examkit validate` command.

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use examkit_core::parser;
use examkit_roster::open_roster;

use crate::commands::SourceArgs;

pub fn execute(sources: SourceArgs) -> Result<()> {
    let config = sources.resolve()?;

    let bank = parser::load_question_bank(&config.question_file, &config.key_file)
        .context("files not found")?;
    let warnings = parser::validate_bank(&bank);

    let roster = open_roster(&config);
    let identities = match roster.try_load_identities() {
        Ok(identities) => Some(identities.len()),
        Err(e) => {
            println!("WARNING: {e}");
            None
        }
    };

    let mut table = Table::new();
    table.set_header(vec!["Source", "Path", "Entries"]);
    table.add_row(vec![
        Cell::new("Questions"),
        Cell::new(config.question_file.display()),
        Cell::new(bank.len()),
    ]);
    table.add_row(vec![
        Cell::new("Answer key"),
        Cell::new(config.key_file.display()),
        Cell::new(bank.answers().len()),
    ]);
    table.add_row(vec![
        Cell::new("Roster identities"),
        Cell::new(config.roster_file.display()),
        Cell::new(identities.map_or_else(|| "unreadable".to_string(), |n| n.to_string())),
    ]);
    println!("{table}");

    for w in &warnings {
        let prefix = w
            .question
            .map(|i| format!("  [Q{}]", i + 1))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Question bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
