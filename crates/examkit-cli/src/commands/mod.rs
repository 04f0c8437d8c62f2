pub mod init;
pub mod run;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use examkit_roster::{load_config_from, ExamkitConfig};

/// Source locations shared by every command that loads a question bank.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Question file (prompt line + 4 option lines per question)
    #[arg(long)]
    pub questions: Option<PathBuf>,

    /// Answer key file (one option number per line)
    #[arg(long)]
    pub key: Option<PathBuf>,

    /// Roster CSV with Email, Roll No and Marks columns
    #[arg(long)]
    pub roster: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SourceArgs {
    /// Load config, then let explicit flags override it.
    pub fn resolve(self) -> Result<ExamkitConfig> {
        let mut config = load_config_from(self.config.as_deref())?;
        if let Some(p) = self.questions {
            config.question_file = p;
        }
        if let Some(p) = self.key {
            config.key_file = p;
        }
        if let Some(p) = self.roster {
            config.roster_file = p;
        }
        Ok(config)
    }
}
