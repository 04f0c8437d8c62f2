//! examkit CLI — roster login, exam delivery, and scoring.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod console;

use commands::SourceArgs;

#[derive(Parser)]
#[command(name = "examkit", version, about = "Multiple-choice examination runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in against the roster and sit the exam
    Run {
        #[command(flatten)]
        sources: SourceArgs,

        /// Write a JSON report of the completed exam to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Check the question bank, answer key, and roster
    Validate {
        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Create a starter config, question bank, and roster
    Init,
}

fn main() {
    // Diagnostics go to stderr; stdout carries the exam transcript
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { sources, report } => commands::run::execute(sources, report),
        Commands::Validate { sources } => commands::validate::execute(sources),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
