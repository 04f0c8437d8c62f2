//! examkit configuration and roster factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use examkit_core::roster::{Roster, RosterColumns};

use crate::csv_store::CsvRosterStore;

/// Top-level examkit configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamkitConfig {
    /// Question source: prompt line followed by four option lines, repeated.
    #[serde(default = "default_question_file")]
    pub question_file: PathBuf,
    /// Answer key: one 1-based option number per line, blank for none.
    #[serde(default = "default_key_file")]
    pub key_file: PathBuf,
    /// CSV roster with identity and marks columns.
    #[serde(default = "default_roster_file")]
    pub roster_file: PathBuf,
    /// Roster column names.
    #[serde(default)]
    pub columns: RosterColumns,
    /// Directory for JSON exam reports (none written when unset).
    #[serde(default)]
    pub report_dir: Option<PathBuf>,
}

fn default_question_file() -> PathBuf {
    PathBuf::from("que_and_options.txt")
}
fn default_key_file() -> PathBuf {
    PathBuf::from("key.txt")
}
fn default_roster_file() -> PathBuf {
    PathBuf::from("assets").join("roster.csv")
}

impl Default for ExamkitConfig {
    fn default() -> Self {
        Self {
            question_file: default_question_file(),
            key_file: default_key_file(),
            roster_file: default_roster_file(),
            columns: RosterColumns::default(),
            report_dir: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `examkit.toml` in the current directory
/// 2. `~/.config/examkit/config.toml`
///
/// Environment variable overrides: `EXAMKIT_QUESTION_FILE`,
/// `EXAMKIT_KEY_FILE`, `EXAMKIT_ROSTER_FILE`.
pub fn load_config() -> Result<ExamkitConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ExamkitConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("examkit.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<ExamkitConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => ExamkitConfig::default(),
    };

    // Apply env var overrides
    if let Ok(p) = std::env::var("EXAMKIT_QUESTION_FILE") {
        config.question_file = PathBuf::from(p);
    }
    if let Ok(p) = std::env::var("EXAMKIT_KEY_FILE") {
        config.key_file = PathBuf::from(p);
    }
    if let Ok(p) = std::env::var("EXAMKIT_ROSTER_FILE") {
        config.roster_file = PathBuf::from(p);
    }

    config.question_file = resolve_path(&config.question_file);
    config.key_file = resolve_path(&config.key_file);
    config.roster_file = resolve_path(&config.roster_file);
    config.report_dir = config.report_dir.as_deref().map(resolve_path);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("examkit"))
}

/// Create the roster adapter described by `config`.
pub fn open_roster(config: &ExamkitConfig) -> Roster {
    let store = CsvRosterStore::new(config.roster_file.clone());
    Roster::new(Arc::new(store)).with_columns(config.columns.clone())
}
