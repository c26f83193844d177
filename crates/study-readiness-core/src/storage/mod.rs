mod config;
pub mod session_log;

pub use config::{Config, DisplayConfig, PromptsConfig, StorageConfig};
pub use session_log::{CsvSessionLog, MemorySessionLog, SessionStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// File name of the session log inside the data directory.
pub const DEFAULT_LOG_FILE: &str = "study_readiness_log.csv";

/// Returns `~/.config/study-readiness[-dev]/` based on STUDY_READINESS_ENV.
///
/// Set STUDY_READINESS_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDY_READINESS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("study-readiness-dev")
    } else {
        base_dir.join("study-readiness")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
