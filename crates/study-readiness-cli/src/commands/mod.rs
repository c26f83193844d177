pub mod chart;
pub mod clear;
pub mod config;
pub mod evaluate;
pub mod log;
pub mod show;

use std::path::PathBuf;

use study_readiness_core::{Config, CsvSessionLog};

/// Configuration and paths shared by every command.
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    log_override: Option<PathBuf>,
}

impl Context {
    pub fn load(
        config_path: Option<PathBuf>,
        log_override: Option<PathBuf>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = match config_path {
            Some(path) => path,
            None => Config::path()?,
        };
        let config = Config::load_from(&config_path)?;
        Ok(Self {
            config,
            config_path,
            log_override,
        })
    }

    /// The session log, honouring `--log-file` over the configured path.
    pub fn session_log(&self) -> Result<CsvSessionLog, Box<dyn std::error::Error>> {
        let path = match &self.log_override {
            Some(path) => path.clone(),
            None => self.config.log_path()?,
        };
        Ok(CsvSessionLog::new(path))
    }
}
