use crate::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Run configuration, constructed once at startup and passed by reference.
///
/// JSON keys use the upper-case names recognized in the config document;
/// keys absent from the document keep their built-in defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "REPORT_SIZE", default = "default_report_size")]
    pub report_size: usize,

    #[serde(rename = "REPORT_DIR", default = "default_dir")]
    pub report_dir: PathBuf,

    #[serde(rename = "LOG_DIR", default = "default_dir")]
    pub log_dir: PathBuf,

    #[serde(rename = "LOGGING_PATH", default)]
    pub logging_path: Option<PathBuf>,

    #[serde(rename = "ERRORS_THRESHOLD", default = "default_errors_threshold")]
    pub errors_threshold: f64,
}

fn default_report_size() -> usize {
    1000
}

fn default_dir() -> PathBuf {
    PathBuf::from("./")
}

fn default_errors_threshold() -> f64 {
    0.1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_size: default_report_size(),
            report_dir: default_dir(),
            log_dir: default_dir(),
            logging_path: None,
            errors_threshold: default_errors_threshold(),
        }
    }
}

impl Config {
    /// Load a config document from the given path.
    ///
    /// A missing or malformed file is a startup error; supplied keys override
    /// the defaults, unspecified keys keep them.
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Loading config from: {}", path.display());

        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;

        tracing::info!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Check value constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.report_size < 1 {
            return Err(Error::InvalidConfig(
                "REPORT_SIZE must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.errors_threshold) {
            return Err(Error::InvalidConfig(format!(
                "ERRORS_THRESHOLD must be between 0 and 1, got {}",
                self.errors_threshold
            )));
        }
        Ok(())
    }
}
