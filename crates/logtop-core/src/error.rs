use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("No log file matching the expected naming convention in {0}")]
    NoLogFile(PathBuf),

    #[error("Log file contains no lines")]
    EmptyLog,

    #[error("Parse error rate {rate:.4} exceeds threshold {threshold}")]
    ExcessiveParseErrors { rate: f64, threshold: f64 },

    #[error("Failed to write report to {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
