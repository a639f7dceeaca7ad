use crate::{Error, Result};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref LOG_NAME: Regex =
        Regex::new(r"^nginx-access-ui\.log-(\d{8})(\.gz)?$").expect("valid regex");
}

/// The selected log file, with the date token parsed out of its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestLog {
    pub path: PathBuf,
    pub date: NaiveDate,
    pub compressed: bool,
}

/// Select the most recent access log in `log_dir`.
///
/// The naming convention embeds a sortable date, so the lexicographically
/// greatest matching file name is the most recent. Names whose date token is
/// not a real calendar date are skipped. A missing directory or an empty
/// match set both mean there is nothing to analyze.
pub fn find_latest(log_dir: &Path) -> Result<LatestLog> {
    tracing::debug!("Scanning for log files in: {}", log_dir.display());

    let entries = match fs::read_dir(log_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::NoLogFile(log_dir.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut latest: Option<(String, LatestLog)> = None;
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(caps) = LOG_NAME.captures(name) else {
            continue;
        };

        let Ok(date) = NaiveDate::parse_from_str(&caps[1], "%Y%m%d") else {
            tracing::warn!("Skipping log with invalid date token: {}", name);
            continue;
        };

        if latest.as_ref().is_none_or(|(max, _)| name > max.as_str()) {
            latest = Some((
                name.to_string(),
                LatestLog {
                    path: entry.path(),
                    date,
                    compressed: caps.get(2).is_some(),
                },
            ));
        }
    }

    match latest {
        Some((name, log)) => {
            tracing::info!("Selected log file: {}", name);
            Ok(log)
        }
        None => Err(Error::NoLogFile(log_dir.to_path_buf())),
    }
}
