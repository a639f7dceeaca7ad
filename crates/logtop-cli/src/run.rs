use logtop_core::analysis::{Aggregator, ReportBuilder};
use logtop_core::config::Config;
use logtop_core::{Error, Result, log, report};
use std::io::BufRead;
use std::path::PathBuf;

/// How a run ended when it did not fail outright.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The report was written to this path.
    Written(PathBuf),
    /// No matching log file; nothing to analyze and nothing was written.
    NoLogFile,
}

/// Run the whole pipeline: locate the latest log, aggregate it, rank the
/// URLs, write the report.
///
/// The absence of a log file is an expected idle state, not a failure, so it
/// is folded into [`Outcome`]; every other error propagates.
pub fn execute(config: &Config) -> Result<Outcome> {
    let latest = match log::find_latest(&config.log_dir) {
        Ok(latest) => latest,
        Err(Error::NoLogFile(dir)) => {
            tracing::warn!("No log file to analyze in {}", dir.display());
            return Ok(Outcome::NoLogFile);
        }
        Err(e) => return Err(e),
    };

    let reader = log::open(&latest)?;
    let aggregation = Aggregator::new(config.errors_threshold).consume(reader.lines())?;
    let rows = ReportBuilder::new(config.report_size).build(&aggregation);
    let path = report::write_report(&rows, &config.report_dir, latest.date)?;

    Ok(Outcome::Written(path))
}
