mod aggregate;
mod report;

pub use aggregate::Aggregator;
pub use report::ReportBuilder;

use serde::Serialize;
use std::collections::HashMap;

/// Per-URL working state: request times in log order, plus the position at
/// which the URL first appeared. Ranking ties are broken on `first_seen` so
/// two runs over the same file produce the same report.
#[derive(Debug, Clone, Default)]
pub struct UrlTimes {
    pub first_seen: usize,
    pub times: Vec<f64>,
}

/// Everything one aggregation pass learned about a log file.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub times_by_url: HashMap<String, UrlTimes>,
    pub total_time: f64,
    pub error_count: usize,
    pub total_lines: usize,
}

impl Aggregation {
    pub fn distinct_urls(&self) -> usize {
        self.times_by_url.len()
    }

    pub fn error_rate(&self) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            self.error_count as f64 / self.total_lines as f64
        }
    }
}

/// One ranked row of the final report.
///
/// `count_perc` is relative to the number of distinct URLs, `time_perc` to
/// the total request time across all URLs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub url: String,
    pub count: usize,
    pub count_perc: f64,
    pub time_sum: f64,
    pub time_perc: f64,
    pub time_avg: f64,
    pub time_max: f64,
    pub time_med: f64,
}
