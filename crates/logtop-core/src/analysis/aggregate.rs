use super::{Aggregation, UrlTimes};
use crate::log::parse_line;
use crate::{Error, Result};
use std::io;

/// Streams log lines through the parser, accumulating per-URL request times
/// and a running total.
pub struct Aggregator {
    errors_threshold: f64,
}

impl Aggregator {
    pub fn new(errors_threshold: f64) -> Self {
        Self { errors_threshold }
    }

    /// Consume the full line stream and produce the aggregate.
    ///
    /// Individual parse failures are logged and counted but never abort the
    /// pass; the run fails as a whole only when the final error rate is
    /// strictly above the threshold, or when the file had no lines at all.
    /// An I/O error while reading propagates immediately.
    pub fn consume<I>(&self, lines: I) -> Result<Aggregation>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        let mut agg = Aggregation::default();

        for line in lines {
            let line = line?;
            agg.total_lines += 1;

            match parse_line(&line) {
                Ok(record) => {
                    let first_seen = agg.times_by_url.len();
                    agg.times_by_url
                        .entry(record.url)
                        .or_insert_with(|| UrlTimes {
                            first_seen,
                            times: Vec::new(),
                        })
                        .times
                        .push(record.request_time);
                    agg.total_time += record.request_time;
                }
                Err(e) => {
                    tracing::warn!("Error parsing log line {}: {}", agg.total_lines, e);
                    agg.error_count += 1;
                }
            }
        }

        if agg.total_lines == 0 {
            return Err(Error::EmptyLog);
        }

        let rate = agg.error_rate();
        if rate > self.errors_threshold {
            tracing::error!(
                "Too many parse errors: {}/{} lines failed",
                agg.error_count,
                agg.total_lines
            );
            return Err(Error::ExcessiveParseErrors {
                rate,
                threshold: self.errors_threshold,
            });
        }

        tracing::info!(
            "Aggregated {} lines across {} URLs ({} parse errors)",
            agg.total_lines,
            agg.distinct_urls(),
            agg.error_count
        );

        Ok(agg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(url: &str, time: f64) -> io::Result<String> {
        Ok(format!(
            "1.196.116.32 -  - [29/Jun/2017:03:50:22 +0300] \"GET {url} HTTP/1.1\" 200 927 {time}"
        ))
    }

    fn garbage() -> io::Result<String> {
        Ok("not a log line".to_string())
    }

    #[test]
    fn test_aggregates_per_url() {
        let agg = Aggregator::new(0.1)
            .consume(vec![line("/a", 0.1), line("/a", 0.3), line("/b", 0.2)])
            .unwrap();

        assert_eq!(agg.total_lines, 3);
        assert_eq!(agg.error_count, 0);
        assert_eq!(agg.distinct_urls(), 2);
        assert_eq!(agg.times_by_url["/a"].times, vec![0.1, 0.3]);
        assert_eq!(agg.times_by_url["/b"].times, vec![0.2]);
        assert!((agg.total_time - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_first_seen_order_recorded() {
        let agg = Aggregator::new(0.1)
            .consume(vec![line("/a", 0.1), line("/b", 0.2), line("/a", 0.3)])
            .unwrap();

        assert_eq!(agg.times_by_url["/a"].first_seen, 0);
        assert_eq!(agg.times_by_url["/b"].first_seen, 1);
    }

    #[test]
    fn test_clean_log_has_zero_error_rate() {
        let agg = Aggregator::new(0.0)
            .consume(vec![line("/a", 0.1), line("/b", 0.2)])
            .unwrap();
        assert_eq!(agg.error_rate(), 0.0);
    }

    #[test]
    fn test_errors_counted_not_fatal_below_threshold() {
        let agg = Aggregator::new(0.5)
            .consume(vec![line("/a", 0.1), garbage(), line("/b", 0.2)])
            .unwrap();

        assert_eq!(agg.total_lines, 3);
        assert_eq!(agg.error_count, 1);
        assert_eq!(agg.distinct_urls(), 2);
    }

    #[test]
    fn test_rate_above_threshold_aborts() {
        // 2 bad lines of 10 with threshold 0.1: rate 0.2 aborts the run
        let mut lines: Vec<io::Result<String>> = (0..8).map(|i| line(&format!("/u{i}"), 0.1)).collect();
        lines.push(garbage());
        lines.push(garbage());

        let result = Aggregator::new(0.1).consume(lines);
        assert!(matches!(
            result,
            Err(Error::ExcessiveParseErrors { rate, threshold })
                if (rate - 0.2).abs() < 1e-9 && threshold == 0.1
        ));
    }

    #[test]
    fn test_rate_equal_to_threshold_tolerated() {
        // 1 bad line of 10 with threshold 0.1: rate == threshold, no abort
        let mut lines: Vec<io::Result<String>> = (0..9).map(|i| line(&format!("/u{i}"), 0.1)).collect();
        lines.push(garbage());

        let agg = Aggregator::new(0.1).consume(lines).unwrap();
        assert_eq!(agg.error_count, 1);
    }

    #[test]
    fn test_empty_stream() {
        let result = Aggregator::new(0.1).consume(Vec::new());
        assert!(matches!(result, Err(Error::EmptyLog)));
    }

    #[test]
    fn test_read_error_propagates() {
        let lines = vec![
            line("/a", 0.1),
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad gzip stream")),
        ];
        let result = Aggregator::new(0.1).consume(lines);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
