use super::{Aggregation, ReportRow};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Ranks URLs by total request time and derives the per-row metrics.
pub struct ReportBuilder {
    report_size: usize,
}

/// Ranking key: greatest time_sum first, earlier-seen URL winning ties.
struct Candidate<'a> {
    url: &'a str,
    times: &'a [f64],
    time_sum: f64,
    first_seen: usize,
}

impl PartialEq for Candidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate<'_> {}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time_sum
            .total_cmp(&other.time_sum)
            .then(other.first_seen.cmp(&self.first_seen))
    }
}

impl ReportBuilder {
    pub fn new(report_size: usize) -> Self {
        Self { report_size }
    }

    /// Select the top `report_size` URLs by `time_sum` and compute their
    /// derived metrics, ordered descending by `time_sum`.
    ///
    /// Selection keeps a bounded min-heap instead of sorting the whole URL
    /// set; with fewer distinct URLs than `report_size` every URL is ranked.
    /// The median is the element at index `len / 2` of the sorted times
    /// (the upper middle value for even-length lists).
    pub fn build(&self, agg: &Aggregation) -> Vec<ReportRow> {
        tracing::debug!(
            "Building report over {} distinct URLs (report size {})",
            agg.distinct_urls(),
            self.report_size
        );

        let distinct = agg.distinct_urls();

        let mut heap = BinaryHeap::with_capacity(self.report_size + 1);
        for (url, stat) in &agg.times_by_url {
            heap.push(Reverse(Candidate {
                url,
                times: &stat.times,
                time_sum: stat.times.iter().sum(),
                first_seen: stat.first_seen,
            }));
            if heap.len() > self.report_size {
                heap.pop();
            }
        }

        // ascending over Reverse<Candidate> is descending over time_sum
        let rows: Vec<ReportRow> = heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(c)| {
                let count = c.times.len();
                let mut sorted = c.times.to_vec();
                sorted.sort_by(f64::total_cmp);

                ReportRow {
                    url: c.url.to_string(),
                    count,
                    count_perc: count as f64 / distinct as f64,
                    time_sum: c.time_sum,
                    time_perc: if agg.total_time == 0.0 {
                        0.0
                    } else {
                        c.time_sum / agg.total_time
                    },
                    time_avg: c.time_sum / count as f64,
                    time_max: sorted.last().copied().unwrap_or(0.0),
                    time_med: sorted.get(sorted.len() / 2).copied().unwrap_or(0.0),
                }
            })
            .collect();

        tracing::info!("Report built with {} rows", rows.len());

        rows
    }
}
