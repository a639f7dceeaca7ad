use super::finder::LatestLog;
use crate::Result;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Open the selected log for reading, decompressing `.gz` files on the fly.
///
/// The returned reader yields the file's lines lazily in a single forward
/// pass; rewinding means reopening.
pub fn open(log: &LatestLog) -> Result<Box<dyn BufRead>> {
    tracing::debug!("Opening log file: {}", log.path.display());

    let file = File::open(&log.path)?;
    let reader: Box<dyn BufRead> = if log.compressed {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    Ok(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use tempfile::TempDir;

    fn latest(path: std::path::PathBuf, compressed: bool) -> LatestLog {
        LatestLog {
            path,
            date: NaiveDate::from_ymd_opt(2017, 6, 30).unwrap(),
            compressed,
        }
    }

    #[test]
    fn test_reads_plain_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nginx-access-ui.log-20170630");
        std::fs::write(&path, "first line\nsecond line\n").unwrap();

        let reader = open(&latest(path, false)).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["first line", "second line"]);
    }

    #[test]
    fn test_reads_gzipped_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nginx-access-ui.log-20170630.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b"first line\nsecond line\n").unwrap();
        encoder.finish().unwrap();

        let reader = open(&latest(path, true)).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["first line", "second line"]);
    }
}
