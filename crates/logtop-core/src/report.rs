use crate::analysis::ReportRow;
use crate::{Error, Result};
use chrono::NaiveDate;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Write the ranked rows as a pretty-printed JSON array to
/// `report-YYYY.MM.DD.json` inside `report_dir`, named after the source
/// log's date token.
///
/// The rows are serialized into a temp file in the same directory and
/// persisted over the final name, so the destination holds either the
/// complete report or nothing.
pub fn write_report(rows: &[ReportRow], report_dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    let path = report_dir.join(format!("report-{}.json", date.format("%Y.%m.%d")));
    tracing::debug!("Writing report to: {}", path.display());

    write_atomic(rows, report_dir, &path).map_err(|source| Error::ReportWrite {
        path: path.clone(),
        source,
    })?;

    tracing::info!("Wrote {} report rows to {}", rows.len(), path.display());

    Ok(path)
}

fn write_atomic(rows: &[ReportRow], dir: &Path, path: &Path) -> std::io::Result<()> {
    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer_pretty(&mut writer, rows)?;
        writer.flush()?;
    }
    tmp.persist(path)?;
    Ok(())
}
