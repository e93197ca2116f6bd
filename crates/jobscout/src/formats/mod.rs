// ABOUTME: Output writers for extracted job records: CSV with a header row, and JSON.
// ABOUTME: Also names the default timestamped CSV file for a scrape run.

//! Output format conversion module.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::ScrapeError;
use crate::record::JobRecord;

/// Output format for a batch of job records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        write!(f, "{}", s)
    }
}

impl OutputFormat {
    /// Parses a format name, ignoring case. Unknown names are `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(OutputFormat::Csv),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// `jobs_data_YYYYMMDD_HHMMSS.csv` for the given local time.
pub fn default_csv_filename(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("jobs_data_{}.csv", now.format("%Y%m%d_%H%M%S")))
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row, quoting cells that need it.
fn write_row<W: Write>(w: &mut W, row: &[impl AsRef<str>]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            w.write_all(b",")?;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\n")
}

/// Write records as CSV with a header row.
pub fn write_csv<W: Write>(mut w: W, records: &[JobRecord]) -> io::Result<()> {
    write_row(&mut w, &JobRecord::COLUMNS)?;
    for record in records {
        write_row(&mut w, &record.to_row())?;
    }
    w.flush()
}

/// Records as a CSV string.
pub fn to_csv(records: &[JobRecord]) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_csv(&mut buf, records);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Records as pretty-printed JSON.
pub fn to_json(records: &[JobRecord]) -> Result<String, ScrapeError> {
    serde_json::to_string_pretty(records).map_err(|e| {
        ScrapeError::output("", "FormatJson", Some(anyhow::anyhow!("{}", e)))
    })
}

/// Render records in `format`.
pub fn render(records: &[JobRecord], format: OutputFormat) -> Result<String, ScrapeError> {
    match format {
        OutputFormat::Csv => Ok(to_csv(records)),
        OutputFormat::Json => to_json(records),
    }
}

/// Render records in `format` and write them to `path`.
pub fn save(records: &[JobRecord], format: OutputFormat, path: &Path) -> Result<(), ScrapeError> {
    let rendered = render(records, format)?;
    fs::write(path, rendered).map_err(|e| {
        ScrapeError::output(
            path.display().to_string(),
            "Save",
            Some(anyhow::anyhow!("cannot write output: {}", e)),
        )
    })
}
