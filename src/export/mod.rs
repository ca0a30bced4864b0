//! Record export to CSV or JSON files.
//!
//! An export names its file `<base>_<YYYY-MM-DD>.<ext>` and hands the
//! bytes to a [`DownloadSink`]. Empty input never produces a file.

pub mod format;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde_json::{Map, Value};
use thiserror::Error;

pub use format::{to_csv, to_json};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    /// Declared but not implemented yet
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

/// What the user is told after an export attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportNotice {
    Downloaded { filename: String },
    NoData,
    ComingSoon,
}

impl fmt::Display for ExportNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportNotice::Downloaded { filename } => write!(f, "Exported {}", filename),
            ExportNotice::NoData => write!(f, "No Data: there is nothing to export"),
            ExportNotice::ComingSoon => write!(f, "Excel export is coming soon"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Record {index} is not a JSON object")]
    NotARecord { index: usize },
}

/// Where finished exports go
pub trait DownloadSink {
    fn save(&mut self, filename: &str, mime_type: &str, contents: &[u8])
    -> Result<(), ExportError>;
}

/// Writes downloads into a directory
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl DownloadSink for DirectorySink {
    fn save(
        &mut self,
        filename: &str,
        _mime_type: &str,
        contents: &[u8],
    ) -> Result<(), ExportError> {
        let path = self.dir.join(filename);
        fs::create_dir_all(&self.dir)
            .and_then(|_| fs::write(&path, contents))
            .map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;
        tracing::info!(path = %path.display(), "Wrote export");
        Ok(())
    }
}

/// Converts a list of JSON values into records, rejecting anything
/// that isn't an object.
pub fn records_from_values(values: &[Value]) -> Result<Vec<Map<String, Value>>, ExportError> {
    values
        .iter()
        .enumerate()
        .map(|(index, v)| {
            v.as_object()
                .cloned()
                .ok_or(ExportError::NotARecord { index })
        })
        .collect()
}

pub struct Exporter<S: DownloadSink> {
    sink: S,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl<S: DownloadSink> Exporter<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            today: local_today,
        }
    }

    /// Use a fixed clock for the filename date
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn filename(&self, base_name: &str, format: ExportFormat) -> String {
        format!(
            "{}_{}.{}",
            base_name,
            (self.today)().format("%Y-%m-%d"),
            format.extension()
        )
    }

    pub fn export(
        &mut self,
        records: &[Map<String, Value>],
        base_name: &str,
        format: ExportFormat,
    ) -> Result<ExportNotice, ExportError> {
        if format == ExportFormat::Xlsx {
            return Ok(ExportNotice::ComingSoon);
        }
        if records.is_empty() {
            tracing::info!("Nothing to export");
            return Ok(ExportNotice::NoData);
        }

        let contents = match format {
            ExportFormat::Csv => to_csv(records),
            _ => to_json(records)?,
        };
        let filename = self.filename(base_name, format);
        self.sink
            .save(&filename, format.mime_type(), contents.as_bytes())?;
        Ok(ExportNotice::Downloaded { filename })
    }
}
