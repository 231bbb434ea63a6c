use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;

pub const TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M:%S";

/// Checkpoints written to the progress log, in the order a run reaches them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    Started,
    Extracted,
    Transformed,
    CsvSaved,
    ConnectionOpened,
    DatabaseLoaded,
    QueryComplete,
    ConnectionClosed,
}

impl Milestone {
    pub fn message(&self) -> &'static str {
        match self {
            Milestone::Started => "Preliminaries complete. Initiating ETL process",
            Milestone::Extracted => "Extract process complete. Initiating Transform process",
            Milestone::Transformed => {
                "Data Transformation process complete. Initiating Load process"
            }
            Milestone::CsvSaved => "Data saved to CSV",
            Milestone::ConnectionOpened => "SQL Connection initiated",
            Milestone::DatabaseLoaded => "Data successfully loaded to database",
            Milestone::QueryComplete => "Process Complete",
            Milestone::ConnectionClosed => "Server Connection closed",
        }
    }
}

/// Append-only, human-readable milestone log.
///
/// Each call opens the file in append mode, so a missing parent directory or
/// a permission problem fails the run at the first milestone.
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn record(&self, milestone: Milestone) -> Result<()> {
        self.record_at(milestone, Local::now())
    }

    fn record_at(&self, milestone: Milestone, at: DateTime<Local>) -> Result<()> {
        let line = format_line(milestone.message(), at);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;

        info!(milestone = ?milestone, "{}", milestone.message());
        Ok(())
    }
}

pub fn format_line(message: &str, at: DateTime<Local>) -> String {
    format!("{} : {}", at.format(TIMESTAMP_FORMAT), message)
}
