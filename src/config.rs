use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;
use crate::error::{EtlError, Result};

/// Column headers shared by the CSV export and the SQLite table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColumnNames {
    pub rank: String,
    pub name: String,
    pub revenue: String,
    pub revenue_usd: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            rank: constants::RANK_COLUMN.to_string(),
            name: constants::NAME_COLUMN.to_string(),
            revenue: constants::REVENUE_COLUMN.to_string(),
            revenue_usd: constants::USD_COLUMN.to_string(),
        }
    }
}

/// Everything a pipeline run needs to know. Passed to each stage instead of
/// reading globals, so tests can point the run at temp paths.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct EtlConfig {
    pub url: String,
    pub container_class: String,
    pub preamble_phrase: String,
    pub segment_delimiter: String,
    pub csv_path: PathBuf,
    pub db_path: PathBuf,
    pub table_name: String,
    pub progress_log_path: PathBuf,
    pub exchange_rate: f64,
    pub columns: ColumnNames,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            url: constants::SOURCE_URL.to_string(),
            container_class: constants::CONTAINER_CLASS.to_string(),
            preamble_phrase: constants::PREAMBLE_PHRASE.to_string(),
            segment_delimiter: constants::SEGMENT_DELIMITER.to_string(),
            csv_path: PathBuf::from(constants::CSV_PATH),
            db_path: PathBuf::from(constants::DB_PATH),
            table_name: constants::TABLE_NAME.to_string(),
            progress_log_path: PathBuf::from(constants::PROGRESS_LOG_PATH),
            exchange_rate: constants::IDR_PER_USD,
            columns: ColumnNames::default(),
        }
    }
}

impl EtlConfig {
    /// Read overrides from a TOML file. Keys that are absent keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            EtlError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: EtlConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.exchange_rate.is_finite() && self.exchange_rate > 0.0) {
            return Err(EtlError::Config(format!(
                "exchange_rate must be a positive number, got {}",
                self.exchange_rate
            )));
        }
        if self.segment_delimiter.is_empty() {
            return Err(EtlError::Config("segment_delimiter must not be empty".into()));
        }
        if self.table_name.trim().is_empty() {
            return Err(EtlError::Config("table_name must not be empty".into()));
        }
        Ok(())
    }
}
