use tracing::{info, instrument};

use crate::app::ports::PageSourcePort;
use crate::config::EtlConfig;
use crate::error::Result;
use crate::pipeline::load::{render_rows, select_all_statement};
use crate::pipeline::{transform, write_csv, Extractor, SqliteLoader};
use crate::progress::{Milestone, ProgressLog};
use crate::types::PipelineResult;

/// Runs fetch, extract, transform and load once, in sequence, recording a
/// progress milestone after each step.
pub struct EtlUseCase {
    config: EtlConfig,
    source: Box<dyn PageSourcePort>,
    progress: ProgressLog,
}

impl EtlUseCase {
    pub fn new(config: EtlConfig, source: Box<dyn PageSourcePort>) -> Self {
        let progress = ProgressLog::new(&config.progress_log_path);
        Self {
            config,
            source,
            progress,
        }
    }

    #[instrument(skip(self), fields(url = %self.config.url))]
    pub async fn run(&self) -> Result<PipelineResult> {
        let config = &self.config;
        self.progress.record(Milestone::Started)?;

        // Extract
        let html = self.source.fetch(&config.url).await?;
        let extraction = Extractor::from_config(config).extract(&html);
        self.progress.record(Milestone::Extracted)?;

        // Transform
        let records = transform(extraction.companies, config.exchange_rate)?;
        self.progress.record(Milestone::Transformed)?;

        // Load
        write_csv(&records, &config.csv_path, &config.columns)?;
        self.progress.record(Milestone::CsvSaved)?;

        let mut loader = SqliteLoader::open(&config.db_path)?;
        self.progress.record(Milestone::ConnectionOpened)?;

        loader.replace_table(&config.table_name, &config.columns, &records)?;
        self.progress.record(Milestone::DatabaseLoaded)?;

        let statement = select_all_statement(&config.table_name);
        println!("{statement}");
        let stored = loader.query_all(&config.table_name)?;
        print!("{}", render_rows(&config.columns, &stored));
        self.progress.record(Milestone::QueryComplete)?;

        loader.close()?;
        self.progress.record(Milestone::ConnectionClosed)?;

        info!(
            records = records.len(),
            csv = %config.csv_path.display(),
            table = %config.table_name,
            "ETL run finished"
        );

        Ok(PipelineResult {
            report: extraction.report,
            records,
            stored,
        })
    }
}
