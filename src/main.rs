use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use largest_company_etl::app::etl_use_case::EtlUseCase;
use largest_company_etl::config::EtlConfig;
use largest_company_etl::infra::ReqwestPageSource;
use largest_company_etl::logging;

#[derive(Parser)]
#[command(name = "largest_company_etl")]
#[command(about = "Scrape Indonesia's largest companies by revenue into CSV and SQLite")]
#[command(version = "0.1.0")]
struct Cli {
    /// TOML file overriding the built-in URL, paths, table name or exchange rate
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _guard = logging::init_logging()?;
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => EtlConfig::load(&path)?,
        None => EtlConfig::default(),
    };

    let use_case = EtlUseCase::new(config, Box::new(ReqwestPageSource::new()));
    match use_case.run().await {
        Ok(result) => {
            info!(
                records = result.records.len(),
                unmatched = result.report.segments_unmatched,
                "Pipeline finished"
            );
            Ok(())
        }
        Err(e) => {
            error!("Pipeline failed: {}", e);
            Err(e.into())
        }
    }
}
