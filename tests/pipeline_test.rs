use anyhow::Result;
use async_trait::async_trait;
use largest_company_etl::app::etl_use_case::EtlUseCase;
use largest_company_etl::app::ports::PageSourcePort;
use largest_company_etl::config::EtlConfig;
use largest_company_etl::pipeline::SqliteLoader;
use std::path::Path;
use tempfile::tempdir;

const SAMPLE_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Daftar 100 perusahaan terbesar</title></head>
<body>
  <div class="split-page split-page0"><p>1. Decoy dengan pendapatan Rp9.999</p></div>
  <div class="split-page split-page1 open has-keypoint">
    <p>Berikut daftar 100 perusahaan terbesar di Indonesia berdasarkan pendapatan.</p>
    <p>1. PT Pertamina (Persero) dengan pendapatan Rp1.500.000</p>
    <p>2. PT Astra International Tbk dengan pendapatan Rp12.345.678.000</p>
  </div>
</body>
</html>"#;

struct FixturePage;

#[async_trait]
impl PageSourcePort for FixturePage {
    async fn fetch(&self, _url: &str) -> largest_company_etl::error::Result<String> {
        Ok(SAMPLE_PAGE.to_string())
    }
}

fn config_in(dir: &Path) -> EtlConfig {
    EtlConfig {
        csv_path: dir.join("Largest_Company_Indonesia.csv"),
        db_path: dir.join("Company.db"),
        progress_log_path: dir.join("code_log.txt"),
        ..EtlConfig::default()
    }
}

#[tokio::test]
async fn test_end_to_end_two_companies() -> Result<()> {
    let temp_dir = tempdir()?;
    let config = config_in(temp_dir.path());
    let use_case = EtlUseCase::new(config.clone(), Box::new(FixturePage));

    let result = use_case.run().await?;

    // Records, in source order
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[0].rank, 1);
    assert_eq!(result.records[0].name, "PT Pertamina (Persero)");
    assert_eq!(result.records[0].revenue_value, 1_500_000_000);
    assert_eq!(result.records[0].revenue_usd, 95328.88);
    assert_eq!(result.records[1].rank, 2);
    assert_eq!(result.records[1].name, "PT Astra International Tbk");
    assert_eq!(result.records[1].revenue_value, 12_345_678_000);
    assert_eq!(result.report.paragraphs_skipped, 1);

    // CSV
    let csv = std::fs::read_to_string(&config.csv_path)?;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], ",No,Company Name,Revenue in Rupiah,Revenue in USD");
    assert_eq!(lines[1], "0,1,PT Pertamina (Persero),1500000000,95328.88");
    assert!(lines[2].starts_with("1,2,PT Astra International Tbk,12345678000,"));

    // Table
    let loader = SqliteLoader::open(&config.db_path)?;
    let rows = loader.query_all(&config.table_name)?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows, result.stored);
    assert_eq!(rows[1].revenue_value, 12_345_678_000);
    loader.close()?;

    // Progress log
    let log = std::fs::read_to_string(&config.progress_log_path)?;
    let messages: Vec<&str> = log
        .lines()
        .map(|line| line.split_once(" : ").map(|(_, m)| m).unwrap_or(""))
        .collect();
    assert_eq!(
        messages,
        vec![
            "Preliminaries complete. Initiating ETL process",
            "Extract process complete. Initiating Transform process",
            "Data Transformation process complete. Initiating Load process",
            "Data saved to CSV",
            "SQL Connection initiated",
            "Data successfully loaded to database",
            "Process Complete",
            "Server Connection closed",
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_second_run_replaces_outputs() -> Result<()> {
    let temp_dir = tempdir()?;
    let config = config_in(temp_dir.path());

    let first = EtlUseCase::new(config.clone(), Box::new(FixturePage)).run().await?;
    let csv_first = std::fs::read_to_string(&config.csv_path)?;
    let second = EtlUseCase::new(config.clone(), Box::new(FixturePage)).run().await?;
    let csv_second = std::fs::read_to_string(&config.csv_path)?;

    assert_eq!(first.stored, second.stored);
    assert_eq!(second.stored.len(), 2);
    assert_eq!(csv_first, csv_second);

    // The progress log is append-only across runs
    let log = std::fs::read_to_string(&config.progress_log_path)?;
    assert_eq!(log.lines().count(), 16);

    Ok(())
}
