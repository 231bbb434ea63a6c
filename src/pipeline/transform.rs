use tracing::{info, instrument};

use crate::error::Result;
use crate::pipeline::normalize::normalize_revenue;
use crate::types::{CompanyRecord, ExtractedCompany};

/// Rupiah to USD at a fixed rate, rounded to cents with ties to even.
pub fn to_usd(revenue_value: i64, exchange_rate: f64) -> f64 {
    let usd = revenue_value as f64 / exchange_rate;
    (usd * 100.0).round_ties_even() / 100.0
}

/// Normalize revenue and derive the USD column for every extracted company.
#[instrument(skip(companies), fields(count = companies.len()))]
pub fn transform(companies: Vec<ExtractedCompany>, exchange_rate: f64) -> Result<Vec<CompanyRecord>> {
    let records = companies
        .into_iter()
        .map(|company| {
            let revenue_value = normalize_revenue(&company.revenue_raw)?;
            Ok(CompanyRecord {
                rank: company.rank,
                name: company.name,
                revenue_raw: company.revenue_raw,
                revenue_value,
                revenue_usd: to_usd(revenue_value, exchange_rate),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!("Transformed {} records", records.len());
    Ok(records)
}
