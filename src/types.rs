/// One ranked entry as captured from the page prose, before any revenue math
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedCompany {
    /// Any width SQLite can store as INTEGER
    pub rank: i64,
    pub name: String,
    /// Revenue as printed, with `.` thousands separators
    pub revenue_raw: String,
}

/// A fully transformed row, ready for the loaders
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRecord {
    pub rank: i64,
    pub name: String,
    pub revenue_raw: String,
    /// Revenue in Rupiah
    pub revenue_value: i64,
    pub revenue_usd: f64,
}

/// A row read back from the SQLite table
#[derive(Debug, Clone, PartialEq)]
pub struct StoredCompany {
    pub rank: i64,
    pub name: String,
    pub revenue_value: i64,
    pub revenue_usd: f64,
}

impl From<&CompanyRecord> for StoredCompany {
    fn from(record: &CompanyRecord) -> Self {
        Self {
            rank: record.rank,
            name: record.name.clone(),
            revenue_value: record.revenue_value,
            revenue_usd: record.revenue_usd,
        }
    }
}

/// Outcome of matching one text segment against the company pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentMatch {
    Matched(ExtractedCompany),
    Unmatched(String),
}

/// Counts gathered during extraction, so dropped input is visible in the logs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractReport {
    pub container_found: bool,
    pub paragraphs_seen: usize,
    pub paragraphs_skipped: usize,
    pub segments_seen: usize,
    pub segments_matched: usize,
    pub segments_unmatched: usize,
}

/// Result of the extract stage
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub companies: Vec<ExtractedCompany>,
    pub report: ExtractReport,
}

/// Result of a complete pipeline run
#[derive(Debug)]
pub struct PipelineResult {
    pub report: ExtractReport,
    pub records: Vec<CompanyRecord>,
    pub stored: Vec<StoredCompany>,
}
