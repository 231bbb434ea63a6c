/// Fixed defaults for a pipeline run. `EtlConfig::default()` is built from these.

// Source page
pub const SOURCE_URL: &str = "https://www.idntimes.com/business/economy/trio-hamdani/lengkap-ini-daftar-100-perusahaan-terbesar-di-indonesia?page=all";

// The ranking lives in prose inside this div, matched against the full class attribute
pub const CONTAINER_CLASS: &str = "split-page split-page1 open has-keypoint";
pub const PREAMBLE_PHRASE: &str = "Berikut daftar";

// The page has no table; each entry ends with a ".000" thousands group
pub const SEGMENT_DELIMITER: &str = ".000";

// Output locations
pub const CSV_PATH: &str = "./Largest_Company_Indonesia.csv";
pub const DB_PATH: &str = "Company.db";
pub const TABLE_NAME: &str = "Largest_company_in_Indonesia";
pub const PROGRESS_LOG_PATH: &str = "./code_log.txt";

// Column names, shared by the CSV header and the table schema
pub const RANK_COLUMN: &str = "No";
pub const NAME_COLUMN: &str = "Company Name";
pub const REVENUE_COLUMN: &str = "Revenue in Rupiah";
pub const USD_COLUMN: &str = "Revenue in USD";

/// IDR per USD
pub const IDR_PER_USD: f64 = 15735.0;

/// Revenue multipliers for the thousands-separator magnitude heuristic
pub const MILLIONS: i64 = 1_000_000;
pub const THOUSANDS: i64 = 1_000;
