// Extract, transform and load stages, in the order a run executes them
pub mod extract;
pub mod load;
pub mod normalize;
pub mod transform;

pub use extract::Extractor;
pub use load::{write_csv, SqliteLoader};
pub use normalize::normalize_revenue;
pub use transform::{to_usd, transform};
