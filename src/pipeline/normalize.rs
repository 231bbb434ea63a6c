use crate::constants::{MILLIONS, THOUSANDS};
use crate::error::{EtlError, Result};

/// Convert a revenue string such as `"1.500"` or `"12.345.678"` into Rupiah.
///
/// The article abbreviates figures at two magnitudes. Fewer than three
/// `.`-separated groups means the number is in millions; three or more means
/// it is in thousands.
pub fn normalize_revenue(raw: &str) -> Result<i64> {
    let groups = raw.split('.').count();
    let digits: String = raw.chars().filter(|c| *c != '.').collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(EtlError::Revenue {
            raw: raw.to_string(),
            reason: "expected digits separated by '.'".to_string(),
        });
    }

    let base: i64 = digits.parse().map_err(|e| EtlError::Revenue {
        raw: raw.to_string(),
        reason: format!("{e}"),
    })?;

    let multiplier = if groups < 3 { MILLIONS } else { THOUSANDS };

    base.checked_mul(multiplier).ok_or_else(|| EtlError::Revenue {
        raw: raw.to_string(),
        reason: "value overflows i64".to_string(),
    })
}
