//! Maps location codes to color tiers.

use crate::error::{PipelineError, Result};
use crate::models::{ColorTier, SalesBucketSet};

/// Returns the tier of `code` given the quarter buckets.
///
/// Buckets are checked Q1 through Q4 and the first match wins, so a code
/// listed in several buckets resolves to the highest one.
pub fn classify(code: i64, buckets: &SalesBucketSet) -> ColorTier {
    buckets
        .ranked()
        .into_iter()
        .find(|(_, codes)| codes.contains(&code))
        .map_or(ColorTier::Unclassified, |(tier, _)| tier)
}

/// Parses a stored location code into its integer form.
pub fn parse_location_code(code: &str) -> Result<i64> {
    code.trim()
        .parse::<i64>()
        .map_err(|_| PipelineError::InvalidLocationCode {
            code: code.to_string(),
        })
}

/// Parses and classifies a stored location code.
pub fn classify_code(code: &str, buckets: &SalesBucketSet) -> Result<ColorTier> {
    parse_location_code(code).map(|code| classify(code, buckets))
}
