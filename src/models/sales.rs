//! Quarter-bucketed sales membership and the color tiers derived from it.

use std::collections::HashSet;
use std::fmt;

/// Location codes sold in each quarter bucket of the reporting window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesBucketSet {
    /// Most recent / highest bucket.
    pub q1: HashSet<i64>,
    /// Second bucket.
    pub q2: HashSet<i64>,
    /// Third bucket.
    pub q3: HashSet<i64>,
    /// Fourth bucket.
    pub q4: HashSet<i64>,
}

impl SalesBucketSet {
    /// Buckets paired with their tier, in priority order.
    pub fn ranked(&self) -> [(ColorTier, &HashSet<i64>); 4] {
        [
            (ColorTier::Q1, &self.q1),
            (ColorTier::Q2, &self.q2),
            (ColorTier::Q3, &self.q3),
            (ColorTier::Q4, &self.q4),
        ]
    }
}

/// Visual tier of a location on the floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorTier {
    /// Sold in the first quarter bucket.
    Q1,
    /// Sold in the second quarter bucket.
    Q2,
    /// Sold in the third quarter bucket.
    Q3,
    /// Sold in the fourth quarter bucket.
    Q4,
    /// Absent from every bucket.
    Unclassified,
}

impl ColorTier {
    /// Returns the SVG fill color for this tier.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Q1 => "red",
            Self::Q2 => "orange",
            Self::Q3 => "yellow",
            Self::Q4 => "green",
            Self::Unclassified => "gray",
        }
    }
}

impl fmt::Display for ColorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.color())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_colors() {
        assert_eq!(ColorTier::Q1.color(), "red");
        assert_eq!(ColorTier::Q2.color(), "orange");
        assert_eq!(ColorTier::Q3.color(), "yellow");
        assert_eq!(ColorTier::Q4.color(), "green");
        assert_eq!(ColorTier::Unclassified.to_string(), "gray");
    }

    #[test]
    fn test_ranked_order() {
        let tiers: Vec<ColorTier> = SalesBucketSet::default()
            .ranked()
            .iter()
            .map(|(tier, _)| *tier)
            .collect();
        assert_eq!(
            tiers,
            vec![ColorTier::Q1, ColorTier::Q2, ColorTier::Q3, ColorTier::Q4]
        );
    }
}
