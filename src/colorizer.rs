//! Rating to heatmap color mapping

use serde::Serialize;

/// Discrete color bucket of a heatmap cell, from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RatingColor {
    /// No rating available
    Unknown,
    /// Below 4
    Terrible,
    /// [4, 5)
    Poor,
    /// [5, 6)
    Mediocre,
    /// [6, 7)
    Fair,
    /// [7, 8)
    Good,
    /// [8, 9)
    Great,
    /// 9 and above
    Excellent,
}

impl RatingColor {
    /// All rated buckets in ascending order, used for legends
    pub const SCALE: [RatingColor; 7] = [
        RatingColor::Terrible,
        RatingColor::Poor,
        RatingColor::Mediocre,
        RatingColor::Fair,
        RatingColor::Good,
        RatingColor::Great,
        RatingColor::Excellent,
    ];

    /// CSS hex color of the bucket
    pub fn hex(self) -> &'static str {
        match self {
            RatingColor::Unknown => "#3d3d3d",
            RatingColor::Terrible => "#da3633",
            RatingColor::Poor => "#f85149",
            RatingColor::Mediocre => "#d29922",
            RatingColor::Fair => "#e3b341",
            RatingColor::Good => "#7ee787",
            RatingColor::Great => "#3fb950",
            RatingColor::Excellent => "#238636",
        }
    }

    /// Short human label of the bucket's range
    pub fn label(self) -> &'static str {
        match self {
            RatingColor::Unknown => "n/a",
            RatingColor::Terrible => "< 4",
            RatingColor::Poor => "4 - 5",
            RatingColor::Mediocre => "5 - 6",
            RatingColor::Fair => "6 - 7",
            RatingColor::Good => "7 - 8",
            RatingColor::Great => "8 - 9",
            RatingColor::Excellent => "9+",
        }
    }
}

/// Maps an optional rating to its color bucket.
///
/// Lower bounds are inclusive: 4.0 is `Poor`, 9.0 is `Excellent`.
/// NaN is treated like a missing rating.
pub fn rating_color(rating: Option<f64>) -> RatingColor {
    match rating {
        None => RatingColor::Unknown,
        Some(r) if r.is_nan() => RatingColor::Unknown,
        Some(r) if r < 4.0 => RatingColor::Terrible,
        Some(r) if r < 5.0 => RatingColor::Poor,
        Some(r) if r < 6.0 => RatingColor::Mediocre,
        Some(r) if r < 7.0 => RatingColor::Fair,
        Some(r) if r < 8.0 => RatingColor::Good,
        Some(r) if r < 9.0 => RatingColor::Great,
        Some(_) => RatingColor::Excellent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_table() {
        let table = [
            (None, RatingColor::Unknown),
            (Some(0.0), RatingColor::Terrible),
            (Some(3.99), RatingColor::Terrible),
            (Some(4.0), RatingColor::Poor),
            (Some(4.99), RatingColor::Poor),
            (Some(5.0), RatingColor::Mediocre),
            (Some(6.0), RatingColor::Fair),
            (Some(6.5), RatingColor::Fair),
            (Some(7.0), RatingColor::Good),
            (Some(8.0), RatingColor::Great),
            (Some(8.99), RatingColor::Great),
            (Some(9.0), RatingColor::Excellent),
            (Some(10.0), RatingColor::Excellent),
        ];

        for (rating, expected) in table {
            assert_eq!(rating_color(rating), expected, "rating {:?}", rating);
        }
    }

    #[test]
    fn test_nan_is_unknown() {
        assert_eq!(rating_color(Some(f64::NAN)), RatingColor::Unknown);
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(rating_color(None).hex(), "#3d3d3d");
        assert_eq!(rating_color(Some(2.0)).hex(), "#da3633");
        assert_eq!(rating_color(Some(9.5)).hex(), "#238636");
    }

    #[test]
    fn test_scale_is_ordered_and_distinct() {
        let hexes: Vec<&str> = RatingColor::SCALE.iter().map(|c| c.hex()).collect();
        let mut unique = hexes.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 7);
        assert_eq!(RatingColor::SCALE[0], rating_color(Some(1.0)));
        assert_eq!(RatingColor::SCALE[6], rating_color(Some(9.9)));
    }
}
