//! Discrete color scale for the product-count choropleth.

/// Visual intensity buckets, ordered from no data to most products.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ColorBucket {
    NoData,
    UpTo5,
    UpTo10,
    UpTo25,
    UpTo50,
    UpTo100,
    Over100,
}

impl ColorBucket {
    /// Fill color as a hex string.
    pub fn fill(&self) -> &'static str {
        match self {
            ColorBucket::NoData => "#E5E7EB",
            ColorBucket::UpTo5 => "#FFEDD5",
            ColorBucket::UpTo10 => "#FED7AA",
            ColorBucket::UpTo25 => "#FDBA74",
            ColorBucket::UpTo50 => "#FB923C",
            ColorBucket::UpTo100 => "#F97316",
            ColorBucket::Over100 => "#EA580C",
        }
    }

    /// Legend label for this bucket.
    pub fn label(&self) -> &'static str {
        match self {
            ColorBucket::NoData => "no data",
            ColorBucket::UpTo5 => "1-5",
            ColorBucket::UpTo10 => "6-10",
            ColorBucket::UpTo25 => "11-25",
            ColorBucket::UpTo50 => "26-50",
            ColorBucket::UpTo100 => "51-100",
            ColorBucket::Over100 => "100+",
        }
    }

    /// The six colored buckets in legend order, no-data excluded.
    pub fn legend() -> [ColorBucket; 6] {
        [
            ColorBucket::UpTo5,
            ColorBucket::UpTo10,
            ColorBucket::UpTo25,
            ColorBucket::UpTo50,
            ColorBucket::UpTo100,
            ColorBucket::Over100,
        ]
    }
}

/// Maps a product count to its bucket. Zero and, defensively, negative
/// counts map to `NoData`.
pub fn bucket_for(count: i64) -> ColorBucket {
    if count <= 0 {
        ColorBucket::NoData
    } else if count <= 5 {
        ColorBucket::UpTo5
    } else if count <= 10 {
        ColorBucket::UpTo10
    } else if count <= 25 {
        ColorBucket::UpTo25
    } else if count <= 50 {
        ColorBucket::UpTo50
    } else if count <= 100 {
        ColorBucket::UpTo100
    } else {
        ColorBucket::Over100
    }
}
