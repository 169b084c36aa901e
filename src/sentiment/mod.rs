//! Sentiment bucketing of tiles
//!
//! Valence is partitioned into three closed buckets at fixed thresholds:
//! `positive` at or above the positive threshold, `critical` at or below
//! the critical threshold, `neutral` strictly between. Every finite valence
//! lands in exactly one bucket.

use crate::model::{Cluster, Tile};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete sentiment bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentBucket {
    Positive,
    Neutral,
    Critical,
}

impl SentimentBucket {
    /// Fixed legend order; significant for colour consistency, not ranking
    pub const ALL: [SentimentBucket; 3] = [
        SentimentBucket::Positive,
        SentimentBucket::Neutral,
        SentimentBucket::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentBucket::Positive => "positive",
            SentimentBucket::Neutral => "neutral",
            SentimentBucket::Critical => "critical",
        }
    }

    /// Human-facing legend label
    pub fn label(&self) -> &'static str {
        match self {
            SentimentBucket::Positive => "Positive",
            SentimentBucket::Neutral => "Neutral",
            SentimentBucket::Critical => "Critical",
        }
    }

    /// Position in [`SentimentBucket::ALL`]
    pub fn index(&self) -> usize {
        match self {
            SentimentBucket::Positive => 0,
            SentimentBucket::Neutral => 1,
            SentimentBucket::Critical => 2,
        }
    }
}

impl fmt::Display for SentimentBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket boundaries on the valence axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentThresholds {
    /// Valence at or above this is positive
    pub positive: f64,
    /// Valence at or below this is critical
    pub critical: f64,
}

impl Default for SentimentThresholds {
    fn default() -> Self {
        Self {
            positive: 0.10,
            critical: -0.10,
        }
    }
}

impl SentimentThresholds {
    pub fn bucket(&self, valence: f64) -> SentimentBucket {
        let v = if valence.is_finite() { valence } else { 0.0 };
        if v >= self.positive {
            SentimentBucket::Positive
        } else if v <= self.critical {
            SentimentBucket::Critical
        } else {
            SentimentBucket::Neutral
        }
    }
}

/// Classifier output for one tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub bucket: SentimentBucket,
    pub intensity01: f64,
    pub level: IntensityLevel,
}

/// Classify raw valence/intensity values with the given thresholds
pub fn classify_values(
    valence: f64,
    intensity: f64,
    thresholds: &SentimentThresholds,
) -> Classification {
    let intensity01 = if intensity.is_finite() {
        intensity.clamp(0.0, 1.0)
    } else {
        0.0
    };
    Classification {
        bucket: thresholds.bucket(valence),
        intensity01,
        level: IntensityLevel::from_intensity(intensity01),
    }
}

/// Classify a tile with the default ±0.10 thresholds
pub fn classify(tile: &Tile) -> Classification {
    classify_with(tile, &SentimentThresholds::default())
}

pub fn classify_with(tile: &Tile, thresholds: &SentimentThresholds) -> Classification {
    classify_values(tile.valence, tile.intensity, thresholds)
}

/// Coarse intensity band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntensityLevel {
    Calm,
    Low,
    Medium,
    High,
    Extreme,
}

impl IntensityLevel {
    pub fn from_intensity(intensity: f64) -> Self {
        if intensity.is_nan() || intensity < 0.15 {
            IntensityLevel::Calm
        } else if intensity < 0.35 {
            IntensityLevel::Low
        } else if intensity < 0.60 {
            IntensityLevel::Medium
        } else if intensity < 0.80 {
            IntensityLevel::High
        } else {
            IntensityLevel::Extreme
        }
    }
}

/// Count and rounded share of one bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BucketShare {
    pub count: usize,
    pub pct: u32,
}

/// Per-bucket tallies across a whole result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SentimentStats {
    pub positive: BucketShare,
    pub neutral: BucketShare,
    pub critical: BucketShare,
    pub total: usize,
}

impl SentimentStats {
    pub fn from_clusters(clusters: &[Cluster]) -> Self {
        Self::from_clusters_with(clusters, &SentimentThresholds::default())
    }

    pub fn from_clusters_with(clusters: &[Cluster], thresholds: &SentimentThresholds) -> Self {
        Self::from_tiles(clusters.iter().flat_map(|c| c.items.iter()), thresholds)
    }

    pub fn from_tiles<'a>(
        tiles: impl IntoIterator<Item = &'a Tile>,
        thresholds: &SentimentThresholds,
    ) -> Self {
        let mut counts = [0usize; 3];
        for tile in tiles {
            counts[thresholds.bucket(tile.valence).index()] += 1;
        }
        Self::from_counts(counts)
    }

    /// Build from counts in [`SentimentBucket::ALL`] order
    pub fn from_counts(counts: [usize; 3]) -> Self {
        let total: usize = counts.iter().sum();
        // Empty sets report 0% everywhere
        let denom = total.max(1) as f64;
        let share = |count: usize| BucketShare {
            count,
            pct: ((count as f64 / denom) * 100.0).round() as u32,
        };

        Self {
            positive: share(counts[0]),
            neutral: share(counts[1]),
            critical: share(counts[2]),
            total,
        }
    }

    pub fn get(&self, bucket: SentimentBucket) -> BucketShare {
        match bucket {
            SentimentBucket::Positive => self.positive,
            SentimentBucket::Neutral => self.neutral,
            SentimentBucket::Critical => self.critical,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the three bucket predicates partition the reals
        #[test]
        fn test_partition_property(v in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
            let t = SentimentThresholds::default();
            let hits = [v >= t.positive, v <= t.critical, v > t.critical && v < t.positive];
            prop_assert_eq!(hits.iter().filter(|h| **h).count(), 1);

            let expected = if hits[0] {
                SentimentBucket::Positive
            } else if hits[1] {
                SentimentBucket::Critical
            } else {
                SentimentBucket::Neutral
            };
            prop_assert_eq!(t.bucket(v), expected);
        }

        /// Property: intensity01 always lands in [0, 1]
        #[test]
        fn test_intensity_clamped_property(i in any::<f64>()) {
            let c = classify_values(0.0, i, &SentimentThresholds::default());
            prop_assert!((0.0..=1.0).contains(&c.intensity01));
        }
    }
}
