use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Lowest IMDb rating a record may carry.
pub const MIN_RATING: f64 = 7.8;
/// Lowest vote count a record may carry.
pub const MIN_VOTES: u64 = 10_000;
/// Earliest release year a record may carry.
pub const MIN_YEAR: i32 = 2000;
/// First year counted as "recent" in the top lists.
pub const RECENT_SINCE_YEAR: i32 = 2020;

/// One film from the curated dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// 1-based position in the rank order (rating desc, votes desc).
    pub rank: u32,
    pub title: String,
    /// Release year.
    pub year: i32,
    /// IMDb rating on a 0–10 scale.
    pub rating: f64,
    /// Number of IMDb votes.
    pub votes: u64,
    /// Running time in minutes, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl MovieRecord {
    /// Decade bucket of the release year, e.g. 2015 → 2010.
    pub fn decade(&self) -> i32 {
        decade_of(self.year)
    }

    /// Total order used to assign ranks.
    ///
    /// Higher rating first, then more votes, then title ascending so that
    /// exact duplicates still order deterministically.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .rating
            .total_cmp(&self.rating)
            .then_with(|| other.votes.cmp(&self.votes))
            .then_with(|| self.title.cmp(&other.title))
    }
}

/// Floor a year to its decade: `(year / 10) * 10`.
pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

// ── Buckets ───────────────────────────────────────────────────────────────────

/// A labelled half-open range `[lower, upper)`; `upper == None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub label: &'static str,
    pub lower: f64,
    pub upper: Option<f64>,
}

impl Bucket {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && self.upper.map_or(true, |upper| value < upper)
    }
}

/// Rating bands, best first.
pub const RATING_BUCKETS: [Bucket; 4] = [
    Bucket { label: "9.0+", lower: 9.0, upper: None },
    Bucket { label: "8.5-8.9", lower: 8.5, upper: Some(9.0) },
    Bucket { label: "8.0-8.4", lower: 8.0, upper: Some(8.5) },
    Bucket { label: "7.8-7.9", lower: 7.8, upper: Some(8.0) },
];

/// Vote-count bands, most popular first.
pub const VOTE_BUCKETS: [Bucket; 4] = [
    Bucket { label: "500K+", lower: 500_000.0, upper: None },
    Bucket { label: "100K-499K", lower: 100_000.0, upper: Some(500_000.0) },
    Bucket { label: "50K-99K", lower: 50_000.0, upper: Some(100_000.0) },
    Bucket { label: "10K-49K", lower: 10_000.0, upper: Some(50_000.0) },
];

/// Number of records that fell into one [`Bucket`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCount {
    pub label: String,
    pub count: usize,
}

// ── Aggregates ────────────────────────────────────────────────────────────────

/// Number of records released in one decade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecadeCount {
    /// First year of the decade, e.g. `2010`.
    pub decade: i32,
    pub count: usize,
}

impl DecadeCount {
    /// Display label such as `"2010s"`.
    pub fn label(&self) -> String {
        format!("{}s", self.decade)
    }
}

/// Per-release-year aggregate used by the timeline chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyStats {
    pub year: i32,
    pub movie_count: usize,
    /// Mean rating, rounded to 2 decimals.
    pub avg_rating: f64,
    /// Mean votes, rounded to 2 decimals.
    pub avg_votes: f64,
}

/// One equal-width bin of the rating histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Aggregate statistics over the full record set.
///
/// Field names of the first block match the summary file written by earlier
/// versions of the tool, so those files still deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub total_movies: usize,
    /// Mean rating, rounded to 2 decimals.
    pub avg_rating: f64,
    /// Median rating, rounded to 2 decimals.
    pub median_rating: f64,
    /// Mean vote count, truncated.
    pub avg_votes: u64,
    /// Median vote count, truncated.
    pub median_votes: u64,
    /// `"MIN-MAX"` release years.
    pub year_range: String,
    pub most_productive_year: i32,
    pub highest_rated_movie: String,
    pub most_voted_movie: String,
    #[serde(default)]
    pub newest_movie: String,
    #[serde(default)]
    pub oldest_movie: String,

    #[serde(default)]
    pub min_rating: f64,
    #[serde(default)]
    pub max_rating: f64,
    #[serde(default)]
    pub min_votes: u64,
    #[serde(default)]
    pub max_votes: u64,
    #[serde(default)]
    pub min_year: i32,
    #[serde(default)]
    pub max_year: i32,
    /// Ascending by decade; counts sum to `total_movies`.
    #[serde(default)]
    pub decade_counts: Vec<DecadeCount>,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
