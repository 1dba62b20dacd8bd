//! Statistics engine for the movie dataset.
//!
//! Turns the loaded table into [`SummaryStatistics`] and a bundled
//! [`MovieAnalysis`] that the chart and report renderers consume.

use movie_core::calculations::{mean, median, mode, round_to};
use movie_core::error::{MovieError, Result};
use movie_core::models::{
    BucketCount, DecadeCount, HistogramBin, MovieRecord, SummaryStatistics, YearlyStats,
    RECENT_SINCE_YEAR,
};
use tracing::debug;

use crate::aggregator::MovieAggregator;

/// Number of bins in the rating histogram.
pub const HISTOGRAM_BINS: usize = 15;

// ── Public types ──────────────────────────────────────────────────────────────

/// Everything derived from one dataset, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieAnalysis {
    pub summary: SummaryStatistics,
    pub rating_distribution: Vec<BucketCount>,
    pub vote_distribution: Vec<BucketCount>,
    pub yearly: Vec<YearlyStats>,
    pub rating_histogram: Vec<HistogramBin>,
    /// Best-ranked movies, at most `top_n`.
    pub top_by_rating: Vec<MovieRecord>,
    /// Most-voted movies, at most `top_n`.
    pub top_by_votes: Vec<MovieRecord>,
    /// Best-ranked movies released in or after [`RECENT_SINCE_YEAR`].
    pub recent_top: Vec<MovieRecord>,
}

impl MovieAnalysis {
    pub fn decade_counts(&self) -> &[DecadeCount] {
        &self.summary.decade_counts
    }
}

// ── Top-N selection ───────────────────────────────────────────────────────────

/// The `n` best-ranked records, in rank order.
pub fn top_by_rating(movies: &[MovieRecord], n: usize) -> Vec<MovieRecord> {
    let mut sorted = movies.to_vec();
    sorted.sort_by(MovieRecord::rank_cmp);
    sorted.truncate(n);
    sorted
}

/// The `n` most-voted records; equal vote counts keep rank order.
pub fn top_by_votes(movies: &[MovieRecord], n: usize) -> Vec<MovieRecord> {
    let mut sorted = movies.to_vec();
    sorted.sort_by(|a, b| b.votes.cmp(&a.votes).then_with(|| a.rank_cmp(b)));
    sorted.truncate(n);
    sorted
}

/// The `n` best-ranked records released in or after `since_year`.
pub fn recent_top(movies: &[MovieRecord], since_year: i32, n: usize) -> Vec<MovieRecord> {
    let recent: Vec<MovieRecord> = movies
        .iter()
        .filter(|m| m.year >= since_year)
        .cloned()
        .collect();
    top_by_rating(&recent, n)
}

// ── Summary ───────────────────────────────────────────────────────────────────

/// Compute the aggregate statistics of the whole table.
///
/// Fails with [`MovieError::EmptyDataset`] when there are no records.
/// Argmax/argmin ties resolve to the better-ranked record.
pub fn summarize(movies: &[MovieRecord]) -> Result<SummaryStatistics> {
    if movies.is_empty() {
        return Err(MovieError::EmptyDataset);
    }

    let mut ranked = movies.to_vec();
    ranked.sort_by(MovieRecord::rank_cmp);

    let ratings: Vec<f64> = ranked.iter().map(|m| m.rating).collect();
    let votes: Vec<f64> = ranked.iter().map(|m| m.votes as f64).collect();
    let years: Vec<i32> = ranked.iter().map(|m| m.year).collect();

    let avg_rating = mean(&ratings).ok_or(MovieError::EmptyDataset)?;
    let median_rating = median(&ratings).ok_or(MovieError::EmptyDataset)?;
    let avg_votes = mean(&votes).ok_or(MovieError::EmptyDataset)?;
    let median_votes = median(&votes).ok_or(MovieError::EmptyDataset)?;
    let most_productive_year = mode(&years).ok_or(MovieError::EmptyDataset)?;

    // `ranked` is in rank order, so ties go to the better-ranked record.
    let highest_rated = &ranked[0];
    let most_voted = first_with(&ranked, |m| m.votes, u64::max);
    let newest = first_with(&ranked, |m| m.year, i32::max);
    let oldest = first_with(&ranked, |m| m.year, i32::min);

    let min_rating = ratings.iter().copied().fold(f64::INFINITY, f64::min);
    let max_rating = ratings.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min_year = oldest.year;
    let max_year = newest.year;

    let summary = SummaryStatistics {
        total_movies: ranked.len(),
        avg_rating: round_to(avg_rating, 2),
        median_rating: round_to(median_rating, 2),
        avg_votes: avg_votes as u64,
        median_votes: median_votes as u64,
        year_range: format!("{}-{}", min_year, max_year),
        most_productive_year,
        highest_rated_movie: highest_rated.title.clone(),
        most_voted_movie: most_voted.title.clone(),
        newest_movie: newest.title.clone(),
        oldest_movie: oldest.title.clone(),
        min_rating,
        max_rating,
        min_votes: ranked.iter().map(|m| m.votes).min().unwrap_or(0),
        max_votes: most_voted.votes,
        min_year,
        max_year,
        decade_counts: MovieAggregator::count_by_decade(&ranked),
    };

    debug!(
        "Summarised {} movies: avg rating {}, {} decades",
        summary.total_movies,
        summary.avg_rating,
        summary.decade_counts.len()
    );

    Ok(summary)
}

/// Run the whole statistics engine over `movies`.
///
/// `top_n` bounds the three top lists.
pub fn analyze(movies: &[MovieRecord], top_n: usize) -> Result<MovieAnalysis> {
    let summary = summarize(movies)?;

    Ok(MovieAnalysis {
        summary,
        rating_distribution: MovieAggregator::rating_distribution(movies),
        vote_distribution: MovieAggregator::vote_distribution(movies),
        yearly: MovieAggregator::yearly_stats(movies),
        rating_histogram: MovieAggregator::rating_histogram(movies, HISTOGRAM_BINS),
        top_by_rating: top_by_rating(movies, top_n),
        top_by_votes: top_by_votes(movies, top_n),
        recent_top: recent_top(movies, RECENT_SINCE_YEAR, top_n),
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// First record (in slice order) whose `key` equals the extreme chosen by
/// `pick`. `ranked` must be non-empty.
fn first_with<K: Copy + PartialEq>(
    ranked: &[MovieRecord],
    key: impl Fn(&MovieRecord) -> K,
    pick: impl Fn(K, K) -> K,
) -> &MovieRecord {
    let extreme = ranked
        .iter()
        .map(&key)
        .reduce(&pick)
        .unwrap_or_else(|| key(&ranked[0]));
    ranked
        .iter()
        .find(|&m| key(m) == extreme)
        .unwrap_or(&ranked[0])
}

// ── Tests ─────────────────────────────────────────────────────────────────────
