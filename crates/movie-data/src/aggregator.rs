//! Grouping of movie records by release period and by value band.

use std::collections::BTreeMap;

use movie_core::calculations::{mean, round_to};
use movie_core::models::{
    Bucket, BucketCount, DecadeCount, HistogramBin, MovieRecord, YearlyStats, RATING_BUCKETS,
    VOTE_BUCKETS,
};

// ── MovieAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that groups records and counts them.
pub struct MovieAggregator;

impl MovieAggregator {
    /// Count records per decade bucket, ascending by decade.
    ///
    /// The counts always sum to `movies.len()`.
    pub fn count_by_decade(movies: &[MovieRecord]) -> Vec<DecadeCount> {
        Self::count_by_key(movies, MovieRecord::decade)
            .into_iter()
            .map(|(decade, count)| DecadeCount { decade, count })
            .collect()
    }

    /// Count records per release year, ascending by year.
    pub fn count_by_year(movies: &[MovieRecord]) -> Vec<(i32, usize)> {
        Self::count_by_key(movies, |m| m.year).into_iter().collect()
    }

    /// Count, mean rating and mean votes for every release year present.
    pub fn yearly_stats(movies: &[MovieRecord]) -> Vec<YearlyStats> {
        let mut by_year: BTreeMap<i32, Vec<&MovieRecord>> = BTreeMap::new();
        for movie in movies {
            by_year.entry(movie.year).or_default().push(movie);
        }

        by_year
            .into_iter()
            .map(|(year, group)| {
                let ratings: Vec<f64> = group.iter().map(|m| m.rating).collect();
                let votes: Vec<f64> = group.iter().map(|m| m.votes as f64).collect();
                YearlyStats {
                    year,
                    movie_count: group.len(),
                    avg_rating: round_to(mean(&ratings).unwrap_or(0.0), 2),
                    avg_votes: round_to(mean(&votes).unwrap_or(0.0), 2),
                }
            })
            .collect()
    }

    /// Count records per rating band, in [`RATING_BUCKETS`] order.
    pub fn rating_distribution(movies: &[MovieRecord]) -> Vec<BucketCount> {
        Self::count_in_buckets(&RATING_BUCKETS, movies.iter().map(|m| m.rating))
    }

    /// Count records per vote band, in [`VOTE_BUCKETS`] order.
    pub fn vote_distribution(movies: &[MovieRecord]) -> Vec<BucketCount> {
        Self::count_in_buckets(&VOTE_BUCKETS, movies.iter().map(|m| m.votes as f64))
    }

    /// Split `[min rating, max rating]` into `bins` equal-width bins and count
    /// the records in each.
    ///
    /// The maximum rating falls into the last bin. When every rating is equal
    /// a single bin of width 0 holds all records. Empty input or `bins == 0`
    /// yields no bins.
    pub fn rating_histogram(movies: &[MovieRecord], bins: usize) -> Vec<HistogramBin> {
        if movies.is_empty() || bins == 0 {
            return Vec::new();
        }
        let min = movies.iter().map(|m| m.rating).fold(f64::INFINITY, f64::min);
        let max = movies.iter().map(|m| m.rating).fold(f64::NEG_INFINITY, f64::max);

        if max == min {
            return vec![HistogramBin {
                lower: min,
                upper: max,
                count: movies.len(),
            }];
        }

        let width = (max - min) / bins as f64;
        let mut counts = vec![0usize; bins];
        for movie in movies {
            let idx = (((movie.rating - min) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lower: min + width * i as f64,
                upper: if i + 1 == bins {
                    max
                } else {
                    min + width * (i + 1) as f64
                },
                count,
            })
            .collect()
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Generic grouping driver; `BTreeMap` keeps keys sorted.
    fn count_by_key(
        movies: &[MovieRecord],
        key_fn: impl Fn(&MovieRecord) -> i32,
    ) -> BTreeMap<i32, usize> {
        let mut map = BTreeMap::new();
        for movie in movies {
            *map.entry(key_fn(movie)).or_insert(0) += 1;
        }
        map
    }

    fn count_in_buckets(buckets: &[Bucket], values: impl Iterator<Item = f64>) -> Vec<BucketCount> {
        let mut counts = vec![0usize; buckets.len()];
        for value in values {
            if let Some(idx) = buckets.iter().position(|b| b.contains(value)) {
                counts[idx] += 1;
            }
        }
        buckets
            .iter()
            .zip(counts)
            .map(|(bucket, count)| BucketCount {
                label: bucket.label.to_string(),
                count,
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
