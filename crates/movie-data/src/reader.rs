//! Dataset loading for the movie statistics tools.
//!
//! Reads the curated JSON array of movies, validates every record against the
//! selection bounds and returns the table in rank order.

use std::path::Path;

use movie_core::error::{MovieError, Result};
use movie_core::models::{MovieRecord, MIN_RATING, MIN_VOTES, MIN_YEAR};
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

// ── Wire format ───────────────────────────────────────────────────────────────

/// A record exactly as it appears in the dataset file.
#[derive(Debug, Deserialize)]
struct RawMovie {
    title: String,
    year: i32,
    rating: f64,
    votes: u64,
    #[serde(default)]
    duration: Option<RawDuration>,
    #[serde(default)]
    rank: Option<u32>,
}

/// Durations are stored either as minutes or as free text like `"2h 30m"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Minutes(u32),
    Text(String),
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and validate the dataset at `path`.
///
/// Fails with [`MovieError::FileRead`] if the file cannot be read, and
/// otherwise behaves like [`parse_movies`].
pub fn load_movies(path: &Path) -> Result<Vec<MovieRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| MovieError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let movies = parse_movies(&content)?;
    debug!("Loaded {} movies from {}", movies.len(), path.display());
    Ok(movies)
}

/// Parse and validate a dataset held in memory.
///
/// * Malformed JSON, or a record that does not decode, yields
///   [`MovieError::Parse`] naming the record and the failing field.
/// * A record outside the selection bounds yields [`MovieError::Validation`].
///
/// Nothing is returned unless every record is valid. The result is sorted by
/// [`MovieRecord::rank_cmp`] and ranks are reassigned `1..=n`.
pub fn parse_movies(content: &str) -> Result<Vec<MovieRecord>> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(content).map_err(|e| MovieError::Parse(e.to_string()))?;

    let mut indexed = Vec::with_capacity(values.len());
    let mut declared_ranks = Vec::with_capacity(values.len());

    for (index, value) in values.into_iter().enumerate() {
        let raw = RawMovie::deserialize(&value)
            .map_err(|e| MovieError::Parse(format!("record #{}: {}", index, e)))?;

        validate(index, &raw)?;

        let duration = match raw.duration {
            None => None,
            Some(RawDuration::Minutes(m)) => Some(m),
            Some(RawDuration::Text(text)) => Some(parse_duration(&text).ok_or_else(|| {
                MovieError::Parse(format!(
                    "record #{}: field `duration`: unrecognised duration {:?}",
                    index, text
                ))
            })?),
        };

        declared_ranks.push(raw.rank);
        indexed.push((
            index,
            MovieRecord {
                rank: 0,
                title: raw.title,
                year: raw.year,
                rating: raw.rating,
                votes: raw.votes,
                duration,
            },
        ));
    }

    indexed.sort_by(|(_, a), (_, b)| a.rank_cmp(b));
    let order: Vec<usize> = indexed.iter().map(|(index, _)| *index).collect();

    let mismatches = count_rank_mismatches(&declared_ranks, &order);
    if mismatches > 0 {
        warn!(
            "{} record(s) declare a rank that differs from rating/vote order; using derived ranks",
            mismatches
        );
    }

    let movies = indexed
        .into_iter()
        .enumerate()
        .map(|(i, (_, mut movie))| {
            movie.rank = (i + 1) as u32;
            movie
        })
        .collect();

    Ok(movies)
}

/// Parse a free-text duration into minutes.
///
/// Accepts `"150"`, `"150 min"`, `"2h"`, `"45m"` and `"2h 30m"`.
pub fn parse_duration(text: &str) -> Option<u32> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(minutes) = trimmed.parse::<u32>() {
        return Some(minutes);
    }

    let re = Regex::new(r"^(?:(\d+)\s*h)?\s*(?:(\d+)\s*m(?:in)?)?$").expect("regex is valid");
    let caps = re.captures(trimmed)?;
    let hours = caps.get(1).map(|m| m.as_str().parse::<u32>()).transpose().ok()?;
    let minutes = caps.get(2).map(|m| m.as_str().parse::<u32>()).transpose().ok()?;
    if hours.is_none() && minutes.is_none() {
        return None;
    }
    hours.unwrap_or(0).checked_mul(60)?.checked_add(minutes.unwrap_or(0))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Check the selection bounds on one decoded record.
fn validate(index: usize, raw: &RawMovie) -> Result<()> {
    let reason = if !raw.rating.is_finite() || raw.rating < MIN_RATING {
        Some(format!("rating {} is below {}", raw.rating, MIN_RATING))
    } else if raw.votes < MIN_VOTES {
        Some(format!("votes {} is below {}", raw.votes, MIN_VOTES))
    } else if raw.year < MIN_YEAR {
        Some(format!("year {} is before {}", raw.year, MIN_YEAR))
    } else {
        None
    };

    match reason {
        Some(reason) => Err(MovieError::Validation {
            index,
            title: raw.title.clone(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Count records whose declared rank disagrees with the derived one.
///
/// `declared[i]` is the rank stated by input record `i`; `order[r]` is the
/// input index of the record that ended up at rank `r + 1`.
fn count_rank_mismatches(declared: &[Option<u32>], order: &[usize]) -> usize {
    let mut mismatches = 0usize;
    for (position, &index) in order.iter().enumerate() {
        let derived = (position + 1) as u32;
        if let Some(Some(rank)) = declared.get(index) {
            if *rank != derived {
                mismatches += 1;
                debug!("Rank mismatch for record #{}: declared {}, derived {}", index, rank, derived);
            }
        }
    }
    mismatches
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn sample_movie(title: &str, year: i32, rating: f64, votes: u64) -> serde_json::Value {
        serde_json::json!({
            "title": title,
            "year": year,
            "rating": rating,
            "votes": votes,
        })
    }

    fn write_dataset(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    // ── load_movies ───────────────────────────────────────────────────────────

    #[test]
    fn test_load_movies_from_file() {
        let dir = TempDir::new().unwrap();
        let data = serde_json::json!([
            sample_movie("Dangal", 2016, 8.3, 200_000),
            sample_movie("3 Idiots", 2009, 8.4, 420_000),
        ]);
        let path = write_dataset(dir.path(), "movies.json", &data.to_string());

        let movies = load_movies(&path).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "3 Idiots");
        assert_eq!(movies[0].rank, 1);
        assert_eq!(movies[1].rank, 2);
    }

    #[test]
    fn test_load_movies_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_movies(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, MovieError::FileRead { .. }));
    }

    // ── parse_movies ──────────────────────────────────────────────────────────

    #[test]
    fn test_parse_movies_malformed_json() {
        let err = parse_movies("[{\"title\": \"A\",").unwrap_err();
        match err {
            MovieError::Parse(msg) => assert!(msg.contains("line 1"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_movies_not_an_array() {
        let err = parse_movies(r#"{"title": "A"}"#).unwrap_err();
        assert!(matches!(err, MovieError::Parse(_)));
    }

    #[test]
    fn test_parse_movies_missing_field_names_record_and_field() {
        let data = serde_json::json!([
            sample_movie("A", 2010, 8.0, 20_000),
            {"title": "B", "year": 2011, "rating": 8.1},
        ]);
        let err = parse_movies(&data.to_string()).unwrap_err();
        match err {
            MovieError::Parse(msg) => {
                assert!(msg.contains("record #1"), "{msg}");
                assert!(msg.contains("votes"), "{msg}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_movies_wrong_type() {
        let data = r#"[{"title": "A", "year": "twenty ten", "rating": 8.0, "votes": 20000}]"#;
        let err = parse_movies(data).unwrap_err();
        assert!(matches!(err, MovieError::Parse(ref m) if m.contains("record #0")));
    }

    #[test]
    fn test_parse_movies_rejects_low_rating() {
        let data = serde_json::json!([sample_movie("Meh", 2010, 7.7, 20_000)]);
        match parse_movies(&data.to_string()).unwrap_err() {
            MovieError::Validation { index, title, reason } => {
                assert_eq!(index, 0);
                assert_eq!(title, "Meh");
                assert!(reason.contains("rating"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_movies_rejects_low_votes() {
        let data = serde_json::json!([
            sample_movie("Fine", 2010, 8.0, 20_000),
            sample_movie("Obscure", 2010, 8.0, 9_999),
        ]);
        match parse_movies(&data.to_string()).unwrap_err() {
            MovieError::Validation { index, reason, .. } => {
                assert_eq!(index, 1);
                assert!(reason.contains("votes"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_movies_rejects_old_year() {
        let data = serde_json::json!([sample_movie("Lagaan", 1999, 8.1, 100_000)]);
        let err = parse_movies(&data.to_string()).unwrap_err();
        assert!(matches!(err, MovieError::Validation { ref reason, .. } if reason.contains("year")));
    }

    #[test]
    fn test_parse_movies_accepts_exact_bounds() {
        let data = serde_json::json!([sample_movie("Edge", 2000, 7.8, 10_000)]);
        let movies = parse_movies(&data.to_string()).unwrap();
        assert_eq!(movies.len(), 1);
    }

    #[test]
    fn test_parse_movies_empty_array() {
        assert!(parse_movies("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_movies_rank_order_invariant() {
        let data = serde_json::json!([
            sample_movie("C", 2012, 8.1, 30_000),
            sample_movie("A", 2015, 8.8, 90_000),
            sample_movie("B", 2018, 8.1, 60_000),
            sample_movie("D", 2021, 9.0, 15_000),
        ]);
        let movies = parse_movies(&data.to_string()).unwrap();
        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["D", "A", "B", "C"]);

        for pair in movies.windows(2) {
            assert!(pair[0].rating >= pair[1].rating);
            if pair[0].rating == pair[1].rating {
                assert!(pair[0].votes >= pair[1].votes);
            }
            assert_eq!(pair[0].rank + 1, pair[1].rank);
        }
    }

    #[test]
    fn test_parse_movies_declared_rank_is_rederived() {
        let data = serde_json::json!([
            {"title": "Low", "year": 2010, "rating": 8.0, "votes": 20000, "rank": 1},
            {"title": "High", "year": 2010, "rating": 8.9, "votes": 20000, "rank": 2},
        ]);
        let movies = parse_movies(&data.to_string()).unwrap();
        assert_eq!(movies[0].title, "High");
        assert_eq!(movies[0].rank, 1);
    }

    #[test]
    fn test_parse_movies_duration_forms() {
        let data = serde_json::json!([
            {"title": "A", "year": 2010, "rating": 8.5, "votes": 20000, "duration": 150},
            {"title": "B", "year": 2010, "rating": 8.4, "votes": 20000, "duration": "2h 41m"},
            {"title": "C", "year": 2010, "rating": 8.3, "votes": 20000, "duration": null},
            {"title": "D", "year": 2010, "rating": 8.2, "votes": 20000},
        ]);
        let movies = parse_movies(&data.to_string()).unwrap();
        assert_eq!(movies[0].duration, Some(150));
        assert_eq!(movies[1].duration, Some(161));
        assert_eq!(movies[2].duration, None);
        assert_eq!(movies[3].duration, None);
    }

    #[test]
    fn test_parse_movies_bad_duration_text() {
        let data = serde_json::json!([
            {"title": "A", "year": 2010, "rating": 8.5, "votes": 20000, "duration": "long"},
        ]);
        let err = parse_movies(&data.to_string()).unwrap_err();
        assert!(matches!(err, MovieError::Parse(ref m) if m.contains("duration")));
    }

    // ── parse_duration ────────────────────────────────────────────────────────

    #[test]
    fn test_parse_duration_variants() {
        assert_eq!(parse_duration("150"), Some(150));
        assert_eq!(parse_duration("150 min"), Some(150));
        assert_eq!(parse_duration("2h"), Some(120));
        assert_eq!(parse_duration("45m"), Some(45));
        assert_eq!(parse_duration("2h 30m"), Some(150));
        assert_eq!(parse_duration(" 3h5m "), Some(185));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("long"), None);
        assert_eq!(parse_duration("h m"), None);
    }

    #[test]
    fn test_parse_duration_overflow_is_rejected() {
        assert_eq!(parse_duration("99999999h"), None);
        assert_eq!(parse_duration("71582788h 59m"), None);
        assert_eq!(parse_duration("71582788h"), Some(4_294_967_280));
    }

    #[test]
    fn test_parse_movies_overflowing_duration_is_parse_error() {
        let data = r#"[{"title":"A","year":2010,"rating":8.0,"votes":20000,"duration":"99999999h"}]"#;
        let err = parse_movies(data).unwrap_err();
        assert!(matches!(err, MovieError::Parse(ref m) if m.contains("duration")), "{err:?}");
    }

    #[test]
    fn test_parse_movies_validation_precedes_duration() {
        let data = serde_json::json!([
            {"title": "Old", "year": 1995, "rating": 8.5, "votes": 20000, "duration": "long"},
        ]);
        let err = parse_movies(&data.to_string()).unwrap_err();
        assert!(matches!(err, MovieError::Validation { .. }), "{err:?}");
    }

    // ── count_rank_mismatches ─────────────────────────────────────────────────

    #[test]
    fn test_rank_mismatches_shared_titles() {
        let data = serde_json::json!([
            {"title": "Drishyam", "year": 2015, "rating": 8.2, "votes": 90000, "rank": 2},
            {"title": "Drishyam", "year": 2013, "rating": 8.3, "votes": 50000, "rank": 1},
        ]);
        let movies = parse_movies(&data.to_string()).unwrap();
        assert_eq!(movies[0].year, 2013);
        assert_eq!(movies[1].year, 2015);

        // Input record 0 is ranked second, record 1 first; both declarations agree.
        assert_eq!(count_rank_mismatches(&[Some(2), Some(1)], &[1, 0]), 0);
    }

    #[test]
    fn test_rank_mismatches_counts_disagreements() {
        assert_eq!(count_rank_mismatches(&[Some(1), Some(2)], &[1, 0]), 2);
        assert_eq!(count_rank_mismatches(&[None, Some(1)], &[1, 0]), 0);
        assert_eq!(count_rank_mismatches(&[Some(3), None], &[0, 1]), 1);
    }
}
