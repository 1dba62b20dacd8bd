//! Plain-text analysis printed by `analyze-movies`.

use std::fmt::{self, Write};

use movie_core::formatting::{format_rating, format_votes};
use movie_core::models::{MovieRecord, SummaryStatistics, RECENT_SINCE_YEAR};
use movie_data::analysis::MovieAnalysis;

/// Render the console analysis: ranges, distributions and top lists.
pub fn render_analysis(movies: &[MovieRecord], analysis: &MovieAnalysis) -> String {
    let mut out = String::new();
    let _ = write_analysis(&mut out, movies, analysis);
    out
}

/// Render the summary statistics block printed after the charts.
pub fn render_summary(summary: &SummaryStatistics) -> String {
    let mut out = String::new();
    let _ = write_summary(&mut out, summary);
    out
}

fn write_analysis(out: &mut impl Write, movies: &[MovieRecord], analysis: &MovieAnalysis) -> fmt::Result {
    let s = &analysis.summary;

    writeln!(out, "=== TOP 100 INDIAN MOVIES ANALYSIS ===")?;
    writeln!(out, "Total movies analyzed: {}", movies.len())?;
    writeln!(out, "Year range: {} - {}", s.min_year, s.max_year)?;
    writeln!(out, "Rating range: {:.1} - {:.1}", s.min_rating, s.max_rating)?;
    writeln!(
        out,
        "Vote range: {} - {}",
        format_votes(s.min_votes),
        format_votes(s.max_votes)
    )?;
    writeln!(out)?;

    writeln!(out, "=== YEAR DISTRIBUTION ===")?;
    writeln!(out, "Movies by decade:")?;
    for decade in analysis.decade_counts() {
        writeln!(out, "{}: {} movies", decade.label(), decade.count)?;
    }
    writeln!(out)?;

    writeln!(out, "=== RATING DISTRIBUTION ===")?;
    for bucket in &analysis.rating_distribution {
        writeln!(out, "{}: {} movies", bucket.label, bucket.count)?;
    }
    writeln!(out)?;

    writeln!(out, "=== VOTE DISTRIBUTION ===")?;
    for bucket in &analysis.vote_distribution {
        writeln!(out, "{}: {} movies", bucket.label, bucket.count)?;
    }
    writeln!(out)?;

    writeln!(out, "=== TOP {} BY RATING ===", analysis.top_by_rating.len())?;
    for m in &analysis.top_by_rating {
        writeln!(out, "{}. {} ({}) - {}", m.rank, m.title, m.year, format_rating(m.rating))?;
    }
    writeln!(out)?;

    writeln!(out, "=== TOP {} BY VOTES ===", analysis.top_by_votes.len())?;
    for m in &analysis.top_by_votes {
        writeln!(out, "{}. {} ({}) - {} votes", m.rank, m.title, m.year, format_votes(m.votes))?;
    }
    writeln!(out)?;

    writeln!(out, "=== MOST RECENT MOVIES ({}+) ===", RECENT_SINCE_YEAR)?;
    for m in &analysis.recent_top {
        writeln!(out, "{}. {} ({}) - {}", m.rank, m.title, m.year, format_rating(m.rating))?;
    }
    Ok(())
}

fn write_summary(out: &mut impl Write, s: &SummaryStatistics) -> fmt::Result {
    writeln!(out, "SUMMARY STATISTICS:")?;
    writeln!(out, "Total Movies: {}", s.total_movies)?;
    writeln!(out, "Avg Rating: {}", s.avg_rating)?;
    writeln!(out, "Median Rating: {}", s.median_rating)?;
    writeln!(out, "Avg Votes: {}", s.avg_votes)?;
    writeln!(out, "Median Votes: {}", s.median_votes)?;
    writeln!(out, "Year Range: {}", s.year_range)?;
    writeln!(out, "Most Productive Year: {}", s.most_productive_year)?;
    writeln!(out, "Highest Rated Movie: {}", s.highest_rated_movie)?;
    writeln!(out, "Most Voted Movie: {}", s.most_voted_movie)?;
    writeln!(out, "Newest Movie: {}", s.newest_movie)?;
    writeln!(out, "Oldest Movie: {}", s.oldest_movie)
}
