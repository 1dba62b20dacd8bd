//! Markdown narrative report.

use std::fmt::{self, Write};
use std::path::Path;

use chrono::NaiveDate;
use movie_core::error::{MovieError, Result};
use movie_core::formatting::{format_optional_duration, format_rating, format_votes, percentage};
use movie_core::models::{MovieRecord, MIN_RATING, MIN_VOTES, MIN_YEAR, RECENT_SINCE_YEAR};
use movie_data::analysis::MovieAnalysis;
use tracing::info;

/// Render the full report as a markdown document.
pub fn render_report(movies: &[MovieRecord], analysis: &MovieAnalysis, generated_on: NaiveDate) -> String {
    let mut out = String::new();
    // Writing into a `String` never fails.
    let _ = write_document(&mut out, movies, analysis, generated_on);
    out
}

/// Render the report and write it to `path`.
pub fn write_report(
    path: &Path,
    movies: &[MovieRecord],
    analysis: &MovieAnalysis,
    generated_on: NaiveDate,
) -> Result<()> {
    let content = render_report(movies, analysis, generated_on);
    std::fs::write(path, content).map_err(|source| MovieError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Markdown report saved: {}", path.display());
    Ok(())
}

// ── Sections ──────────────────────────────────────────────────────────────────

fn write_document(
    out: &mut impl Write,
    movies: &[MovieRecord],
    analysis: &MovieAnalysis,
    generated_on: NaiveDate,
) -> fmt::Result {
    writeln!(out, "# Top 100 Indian Movies Analysis Report")?;
    writeln!(out)?;
    writeln!(out, "**Generated on:** {}", generated_on.format("%B %d, %Y"))?;
    writeln!(out)?;

    write_summary(out, analysis)?;
    write_methodology(out)?;
    write_distributions(out, analysis)?;
    write_top_lists(out, analysis)?;
    write_complete_list(out, movies)?;
    write_insights(out, movies, analysis)?;
    write_conclusion(out)
}

fn write_summary(out: &mut impl Write, analysis: &MovieAnalysis) -> fmt::Result {
    let s = &analysis.summary;
    writeln!(out, "## Executive Summary")?;
    writeln!(out)?;
    writeln!(
        out,
        "This report presents an analysis of the top {} Indian movies based on IMDb ratings, \
         focusing on films that meet specific quality and popularity criteria.",
        s.total_movies
    )?;
    writeln!(out)?;

    writeln!(out, "### Selection Criteria")?;
    writeln!(out)?;
    writeln!(out, "- **Origin:** Indian movies only")?;
    writeln!(out, "- **Rating:** IMDb rating ≥ {}/10", MIN_RATING)?;
    writeln!(out, "- **Popularity:** Number of votes ≥ {}", format_votes(MIN_VOTES))?;
    writeln!(out, "- **Recency:** Released in {} or later", MIN_YEAR)?;
    writeln!(out)?;

    writeln!(out, "### Key Findings")?;
    writeln!(out)?;
    writeln!(out, "- **Total Movies Analyzed:** {}", s.total_movies)?;
    writeln!(out, "- **Average Rating:** {}/10", s.avg_rating)?;
    writeln!(out, "- **Median Rating:** {}/10", s.median_rating)?;
    writeln!(out, "- **Average Votes:** {}", format_votes(s.avg_votes))?;
    writeln!(out, "- **Year Range:** {}", s.year_range)?;
    writeln!(out, "- **Most Productive Year:** {}", s.most_productive_year)?;
    writeln!(out, "- **Highest Rated Movie:** {}", s.highest_rated_movie)?;
    writeln!(out, "- **Most Voted Movie:** {}", s.most_voted_movie)?;
    writeln!(out)
}

fn write_methodology(out: &mut impl Write) -> fmt::Result {
    writeln!(out, "## Methodology")?;
    writeln!(out)?;
    writeln!(out, "The data was collected from IMDb using advanced search filters:")?;
    writeln!(out)?;
    writeln!(
        out,
        "1. **Data Collection:** Filtered for Indian movies with rating ≥ {}, votes ≥ {}, \
         and release year {} or later",
        MIN_RATING,
        format_votes(MIN_VOTES),
        MIN_YEAR
    )?;
    writeln!(out, "2. **Data Validation:** Verified that all movies meet the specified criteria")?;
    writeln!(out, "3. **Analysis:** Performed statistical analysis and created visualizations")?;
    writeln!(
        out,
        "4. **Ranking:** Movies are ranked by IMDb rating, ties broken by vote count"
    )?;
    writeln!(out)
}

fn write_distributions(out: &mut impl Write, analysis: &MovieAnalysis) -> fmt::Result {
    writeln!(out, "## Analysis Results")?;
    writeln!(out)?;

    writeln!(out, "### Distribution by Decade")?;
    writeln!(out)?;
    let total = analysis.summary.total_movies as f64;
    for decade in analysis.decade_counts() {
        writeln!(
            out,
            "- **{}:** {} movies ({:.1}%)",
            decade.label(),
            decade.count,
            percentage(decade.count as f64, total, 1)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "### Rating Distribution")?;
    writeln!(out)?;
    for bucket in &analysis.rating_distribution {
        writeln!(out, "- **{}:** {} movies", bucket.label, bucket.count)?;
    }
    writeln!(out)
}

fn write_top_lists(out: &mut impl Write, analysis: &MovieAnalysis) -> fmt::Result {
    writeln!(out, "### Top {} Movies by Rating", analysis.top_by_rating.len())?;
    writeln!(out)?;
    for (i, m) in analysis.top_by_rating.iter().enumerate() {
        writeln!(
            out,
            "{}. **{}** ({}) - {} ({} votes)",
            i + 1,
            m.title,
            m.year,
            format_rating(m.rating),
            format_votes(m.votes)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "### Top {} Movies by Vote Count", analysis.top_by_votes.len())?;
    writeln!(out)?;
    for (i, m) in analysis.top_by_votes.iter().enumerate() {
        writeln!(
            out,
            "{}. **{}** ({}) - {} votes ({})",
            i + 1,
            m.title,
            m.year,
            format_votes(m.votes),
            format_rating(m.rating)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "### Recent Excellence ({}+)", RECENT_SINCE_YEAR)?;
    writeln!(out)?;
    if analysis.recent_top.is_empty() {
        writeln!(out, "_No movies from {} onwards in this selection._", RECENT_SINCE_YEAR)?;
    } else {
        writeln!(
            out,
            "The following movies from {} onwards demonstrate the continued excellence of Indian cinema:",
            RECENT_SINCE_YEAR
        )?;
        writeln!(out)?;
        for m in &analysis.recent_top {
            writeln!(out, "- **{}** ({}) - {}", m.title, m.year, format_rating(m.rating))?;
        }
    }
    writeln!(out)
}

fn write_complete_list(out: &mut impl Write, movies: &[MovieRecord]) -> fmt::Result {
    writeln!(out, "## Complete List: Top {} Indian Movies", movies.len())?;
    writeln!(out)?;
    writeln!(out, "| Rank | Title | Year | Rating | Votes | Duration |")?;
    writeln!(out, "|------|-------|------|--------|-------|----------|")?;
    for m in movies {
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} |",
            m.rank,
            escape_cell(&m.title),
            m.year,
            format_rating(m.rating),
            format_votes(m.votes),
            format_optional_duration(m.duration)
        )?;
    }
    writeln!(out)
}

fn write_insights(out: &mut impl Write, movies: &[MovieRecord], analysis: &MovieAnalysis) -> fmt::Result {
    let min_rating = movies.iter().map(|m| m.rating).fold(f64::INFINITY, f64::min);
    let max_rating = movies.iter().map(|m| m.rating).fold(f64::NEG_INFINITY, f64::max);
    let min_votes = movies.iter().map(|m| m.votes).min().unwrap_or(0);
    let max_votes = movies.iter().map(|m| m.votes).max().unwrap_or(0);

    writeln!(out, "## Insights and Observations")?;
    writeln!(out)?;

    writeln!(out, "### Quality Consistency")?;
    writeln!(out)?;
    if movies.is_empty() {
        writeln!(out, "- No movies were available for this run")?;
    } else {
        writeln!(out, "- Ratings range from {:.1} to {:.1}", min_rating, max_rating)?;
    }
    writeln!(
        out,
        "- The average rating of {}/10 indicates consistently high quality across the selection",
        analysis.summary.avg_rating
    )?;
    writeln!(out)?;

    writeln!(out, "### Temporal Distribution")?;
    writeln!(out)?;
    // Earliest decade wins a tie.
    let busiest = analysis
        .decade_counts()
        .iter()
        .rev()
        .max_by_key(|d| d.count);
    if let Some(decade) = busiest {
        writeln!(
            out,
            "- The {} were the most productive decade with {} movies",
            decade.label(),
            decade.count
        )?;
    }
    let recent = movies.iter().filter(|m| m.year >= RECENT_SINCE_YEAR).count();
    writeln!(out, "- {} movies were released in {} or later", recent, RECENT_SINCE_YEAR)?;
    writeln!(out)?;

    writeln!(out, "### Popular Appeal")?;
    writeln!(out)?;
    writeln!(
        out,
        "- Vote counts range from {} to {}",
        format_votes(min_votes),
        format_votes(max_votes)
    )?;
    writeln!(out, "- Movies demonstrate both critical acclaim and mass appeal")?;
    writeln!(out)
}

fn write_conclusion(out: &mut impl Write) -> fmt::Result {
    writeln!(out, "## Conclusion")?;
    writeln!(out)?;
    writeln!(
        out,
        "This analysis shows that Indian cinema has produced consistently high-quality films \
         since {}. The selection criteria ensure that these movies represent both critical \
         excellence and popular appeal.",
        MIN_YEAR
    )?;
    writeln!(out)?;
    writeln!(out, "---")?;
    writeln!(out)?;
    writeln!(
        out,
        "*Data sourced from IMDb. All ratings and vote counts are current as of the analysis date.*"
    )
}

/// Pipes would split a table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
