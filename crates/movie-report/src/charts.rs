//! Static PNG charts for the movie dataset.
//!
//! Two images are produced per run: a 2×2 dashboard of the main
//! distributions and a timeline of ratings and releases per year.

use std::path::{Path, PathBuf};

use movie_core::error::{MovieError, Result};
use movie_core::formatting::truncate_title;
use movie_core::models::{DecadeCount, HistogramBin, MovieRecord};
use movie_data::analysis::{top_by_rating, MovieAnalysis};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use crate::themes::ChartTheme;

pub const DASHBOARD_FILE_NAME: &str = "movie_analysis_charts.png";
pub const TIMELINE_FILE_NAME: &str = "movie_timeline.png";

const DASHBOARD_SIZE: (u32, u32) = (1500, 1200);
const TIMELINE_SIZE: (u32, u32) = (1500, 1000);
/// Entries in the horizontal "top rated" panel.
const TOP_PANEL_LEN: usize = 15;
/// Longest title shown on the horizontal bar axis.
const TITLE_LABEL_WIDTH: usize = 20;

const FONT: &str = "sans-serif";

type DrawResult<DB> = std::result::Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

// ── Public API ────────────────────────────────────────────────────────────────

/// Render both chart images into `dir`, creating it when needed.
///
/// Returns the written paths in render order.
pub fn render_all(analysis: &MovieAnalysis, movies: &[MovieRecord], dir: &Path) -> Result<Vec<PathBuf>> {
    if movies.is_empty() {
        return Err(MovieError::EmptyDataset);
    }
    std::fs::create_dir_all(dir).map_err(|source| MovieError::FileWrite {
        path: dir.to_path_buf(),
        source,
    })?;

    let theme = ChartTheme::default();

    let dashboard = dir.join(DASHBOARD_FILE_NAME);
    render_dashboard(analysis, movies, &dashboard, &theme)?;
    info!("Chart saved: {}", dashboard.display());

    let timeline = dir.join(TIMELINE_FILE_NAME);
    render_timeline(analysis, movies, &timeline, &theme)?;
    info!("Chart saved: {}", timeline.display());

    Ok(vec![dashboard, timeline])
}

/// Decade bars, rating histogram, votes-vs-rating scatter and the top rated
/// titles on one canvas.
pub fn render_dashboard(
    analysis: &MovieAnalysis,
    movies: &[MovieRecord],
    path: &Path,
    theme: &ChartTheme,
) -> Result<()> {
    let root = BitMapBackend::new(path, DASHBOARD_SIZE).into_drawing_area();
    draw_dashboard(&root, analysis, movies, theme).map_err(|e| chart_error(path, e))
}

/// Bubble timeline of ratings sized by votes, above a per-year release count.
pub fn render_timeline(
    analysis: &MovieAnalysis,
    movies: &[MovieRecord],
    path: &Path,
    theme: &ChartTheme,
) -> Result<()> {
    let root = BitMapBackend::new(path, TIMELINE_SIZE).into_drawing_area();
    draw_timeline(&root, analysis, movies, theme).map_err(|e| chart_error(path, e))
}

/// Bubble radius in pixels; area grows with the vote count.
pub fn bubble_radius(votes: u64, max_votes: u64) -> u32 {
    if max_votes == 0 {
        return 3;
    }
    let share = (votes as f64 / max_votes as f64).clamp(0.0, 1.0);
    (3.0 + 27.0 * share.sqrt()).round() as u32
}

/// Short axis label for a vote count: `950`, `25K`, `1.2M`.
pub fn compact_count(value: f64) -> String {
    if value >= 1_000_000.0 {
        let m = value / 1_000_000.0;
        if (m - m.round()).abs() < 0.05 {
            format!("{:.0}M", m)
        } else {
            format!("{:.1}M", m)
        }
    } else if value >= 1_000.0 {
        format!("{:.0}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

// ── Dashboard panels ──────────────────────────────────────────────────────────

fn draw_dashboard<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    analysis: &MovieAnalysis,
    movies: &[MovieRecord],
    theme: &ChartTheme,
) -> DrawResult<DB> {
    root.fill(&WHITE)?;
    let titled = root.titled("Top 100 Indian Movies Analysis (2000+)", (FONT, 34))?;
    let panels = titled.split_evenly((2, 2));

    draw_decade_bars(&panels[0], analysis.decade_counts(), theme)?;
    draw_rating_histogram(&panels[1], &analysis.rating_histogram, theme)?;
    draw_votes_vs_rating(&panels[2], movies, theme)?;
    draw_top_rated(&panels[3], &top_by_rating(movies, TOP_PANEL_LEN), theme)?;

    root.present()?;
    Ok(())
}

fn draw_decade_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    decades: &[DecadeCount],
    theme: &ChartTheme,
) -> DrawResult<DB> {
    let labels: Vec<String> = decades.iter().map(DecadeCount::label).collect();
    let max = decades.iter().map(|d| d.count).max().unwrap_or(0);

    let mut chart = ChartBuilder::on(area)
        .caption("Movies by Decade", (FONT, 24))
        .margin(15)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d((0..decades.len()).into_segmented(), 0..(max + max / 10 + 1))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Number of Movies")
        .x_label_formatter(&|v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(theme.decade_bar.filled())
            .margin(25)
            .data(decades.iter().enumerate().map(|(i, d)| (i, d.count))),
    )?;
    chart.draw_series(
        Histogram::vertical(&chart)
            .style(theme.decade_edge.stroke_width(2))
            .margin(25)
            .data(decades.iter().enumerate().map(|(i, d)| (i, d.count))),
    )?;
    Ok(())
}

fn draw_rating_histogram<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    bins: &[HistogramBin],
    theme: &ChartTheme,
) -> DrawResult<DB> {
    let lower = bins.first().map(|b| b.lower).unwrap_or(0.0);
    let upper = bins.last().map(|b| b.upper).unwrap_or(0.0).max(lower + 0.1);
    let max = bins.iter().map(|b| b.count).max().unwrap_or(0);

    let mut chart = ChartBuilder::on(area)
        .caption("Rating Distribution", (FONT, 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((lower - 0.05)..(upper + 0.05), 0..(max + 1))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("IMDb Rating")
        .y_desc("Number of Movies")
        .x_label_formatter(&|v: &f64| format!("{:.1}", v))
        .draw()?;

    let bar = |b: &HistogramBin| {
        // A single-valued table collapses to one zero-width bin.
        let right = if b.upper > b.lower { b.upper } else { b.lower + 0.05 };
        [(b.lower, 0), (right, b.count)]
    };

    chart.draw_series(
        bins.iter()
            .map(|b| Rectangle::new(bar(b), theme.histogram.mix(0.7).filled())),
    )?;
    chart.draw_series(
        bins.iter()
            .map(|b| Rectangle::new(bar(b), theme.histogram_edge.stroke_width(1))),
    )?;
    Ok(())
}

fn draw_votes_vs_rating<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    movies: &[MovieRecord],
    theme: &ChartTheme,
) -> DrawResult<DB> {
    let (min_votes, max_votes) = min_max(movies.iter().map(|m| m.votes as f64));
    let (min_rating, max_rating) = min_max(movies.iter().map(|m| m.rating));
    let (min_year, max_year) = min_max(movies.iter().map(|m| m.year as f64));

    let caption = format!(
        "Votes vs Rating (colour: {} dark → {} light)",
        min_year as i32, max_year as i32
    );

    let mut chart = ChartBuilder::on(area)
        .caption(caption, (FONT, 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            ((min_votes * 0.8)..(max_votes * 1.25)).log_scale(),
            (min_rating - 0.1)..(max_rating + 0.1),
        )?;

    chart
        .configure_mesh()
        .x_desc("Number of Votes (log scale)")
        .y_desc("IMDb Rating")
        .x_label_formatter(&|v: &f64| compact_count(*v))
        .y_label_formatter(&|v: &f64| format!("{:.1}", v))
        .draw()?;

    chart.draw_series(movies.iter().map(|m| {
        let color = theme.year_scale.map(m.year as f64, min_year, max_year);
        Circle::new((m.votes as f64, m.rating), 5, color.mix(0.75).filled())
    }))?;
    Ok(())
}

fn draw_top_rated<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    top: &[MovieRecord],
    theme: &ChartTheme,
) -> DrawResult<DB> {
    let n = top.len();
    let labels: Vec<String> = top
        .iter()
        .map(|m| truncate_title(&m.title, TITLE_LABEL_WIDTH))
        .collect();
    let (min_rating, max_rating) = min_max(top.iter().map(|m| m.rating));
    let baseline = (min_rating - 0.3).floor().min(min_rating - 0.1);

    let mut chart = ChartBuilder::on(area)
        .caption(format!("Top {} Movies by Rating", n), (FONT, 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(180)
        .build_cartesian_2d(baseline..(max_rating + 0.1), (0..n).into_segmented())?;

    // Row 0 is drawn at the bottom, so the best title gets the highest row.
    let row_of = |i: usize| n - 1 - i;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n)
        .x_desc("IMDb Rating")
        .y_label_formatter(&|v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(row) if *row < n => labels[n - 1 - *row].clone(),
            _ => String::new(),
        })
        .label_style((FONT, 13))
        .draw()?;

    chart.draw_series(
        Histogram::horizontal(&chart)
            .style(theme.top_bar.filled())
            .baseline(baseline)
            .margin(3)
            .data(top.iter().enumerate().map(|(i, m)| (row_of(i), m.rating))),
    )?;
    Ok(())
}

// ── Timeline ──────────────────────────────────────────────────────────────────

fn draw_timeline<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    analysis: &MovieAnalysis,
    movies: &[MovieRecord],
    theme: &ChartTheme,
) -> DrawResult<DB> {
    root.fill(&WHITE)?;
    let (_, height) = root.dim_in_pixel();
    let (upper, lower) = root.split_vertically(height * 3 / 5);

    draw_bubbles(&upper, movies, theme)?;
    draw_releases_per_year(&lower, analysis, theme)?;

    root.present()?;
    Ok(())
}

fn draw_bubbles<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    movies: &[MovieRecord],
    theme: &ChartTheme,
) -> DrawResult<DB> {
    let (min_year, max_year) = min_max(movies.iter().map(|m| m.year as f64));
    let (min_rating, max_rating) = min_max(movies.iter().map(|m| m.rating));
    let max_votes = movies.iter().map(|m| m.votes).max().unwrap_or(0);

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Timeline of Top 100 Indian Movies (bubble size = votes, colour = rating)",
            (FONT, 24),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            (min_year - 1.0)..(max_year + 1.0),
            (min_rating - 0.1).min(7.7)..(max_rating + 0.1).max(9.1),
        )?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("IMDb Rating")
        .x_label_formatter(&|v: &f64| format!("{:.0}", v))
        .y_label_formatter(&|v: &f64| format!("{:.1}", v))
        .draw()?;

    // Largest bubbles first so the small ones stay visible on top.
    let mut by_size: Vec<&MovieRecord> = movies.iter().collect();
    by_size.sort_by(|a, b| b.votes.cmp(&a.votes).then_with(|| a.rank_cmp(b)));

    chart.draw_series(by_size.into_iter().map(|m| {
        let color = theme.rating_scale.map(m.rating, min_rating, max_rating);
        Circle::new(
            (m.year as f64, m.rating),
            bubble_radius(m.votes, max_votes),
            color.mix(0.6).filled(),
        )
    }))?;
    Ok(())
}

fn draw_releases_per_year<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    analysis: &MovieAnalysis,
    theme: &ChartTheme,
) -> DrawResult<DB> {
    let first = analysis.yearly.first().map(|y| y.year).unwrap_or(0);
    let last = analysis.yearly.last().map(|y| y.year).unwrap_or(first);
    let max = analysis.yearly.iter().map(|y| y.movie_count).max().unwrap_or(0);

    let mut chart = ChartBuilder::on(area)
        .caption("Number of Top Movies by Year", (FONT, 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((first..last + 1).into_segmented(), 0..(max + 1))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels((last - first + 1).max(1) as usize)
        .x_desc("Year")
        .y_desc("Number of Movies")
        .x_label_formatter(&|v: &SegmentValue<i32>| match v {
            SegmentValue::CenterOf(year) => year.to_string(),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(theme.year_bar.mix(0.7).filled())
            .margin(4)
            .data(analysis.yearly.iter().map(|y| (y.year, y.movie_count))),
    )?;
    Ok(())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo.is_finite() && hi.is_finite() {
        (lo, hi)
    } else {
        (0.0, 1.0)
    }
}

fn chart_error<E: std::error::Error + Send + Sync>(
    path: &Path,
    err: DrawingAreaErrorKind<E>,
) -> MovieError {
    MovieError::Chart {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
