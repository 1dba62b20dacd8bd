//! XLSX workbook output.
//!
//! Sheets are laid out as in-memory [`Grid`]s first and written in one pass,
//! so the layout can be tested without touching the filesystem.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use movie_core::error::{MovieError, Result};
use movie_core::formatting::{display_width, format_duration, format_votes};
use movie_core::models::{BucketCount, MovieRecord, MIN_RATING, MIN_VOTES, MIN_YEAR};
use movie_data::analysis::MovieAnalysis;
use simple_excel_writer::{Column, Row, Workbook};
use tracing::{debug, info};

pub const SUMMARY_SHEET: &str = "Executive Summary";
pub const MOVIES_SHEET: &str = "Top 100 Movies";
pub const ANALYSIS_SHEET: &str = "Detailed Analysis";

const MAX_COLUMN_WIDTH: usize = 50;

static BLANK: Cell = Cell::Blank;

// ── Grid ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Blank,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Width of the cell as a spreadsheet would display it.
    fn width(&self) -> usize {
        match self {
            Cell::Text(s) => display_width(s),
            Cell::Number(n) => n.to_string().len(),
            Cell::Blank => 0,
        }
    }
}

/// Sparse rows of cells, grown on demand.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, Cell::Blank);
        }
        cells[col] = cell;
    }

    pub fn get(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&BLANK)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column widths sized to the widest cell plus padding, capped at 50.
    pub fn column_widths(&self) -> Vec<usize> {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        (0..columns)
            .map(|col| {
                let widest = self.rows.iter().map(|r| r.get(col).map_or(0, Cell::width)).max().unwrap_or(0);
                (widest + 2).min(MAX_COLUMN_WIDTH)
            })
            .collect()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Write the three-sheet workbook to `path`.
pub fn write_workbook(
    path: &Path,
    movies: &[MovieRecord],
    analysis: &MovieAnalysis,
    generated_on: NaiveDate,
) -> Result<()> {
    let path_str = path
        .to_str()
        .ok_or_else(|| MovieError::Spreadsheet(format!("non UTF-8 path: {}", path.display())))?;

    // `Workbook::create` panics when the file cannot be created.
    File::create(path).map_err(|source| MovieError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;

    let sheets = [
        (SUMMARY_SHEET, executive_summary(analysis, generated_on)),
        (MOVIES_SHEET, movie_table(movies)),
        (ANALYSIS_SHEET, detailed_analysis(analysis)),
    ];

    let mut workbook = Workbook::create(path_str);
    for (name, grid) in &sheets {
        let mut sheet = workbook.create_sheet(name);
        for width in grid.column_widths() {
            sheet.add_column(Column { width: width as f32 });
        }
        workbook
            .write_sheet(&mut sheet, |writer| {
                for cells in &grid.rows {
                    writer.append_row(to_row(cells))?;
                }
                Ok(())
            })
            .map_err(|source| MovieError::FileWrite {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("Sheet '{}' written ({} rows)", name, grid.row_count());
    }

    workbook.close().map_err(|source| MovieError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Excel report saved: {}", path.display());
    Ok(())
}

/// Title, generation date, selection criteria and key statistics.
pub fn executive_summary(analysis: &MovieAnalysis, generated_on: NaiveDate) -> Grid {
    let s = &analysis.summary;
    let mut grid = Grid::default();

    grid.set(0, 0, Cell::text("Top 100 Indian Movies Analysis Report"));
    grid.set(
        1,
        0,
        Cell::Text(format!("Generated on: {}", generated_on.format("%B %d, %Y"))),
    );

    grid.set(3, 0, Cell::text("Selection Criteria:"));
    let criteria = [
        "• Indian movies only".to_string(),
        format!("• IMDb rating ≥ {}", MIN_RATING),
        format!("• Number of votes ≥ {}", format_votes(MIN_VOTES)),
        format!("• Released in {} or later", MIN_YEAR),
    ];
    for (i, line) in criteria.into_iter().enumerate() {
        grid.set(4 + i, 0, Cell::Text(line));
    }

    grid.set(9, 0, Cell::text("Key Statistics:"));
    let stats = [
        ("Total Movies Analyzed", Cell::Number(s.total_movies as f64)),
        ("Average Rating", Cell::Text(format!("{}/10", s.avg_rating))),
        ("Median Rating", Cell::Text(format!("{}/10", s.median_rating))),
        ("Average Votes", Cell::Number(s.avg_votes as f64)),
        ("Median Votes", Cell::Number(s.median_votes as f64)),
        ("Year Range", Cell::text(s.year_range.as_str())),
        ("Most Productive Year", Cell::Number(s.most_productive_year as f64)),
        ("Highest Rated Movie", Cell::text(s.highest_rated_movie.as_str())),
        ("Most Voted Movie", Cell::text(s.most_voted_movie.as_str())),
    ];
    for (i, (label, value)) in stats.into_iter().enumerate() {
        grid.set(10 + i, 0, Cell::text(label));
        grid.set(10 + i, 1, value);
    }
    grid
}

/// One header row, then one row per movie in rank order.
pub fn movie_table(movies: &[MovieRecord]) -> Grid {
    let mut grid = Grid::default();
    for (col, header) in ["Rank", "Title", "Year", "Rating", "Votes", "Duration"]
        .into_iter()
        .enumerate()
    {
        grid.set(0, col, Cell::text(header));
    }

    for (i, movie) in movies.iter().enumerate() {
        let row = i + 1;
        grid.set(row, 0, Cell::Number(movie.rank as f64));
        grid.set(row, 1, Cell::text(movie.title.as_str()));
        grid.set(row, 2, Cell::Number(movie.year as f64));
        grid.set(row, 3, Cell::Number(movie.rating));
        grid.set(row, 4, Cell::Number(movie.votes as f64));
        let duration = match movie.duration {
            Some(minutes) => Cell::Text(format_duration(minutes)),
            None => Cell::Blank,
        };
        grid.set(row, 5, duration);
    }
    grid
}

/// Distribution blocks side by side, with the top lists underneath.
pub fn detailed_analysis(analysis: &MovieAnalysis) -> Grid {
    let mut grid = Grid::default();

    let decades: Vec<BucketCount> = analysis
        .decade_counts()
        .iter()
        .map(|d| BucketCount {
            label: d.label(),
            count: d.count,
        })
        .collect();

    let blocks = [
        ("Distribution by Decade", "Decade", &decades),
        ("Rating Distribution", "Rating Range", &analysis.rating_distribution),
        ("Vote Distribution", "Vote Range", &analysis.vote_distribution),
    ];
    let mut tallest = 0;
    for (i, (title, key_header, counts)) in blocks.into_iter().enumerate() {
        let col = i * 3;
        grid.set(0, col, Cell::text(title));
        grid.set(1, col, Cell::text(key_header));
        grid.set(1, col + 1, Cell::text("Count"));
        for (j, bucket) in counts.iter().enumerate() {
            grid.set(2 + j, col, Cell::text(bucket.label.as_str()));
            grid.set(2 + j, col + 1, Cell::Number(bucket.count as f64));
        }
        tallest = tallest.max(counts.len());
    }

    let top_row = 2 + tallest + 1;
    write_top_block(
        &mut grid,
        top_row,
        0,
        &format!("Top {} by Rating", analysis.top_by_rating.len()),
        ("Rating", |m: &MovieRecord| m.rating),
        &analysis.top_by_rating,
    );
    write_top_block(
        &mut grid,
        top_row,
        5,
        &format!("Top {} by Votes", analysis.top_by_votes.len()),
        ("Votes", |m: &MovieRecord| m.votes as f64),
        &analysis.top_by_votes,
    );
    grid
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn write_top_block(
    grid: &mut Grid,
    row: usize,
    col: usize,
    title: &str,
    (value_header, value): (&str, fn(&MovieRecord) -> f64),
    movies: &[MovieRecord],
) {
    grid.set(row, col, Cell::text(title));
    for (offset, header) in ["Rank", "Title", "Year", value_header].into_iter().enumerate() {
        grid.set(row + 1, col + offset, Cell::text(header));
    }
    for (i, movie) in movies.iter().enumerate() {
        let r = row + 2 + i;
        grid.set(r, col, Cell::Number(movie.rank as f64));
        grid.set(r, col + 1, Cell::text(movie.title.as_str()));
        grid.set(r, col + 2, Cell::Number(movie.year as f64));
        grid.set(r, col + 3, Cell::Number(value(movie)));
    }
}

fn to_row(cells: &[Cell]) -> Row {
    let mut row = Row::new();
    for cell in cells {
        match cell {
            Cell::Text(s) => row.add_cell(s.as_str()),
            Cell::Number(n) => row.add_cell(*n),
            Cell::Blank => row.add_cell(()),
        }
    }
    row
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use movie_data::analysis::analyze;
    use tempfile::TempDir;

    fn make_movie(title: &str, year: i32, rating: f64, votes: u64, duration: Option<u32>) -> MovieRecord {
        MovieRecord {
            rank: 0,
            title: title.to_string(),
            year,
            rating,
            votes,
            duration,
        }
    }

    fn ranked_sample() -> Vec<MovieRecord> {
        let mut movies = vec![
            make_movie("Drishyam", 2013, 8.2, 95_000, Some(160)),
            make_movie("Jai Bhim", 2021, 8.8, 210_000, Some(164)),
            make_movie("Tumbbad", 2018, 8.2, 60_000, None),
            make_movie("Black Friday", 2004, 8.4, 22_000, Some(143)),
        ];
        movies.sort_by(MovieRecord::rank_cmp);
        for (i, m) in movies.iter_mut().enumerate() {
            m.rank = i as u32 + 1;
        }
        movies
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    // ── Grid ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_grid_set_grows_and_pads() {
        let mut grid = Grid::default();
        grid.set(2, 3, Cell::Number(1.0));
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.get(2, 3), &Cell::Number(1.0));
        assert_eq!(grid.get(2, 0), &Cell::Blank);
        assert_eq!(grid.get(9, 9), &Cell::Blank);
    }

    #[test]
    fn test_column_widths_capped() {
        let mut grid = Grid::default();
        grid.set(0, 0, Cell::text("Rank"));
        grid.set(1, 0, Cell::Number(100.0));
        grid.set(0, 1, Cell::Text("x".repeat(80)));
        assert_eq!(grid.column_widths(), vec![6, 50]);
    }

    // ── Sheets ────────────────────────────────────────────────────────────────

    #[test]
    fn test_executive_summary_layout() {
        let analysis = analyze(&ranked_sample(), 10).unwrap();
        let grid = executive_summary(&analysis, date());

        assert_eq!(grid.get(1, 0), &Cell::text("Generated on: March 07, 2025"));
        assert_eq!(grid.get(3, 0), &Cell::text("Selection Criteria:"));
        assert_eq!(grid.get(6, 0), &Cell::text("• Number of votes ≥ 10,000"));
        assert_eq!(grid.get(7, 0), &Cell::text("• Released in 2000 or later"));
        assert_eq!(grid.get(10, 0), &Cell::text("Total Movies Analyzed"));
        assert_eq!(grid.get(10, 1), &Cell::Number(4.0));
        assert_eq!(grid.get(15, 1), &Cell::text("2004-2021"));
        assert_eq!(grid.get(17, 1), &Cell::text("Jai Bhim"));
    }

    #[test]
    fn test_movie_table_rows() {
        let grid = movie_table(&ranked_sample());
        assert_eq!(grid.row_count(), 5);
        assert_eq!(grid.get(0, 5), &Cell::text("Duration"));
        assert_eq!(grid.get(1, 1), &Cell::text("Jai Bhim"));
        assert_eq!(grid.get(1, 4), &Cell::Number(210_000.0));
        assert_eq!(grid.get(1, 5), &Cell::text("2h 44m"));
        // Drishyam outranks Tumbbad on votes at equal rating.
        assert_eq!(grid.get(3, 1), &Cell::text("Drishyam"));
        assert_eq!(grid.get(4, 5), &Cell::Blank);
    }

    #[test]
    fn test_detailed_analysis_blocks() {
        let analysis = analyze(&ranked_sample(), 10).unwrap();
        let grid = detailed_analysis(&analysis);

        assert_eq!(grid.get(0, 0), &Cell::text("Distribution by Decade"));
        assert_eq!(grid.get(0, 3), &Cell::text("Rating Distribution"));
        assert_eq!(grid.get(0, 6), &Cell::text("Vote Distribution"));
        assert_eq!(grid.get(2, 0), &Cell::text("2000s"));
        assert_eq!(grid.get(3, 1), &Cell::Number(2.0));

        // Four rating bands is the tallest block, so the top lists start at row 7.
        assert_eq!(grid.get(7, 0), &Cell::text("Top 4 by Rating"));
        assert_eq!(grid.get(9, 1), &Cell::text("Jai Bhim"));
        assert_eq!(grid.get(7, 5), &Cell::text("Top 4 by Votes"));
        assert_eq!(grid.get(8, 8), &Cell::text("Votes"));
        assert_eq!(grid.get(9, 8), &Cell::Number(210_000.0));
    }

    // ── write_workbook ────────────────────────────────────────────────────────

    #[test]
    fn test_write_workbook_creates_xlsx() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.xlsx");
        let movies = ranked_sample();
        let analysis = analyze(&movies, 10).unwrap();

        write_workbook(&path, &movies, &analysis, date()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_write_workbook_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent").join("report.xlsx");
        let movies = ranked_sample();
        let analysis = analyze(&movies, 10).unwrap();

        let err = write_workbook(&path, &movies, &analysis, date()).unwrap_err();
        assert!(matches!(err, MovieError::FileWrite { .. }), "{err:?}");
        assert!(!path.exists());
    }
}
