use clap::{Args, Parser};
use std::path::PathBuf;

/// Dataset read by both entry points.
pub const DEFAULT_DATA_PATH: &str = "data/top_100_indian_movies.json";
/// Summary file written by `analyze-movies` and read by `generate-report`.
pub const DEFAULT_SUMMARY_PATH: &str = "data/movie_summary_stats.json";
pub const DEFAULT_CHARTS_DIR: &str = "visualizations";
pub const DEFAULT_REPORTS_DIR: &str = "reports";
pub const WORKBOOK_FILE_NAME: &str = "Top_100_Indian_Movies_Report.xlsx";
pub const MARKDOWN_FILE_NAME: &str = "README.md";

// ── Shared arguments ───────────────────────────────────────────────────────────

/// Options common to both entry points.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Movie dataset (JSON array of records)
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Summary statistics file
    #[arg(long, default_value = DEFAULT_SUMMARY_PATH)]
    pub summary: PathBuf,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl CommonArgs {
    /// Effective log level; `--debug` overrides `--log-level`.
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "DEBUG"
        } else {
            &self.log_level
        }
    }
}

// ── analyze-movies ─────────────────────────────────────────────────────────────

/// Compute statistics and charts for the top movie dataset
#[derive(Parser, Debug, Clone)]
#[command(
    name = "analyze-movies",
    about = "Compute statistics and charts for the top movie dataset",
    version
)]
pub struct AnalyzeSettings {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Directory for rendered charts
    #[arg(long, default_value = DEFAULT_CHARTS_DIR)]
    pub charts_dir: PathBuf,

    /// Length of the printed top lists
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..=100))]
    pub top_n: u32,
}

// ── generate-report ────────────────────────────────────────────────────────────

/// Write the spreadsheet and markdown reports for the top movie dataset
#[derive(Parser, Debug, Clone)]
#[command(
    name = "generate-report",
    about = "Write the spreadsheet and markdown reports for the top movie dataset",
    version
)]
pub struct ReportSettings {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Directory for the workbook and markdown report
    #[arg(long, default_value = DEFAULT_REPORTS_DIR)]
    pub reports_dir: PathBuf,

    /// Length of the top lists in the reports
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..=100))]
    pub top_n: u32,
}

impl ReportSettings {
    pub fn workbook_path(&self) -> PathBuf {
        self.reports_dir.join(WORKBOOK_FILE_NAME)
    }

    pub fn markdown_path(&self) -> PathBuf {
        self.reports_dir.join(MARKDOWN_FILE_NAME)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
