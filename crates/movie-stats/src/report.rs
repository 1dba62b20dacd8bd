use anyhow::{Context, Result};
use clap::Parser;
use movie_core::settings::ReportSettings;
use movie_data::analysis::analyze;
use movie_data::reader::load_movies;
use movie_report::{markdown, spreadsheet};
use movie_stats::bootstrap;

fn main() -> Result<()> {
    let settings = ReportSettings::parse();
    bootstrap::setup_logging(settings.common.effective_log_level())?;

    tracing::info!("generate-report v{} starting", env!("CARGO_PKG_VERSION"));

    let data_path = &settings.common.data;
    let movies = load_movies(data_path)
        .with_context(|| format!("loading dataset {}", data_path.display()))?;

    let mut analysis =
        analyze(&movies, settings.top_n as usize).context("computing statistics")?;
    analysis.summary = bootstrap::summary_for_report(&settings.common.summary, &analysis.summary);

    std::fs::create_dir_all(&settings.reports_dir).with_context(|| {
        format!("creating reports directory {}", settings.reports_dir.display())
    })?;

    let generated_on = bootstrap::today();

    let workbook = settings.workbook_path();
    spreadsheet::write_workbook(&workbook, &movies, &analysis, generated_on)
        .context("writing Excel report")?;
    println!("Excel report saved: {}", workbook.display());

    let readme = settings.markdown_path();
    markdown::write_report(&readme, &movies, &analysis, generated_on)
        .context("writing markdown report")?;
    println!("Markdown report saved: {}", readme.display());

    println!();
    println!("Report generation complete!");
    println!("Files created:");
    println!("- {}", workbook.display());
    println!("- {}", readme.display());

    Ok(())
}
