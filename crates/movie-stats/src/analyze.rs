use anyhow::{Context, Result};
use clap::Parser;
use movie_core::settings::AnalyzeSettings;
use movie_data::analysis::analyze;
use movie_data::reader::load_movies;
use movie_report::{charts, console};
use movie_stats::bootstrap;

fn main() -> Result<()> {
    let settings = AnalyzeSettings::parse();
    bootstrap::setup_logging(settings.common.effective_log_level())?;

    tracing::info!("analyze-movies v{} starting", env!("CARGO_PKG_VERSION"));

    let data_path = &settings.common.data;
    let movies = load_movies(data_path)
        .with_context(|| format!("loading dataset {}", data_path.display()))?;

    let analysis = analyze(&movies, settings.top_n as usize).context("computing statistics")?;

    print!("{}", console::render_analysis(&movies, &analysis));
    println!();

    let written = charts::render_all(&analysis, &movies, &settings.charts_dir)
        .context("rendering charts")?;
    println!("Visualizations saved:");
    for path in &written {
        println!("- {}", path.display());
    }

    let summary_path = &settings.common.summary;
    bootstrap::write_summary(summary_path, &analysis.summary)
        .context("writing summary statistics")?;

    println!();
    print!("{}", console::render_summary(&analysis.summary));

    println!();
    println!("Analysis complete! Files generated:");
    for path in &written {
        println!("- {}", path.display());
    }
    println!("- {}", summary_path.display());

    Ok(())
}
