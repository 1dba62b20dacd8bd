use std::path::Path;

use chrono::{Local, NaiveDate};
use movie_core::error::{MovieError, Result};
use movie_core::models::SummaryStatistics;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name to a `tracing` filter directive.
///
/// Unknown names pass through unchanged and are rejected by the filter.
pub fn tracing_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// Initialise the global `tracing` subscriber, writing to stderr.
///
/// Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(tracing_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry().with(filter).with(layer).init();

    Ok(())
}

/// Date stamped on generated reports.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ── Output paths ───────────────────────────────────────────────────────────────

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|source| MovieError::FileWrite {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

// ── Summary file ───────────────────────────────────────────────────────────────

/// Write `summary` as pretty-printed JSON.
pub fn write_summary(path: &Path, summary: &SummaryStatistics) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json).map_err(|source| MovieError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Summary statistics saved: {}", path.display());
    Ok(())
}

/// Read a previously written summary.
///
/// Returns `None` when the file is absent or cannot be parsed.
pub fn read_summary(path: &Path) -> Option<SummaryStatistics> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("No summary at {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(summary) => Some(summary),
        Err(e) => {
            warn!("Ignoring unreadable summary {}: {}", path.display(), e);
            None
        }
    }
}

/// The summary to report on: the stored one when available, else `computed`.
///
/// A stored summary without decade counts takes them from `computed`.
pub fn summary_for_report(path: &Path, computed: &SummaryStatistics) -> SummaryStatistics {
    match read_summary(path) {
        Some(mut stored) => {
            if stored.decade_counts.is_empty() {
                stored.decade_counts = computed.decade_counts.clone();
            }
            debug!("Using stored summary from {}", path.display());
            stored
        }
        None => computed.clone(),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
