use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the movie statistics tools.
#[derive(Error, Debug)]
pub enum MovieError {
    /// The dataset is not well-formed, or a record failed to decode.
    #[error("Failed to parse dataset: {0}")]
    Parse(String),

    /// A record decoded but violates the selection bounds.
    #[error("Invalid record #{index} ({title}): {reason}")]
    Validation {
        /// Zero-based position of the record in the input file.
        index: usize,
        title: String,
        reason: String,
    },

    /// There are no records to aggregate.
    #[error("Dataset contains no movies")]
    EmptyDataset,

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file or directory could not be created or written.
    #[error("Failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The charting backend failed while drawing or encoding an image.
    #[error("Chart rendering failed for {path}: {message}")]
    Chart { path: PathBuf, message: String },

    /// The spreadsheet writer failed.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// A JSON document could not be serialized or deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the movie crates.
pub type Result<T> = std::result::Result<T, MovieError>;
