//! Renderers for the movie statistics tools.
//!
//! PNG charts via `plotters`, the XLSX workbook, the markdown report and the
//! plain-text console analysis. Everything here consumes a finished
//! [`movie_data::analysis::MovieAnalysis`]; no statistics are computed.

pub mod charts;
pub mod console;
pub mod markdown;
pub mod spreadsheet;
pub mod themes;
