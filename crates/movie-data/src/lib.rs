//! Data layer for the movie statistics tools.
//!
//! Loads and validates the curated dataset, groups records by period and
//! value band, and runs the statistics engine that feeds the renderers.

pub mod aggregator;
pub mod analysis;
pub mod reader;

pub use movie_core as core;
