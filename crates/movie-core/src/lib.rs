//! Shared domain types for the movie statistics tools.
//!
//! Records and aggregates, the error type, command-line settings, numeric
//! helpers and display formatting.

pub mod calculations;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{MovieError, Result};
