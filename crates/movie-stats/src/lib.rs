//! Shared startup and file plumbing for the `analyze-movies` and
//! `generate-report` binaries.

pub mod bootstrap;
