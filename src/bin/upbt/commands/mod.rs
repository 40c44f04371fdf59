//! Command implementations for the upbt CLI.

pub mod build;
pub mod completions;
pub mod config;
pub mod engines;
