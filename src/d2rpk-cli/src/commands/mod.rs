//! Command handlers for the d2rpk CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod generate;
pub mod summary;
pub mod tc;
