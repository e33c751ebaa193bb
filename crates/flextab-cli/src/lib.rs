//! Command-line front end for flexible tables.
//!
//! - `render`: read a CSV table and write it as CSV, wiki markup, LaTeX or a spreadsheet
//! - `inspect`: report which columns are invariant across all rows
//! - `sweep`: enumerate a parameter space into a table and render it

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod summary;
pub mod types;
