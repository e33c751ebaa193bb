//! Sparse, column-dynamic table model.
//!
//! A [`Table`] collects heterogeneous, partially populated records (one row per
//! experiment configuration, one column per metric or parameter) without knowing
//! the column set up front.
//!
//! - Cells that were never set fall back to a declared default value.
//! - Cells render to text through an optional printf-style [`CellFormat`].
//! - [`Table::partition_columns`] separates columns that are constant across all
//!   rows from those that vary, which renderers use for compact output.
//!
//! # Example
//!
//! ```
//! use flextab_model::Table;
//!
//! let mut table: Table<f64> = Table::new();
//! table.add_row("run1", [("acc", 0.9), ("f1", 0.8)]);
//! table.add_row("run2", [("acc", 0.9), ("f1", 0.7)]);
//!
//! let partition = table.partition_columns();
//! assert_eq!(partition.invariant, ["acc"]);
//! assert_eq!(partition.varying, ["f1"]);
//! ```

#![deny(unsafe_code)]

mod cell;
mod compact;
mod error;
mod format;
mod table;

pub use cell::CellValue;
pub use compact::ColumnPartition;
pub use error::{CellParseError, ModelError, Result};
pub use format::CellFormat;
pub use table::{Row, Table};
