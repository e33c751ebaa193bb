//! Output formats for [`flextab_model::Table`].
//!
//! Every encoder borrows the table and implements [`TableWriter`], so a format
//! can be picked at run time with [`writer_for`]. All encoders take their row
//! order from [`Table::row_ids`](flextab_model::Table::row_ids) and their
//! column set from the table's registration order.
//!
//! | Format | Columns | Notes |
//! |--------|---------|-------|
//! | CSV | all | decodable with [`CsvReader`] |
//! | Wiki | compacted | invariant columns as a facts block |
//! | LaTeX | all | optional transpose, rounding and row id substitutions |
//! | Spreadsheet | compacted | XML Spreadsheet 2003, cells typed per value |
//!
//! # Example
//!
//! ```
//! use flextab_model::Table;
//! use flextab_report::{TableReports, TableWriter};
//!
//! let mut table: Table<f64> = Table::new();
//! table.add_row("run1", [("acc", 0.9), ("f1", 0.8)]);
//! table.add_row("run2", [("acc", 0.9), ("f1", 0.7)]);
//!
//! let wiki = String::from_utf8(table.wiki_writer().to_bytes()?).unwrap();
//! assert!(wiki.starts_with("| *acc* | 0.9 |\n"));
//! # Ok::<(), flextab_report::ReportError>(())
//! ```

#![deny(unsafe_code)]

mod csv;
mod error;
mod latex;
mod layout;
mod spreadsheet;
mod wiki;
mod writer;

pub use self::csv::{CsvReader, CsvWriter, ParseStrategy};
pub use error::{ReportError, Result};
pub use latex::{
    ColumnAlignment, LatexOptions, LatexWriter, MAX_DECIMAL_PLACES, RowIdReplacement,
    escape as escape_latex,
};
pub use layout::ID_HEADER;
pub use spreadsheet::{SHEET_NAME, SpreadsheetWriter};
pub use wiki::WikiWriter;
pub use writer::{ReportFormat, TableReader, TableReports, TableWriter, writer_for};
