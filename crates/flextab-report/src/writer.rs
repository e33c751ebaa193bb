//! Writer/reader traits and format selection.

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use flextab_model::{CellParseError, CellValue, Table};

use crate::csv::{CsvReader, CsvWriter};
use crate::error::Result;
use crate::latex::{LatexOptions, LatexWriter};
use crate::spreadsheet::SpreadsheetWriter;
use crate::wiki::WikiWriter;

/// Encodes a table into a byte sink.
pub trait TableWriter {
    /// Write the complete encoding of the table.
    fn write(&self, sink: &mut dyn Write) -> Result<()>;

    /// Encode into a fresh buffer.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(&mut buffer)?;
        Ok(buffer)
    }
}

/// Decodes a byte source into a table.
pub trait TableReader {
    /// Read the complete source, returning the number of rows decoded.
    fn read(&mut self, source: &mut dyn Read) -> Result<usize>;
}

/// Output formats a table can be rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Csv,
    Wiki,
    Latex,
    Spreadsheet,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 4] = [Self::Csv, Self::Wiki, Self::Latex, Self::Spreadsheet];

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Wiki => "txt",
            Self::Latex => "tex",
            Self::Spreadsheet => "xml",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Wiki => "wiki",
            Self::Latex => "latex",
            Self::Spreadsheet => "spreadsheet",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown report format: {value}"))
    }
}

/// Build the writer for `format`.
///
/// `latex` is only consulted for [`ReportFormat::Latex`].
pub fn writer_for<'a, V: CellValue>(
    format: ReportFormat,
    table: &'a Table<V>,
    latex: &LatexOptions,
) -> Box<dyn TableWriter + 'a> {
    match format {
        ReportFormat::Csv => Box::new(CsvWriter::new(table)),
        ReportFormat::Wiki => Box::new(WikiWriter::new(table)),
        ReportFormat::Latex => Box::new(LatexWriter::new(table, latex.clone())),
        ReportFormat::Spreadsheet => Box::new(SpreadsheetWriter::new(table)),
    }
}

/// Per-format writer and reader constructors on [`Table`].
pub trait TableReports<V: CellValue> {
    fn csv_writer(&self) -> CsvWriter<'_, V>;

    fn wiki_writer(&self) -> WikiWriter<'_, V>;

    /// The typeset writer. A transposing writer works on its own copy of
    /// the table, so the table itself keeps its shape.
    fn latex_writer(&self, options: LatexOptions) -> LatexWriter<'_, V>;

    fn spreadsheet_writer(&self) -> SpreadsheetWriter<'_, V>;

    /// CSV reader converting fields with the cell type's own text conversion.
    fn csv_reader(&mut self) -> CsvReader<'_, V>;

    /// CSV reader converting fields with `parse`.
    fn csv_reader_with<F>(&mut self, parse: F) -> CsvReader<'_, V>
    where
        F: Fn(&str) -> std::result::Result<V, CellParseError> + 'static;
}

impl<V: CellValue> TableReports<V> for Table<V> {
    fn csv_writer(&self) -> CsvWriter<'_, V> {
        CsvWriter::new(self)
    }

    fn wiki_writer(&self) -> WikiWriter<'_, V> {
        WikiWriter::new(self)
    }

    fn latex_writer(&self, options: LatexOptions) -> LatexWriter<'_, V> {
        LatexWriter::new(self, options)
    }

    fn spreadsheet_writer(&self) -> SpreadsheetWriter<'_, V> {
        SpreadsheetWriter::new(self)
    }

    fn csv_reader(&mut self) -> CsvReader<'_, V> {
        CsvReader::new(self)
    }

    fn csv_reader_with<F>(&mut self, parse: F) -> CsvReader<'_, V>
    where
        F: Fn(&str) -> std::result::Result<V, CellParseError> + 'static,
    {
        CsvReader::with_parser(self, parse)
    }
}
