//! CSV encoding and decoding.
//!
//! The header row is `ID` followed by every registered column (the compact
//! flag is ignored), one record per row in [`Table::row_ids`] order. Quoting
//! follows RFC 4180: fields containing delimiters, quotes or line breaks are
//! quoted, never stripped.

use std::io::{Read, Write};

use tracing::{debug, trace};

use flextab_model::{CellParseError, CellValue, Table};

use crate::error::{ReportError, Result};
use crate::layout::ColumnLayout;
use crate::writer::{TableReader, TableWriter};

/// Writes a table as CSV.
#[derive(Debug, Clone, Copy)]
pub struct CsvWriter<'a, V> {
    table: &'a Table<V>,
}

impl<'a, V: CellValue> CsvWriter<'a, V> {
    pub fn new(table: &'a Table<V>) -> Self {
        Self { table }
    }
}

impl<V: CellValue> TableWriter for CsvWriter<'_, V> {
    fn write(&self, sink: &mut dyn Write) -> Result<()> {
        let layout = ColumnLayout::full(self.table);
        let mut writer = csv::Writer::from_writer(sink);
        writer.write_record(layout.header())?;

        let row_ids = self.table.row_ids();
        for row_id in &row_ids {
            let mut record = Vec::with_capacity(layout.body.len() + 1);
            record.push(row_id.to_string());
            record.extend(
                layout
                    .body
                    .iter()
                    .map(|column| self.table.value_as_text(row_id, column)),
            );
            writer.write_record(&record)?;
        }
        writer.flush()?;
        debug!(
            rows = row_ids.len(),
            columns = layout.body.len(),
            "wrote CSV table"
        );
        Ok(())
    }
}

/// How CSV fields are turned into cell values.
pub enum ParseStrategy<V> {
    /// Use [`CellValue::from_text`] of the cell type.
    TypeBound,
    /// Use a caller-supplied conversion.
    Custom(Box<dyn Fn(&str) -> std::result::Result<V, CellParseError>>),
}

impl<V> ParseStrategy<V> {
    pub fn custom<F>(parse: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<V, CellParseError> + 'static,
    {
        Self::Custom(Box::new(parse))
    }
}

impl<V> std::fmt::Debug for ParseStrategy<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeBound => f.write_str("TypeBound"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Reads CSV produced by [`CsvWriter`] into a table.
///
/// The first header field is the row id header and is discarded; remaining
/// header fields name the columns. Rows are inserted with [`Table::add_row`],
/// so a row id already present in the table is replaced. Empty fields leave
/// the cell unset, unless the table has a default value: then an empty field
/// that parses is stored, so an explicit empty cell is not read back as the
/// default.
#[derive(Debug)]
pub struct CsvReader<'a, V> {
    table: &'a mut Table<V>,
    strategy: ParseStrategy<V>,
}

impl<'a, V: CellValue> CsvReader<'a, V> {
    /// Reader using the cell type's own text conversion.
    pub fn new(table: &'a mut Table<V>) -> Self {
        Self::with_strategy(table, ParseStrategy::TypeBound)
    }

    /// Reader using a custom conversion.
    pub fn with_parser<F>(table: &'a mut Table<V>, parse: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<V, CellParseError> + 'static,
    {
        Self::with_strategy(table, ParseStrategy::custom(parse))
    }

    pub fn with_strategy(table: &'a mut Table<V>, strategy: ParseStrategy<V>) -> Self {
        Self { table, strategy }
    }

    fn parse(&self, text: &str) -> std::result::Result<V, CellParseError> {
        match &self.strategy {
            ParseStrategy::TypeBound => V::from_text(text),
            ParseStrategy::Custom(parse) => parse(text),
        }
    }
}

impl<V: CellValue> TableReader for CsvReader<'_, V> {
    fn read(&mut self, source: &mut dyn Read) -> Result<usize> {
        if matches!(self.strategy, ParseStrategy::TypeBound) && !V::HAS_TEXT_CONVERSION {
            return Err(ReportError::missing_conversion(V::TYPE_NAME));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(source);
        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .skip(1)
            .map(str::to_string)
            .collect();
        self.table.add_columns(&columns);

        let keep_empty = self.table.default_value().is_some();
        let mut count = 0usize;
        for record in reader.records() {
            let record = record?;
            let Some(row_id) = record.get(0) else {
                continue;
            };
            let mut cells = Vec::with_capacity(columns.len());
            for (column, field) in columns.iter().zip(record.iter().skip(1)) {
                if field.is_empty() {
                    if keep_empty && let Ok(value) = self.parse(field) {
                        cells.push((column.clone(), value));
                    }
                    continue;
                }
                let value = self
                    .parse(field)
                    .map_err(|source| ReportError::cell(row_id, column.as_str(), source))?;
                cells.push((column.clone(), value));
            }
            trace!(row_id, cells = cells.len(), "decoded CSV row");
            self.table.add_row(row_id, cells);
            count += 1;
        }
        debug!(rows = count, columns = columns.len(), "read CSV table");
        Ok(count)
    }
}
