//! Error types for table encoding and decoding.

use thiserror::Error;

use flextab_model::CellParseError;

/// Errors that can occur when writing or reading a table.
#[derive(Debug, Error)]
pub enum ReportError {
    /// I/O error on the byte sink or source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input or CSV write failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// XML write failure.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Text holds a character outside the XML 1.0 character range.
    #[error("{text:?} contains U+{code:04X}, which cannot be written to XML")]
    UnencodableText { text: String, code: u32 },

    /// The table's cell type cannot be parsed from text.
    #[error(
        "cell type {type_name} has no text conversion; supply a custom parser to read CSV data"
    )]
    MissingConversion { type_name: &'static str },

    /// A CSV field could not be converted to the table's cell type.
    #[error("row {row:?}, column {column:?}: {source}")]
    Cell {
        row: String,
        column: String,
        #[source]
        source: CellParseError,
    },
}

/// Result type alias for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    /// Create a MissingConversion error.
    pub fn missing_conversion(type_name: &'static str) -> Self {
        Self::MissingConversion { type_name }
    }

    /// Create an UnencodableText error.
    pub fn unencodable(text: impl Into<String>, character: char) -> Self {
        Self::UnencodableText {
            text: text.into(),
            code: u32::from(character),
        }
    }

    /// Create a Cell error.
    pub fn cell(row: impl Into<String>, column: impl Into<String>, source: CellParseError) -> Self {
        Self::Cell {
            row: row.into(),
            column: column.into(),
            source,
        }
    }

    /// True for failures caused by the reader configuration rather than the data.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingConversion { .. })
    }
}
