//! Error types for the table model.

use thiserror::Error;

/// Errors raised while configuring a table.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Format template could not be parsed.
    #[error("invalid format string {template:?}: {message}")]
    InvalidFormat { template: String, message: String },
}

/// Result type alias for table model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

impl ModelError {
    /// Create an InvalidFormat error.
    pub fn invalid_format(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            template: template.into(),
            message: message.into(),
        }
    }
}

/// Errors raised when converting cell text back into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellParseError {
    /// The cell type has no text-to-value conversion.
    #[error("cell type {type_name} has no text conversion")]
    Unsupported { type_name: &'static str },

    /// The text is not a valid value of the cell type.
    #[error("cannot parse {text:?} as {type_name}: {message}")]
    Invalid {
        text: String,
        type_name: &'static str,
        message: String,
    },
}

impl CellParseError {
    /// Create an Unsupported error.
    pub fn unsupported(type_name: &'static str) -> Self {
        Self::Unsupported { type_name }
    }

    /// Create an Invalid error.
    pub fn invalid(text: impl Into<String>, type_name: &'static str, message: impl ToString) -> Self {
        Self::Invalid {
            text: text.into(),
            type_name,
            message: message.to_string(),
        }
    }
}
