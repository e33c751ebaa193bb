//! Cell value contract.
//!
//! Every table is homogeneous over one cell type. The type decides how a value
//! renders to text, whether numeric format directives can see it as a number,
//! and whether text read back from a CSV file can be turned into a value again.

use std::fmt::Debug;

use crate::error::CellParseError;

/// A value that can live in a table cell.
pub trait CellValue: Clone + Debug + PartialEq {
    /// Human-readable type name used in error messages.
    const TYPE_NAME: &'static str;

    /// Whether [`CellValue::from_text`] is implemented for this type.
    const HAS_TEXT_CONVERSION: bool = false;

    /// Locale-independent text rendering.
    fn to_text(&self) -> String;

    /// Floating point view for `%f`/`%e` directives.
    fn as_f64(&self) -> Option<f64> {
        None
    }

    /// Integer view for `%d` directives.
    fn as_i64(&self) -> Option<i64> {
        None
    }

    /// Convert text produced by [`CellValue::to_text`] back into a value.
    fn from_text(text: &str) -> Result<Self, CellParseError> {
        let _ = text;
        Err(CellParseError::unsupported(Self::TYPE_NAME))
    }
}

impl CellValue for String {
    const TYPE_NAME: &'static str = "String";
    const HAS_TEXT_CONVERSION: bool = true;

    fn to_text(&self) -> String {
        self.clone()
    }

    fn as_f64(&self) -> Option<f64> {
        self.trim().parse().ok()
    }

    fn as_i64(&self) -> Option<i64> {
        self.trim().parse().ok()
    }

    fn from_text(text: &str) -> Result<Self, CellParseError> {
        Ok(text.to_string())
    }
}

impl CellValue for bool {
    const TYPE_NAME: &'static str = "bool";
    const HAS_TEXT_CONVERSION: bool = true;

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_text(text: &str) -> Result<Self, CellParseError> {
        text.trim()
            .parse()
            .map_err(|e| CellParseError::invalid(text, Self::TYPE_NAME, e))
    }
}

macro_rules! float_cell {
    ($($ty:ty),*) => {
        $(
            impl CellValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);
                const HAS_TEXT_CONVERSION: bool = true;

                fn to_text(&self) -> String {
                    self.to_string()
                }

                fn as_f64(&self) -> Option<f64> {
                    Some(f64::from(*self))
                }

                fn from_text(text: &str) -> Result<Self, CellParseError> {
                    text.trim()
                        .parse()
                        .map_err(|e| CellParseError::invalid(text, Self::TYPE_NAME, e))
                }
            }
        )*
    };
}

macro_rules! int_cell {
    ($($ty:ty),*) => {
        $(
            impl CellValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);
                const HAS_TEXT_CONVERSION: bool = true;

                fn to_text(&self) -> String {
                    self.to_string()
                }

                fn as_f64(&self) -> Option<f64> {
                    Some(*self as f64)
                }

                fn as_i64(&self) -> Option<i64> {
                    i64::try_from(*self).ok()
                }

                fn from_text(text: &str) -> Result<Self, CellParseError> {
                    text.trim()
                        .parse()
                        .map_err(|e| CellParseError::invalid(text, Self::TYPE_NAME, e))
                }
            }
        )*
    };
}

float_cell!(f32, f64);
int_cell!(i32, i64, u32, u64, usize);
