//! LaTeX `tabular` encoding.
//!
//! The typeset table always lays out every registered column; the compact
//! flag only affects the other document formats.

use std::borrow::Cow;
use std::fmt;
use std::io::{BufWriter, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use flextab_model::{CellValue, Table};

use crate::error::Result;
use crate::layout::{ColumnLayout, ID_HEADER};
use crate::writer::TableWriter;

/// Largest number of decimals a rounded cell is printed with.
pub const MAX_DECIMAL_PLACES: u32 = 15;

/// Horizontal alignment of the value columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnAlignment {
    #[default]
    #[serde(rename = "l")]
    Left,
    #[serde(rename = "c")]
    Center,
    #[serde(rename = "r")]
    Right,
}

impl ColumnAlignment {
    /// The column specifier letter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Center => "c",
            Self::Right => "r",
        }
    }
}

impl fmt::Display for ColumnAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnAlignment {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "l" | "left" => Ok(Self::Left),
            "c" | "center" | "centre" => Ok(Self::Center),
            "r" | "right" => Ok(Self::Right),
            other => Err(format!("unknown column alignment: {other}")),
        }
    }
}

/// A literal substitution applied to row identifiers before escaping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowIdReplacement {
    pub from: String,
    #[serde(default)]
    pub to: String,
}

impl RowIdReplacement {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Strip `prefix` wherever it occurs.
    pub fn strip(prefix: impl Into<String>) -> Self {
        Self::new(prefix, "")
    }
}

/// Options of the LaTeX writer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatexOptions {
    /// Render the transposed table (rows become columns).
    pub transpose: bool,
    /// Decimal places for numeric cells; `None` leaves them untouched.
    pub decimal_places: Option<u32>,
    /// Decimal places for percentage cells; `None` leaves them untouched.
    pub percentage_decimal_places: Option<u32>,
    pub alignment: ColumnAlignment,
    /// Applied to row ids in order.
    pub row_id_replacements: Vec<RowIdReplacement>,
}

impl LatexOptions {
    /// Map a signed rounding depth to an option; any negative depth disables
    /// rounding and depths above [`MAX_DECIMAL_PLACES`] are clamped.
    pub fn rounding_depth(depth: i32) -> Option<u32> {
        u32::try_from(depth)
            .ok()
            .map(|places| places.min(MAX_DECIMAL_PLACES))
    }

    #[must_use]
    pub fn transposed(mut self, transpose: bool) -> Self {
        self.transpose = transpose;
        self
    }

    #[must_use]
    pub fn with_decimal_places(mut self, places: Option<u32>) -> Self {
        self.decimal_places = places;
        self
    }

    #[must_use]
    pub fn with_percentage_decimal_places(mut self, places: Option<u32>) -> Self {
        self.percentage_decimal_places = places;
        self
    }

    #[must_use]
    pub fn with_alignment(mut self, alignment: ColumnAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn with_replacement(mut self, replacement: RowIdReplacement) -> Self {
        self.row_id_replacements.push(replacement);
        self
    }

    fn replace_row_id(&self, row_id: &str) -> String {
        self.row_id_replacements
            .iter()
            .filter(|r| !r.from.is_empty())
            .fold(row_id.to_string(), |id, r| id.replace(&r.from, &r.to))
    }

    fn convert_number(&self, text: &str) -> String {
        if let Some(places) = self.percentage_decimal_places
            && let Some(value) = text.strip_suffix('%').and_then(parse_finite)
        {
            return format!("{}%", round_fixed(value, places));
        }
        if let Some(places) = self.decimal_places
            && let Some(value) = parse_finite(text)
        {
            return round_fixed(value, places);
        }
        text.to_string()
    }
}

/// Writes a table as a LaTeX `tabular` environment.
#[derive(Debug, Clone)]
pub struct LatexWriter<'a, V: CellValue> {
    table: Cow<'a, Table<V>>,
    options: LatexOptions,
}

impl<'a, V: CellValue> LatexWriter<'a, V> {
    /// Bind the writer. With `options.transpose` the writer renders a
    /// transposed copy; `table` itself is not modified.
    pub fn new(table: &'a Table<V>, options: LatexOptions) -> Self {
        let table = if options.transpose {
            Cow::Owned(table.transposed())
        } else {
            Cow::Borrowed(table)
        };
        Self { table, options }
    }

    /// The table this writer renders.
    pub fn table(&self) -> &Table<V> {
        &self.table
    }
}

impl<V: CellValue> TableWriter for LatexWriter<'_, V> {
    fn write(&self, sink: &mut dyn Write) -> Result<()> {
        let table = self.table.as_ref();
        let layout = ColumnLayout::full(table);
        let mut out = BufWriter::new(sink);

        let mut spec = vec![ColumnAlignment::Left.as_str()];
        spec.extend(layout.body.iter().map(|_| self.options.alignment.as_str()));
        writeln!(out, "\\begin{{tabular}}{{ {} }}", spec.join(" "))?;
        writeln!(out, "\\small")?;
        writeln!(out, "\\hline")?;

        let mut header = vec![ID_HEADER.to_string()];
        header.extend(
            layout
                .body
                .iter()
                .map(|column| escape(&column.replace('|', " "))),
        );
        writeln!(out, "{}\\\\", header.join(" & "))?;

        let row_ids = table.row_ids();
        for row_id in &row_ids {
            let mut cells = vec![escape(&self.options.replace_row_id(row_id))];
            cells.extend(layout.body.iter().map(|column| {
                let text = table.value_as_text(row_id, column);
                escape(&self.options.convert_number(&text))
            }));
            writeln!(out, "{}\\\\", cells.join(" & "))?;
        }

        writeln!(out, "\\hline")?;
        writeln!(out, "\\end{{tabular}}")?;
        out.flush()?;
        debug!(
            rows = row_ids.len(),
            columns = layout.body.len(),
            transposed = self.options.transpose,
            "wrote LaTeX table"
        );
        Ok(())
    }
}

fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Round half away from zero and print exactly `places` decimals, at most
/// [`MAX_DECIMAL_PLACES`].
fn round_fixed(value: f64, places: u32) -> String {
    let places = places.min(MAX_DECIMAL_PLACES);
    let factor = 10f64.powi(places as i32);
    let scaled = value * factor;
    let mut rounded = if scaled.is_finite() {
        scaled.round() / factor
    } else {
        value
    };
    if rounded == 0.0 {
        // -0.0
        rounded = 0.0;
    }
    format!("{:.*}", places as usize, rounded)
}

/// Escape characters with special meaning in LaTeX text.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}
