//! Sparse, column-dynamic table store.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, trace};

use crate::cell::CellValue;
use crate::error::Result;
use crate::format::CellFormat;

/// Cells of a single row, keyed by column identifier.
pub type Row<V> = BTreeMap<String, V>;

/// A table whose columns are discovered from the rows added to it.
///
/// Cells that were never set resolve to the table's default value. Column
/// order is first-seen order across all insertions; row order for rendering
/// is either lexicographic or insertion order (see [`Table::set_sort_rows`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Table<V> {
    columns: Vec<String>,
    known_columns: HashSet<String>,
    row_order: Vec<String>,
    rows: HashMap<String, Row<V>>,
    default_value: Option<V>,
    format: Option<CellFormat>,
    sort_rows: bool,
    compact: bool,
}

impl<V> Default for Table<V> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            known_columns: HashSet::new(),
            row_order: Vec::new(),
            rows: HashMap::new(),
            default_value: None,
            format: None,
            sort_rows: true,
            compact: true,
        }
    }
}

impl<V: CellValue> Table<V> {
    /// Create an empty table without a default value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table whose unset cells resolve to `value`.
    pub fn with_default(value: V) -> Self {
        Self {
            default_value: Some(value),
            ..Self::default()
        }
    }

    /// Value returned for cells that were never set.
    pub fn set_default_value(&mut self, value: V) {
        self.default_value = Some(value);
    }

    /// Make unset cells resolve to no value at all.
    pub fn clear_default_value(&mut self) {
        self.default_value = None;
    }

    pub fn default_value(&self) -> Option<&V> {
        self.default_value.as_ref()
    }

    /// Render cells through a printf-style template instead of plain text.
    pub fn set_format_string(&mut self, template: &str) -> Result<()> {
        self.format = Some(CellFormat::parse(template)?);
        Ok(())
    }

    pub fn clear_format_string(&mut self) {
        self.format = None;
    }

    pub fn format(&self) -> Option<&CellFormat> {
        self.format.as_ref()
    }

    /// Enable or disable compact rendering.
    ///
    /// In compact mode columns whose rendered value is identical in every row
    /// are split from the main table body (or omitted, depending on format).
    pub fn set_compact(&mut self, compact: bool) {
        self.compact = compact;
    }

    pub fn is_compact(&self) -> bool {
        self.compact
    }

    /// Enable or disable lexicographic row ordering. When disabled rows render
    /// in the order they were first added.
    pub fn set_sort_rows(&mut self, sort_rows: bool) {
        self.sort_rows = sort_rows;
    }

    pub fn is_sort_rows(&self) -> bool {
        self.sort_rows
    }

    /// Add a row, replacing any existing row with the same id.
    pub fn add_row<I, K>(&mut self, id: impl Into<String>, cells: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        let id = id.into();
        let mut row = Row::new();
        for (column, value) in cells {
            let column = column.into();
            self.register_column(&column);
            row.insert(column, value);
        }
        trace!(row_id = %id, cells = row.len(), "add row");
        if self.rows.insert(id.clone(), row).is_none() {
            self.row_order.push(id);
        }
    }

    /// Add a row without cells. It still takes part in row enumeration.
    pub fn add_empty_row(&mut self, id: impl Into<String>) {
        self.add_row(id, std::iter::empty::<(String, V)>());
    }

    /// Merge cells into an existing row, or add the row if it is absent.
    ///
    /// Cells not mentioned in `cells` keep their current value.
    pub fn add_to_row<I, K>(&mut self, id: impl Into<String>, cells: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        let id = id.into();
        if !self.rows.contains_key(&id) {
            self.add_row(id, cells);
            return;
        }
        let mut merged = Vec::new();
        for (column, value) in cells {
            let column = column.into();
            self.register_column(&column);
            merged.push((column, value));
        }
        trace!(row_id = %id, cells = merged.len(), "merge into row");
        if let Some(row) = self.rows.get_mut(&id) {
            row.extend(merged);
        }
    }

    pub fn row(&self, id: &str) -> Option<&Row<V>> {
        self.rows.get(id)
    }

    pub fn contains_row(&self, id: &str) -> bool {
        self.rows.contains_key(id)
    }

    /// Register columns that should be present even without populated cells.
    pub fn add_columns<I, S>(&mut self, columns: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for column in columns {
            self.register_column(column.as_ref());
        }
    }

    /// Replace the registered columns, in the given order.
    ///
    /// Cells stored under columns that are no longer registered stay in their
    /// rows but are not rendered.
    pub fn set_columns<I, S>(&mut self, columns: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.columns.clear();
        self.known_columns.clear();
        self.add_columns(columns);
    }

    /// Column identifiers in registration order.
    pub fn column_ids(&self) -> &[String] {
        &self.columns
    }

    /// Row identifiers in rendering order.
    ///
    /// Every encoder takes its row order from here.
    pub fn row_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.row_order.iter().map(String::as_str).collect();
        if self.sort_rows {
            ids.sort_unstable();
        }
        ids
    }

    pub fn row_count(&self) -> usize {
        self.row_order.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_order.is_empty()
    }

    /// The cell value, or the default value when the cell (or row) is unset.
    pub fn value(&self, row_id: &str, column_id: &str) -> Option<&V> {
        self.rows
            .get(row_id)
            .and_then(|row| row.get(column_id))
            .or(self.default_value.as_ref())
    }

    /// The cell value rendered to text.
    ///
    /// A cell with no value (unset, with no default) renders as an empty string.
    pub fn value_as_text(&self, row_id: &str, column_id: &str) -> String {
        match (self.value(row_id, column_id), &self.format) {
            (None, _) => String::new(),
            (Some(value), Some(format)) => format.render(value),
            (Some(value), None) => value.to_text(),
        }
    }

    /// A copy of this table with rows and columns swapped.
    ///
    /// Former row ids become columns in row insertion order, former columns
    /// become rows in registration order. Defaults and rendering flags carry
    /// over; `self` is left untouched.
    pub fn transposed(&self) -> Table<V> {
        let mut out = Table {
            default_value: self.default_value.clone(),
            format: self.format.clone(),
            sort_rows: self.sort_rows,
            compact: self.compact,
            ..Table::default()
        };
        out.add_columns(&self.row_order);
        for column in &self.columns {
            let cells: Vec<(String, V)> = self
                .row_order
                .iter()
                .filter_map(|row_id| {
                    self.rows
                        .get(row_id)
                        .and_then(|row| row.get(column))
                        .map(|value| (row_id.clone(), value.clone()))
                })
                .collect();
            out.add_row(column.clone(), cells);
        }
        debug!(
            rows = out.row_count(),
            columns = out.column_count(),
            "transposed table"
        );
        out
    }

    fn register_column(&mut self, column: &str) {
        if !self.known_columns.contains(column) {
            self.known_columns.insert(column.to_string());
            self.columns.push(column.to_string());
        }
    }
}
