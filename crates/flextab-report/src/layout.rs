//! Column layout shared by all encoders.

use flextab_model::{CellValue, Table};

/// Header label of the row identifier column.
pub const ID_HEADER: &str = "ID";

/// Which columns an encoder lays out, and where.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ColumnLayout {
    /// Invariant columns rendered once, outside the table body.
    pub facts: Vec<String>,
    /// Columns rendered in the table body.
    pub body: Vec<String>,
}

impl ColumnLayout {
    /// Every registered column in the body, ignoring the compact flag.
    pub fn full<V: CellValue>(table: &Table<V>) -> Self {
        Self {
            facts: Vec::new(),
            body: table.column_ids().to_vec(),
        }
    }

    /// Invariant columns split out when the table is compact.
    pub fn compacted<V: CellValue>(table: &Table<V>) -> Self {
        if !table.is_compact() {
            return Self::full(table);
        }
        let partition = table.partition_columns();
        Self {
            facts: partition.invariant,
            body: partition.varying,
        }
    }

    /// `ID` followed by the body columns.
    pub fn header(&self) -> Vec<&str> {
        std::iter::once(ID_HEADER)
            .chain(self.body.iter().map(String::as_str))
            .collect()
    }
}
