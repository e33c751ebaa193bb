//! Compaction: splitting columns into invariant and varying sets.
//!
//! Columns are compared on their rendered text, so the table's format string
//! influences which columns count as invariant.

use crate::cell::CellValue;
use crate::table::Table;

/// Columns split by whether their rendered value differs between rows.
///
/// Both sets keep column registration order, are disjoint, and together
/// cover every registered column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnPartition {
    /// Columns with the same rendered value in every row.
    pub invariant: Vec<String>,
    /// All remaining columns.
    pub varying: Vec<String>,
}

impl ColumnPartition {
    pub fn is_invariant(&self, column: &str) -> bool {
        self.invariant.iter().any(|c| c == column)
    }
}

impl<V: CellValue> Table<V> {
    /// Partition the registered columns against the current rows.
    ///
    /// A table without rows has no invariant columns.
    pub fn partition_columns(&self) -> ColumnPartition {
        let row_ids = self.row_ids();
        let mut partition = ColumnPartition::default();
        if row_ids.is_empty() {
            partition.varying = self.column_ids().to_vec();
            return partition;
        }

        for column in self.column_ids() {
            let first = self.value_as_text(row_ids[0], column);
            let same = row_ids[1..]
                .iter()
                .all(|row_id| self.value_as_text(row_id, column) == first);
            if same {
                partition.invariant.push(column.clone());
            } else {
                partition.varying.push(column.clone());
            }
        }
        partition
    }

    /// Columns to lay out in a table body: the varying set in compact mode,
    /// every column otherwise.
    pub fn render_columns(&self) -> Vec<String> {
        if self.is_compact() {
            self.partition_columns().varying
        } else {
            self.column_ids().to_vec()
        }
    }
}
