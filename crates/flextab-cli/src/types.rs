use std::path::PathBuf;

use flextab_report::ReportFormat;

/// Outcome of a command that rendered a table.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    /// Where the table came from (input path or sweep description).
    pub source: String,
    pub format: ReportFormat,
    /// Output file, `None` for stdout.
    pub output: Option<PathBuf>,
    pub rows: usize,
    pub columns: usize,
    /// Columns moved to the facts block (0 when not compacting).
    pub invariant_columns: usize,
}

/// Compaction analysis of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnReport {
    pub name: String,
    pub invariant: bool,
    /// Number of distinct rendered values.
    pub distinct: usize,
    /// The shared value of an invariant column.
    pub value: Option<String>,
}

/// Result of `flextab inspect`.
#[derive(Debug, Clone)]
pub struct InspectReport {
    pub input: PathBuf,
    pub rows: usize,
    pub columns: Vec<ColumnReport>,
}

impl InspectReport {
    pub fn invariant_count(&self) -> usize {
        self.columns.iter().filter(|c| c.invariant).count()
    }
}
