//! Wiki markup encoding.
//!
//! A compact table with rows starts with a facts block, one `| *column* | value |`
//! line per invariant column followed by two blank lines. The table itself has a
//! bold header row and `| !row | ... |` body rows. The cell delimiter `|` is not
//! escapable in the markup, so occurrences inside names and values become spaces.

use std::io::{BufWriter, Write};

use tracing::debug;

use flextab_model::{CellValue, Table};

use crate::error::Result;
use crate::layout::ColumnLayout;
use crate::writer::TableWriter;

/// Writes a table as wiki markup.
#[derive(Debug, Clone, Copy)]
pub struct WikiWriter<'a, V> {
    table: &'a Table<V>,
}

impl<'a, V: CellValue> WikiWriter<'a, V> {
    pub fn new(table: &'a Table<V>) -> Self {
        Self { table }
    }
}

fn clean(text: &str) -> String {
    text.replace('|', " ")
}

impl<V: CellValue> TableWriter for WikiWriter<'_, V> {
    fn write(&self, sink: &mut dyn Write) -> Result<()> {
        let mut out = BufWriter::new(sink);
        let layout = ColumnLayout::compacted(self.table);
        let row_ids = self.table.row_ids();

        if let Some(first) = row_ids.first()
            && self.table.is_compact()
        {
            for column in &layout.facts {
                writeln!(
                    out,
                    "| *{}* | {} |",
                    clean(column),
                    clean(&self.table.value_as_text(first, column))
                )?;
            }
            writeln!(out)?;
            writeln!(out)?;
        }

        let header: Vec<String> = layout.header().into_iter().map(clean).collect();
        writeln!(out, "| *{}* |", header.join("* | *"))?;

        for row_id in &row_ids {
            let mut cells = Vec::with_capacity(layout.body.len() + 1);
            cells.push(clean(row_id));
            cells.extend(
                layout
                    .body
                    .iter()
                    .map(|column| clean(&self.table.value_as_text(row_id, column))),
            );
            writeln!(out, "| !{} |", cells.join(" | "))?;
        }
        out.flush()?;
        debug!(
            rows = row_ids.len(),
            facts = layout.facts.len(),
            columns = layout.body.len(),
            "wrote wiki table"
        );
        Ok(())
    }
}
