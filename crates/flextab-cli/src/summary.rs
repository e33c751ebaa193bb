use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{InspectReport, RenderOutcome};

pub fn print_render_summary(outcome: &RenderOutcome) {
    let Some(path) = &outcome.output else {
        return;
    };
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Format"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Facts"),
        header_cell("Output"),
    ]);
    apply_table_style(&mut table);
    for index in 2..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(&outcome.source),
        Cell::new(outcome.format).fg(Color::Cyan),
        Cell::new(outcome.rows),
        Cell::new(outcome.columns),
        count_cell(outcome.invariant_columns),
        Cell::new(path.display()),
    ]);
    println!("{table}");
}

pub fn print_inspect_report(report: &InspectReport) {
    println!("Table: {}", report.input.display());
    println!(
        "Rows: {}  Columns: {}  Invariant: {}",
        report.rows,
        report.columns.len(),
        report.invariant_count()
    );
    println!("{}", inspect_table(report));
}

pub fn inspect_table(report: &InspectReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Class"),
        header_cell("Distinct"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for column in &report.columns {
        let class = if column.invariant {
            Cell::new("invariant").fg(Color::Green)
        } else {
            Cell::new("varying").fg(Color::Yellow)
        };
        let value = match &column.value {
            Some(value) => Cell::new(value),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(&column.name).add_attribute(Attribute::Bold),
            class,
            Cell::new(column.distinct),
            value,
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
