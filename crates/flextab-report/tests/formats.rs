//! Cross-format behaviour on a shared results table.

use flextab_model::Table;
use flextab_report::{
    LatexOptions, ReportFormat, TableReports, TableWriter, writer_for,
};

fn results() -> Table<String> {
    let mut table = Table::new();
    table.add_row("run2", [("acc", "0.9".to_string()), ("f1", "0.7".to_string())]);
    table.add_row("run1", [("acc", "0.9".to_string()), ("f1", "0.8".to_string())]);
    table
}

fn render(format: ReportFormat, table: &Table<String>, latex: &LatexOptions) -> String {
    let bytes = writer_for(format, table, latex).to_bytes().unwrap();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn compaction_scenario() {
    let partition = results().partition_columns();
    assert_eq!(partition.invariant, ["acc"]);
    assert_eq!(partition.varying, ["f1"]);
}

#[test]
fn csv_scenario_without_compaction() {
    let mut table = results();
    table.set_compact(false);
    assert_eq!(
        render(ReportFormat::Csv, &table, &LatexOptions::default()),
        "ID,acc,f1\nrun1,0.9,0.8\nrun2,0.9,0.7\n"
    );
}

#[test]
fn add_to_row_updates_rendered_output() {
    let mut table = results();
    table.add_to_row("run1", [("f1", "0.85".to_string())]);
    let csv = render(ReportFormat::Csv, &table, &LatexOptions::default());
    assert_eq!(csv, "ID,acc,f1\nrun1,0.9,0.85\nrun2,0.9,0.7\n");
}

#[test]
fn every_format_uses_the_same_row_order() {
    let mut table = results();
    table.add_row("run10", [("acc", "0.8".to_string()), ("f1", "0.6".to_string())]);
    let latex = LatexOptions::default();

    for format in ReportFormat::ALL {
        let text = render(format, &table, &latex);
        let positions: Vec<usize> = ["run1", "run10", "run2"]
            .iter()
            .map(|id| {
                let needle = match format {
                    ReportFormat::Csv => format!("\n{id},"),
                    ReportFormat::Wiki => format!("| !{id} |"),
                    ReportFormat::Latex => format!("\n{id} &"),
                    ReportFormat::Spreadsheet => format!(">{id}<"),
                };
                text.find(&needle).unwrap_or_else(|| panic!("{format}: {id} missing"))
            })
            .collect();
        assert!(positions.is_sorted(), "{format}: rows out of order");
    }
}

#[test]
fn insertion_order_when_sorting_disabled() {
    let mut table = results();
    table.set_sort_rows(false);
    table.set_compact(false);
    let csv = render(ReportFormat::Csv, &table, &LatexOptions::default());
    assert_eq!(csv, "ID,acc,f1\nrun2,0.9,0.7\nrun1,0.9,0.8\n");
}

#[test]
fn transpose_scenario() {
    let table = results();
    let writer = table.latex_writer(LatexOptions::default().transposed(true));

    assert_eq!(writer.table().column_ids(), ["run2", "run1"]);
    assert_eq!(writer.table().row_ids(), ["acc", "f1"]);
    insta::assert_snapshot!(String::from_utf8(writer.to_bytes().unwrap()).unwrap(), @r"
    \begin{tabular}{ l l l }
    \small
    \hline
    ID & run2 & run1\\
    acc & 0.9 & 0.9\\
    f1 & 0.7 & 0.8\\
    \hline
    \end{tabular}
    ");

    // the source keeps its shape
    assert_eq!(table.column_ids(), ["acc", "f1"]);
}

#[test]
fn missing_values_render_empty_or_default() {
    let mut table: Table<String> = Table::new();
    table.set_compact(false);
    table.add_row("a", [("x", "1".to_string())]);
    table.add_row("b", [("y", "2".to_string())]);
    let wiki = String::from_utf8(table.wiki_writer().to_bytes().unwrap()).unwrap();
    assert_eq!(wiki, "| *ID* | *x* | *y* |\n| !a | 1 |  |\n| !b |  | 2 |\n");

    table.set_default_value("-".to_string());
    let wiki = String::from_utf8(table.wiki_writer().to_bytes().unwrap()).unwrap();
    assert_eq!(wiki, "| *ID* | *x* | *y* |\n| !a | 1 | - |\n| !b | - | 2 |\n");
}

#[test]
fn format_string_applies_to_all_encoders() {
    let mut table: Table<f64> = Table::new();
    table.set_compact(false);
    table.set_format_string("%.2f").unwrap();
    table.add_row("r", [("v", 1.0 / 3.0)]);

    let csv = String::from_utf8(table.csv_writer().to_bytes().unwrap()).unwrap();
    assert_eq!(csv, "ID,v\nr,0.33\n");
    let xml = String::from_utf8(table.spreadsheet_writer().to_bytes().unwrap()).unwrap();
    assert!(xml.contains("<Data ss:Type=\"Number\">0.33</Data>"));
}
