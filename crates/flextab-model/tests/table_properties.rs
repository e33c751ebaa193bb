//! Property tests for the table store and compaction engine.

use std::collections::BTreeSet;

use proptest::prelude::*;

use flextab_model::Table;

/// Row id, then (column, value) cells.
type Population = Vec<(String, Vec<(String, i64)>)>;

fn population() -> impl Strategy<Value = Population> {
    let row_id = "[a-e][0-9]{0,2}";
    let column = "[p-t]";
    let cells = prop::collection::vec((column, 0i64..3), 0..5);
    prop::collection::vec((row_id, cells), 0..8)
}

fn build(rows: &Population, default: Option<i64>) -> Table<i64> {
    let mut table = match default {
        Some(value) => Table::with_default(value),
        None => Table::new(),
    };
    for (id, cells) in rows {
        table.add_row(id.clone(), cells.clone());
    }
    table
}

proptest! {
    #[test]
    fn unset_cells_resolve_to_default(rows in population(), default in any::<i64>()) {
        let table = build(&rows, Some(default));
        for row_id in table.row_ids() {
            let row = table.row(row_id).unwrap();
            for column in ["p", "q", "r", "s", "t", "never"] {
                if !row.contains_key(column) {
                    prop_assert_eq!(table.value(row_id, column), Some(&default));
                }
            }
        }
        prop_assert_eq!(table.value("no-such-row", "p"), Some(&default));
    }

    #[test]
    fn partition_is_disjoint_and_complete(rows in population(), compact in any::<bool>()) {
        let mut table = build(&rows, None);
        table.set_compact(compact);
        let partition = table.partition_columns();

        let invariant: BTreeSet<&String> = partition.invariant.iter().collect();
        let varying: BTreeSet<&String> = partition.varying.iter().collect();
        prop_assert!(invariant.is_disjoint(&varying));

        let mut merged: Vec<&String> = partition.invariant.iter().chain(&partition.varying).collect();
        merged.sort();
        let mut all: Vec<&String> = table.column_ids().iter().collect();
        all.sort();
        prop_assert_eq!(merged, all);
    }

    #[test]
    fn partition_keeps_registration_order(rows in population()) {
        let table = build(&rows, None);
        let partition = table.partition_columns();
        let position = |c: &String| table.column_ids().iter().position(|x| x == c).unwrap();
        for set in [&partition.invariant, &partition.varying] {
            let positions: Vec<usize> = set.iter().map(position).collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn single_row_is_fully_invariant(cells in prop::collection::vec(("[p-t]", 0i64..3), 0..5)) {
        let mut table: Table<i64> = Table::new();
        table.add_row("only", cells);
        let partition = table.partition_columns();
        prop_assert!(partition.varying.is_empty());
        prop_assert_eq!(partition.invariant.len(), table.column_count());
    }

    #[test]
    fn row_ids_sorted_or_insertion_ordered(rows in population()) {
        let mut table = build(&rows, None);

        let sorted = table.row_ids();
        prop_assert!(sorted.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(&sorted, &table.row_ids());

        table.set_sort_rows(false);
        let mut expected: Vec<&str> = Vec::new();
        for (id, _) in &rows {
            if !expected.contains(&id.as_str()) {
                expected.push(id.as_str());
            }
        }
        prop_assert_eq!(table.row_ids(), expected.clone());
        prop_assert_eq!(table.row_ids(), expected);
    }

    #[test]
    fn transposing_twice_restores_cells(rows in population()) {
        let table = build(&rows, None);
        let back = table.transposed().transposed();
        prop_assert_eq!(back.row_ids(), table.row_ids());
        for row_id in table.row_ids() {
            for column in table.column_ids() {
                prop_assert_eq!(back.value(row_id, column), table.value(row_id, column));
            }
        }
    }
}

#[test]
fn add_to_row_leaves_other_cells_untouched() {
    let mut table: Table<String> = Table::new();
    table.add_row("run1", [("acc", "0.9".to_string()), ("f1", "0.8".to_string())]);
    table.add_row("run2", [("acc", "0.9".to_string()), ("f1", "0.7".to_string())]);

    table.add_to_row("run1", [("f1", "0.85".to_string())]);

    assert_eq!(table.value_as_text("run1", "acc"), "0.9");
    assert_eq!(table.value_as_text("run1", "f1"), "0.85");
    assert_eq!(table.value_as_text("run2", "f1"), "0.7");
}
