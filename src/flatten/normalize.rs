//! One-level normalization and record-path explosion
//!
//! Normalizing turns nested objects into dotted-path columns while leaving
//! arrays untouched. Exploding turns the array found in one column into one
//! row per element, tagged with a key copied from the originating row.

use crate::error::Result;
use crate::flatten::types::SCALAR_FIELD;
use crate::table::{Cell, Column, Table};
use serde_json::{Map, Value};

/// Flatten the nested objects of a record into `sep`-joined keys.
///
/// Every level of object nesting is collapsed; arrays are kept as values and an
/// empty object contributes no keys at all.
pub fn flatten_record(record: &Map<String, Value>, sep: &str) -> Map<String, Value> {
    let mut out = Map::new();
    flatten_into(record, None, sep, &mut out);
    out
}

fn flatten_into(record: &Map<String, Value>, prefix: Option<&str>, sep: &str, out: &mut Map<String, Value>) {
    for (key, value) in record.iter() {
        let path = match prefix {
            Some(p) => format!("{}{}{}", p, sep, key),
            None => key.clone(),
        };

        match value {
            Value::Object(inner) => flatten_into(inner, Some(&path), sep, out),
            _ => {
                out.insert(path, value.clone());
            }
        }
    }
}

/// Normalize records into a table
pub fn normalize(records: &[Map<String, Value>], sep: &str) -> Table {
    let flat: Vec<Map<String, Value>> = records.iter().map(|r| flatten_record(r, sep)).collect();
    Table::from_records(&flat)
}

/// Normalize the rows of an existing table.
///
/// Columns keep their order. A column holding objects is replaced in place by
/// its `sep`-joined sub-columns; rows with a non-object value keep it under the
/// original name. Columns that are `Missing` on every row are kept as they are.
pub fn normalize_table(table: &Table, sep: &str) -> Result<Table> {
    let mut out: Vec<Column> = Vec::new();

    for column in table.columns() {
        if !column.cells.iter().any(is_object) {
            merge_column(&mut out, column.clone());
            continue;
        }

        if column.cells.iter().any(|cell| matches!(cell, Cell::Value(v) if !v.is_object())) {
            let cells = column
                .cells
                .iter()
                .map(|cell| if is_object(cell) { Cell::Missing } else { cell.clone() })
                .collect();
            merge_column(&mut out, Column::new(column.name.clone(), cells));
        }

        let prefix = format!("{}{}", column.name, sep);
        let expanded: Vec<Map<String, Value>> = column
            .cells
            .iter()
            .map(|cell| match cell {
                Cell::Value(Value::Object(obj)) => flatten_record(obj, sep)
                    .into_iter()
                    .map(|(key, value)| (format!("{}{}", prefix, key), value))
                    .collect(),
                _ => Map::new(),
            })
            .collect();

        for sub in Table::from_records(&expanded).into_columns() {
            merge_column(&mut out, sub);
        }
    }

    let mut normalized = Table::with_rows(table.num_rows());
    for column in out {
        normalized.push_column(column)?;
    }
    Ok(normalized)
}

fn is_object(cell: &Cell) -> bool {
    matches!(cell, Cell::Value(Value::Object(_)))
}

/// Append `column`, or overlay its values onto an earlier column of the same name
fn merge_column(out: &mut Vec<Column>, column: Column) {
    match out.iter_mut().find(|existing| existing.name == column.name) {
        Some(existing) => {
            for (slot, cell) in existing.cells.iter_mut().zip(column.cells) {
                if !cell.is_missing() {
                    *slot = cell;
                }
            }
        }
        None => out.push(column),
    }
}

/// Explode `column` of `table` into one row per nested element.
///
/// Each element is normalized and its keys are prefixed with `prefix`; the
/// value of `meta` on the originating row is appended as the last column.
/// Missing cells, `null` and empty arrays produce no rows. A lone object is
/// treated as a one-element array, and non-object elements land in a `0`
/// field, so they surface as `<column><sep>0`.
pub fn explode(table: &Table, column: &str, meta: &str, prefix: &str, sep: &str) -> Result<Table> {
    let source = table.require_column(column)?;
    let meta_column = table.require_column(meta)?;

    let mut records: Vec<Map<String, Value>> = Vec::new();
    let mut meta_cells: Vec<Cell> = Vec::new();

    for (cell, meta_cell) in source.cells.iter().zip(meta_column.cells.iter()) {
        for element in elements(cell) {
            let record = match element {
                Value::Object(obj) => flatten_record(obj, sep),
                other => {
                    let mut wrapped = Map::new();
                    wrapped.insert(SCALAR_FIELD.to_string(), other.clone());
                    wrapped
                }
            };

            records.push(
                record
                    .into_iter()
                    .map(|(key, value)| (format!("{}{}", prefix, key), value))
                    .collect(),
            );
            meta_cells.push(meta_cell.clone());
        }
    }

    let mut exploded = Table::from_records(&records);
    exploded.push_column(Column::new(meta, meta_cells))?;
    Ok(exploded)
}

fn elements(cell: &Cell) -> &[Value] {
    match cell {
        Cell::Missing | Cell::Value(Value::Null) => &[],
        Cell::Value(Value::Array(items)) => items.as_slice(),
        Cell::Value(other) => std::slice::from_ref(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_flatten_record_all_levels() {
        let flat = flatten_record(&record(json!({"a": {"b": {"c": 1}, "d": [1, 2]}, "e": 3})), ".");
        assert_eq!(flat, record(json!({"a.b.c": 1, "a.d": [1, 2], "e": 3})));
        assert_eq!(flat.keys().collect::<Vec<_>>(), vec!["a.b.c", "a.d", "e"]);
    }

    #[test]
    fn test_empty_object_vanishes() {
        let flat = flatten_record(&record(json!({"a": {}, "b": 1})), ".");
        assert_eq!(flat, record(json!({"b": 1})));
    }

    #[test]
    fn test_custom_separator() {
        let flat = flatten_record(&record(json!({"a": {"b": 1}})), "__");
        assert!(flat.contains_key("a__b"));
    }

    #[test]
    fn test_arrays_are_not_exploded() {
        let table = normalize(&[record(json!({"a": [{"b": 1}, {"b": 2}]}))], ".");
        assert_eq!(table.num_rows(), 1);
        assert_eq!(table.column_names(), vec!["a"]);
    }

    #[test]
    fn test_normalize_table_keeps_column_order() {
        let table = Table::from_columns(vec![
            Column::new("a", vec![Cell::Missing, Cell::Value(json!(1))]),
            Column::new("obj", vec![Cell::Value(json!({"x": 1})), Cell::Value(json!("raw"))]),
            Column::new("b", vec![Cell::Value(json!(2)), Cell::Value(json!(3))]),
            Column::new("c", vec![Cell::Missing, Cell::Missing]),
            Column::new("deep", vec![Cell::Missing, Cell::Value(json!({"y": {"z": true}}))]),
        ])
        .unwrap();

        let normalized = normalize_table(&table, ".").unwrap();
        assert_eq!(normalized.column_names(), vec!["a", "obj", "obj.x", "b", "c", "deep.y.z"]);
        assert_eq!(normalized.num_rows(), 2);
        assert_eq!(normalized.column("obj").unwrap().cells, vec![Cell::Missing, Cell::Value(json!("raw"))]);
        assert_eq!(normalized.column("c").unwrap().cells, vec![Cell::Missing, Cell::Missing]);
        assert_eq!(normalized.column("deep.y.z").unwrap().cells, vec![Cell::Missing, Cell::Value(json!(true))]);
    }

    #[test]
    fn test_normalize_table_matches_records_path() {
        let records = vec![
            record(json!({"id": 1, "a": {"b": 1, "c": {"d": 2}}, "tags": [1]})),
            record(json!({"id": 2, "a": {"b": 3, "c": {"d": 4}}, "tags": []})),
        ];
        let normalized = normalize_table(&Table::from_records(&records), ".").unwrap();
        assert_eq!(normalized, normalize(&records, "."));
    }

    #[test]
    fn test_explode_carries_meta() {
        let table = Table::from_records(&[
            record(json!({"items": [{"x": 1}, {"x": 2, "y": {"z": true}}], "k": 1})),
            record(json!({"items": [], "k": 2})),
            record(json!({"items": null, "k": 3})),
            record(json!({"k": 4})),
            record(json!({"items": [{"x": 5}], "k": 5})),
        ]);

        let exploded = explode(&table, "items", "k", "items.", ".").unwrap();
        assert_eq!(exploded.column_names(), vec!["items.x", "items.y.z", "k"]);
        assert_eq!(
            serde_json::to_value(&exploded).unwrap(),
            json!([
                {"items.x": 1, "k": 1},
                {"items.x": 2, "items.y.z": true, "k": 1},
                {"items.x": 5, "k": 5}
            ])
        );
    }

    #[test]
    fn test_explode_scalars_and_lone_objects() {
        let table = Table::from_records(&[
            record(json!({"items": [1, {"x": 2}], "k": 1})),
            record(json!({"items": {"x": 3}, "k": 2})),
            record(json!({"items": "solo", "k": 3})),
        ]);

        let exploded = explode(&table, "items", "k", "items.", ".").unwrap();
        assert_eq!(
            serde_json::to_value(&exploded).unwrap(),
            json!([
                {"items.0": 1, "k": 1},
                {"items.x": 2, "k": 1},
                {"items.x": 3, "k": 2},
                {"items.0": "solo", "k": 3}
            ])
        );
    }

    #[test]
    fn test_explode_nothing() {
        let table = Table::from_records(&[record(json!({"items": [], "k": 1}))]);
        let exploded = explode(&table, "items", "k", "items.", ".").unwrap();
        assert_eq!(exploded.num_rows(), 0);
        assert_eq!(exploded.column_names(), vec!["k"]);
    }
}
