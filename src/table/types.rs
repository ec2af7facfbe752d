use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// A single table cell.
///
/// `Missing` marks a field that is absent for this row, either because the
/// source record never had it or because a join found no matching row.
/// It is distinct from a present JSON `null`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Missing,
    Value(Value),
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Cell::Missing => None,
            Cell::Value(v) => Some(v),
        }
    }

    /// Convert into a JSON value, mapping `Missing` to `null`
    pub fn into_value(self) -> Value {
        match self {
            Cell::Missing => Value::Null,
            Cell::Value(v) => v,
        }
    }

    /// Canonical key used for hash joins.
    ///
    /// No JSON document serializes to the empty string, so `Missing` can never
    /// collide with a present value.
    pub(crate) fn join_key(&self) -> String {
        match self {
            Cell::Missing => String::new(),
            Cell::Value(Value::Number(n)) => number_key(n),
            Cell::Value(v) => v.to_string(),
        }
    }
}

/// Integral floats share the key of the equal integer, so `1` matches `1.0`
fn number_key(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                return (f as i64).to_string();
            }
        }
    }
    n.to_string()
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        Cell::Value(value)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Missing => serializer.serialize_none(),
            Cell::Value(v) => v.serialize(serializer),
        }
    }
}

/// A named column of cells
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Column {
            name: name.into(),
            cells,
        }
    }

    /// Build a column from plain JSON values (no missing cells)
    pub fn from_values(name: impl Into<String>, values: Vec<Value>) -> Self {
        Column::new(name, values.into_iter().map(Cell::Value).collect())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_is_not_null() {
        let null = Cell::Value(Value::Null);
        assert_ne!(null, Cell::Missing);
        assert!(Cell::Missing.is_missing());
        assert!(!null.is_missing());
    }

    #[test]
    fn test_join_key_distinguishes_missing() {
        assert_eq!(Cell::Missing.join_key(), "");
        assert_eq!(Cell::Value(json!("")).join_key(), "\"\"");
        assert_eq!(Cell::Value(json!(1)).join_key(), "1");
    }

    #[test]
    fn test_join_key_numbers() {
        assert_eq!(Cell::Value(json!(1.0)).join_key(), Cell::Value(json!(1)).join_key());
        assert_eq!(Cell::Value(json!(-3.0)).join_key(), "-3");
        assert_eq!(Cell::Value(json!(-0.0)).join_key(), "0");
        assert_ne!(Cell::Value(json!(1.5)).join_key(), Cell::Value(json!(1)).join_key());
        assert_ne!(Cell::Value(json!("1")).join_key(), Cell::Value(json!(1)).join_key());
    }

    #[test]
    fn test_serialize_cells() {
        let column = Column::new("a", vec![Cell::Value(json!(1)), Cell::Missing]);
        let out = serde_json::to_value(&column).unwrap();
        assert_eq!(out, json!({"name": "a", "cells": [1, null]}));
    }
}
