use crate::error::{FrameError, Result};
use crate::table::types::{Cell, Column};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// An in-memory table: ordered, uniquely named columns of equal length
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    num_rows: usize,
}

impl Table {
    /// Create an empty table with no rows and no columns
    pub fn new() -> Self {
        Table::default()
    }

    /// Create a table with `num_rows` rows and no columns yet
    pub fn with_rows(num_rows: usize) -> Self {
        Table {
            columns: Vec::new(),
            num_rows,
        }
    }

    /// Build a table from columns, checking lengths and name uniqueness
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let num_rows = columns.first().map(Column::len).unwrap_or(0);
        let mut table = Table::with_rows(num_rows);
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Build a table from records.
    ///
    /// Columns are the union of record keys in first-seen order. A key absent
    /// from a record becomes a `Missing` cell for that row.
    pub fn from_records(records: &[Map<String, Value>]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut columns: Vec<Column> = Vec::new();

        for (row, record) in records.iter().enumerate() {
            for (key, value) in record.iter() {
                let idx = *index.entry(key.as_str()).or_insert_with(|| {
                    columns.push(Column::new(key.clone(), vec![Cell::Missing; records.len()]));
                    columns.len() - 1
                });
                columns[idx].cells[row] = Cell::Value(value.clone());
            }
        }

        Table {
            columns,
            num_rows: records.len(),
        }
    }

    /// Convert each row into a record; `Missing` cells are left out
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        (0..self.num_rows).map(|row| self.record(row)).collect()
    }

    /// The record for a single row
    pub fn record(&self, row: usize) -> Map<String, Value> {
        let mut record = Map::new();
        for column in &self.columns {
            if let Cell::Value(v) = &column.cells[row] {
                record.insert(column.name.clone(), v.clone());
            }
        }
        record
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Look up a column, failing with the list of available names
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name).ok_or_else(|| FrameError::ColumnNotFound {
            column: name.to_string(),
            available: self.column_names(),
        })
    }

    /// Append a column at the end of the table
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.contains_column(&column.name) {
            return Err(FrameError::DuplicateColumn(column.name));
        }
        if self.columns.is_empty() && self.num_rows == 0 {
            self.num_rows = column.len();
        }
        let actual = column.len();
        if actual != self.num_rows {
            return Err(FrameError::LengthMismatch {
                column: column.name,
                expected: self.num_rows,
                actual,
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Remove a column, returning it if it was present
    pub fn drop_column(&mut self, name: &str) -> Option<Column> {
        let idx = self.column_index(name)?;
        Some(self.columns.remove(idx))
    }

    /// Rename every column with `f`, rejecting renames that collide
    pub fn rename_columns<F>(mut self, mut f: F) -> Result<Self>
    where
        F: FnMut(&str) -> String,
    {
        let mut seen = std::collections::HashSet::new();
        for column in self.columns.iter_mut() {
            let renamed = f(&column.name);
            if !seen.insert(renamed.clone()) {
                return Err(FrameError::DuplicateColumn(renamed));
            }
            column.name = renamed;
        }
        Ok(self)
    }

    /// Cells of one row, in column order
    pub fn row(&self, row: usize) -> Vec<&Cell> {
        self.columns.iter().map(|c| &c.cells[row]).collect()
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.num_rows))?;
        for row in 0..self.num_rows {
            seq.serialize_element(&self.record(row))?;
        }
        seq.end()
    }
}
