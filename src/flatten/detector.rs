//! Nesting detection
//!
//! Decides, per column, whether the values hold nested structures that the
//! flattener should explode. Tables are judged by a vote over a fixed prefix of
//! rows rather than a full scan, so a minority of malformed entries in an
//! otherwise nested column does not flip the decision.

use crate::flatten::normalize::flatten_record;
use crate::flatten::types::FlattenInput;
use crate::table::{Cell, Table};
use serde::Serialize;
use serde_json::{Map, Value};

/// Decides nestedness from the nested count and the configured sample size
pub type NestingPolicy = fn(nested_count: usize, sample_size: usize) -> bool;

/// Nested when at least half of the sample is nested.
///
/// A sample size of 0 makes every column nested, since `0 >= 0`.
pub fn majority_policy(nested_count: usize, sample_size: usize) -> bool {
    nested_count.saturating_mul(2) >= sample_size
}

/// An object, or a non-empty array whose first element is an object
pub fn is_nested_value(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(items) => matches!(items.first(), Some(Value::Object(_))),
        _ => false,
    }
}

/// Classification of a single column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub column: String,
    pub nested: bool,
}

/// Classifies columns of records and tables as nested or scalar
#[derive(Debug, Clone)]
pub struct NestingDetector {
    sample_size: usize,
    policy: NestingPolicy,
}

impl NestingDetector {
    pub fn new(sample_size: usize) -> Self {
        NestingDetector {
            sample_size,
            policy: majority_policy,
        }
    }

    pub fn with_policy(mut self, policy: NestingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// One flag per column of the input, in column order
    pub fn classify(&self, input: &FlattenInput, sep: &str) -> Vec<bool> {
        match input {
            FlattenInput::Record(record) => self.classify_record(record, sep),
            FlattenInput::Table(table) => self.classify_table(table),
        }
    }

    /// Classify each top-level field of a record.
    ///
    /// A field is nested when normalization does not keep its name, i.e. it
    /// was an object that got expanded into dotted paths (or vanished).
    pub fn classify_record(&self, record: &Map<String, Value>, sep: &str) -> Vec<bool> {
        let normalized = flatten_record(record, sep);
        record.keys().map(|key| !normalized.contains_key(key)).collect()
    }

    /// Classify each column of a table by voting over its first rows
    pub fn classify_table(&self, table: &Table) -> Vec<bool> {
        table
            .columns()
            .iter()
            .map(|column| {
                let nested_count = column
                    .cells
                    .iter()
                    .take(self.sample_size)
                    .filter(|cell| match cell {
                        Cell::Value(v) => is_nested_value(v),
                        Cell::Missing => false,
                    })
                    .count();
                (self.policy)(nested_count, self.sample_size)
            })
            .collect()
    }

    /// Named classification, for reporting
    pub fn column_info(&self, input: &FlattenInput, sep: &str) -> Vec<ColumnInfo> {
        let names: Vec<String> = match input {
            FlattenInput::Record(record) => record.keys().cloned().collect(),
            FlattenInput::Table(table) => table.column_names(),
        };

        names
            .into_iter()
            .zip(self.classify(input, sep))
            .map(|(column, nested)| ColumnInfo { column, nested })
            .collect()
    }
}

/// Classify with the majority policy and the default `.` separator
pub fn classify(input: &FlattenInput, sample_size: usize) -> Vec<bool> {
    NestingDetector::new(sample_size).classify(input, ".")
}
