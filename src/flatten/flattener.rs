use crate::error::Result;
use crate::flatten::detector::NestingDetector;
use crate::flatten::normalize::{explode, normalize_table};
use crate::flatten::types::{FlattenConfig, FlattenInput, CORRELATION_KEY};
use crate::table::{join, Cell, Column, JoinType, Table};
use serde_json::Value;
use tracing::{debug, trace};

/// Recursively flattens nested records into a flat table.
///
/// Each pass normalizes nested objects into dotted columns, explodes every
/// column still holding arrays of objects into extra rows, and merges those
/// rows back onto their row of origin through a synthetic correlation key.
/// Passes repeat until no nested column is left or `depth` passes have run.
pub struct Flattener {
    config: FlattenConfig,
}

impl Flattener {
    pub fn new(config: FlattenConfig) -> Self {
        Flattener { config }
    }

    pub fn config(&self) -> &FlattenConfig {
        &self.config
    }

    /// Detector configured with this flattener's sample size and policy
    pub fn detector(&self) -> NestingDetector {
        NestingDetector::new(self.config.num_rows_to_check).with_policy(self.config.policy)
    }

    /// Whether each column (or top-level field) of `input` is nested
    pub fn get_column_info(&self, input: &FlattenInput) -> Vec<bool> {
        self.detector().classify(input, &self.config.sep)
    }

    /// Flatten a record or a table
    pub fn flatten(&self, input: impl Into<FlattenInput>) -> Result<Table> {
        let table = input.into().into_table();
        self.flatten_pass(&table, 0)
    }

    /// Flatten a JSON object or array of objects
    pub fn flatten_value(&self, value: Value) -> Result<Table> {
        self.flatten(FlattenInput::try_from(value)?)
    }

    fn flatten_pass(&self, table: &Table, depth: usize) -> Result<Table> {
        let sep = self.config.sep.as_str();
        let data = normalize_table(table, sep)?;

        if self.config.depth <= depth {
            return Ok(data);
        }

        let nested: Vec<String> = data
            .column_names()
            .into_iter()
            .zip(self.detector().classify_table(&data))
            .filter_map(|(column, is_nested)| is_nested.then_some(column))
            .collect();

        debug!(
            depth,
            rows = data.num_rows(),
            columns = data.num_columns(),
            nested = ?nested,
            "Flatten pass"
        );

        if nested.is_empty() {
            return Ok(data);
        }

        let key = correlation_key_name(&data);
        let mut keyed = data;
        keyed.push_column(correlation_key(&key, keyed.num_rows()))?;

        let mut flat = keyed.clone();
        for column in &nested {
            flat.drop_column(column);

            let prefix = format!("{}{}", column, sep);
            let fragment = explode(&keyed, column, &key, &prefix, sep)?;
            trace!(
                column = %column,
                fragment_rows = fragment.num_rows(),
                "Merging exploded column"
            );

            flat = join(&flat, &fragment, &[key.as_str()], JoinType::Outer)?;
        }
        flat.drop_column(&key);

        self.flatten_pass(&flat, depth + 1)
    }
}

/// The reserved key name, lengthened until it does not clash with a data column
fn correlation_key_name(table: &Table) -> String {
    let mut name = CORRELATION_KEY.to_string();
    while table.contains_column(&name) {
        name.push('_');
    }
    name
}

fn correlation_key(name: &str, num_rows: usize) -> Column {
    let cells = (1..=num_rows as u64).map(|id| Cell::Value(Value::from(id))).collect();
    Column::new(name, cells)
}
