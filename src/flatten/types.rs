use crate::error::FrameError;
use crate::flatten::detector::{majority_policy, NestingPolicy};
use crate::table::Table;
use serde_json::{Map, Value};

/// Reserved name of the synthetic correlation key column.
///
/// If a data column already uses this name, underscores are appended until
/// the name is free.
pub const CORRELATION_KEY: &str = "___ID___";

/// Field name given to non-object elements when a nested column is exploded
pub const SCALAR_FIELD: &str = "0";

/// Configuration for the flattening process
#[derive(Debug, Clone)]
pub struct FlattenConfig {
    /// Number of leading rows sampled when deciding whether a column is nested
    pub num_rows_to_check: usize,

    /// Maximum number of normalize/explode/merge passes (0 = normalize only)
    pub depth: usize,

    /// Separator used to build dotted column paths
    pub sep: String,

    /// Decides nestedness from (nested count, sample size)
    pub policy: NestingPolicy,
}

impl FlattenConfig {
    /// The sample size has no sensible default and must be chosen by the caller
    pub fn new(num_rows_to_check: usize) -> Self {
        FlattenConfig {
            num_rows_to_check,
            depth: 1,
            sep: String::from("."),
            policy: majority_policy,
        }
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_separator(mut self, sep: impl Into<String>) -> Self {
        self.sep = sep.into();
        self
    }

    pub fn with_policy(mut self, policy: NestingPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Input accepted by the flattener: a single nested record or a table
#[derive(Debug, Clone, PartialEq)]
pub enum FlattenInput {
    Record(Map<String, Value>),
    Table(Table),
}

impl FlattenInput {
    /// The input as a table; a record becomes a single row
    pub fn into_table(self) -> Table {
        match self {
            FlattenInput::Record(record) => Table::from_records(&[record]),
            FlattenInput::Table(table) => table,
        }
    }
}

impl From<Map<String, Value>> for FlattenInput {
    fn from(record: Map<String, Value>) -> Self {
        FlattenInput::Record(record)
    }
}

impl From<Table> for FlattenInput {
    fn from(table: Table) -> Self {
        FlattenInput::Table(table)
    }
}

impl TryFrom<Value> for FlattenInput {
    type Error = FrameError;

    /// Objects become records; arrays of objects become tables
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(record) => Ok(FlattenInput::Record(record)),
            Value::Array(items) => {
                let records = items
                    .into_iter()
                    .map(|item| match item {
                        Value::Object(record) => Ok(record),
                        other => Err(FrameError::UnsupportedInput(type_name(&other))),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(FlattenInput::Table(Table::from_records(&records)))
            }
            other => Err(FrameError::UnsupportedInput(type_name(&other))),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
