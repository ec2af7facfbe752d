use thiserror::Error;

/// Errors raised by table operations and input conversion.
///
/// The flattening core itself never fails on data shape; these surface from
/// explicit checks (missing columns, bad ranges) and from inputs that are
/// neither a record nor a table.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FrameError {
    #[error("{column} not found in {available:?}")]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("column {column} has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("no common columns found")]
    NoCommonColumns,

    #[error("invalid range for {what}: low {low} must be below high {high}")]
    InvalidRange {
        what: &'static str,
        low: String,
        high: String,
    },

    #[error("unsupported input: expected an object or an array of objects, got {0}")]
    UnsupportedInput(&'static str),
}

pub type Result<T> = std::result::Result<T, FrameError>;
