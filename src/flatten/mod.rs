//! Recursive flattening of nested JSON into flat tables
//!
//! The [`NestingDetector`] decides which columns hold nested structures and the
//! [`Flattener`] repeatedly normalizes, explodes and merges them until nothing
//! nested is left or the depth budget runs out.

pub mod types;
pub mod normalize;
pub mod detector;
pub mod flattener;

pub use types::{FlattenConfig, FlattenInput, CORRELATION_KEY};
pub use normalize::{explode, flatten_record, normalize, normalize_table};
pub use detector::{classify, is_nested_value, majority_policy, ColumnInfo, NestingDetector, NestingPolicy};
pub use flattener::Flattener;
