//! Table operations: joins on shared columns, random data, column selection

pub mod operations;
pub mod df_ops;

pub use operations::{auto_join, generate_random_table, generate_random_table_with, RandomTableSpec};
pub use df_ops::{get_rows, select_columns};
