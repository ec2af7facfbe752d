//! Column checks and column-name cleaning

pub mod sanitize;

pub use sanitize::{
    check_if_column_exists, check_if_columns_exist, clean_column, clean_column_names,
    clean_column_names_default,
};
