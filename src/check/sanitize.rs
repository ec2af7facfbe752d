use crate::error::Result;
use crate::table::Table;
use once_cell::sync::Lazy;
use regex::Regex;

static ILLEGAL_CHARS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-zA-Z0-9]").unwrap()
});

/// Fail unless `column` is present in `table`
pub fn check_if_column_exists(column: &str, table: &Table) -> Result<()> {
    table.require_column(column).map(|_| ())
}

/// Fail on the first of `columns` that is not present in `table`
pub fn check_if_columns_exist<S: AsRef<str>>(columns: &[S], table: &Table) -> Result<()> {
    for column in columns {
        check_if_column_exists(column.as_ref(), table)?;
    }
    Ok(())
}

/// Clean a column name.
///
/// Optionally lowercases, then replaces every character outside
/// `[a-zA-Z0-9]` with `default_char` (commonly `""` or `"_"`).
pub fn clean_column(column: &str, is_lower: bool, default_char: &str) -> String {
    let column = if is_lower {
        column.to_lowercase()
    } else {
        column.to_string()
    };

    ILLEGAL_CHARS_REGEX
        .replace_all(&column, regex::NoExpand(default_char))
        .into_owned()
}

/// Clean every column name of a table
pub fn clean_column_names(table: Table, is_lower: bool, default_char: &str) -> Result<Table> {
    table.rename_columns(|name| clean_column(name, is_lower, default_char))
}

/// Clean column names with the defaults: lowercase, illegal characters dropped
pub fn clean_column_names_default(table: Table) -> Result<Table> {
    clean_column_names(table, true, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameError;
    use serde_json::json;

    fn cities() -> Table {
        Table::from_records(
            &serde_json::from_value::<Vec<_>>(json!([
                {"LatD": 41, "\"LatM\"": 5, "City": "Youngstown", "State ": "OH"},
                {"LatD": 42, "\"LatM\"": 52, "City": "Yankton", "State ": "SD"}
            ]))
            .unwrap(),
        )
    }

    #[test]
    fn test_check_if_column_exists() {
        let table = cities();
        assert!(check_if_column_exists("City", &table).is_ok());

        let err = check_if_column_exists("random_column", &table).unwrap_err();
        assert!(matches!(err, FrameError::ColumnNotFound { ref column, .. } if column == "random_column"));
    }

    #[test]
    fn test_check_if_columns_exist() {
        let table = cities();
        assert!(check_if_columns_exist(&["City", "LatD"], &table).is_ok());
        assert!(check_if_columns_exist(&["col_rand1", "col_ran2"], &table).is_err());
    }

    #[test]
    fn test_clean_column() {
        assert_eq!(clean_column("\"LatM\"", true, ""), "latm");
        assert_eq!(clean_column("State ", false, "_"), "State_");
        assert_eq!(clean_column("a.b$c", true, "$"), "a$b$c");
    }

    #[test]
    fn test_clean_column_names() {
        let table = cities();
        let cleaned = clean_column_names_default(table.clone()).unwrap();

        assert_eq!(cleaned.num_rows(), table.num_rows());
        assert_eq!(cleaned.num_columns(), table.num_columns());
        for name in cleaned.column_names() {
            assert!(name.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_clean_column_names_collision() {
        let table = Table::from_records(
            &serde_json::from_value::<Vec<_>>(json!([{"a b": 1, "a_b": 2}])).unwrap(),
        );
        let err = clean_column_names(table, true, "").unwrap_err();
        assert_eq!(err, FrameError::DuplicateColumn("ab".to_string()));
    }
}
