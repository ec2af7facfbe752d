use crate::check::check_if_columns_exist;
use crate::error::Result;
use crate::table::{Cell, Table};

/// A new table holding `columns` of `table`, in the order given
pub fn select_columns<S: AsRef<str>>(table: &Table, columns: &[S]) -> Result<Table> {
    check_if_columns_exist(columns, table)?;

    let mut selected = Table::with_rows(table.num_rows());
    for name in columns {
        let column = table.require_column(name.as_ref())?;
        selected.push_column(column.clone())?;
    }
    Ok(selected)
}

/// Row-major cells of the selected columns
pub fn get_rows<S: AsRef<str>>(table: &Table, columns: &[S]) -> Result<Vec<Vec<Cell>>> {
    let selected = select_columns(table, columns)?;
    Ok((0..selected.num_rows())
        .map(|row| selected.row(row).into_iter().cloned().collect())
        .collect())
}
