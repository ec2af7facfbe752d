//! Hash join over tables
//!
//! Keys are compared by JSON equality. Rows that find no partner on the other
//! side are padded with [`Cell::Missing`], never with JSON `null`, so callers
//! can tell "absent because of the join" apart from "present but null".

use crate::error::Result;
use crate::table::frame::Table;
use crate::table::types::{Cell, Column};
use std::collections::HashMap;
use std::fmt;

/// Suffixes applied to overlapping non-key columns (left, right)
const SUFFIXES: (&str, &str) = ("_x", "_y");

/// Type of join to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum JoinType {
    /// Emit only matching row pairs.
    #[default]
    Inner,
    /// Emit all left rows; unmatched left rows have missing right columns.
    Left,
    /// Emit all right rows; unmatched right rows have missing left columns.
    Right,
    /// Emit all rows from both sides; unmatched rows are padded with missing cells.
    Outer,
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinType::Inner => write!(f, "INNER"),
            JoinType::Left => write!(f, "LEFT"),
            JoinType::Right => write!(f, "RIGHT"),
            JoinType::Outer => write!(f, "OUTER"),
        }
    }
}

type RowPair = (Option<usize>, Option<usize>);

/// Join two tables on the named key columns.
///
/// Output columns are the left columns (keys in place) followed by the right
/// non-key columns. Matching rows follow left order with right matches in
/// right order; `Outer` appends unmatched right rows at the end, and `Right`
/// follows right order instead.
pub fn join<S: AsRef<str>>(left: &Table, right: &Table, on: &[S], how: JoinType) -> Result<Table> {
    let on: Vec<&str> = on.iter().map(|s| s.as_ref()).collect();
    let left_keys = key_columns(left, &on)?;
    let right_keys = key_columns(right, &on)?;

    let pairs = match how {
        JoinType::Right => {
            let left_index = build_index(&left_keys, left.num_rows());
            let mut pairs = Vec::new();
            for r in 0..right.num_rows() {
                match left_index.get(&row_key(&right_keys, r)) {
                    Some(matches) => pairs.extend(matches.iter().map(|&l| (Some(l), Some(r)))),
                    None => pairs.push((None, Some(r))),
                }
            }
            pairs
        }
        _ => probe_left(&left_keys, &right_keys, left.num_rows(), right.num_rows(), how),
    };

    tracing::trace!(
        join = %how,
        left_rows = left.num_rows(),
        right_rows = right.num_rows(),
        output_rows = pairs.len(),
        "Joined tables"
    );

    assemble(left, right, &on, &pairs)
}

fn key_columns<'a>(table: &'a Table, on: &[&str]) -> Result<Vec<&'a Column>> {
    on.iter().map(|name| table.require_column(name)).collect()
}

fn row_key(keys: &[&Column], row: usize) -> Vec<String> {
    keys.iter().map(|c| c.cells[row].join_key()).collect()
}

fn build_index(keys: &[&Column], num_rows: usize) -> HashMap<Vec<String>, Vec<usize>> {
    let mut index: HashMap<Vec<String>, Vec<usize>> = HashMap::new();
    for row in 0..num_rows {
        index.entry(row_key(keys, row)).or_default().push(row);
    }
    index
}

fn probe_left(
    left_keys: &[&Column],
    right_keys: &[&Column],
    left_rows: usize,
    right_rows: usize,
    how: JoinType,
) -> Vec<RowPair> {
    let right_index = build_index(right_keys, right_rows);
    let mut matched_right = vec![false; right_rows];
    let mut pairs = Vec::new();

    for l in 0..left_rows {
        match right_index.get(&row_key(left_keys, l)) {
            Some(matches) => {
                for &r in matches {
                    matched_right[r] = true;
                    pairs.push((Some(l), Some(r)));
                }
            }
            None if matches!(how, JoinType::Left | JoinType::Outer) => pairs.push((Some(l), None)),
            None => {}
        }
    }

    if how == JoinType::Outer {
        pairs.extend(
            matched_right
                .iter()
                .enumerate()
                .filter(|(_, matched)| !**matched)
                .map(|(r, _)| (None, Some(r))),
        );
    }

    pairs
}

fn take(column: &Column, row: Option<usize>) -> Cell {
    row.map(|r| column.cells[r].clone()).unwrap_or_default()
}

fn assemble(left: &Table, right: &Table, on: &[&str], pairs: &[RowPair]) -> Result<Table> {
    let is_key = |name: &str| on.iter().any(|k| *k == name);
    let mut out = Table::with_rows(pairs.len());

    for column in left.columns() {
        let cells: Vec<Cell> = if is_key(&column.name) {
            // Right-only rows carry their key from the right side
            let right_key = right.require_column(&column.name)?;
            pairs
                .iter()
                .map(|&(l, r)| match l {
                    Some(_) => take(column, l),
                    None => take(right_key, r),
                })
                .collect()
        } else {
            pairs.iter().map(|&(l, _)| take(column, l)).collect()
        };

        let name = if !is_key(&column.name) && right.contains_column(&column.name) {
            format!("{}{}", column.name, SUFFIXES.0)
        } else {
            column.name.clone()
        };
        out.push_column(Column::new(name, cells))?;
    }

    for column in right.columns().iter().filter(|c| !is_key(&c.name)) {
        let cells = pairs.iter().map(|&(_, r)| take(column, r)).collect();
        let name = if left.contains_column(&column.name) {
            format!("{}{}", column.name, SUFFIXES.1)
        } else {
            column.name.clone()
        };
        out.push_column(Column::new(name, cells))?;
    }

    Ok(out)
}
