use crate::error::{FrameError, Result};
use crate::table::{join, Column, JoinType, Table};
use rand::Rng;
use serde_json::{Number, Value};
use std::cmp::Ordering;

/// Join two tables on every column name they share.
///
/// Shared columns are taken in left column order.
pub fn auto_join(left: &Table, right: &Table, how: JoinType) -> Result<Table> {
    let common: Vec<String> = left
        .column_names()
        .into_iter()
        .filter(|name| right.contains_column(name))
        .collect();

    if common.is_empty() {
        return Err(FrameError::NoCommonColumns);
    }

    tracing::debug!(on = ?common, join = %how, "Auto-joining tables");
    join(left, right, &common, how)
}

/// Shape and value ranges of a random table
#[derive(Debug, Clone, PartialEq)]
pub struct RandomTableSpec {
    pub num_int_cols: usize,
    pub num_float_cols: usize,
    pub size: usize,
    /// Inclusive lower bound for integer columns
    pub low_int: i64,
    /// Exclusive upper bound for integer columns
    pub high_int: i64,
    pub low_float: f64,
    pub high_float: f64,
}

impl RandomTableSpec {
    pub fn new(num_int_cols: usize, num_float_cols: usize, size: usize) -> Self {
        RandomTableSpec {
            num_int_cols,
            num_float_cols,
            size,
            low_int: 1,
            high_int: 100,
            low_float: 0.0,
            high_float: 10.0,
        }
    }

    pub fn with_int_range(mut self, low: i64, high: i64) -> Self {
        self.low_int = low;
        self.high_int = high;
        self
    }

    pub fn with_float_range(mut self, low: f64, high: f64) -> Self {
        self.low_float = low;
        self.high_float = high;
        self
    }
}

/// Generate a table of uniformly random numbers using the thread-local RNG
pub fn generate_random_table(spec: &RandomTableSpec) -> Result<Table> {
    generate_random_table_with(spec, &mut rand::rng())
}

/// Generate a random table from a caller-supplied RNG.
///
/// Integer columns are named `int1..intN`; float columns continue the
/// numbering, so two int and three float columns give `int1, int2, float3,
/// float4, float5`.
pub fn generate_random_table_with<R: Rng>(spec: &RandomTableSpec, rng: &mut R) -> Result<Table> {
    if spec.num_int_cols > 0 && spec.low_int >= spec.high_int {
        return Err(FrameError::InvalidRange {
            what: "integer columns",
            low: spec.low_int.to_string(),
            high: spec.high_int.to_string(),
        });
    }
    // NaN bounds compare as unordered and are rejected too
    if spec.num_float_cols > 0 && spec.low_float.partial_cmp(&spec.high_float) != Some(Ordering::Less) {
        return Err(FrameError::InvalidRange {
            what: "float columns",
            low: spec.low_float.to_string(),
            high: spec.high_float.to_string(),
        });
    }

    let mut table = Table::with_rows(spec.size);

    for idx in 1..=spec.num_int_cols {
        let values = (0..spec.size)
            .map(|_| Value::from(rng.random_range(spec.low_int..spec.high_int)))
            .collect();
        table.push_column(Column::from_values(format!("int{}", idx), values))?;
    }

    for idx in (spec.num_int_cols + 1)..=(spec.num_int_cols + spec.num_float_cols) {
        let values = (0..spec.size)
            .map(|_| {
                let x: f64 = rng.random_range(spec.low_float..spec.high_float);
                Number::from_f64(x).map(Value::Number).unwrap_or(Value::Null)
            })
            .collect();
        table.push_column(Column::from_values(format!("float{}", idx), values))?;
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn table(value: Value) -> Table {
        Table::from_records(&serde_json::from_value::<Vec<_>>(value).unwrap())
    }

    #[test]
    fn test_auto_join_on_common_columns() {
        let left = table(json!([{"id": 1, "region": "eu", "a": 1}, {"id": 2, "region": "us", "a": 2}]));
        let right = table(json!([{"region": "us", "id": 2, "b": 3}]));

        let joined = auto_join(&left, &right, JoinType::Inner).unwrap();
        assert_eq!(joined.column_names(), vec!["id", "region", "a", "b"]);
        assert_eq!(
            serde_json::to_value(&joined).unwrap(),
            json!([{"id": 2, "region": "us", "a": 2, "b": 3}])
        );
    }

    #[test]
    fn test_auto_join_integral_floats_match_integers() {
        let left = table(json!([{"id": 1, "a": "x"}, {"id": 2, "a": "y"}]));
        let right = table(json!([{"id": 2.0, "b": true}, {"id": 2.5, "b": false}]));

        let joined = auto_join(&left, &right, JoinType::Inner).unwrap();
        assert_eq!(
            serde_json::to_value(&joined).unwrap(),
            json!([{"id": 2, "a": "y", "b": true}])
        );
    }

    #[test]
    fn test_auto_join_no_common_columns() {
        let left = table(json!([{"a": 1}]));
        let right = table(json!([{"b": 1}]));
        assert_eq!(
            auto_join(&left, &right, JoinType::Inner).unwrap_err(),
            FrameError::NoCommonColumns
        );
    }

    #[test]
    fn test_generate_random_table() {
        let size = 10_000;
        let spec = RandomTableSpec::new(2, 3, size);
        let data = generate_random_table_with(&spec, &mut StdRng::seed_from_u64(7)).unwrap();

        assert_eq!(data.num_rows(), size);
        assert_eq!(data.column_names(), vec!["int1", "int2", "float3", "float4", "float5"]);

        for column in &data.columns()[..2] {
            assert!(column.cells.iter().all(|cell| match cell {
                Cell::Value(Value::Number(n)) => n.as_i64().map_or(false, |v| (1..100).contains(&v)),
                _ => false,
            }));
        }
        for column in &data.columns()[2..] {
            assert!(column.cells.iter().all(|cell| match cell {
                Cell::Value(Value::Number(n)) => {
                    n.is_f64() && n.as_f64().map_or(false, |v| (0.0..10.0).contains(&v))
                }
                _ => false,
            }));
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let spec = RandomTableSpec::new(1, 1, 50).with_int_range(-5, 5).with_float_range(1.0, 2.0);
        let a = generate_random_table_with(&spec, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate_random_table_with(&spec, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_ranges() {
        let spec = RandomTableSpec::new(1, 0, 5).with_int_range(5, 5);
        assert!(matches!(
            generate_random_table(&spec),
            Err(FrameError::InvalidRange { what: "integer columns", .. })
        ));

        let spec = RandomTableSpec::new(0, 1, 5).with_float_range(3.0, 1.0);
        assert!(matches!(
            generate_random_table(&spec),
            Err(FrameError::InvalidRange { what: "float columns", .. })
        ));
    }

    #[test]
    fn test_empty_table() {
        let data = generate_random_table(&RandomTableSpec::new(0, 0, 3)).unwrap();
        assert_eq!(data.num_rows(), 3);
        assert_eq!(data.num_columns(), 0);
    }
}
