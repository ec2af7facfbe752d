//! Parsing JSON and NDJSON input into flattener input

use crate::error::FrameError;
use crate::flatten::FlattenInput;
use crate::table::Table;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::io::{BufRead, BufReader, Read};

/// Parse a whole JSON document: an object becomes a record, an array of
/// objects a table. Uses SIMD-accelerated parsing.
pub fn parse_json(mut content: Vec<u8>) -> Result<FlattenInput> {
    let value: Value = simd_json::serde::from_slice(&mut content)
        .context("Failed to parse JSON")?;
    Ok(FlattenInput::try_from(value)?)
}

/// Parse newline-delimited JSON objects into records, skipping blank lines
pub fn parse_ndjson<R: BufRead>(reader: R) -> Result<Vec<Map<String, Value>>> {
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read line")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let value: Value = serde_json::from_str(line)
            .with_context(|| format!("Failed to parse JSON on line {}", idx + 1))?;
        match value {
            Value::Object(record) => records.push(record),
            Value::Array(_) => {
                return Err(FrameError::UnsupportedInput("array"))
                    .with_context(|| format!("Line {} is not a JSON object", idx + 1));
            }
            _ => {
                return Err(FrameError::UnsupportedInput("scalar"))
                    .with_context(|| format!("Line {} is not a JSON object", idx + 1));
            }
        }
    }

    Ok(records)
}

/// Read all of `reader` and parse it as JSON or NDJSON
pub fn read_input<R: Read>(reader: R, ndjson: bool) -> Result<FlattenInput> {
    let mut reader = BufReader::new(reader);

    if ndjson {
        let records = parse_ndjson(reader)?;
        return Ok(FlattenInput::Table(Table::from_records(&records)));
    }

    let mut content = Vec::new();
    reader.read_to_end(&mut content).context("Failed to read input")?;
    parse_json(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_single_object() {
        let input = parse_json(br#"{"b": 1, "a": {"c": 2}}"#.to_vec()).unwrap();
        match input {
            FlattenInput::Record(record) => {
                assert_eq!(record.keys().collect::<Vec<_>>(), vec!["b", "a"]);
                assert_eq!(record["a"], json!({"c": 2}));
            }
            other => panic!("Expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_array() {
        let input = parse_json(br#"[{"a": 1}, {"b": 2}]"#.to_vec()).unwrap();
        match input {
            FlattenInput::Table(table) => {
                assert_eq!(table.num_rows(), 2);
                assert_eq!(table.column_names(), vec!["a", "b"]);
            }
            other => panic!("Expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_scalars() {
        assert!(parse_json(b"42".to_vec()).is_err());
        assert!(parse_json(b"{not json".to_vec()).is_err());
    }

    #[test]
    fn test_ndjson() {
        let data = "{\"a\": 1}\n\n{\"a\": 2, \"b\": [1]}\n";
        let input = read_input(data.as_bytes(), true).unwrap();
        match input {
            FlattenInput::Table(table) => {
                assert_eq!(table.num_rows(), 2);
                assert_eq!(table.column_names(), vec!["a", "b"]);
            }
            other => panic!("Expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_ndjson_rejects_non_objects() {
        let err = parse_ndjson("{\"a\": 1}\n[1, 2]\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2") || err.to_string().contains("Line 2"));
    }
}
