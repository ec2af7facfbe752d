//! # frame-extras - Tabular helpers for nested JSON
//!
//! Turns nested JSON records into flat tables and provides a handful of small
//! table utilities around them.
//!
//! ## Modules
//!
//! - **flatten**: Detect nested columns and recursively explode them into rows
//! - **table**: In-memory tables, hash joins and a JSON Lines writer
//! - **check**: Column existence checks and column-name cleaning
//! - **ops**: Auto-join on shared columns, random tables, column selection
//!
//! ## Quick Start
//!
//! ```rust
//! use frame_extras::{FlattenConfig, Flattener};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let data = json!({
//!     "a": 1,
//!     "b": [{"c": 2}, {"c": 4}]
//! });
//!
//! let flattener = Flattener::new(FlattenConfig::new(1));
//! let table = flattener.flatten_value(data)?;
//!
//! assert_eq!(table.column_names(), vec!["a", "b.c"]);
//! assert_eq!(table.num_rows(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ### Detecting nested columns
//!
//! ```rust
//! use frame_extras::flatten::{classify, FlattenInput};
//! use serde_json::json;
//!
//! let input = FlattenInput::try_from(json!([
//!     {"id": 1, "tags": ["x"], "items": [{"sku": "a"}]},
//!     {"id": 2, "tags": [], "items": [{"sku": "b"}]},
//! ])).unwrap();
//!
//! assert_eq!(classify(&input, 2), vec![false, false, true]);
//! ```

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

pub mod error;
pub mod table;
pub mod flatten;
pub mod check;
pub mod ops;
pub mod input;

// Re-export commonly used types for convenience
pub use error::FrameError;
pub use flatten::{FlattenConfig, FlattenInput, Flattener, NestingDetector};
pub use table::{Cell, Column, JoinType, Table, TableWriter};

/// Main entry point: flatten an NDJSON stream as one batch and write JSON Lines rows.
///
/// Returns the number of rows written.
pub fn flatten_json<R: BufRead, W: Write>(
    reader: R,
    writer: &mut TableWriter<W>,
    config: FlattenConfig,
) -> Result<usize> {
    let records = input::parse_ndjson(reader)?;
    let flattener = Flattener::new(config);

    let flat = flattener
        .flatten(Table::from_records(&records))
        .context("Failed to flatten records")?;

    writer.write_table(&flat)?;
    writer.flush()?;
    Ok(flat.num_rows())
}
