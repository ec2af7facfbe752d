use crate::table::frame::Table;
use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Write;

/// Writes table rows as JSON Lines, one object per row
pub struct TableWriter<W: Write> {
    writer: W,
    /// Emit missing cells as explicit `null` instead of leaving the key out
    fill_missing: bool,
    rows_written: usize,
}

impl<W: Write> TableWriter<W> {
    pub fn new(writer: W) -> Self {
        TableWriter {
            writer,
            fill_missing: false,
            rows_written: 0,
        }
    }

    pub fn with_fill_missing(mut self, fill_missing: bool) -> Self {
        self.fill_missing = fill_missing;
        self
    }

    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        for row in 0..table.num_rows() {
            let record = if self.fill_missing {
                table
                    .columns()
                    .iter()
                    .map(|c| (c.name.clone(), c.cells[row].clone().into_value()))
                    .collect::<serde_json::Map<String, Value>>()
            } else {
                table.record(row)
            };

            let json = serde_json::to_string(&record)
                .context("Failed to serialize row")?;
            writeln!(self.writer, "{}", json)
                .context("Failed to write row")?;
            self.rows_written += 1;
        }
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }
}
