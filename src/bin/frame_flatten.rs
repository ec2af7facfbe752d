//! frame-flatten: Flatten nested JSON into flat JSON Lines rows
//!
//! Usage:
//!   # Read from file, output to stdout
//!   frame-flatten --rows-to-check 10 data.json
//!
//!   # Read from stdin
//!   echo '{"a": 1, "b": [{"c": 2}, {"c": 4}]}' | frame-flatten --rows-to-check 1
//!
//!   # Process NDJSON as one batch, two passes, write to a file
//!   frame-flatten --ndjson --rows-to-check 100 --depth 2 events.jsonl -o flat.jsonl
//!
//! Set RUST_LOG=debug to see each flatten pass on stderr.

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use frame_extras::input::read_input;
use frame_extras::{FlattenConfig, Flattener, TableWriter};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "frame-flatten")]
#[command(about = "Flatten nested JSON into flat rows", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Process newline-delimited JSON (one JSON object per line)
    #[arg(long)]
    ndjson: bool,

    /// Number of leading rows sampled to decide whether a column is nested
    #[arg(long, short = 'n')]
    rows_to_check: usize,

    /// Maximum number of flatten passes (default: 1)
    #[arg(long)]
    depth: Option<usize>,

    /// Separator for dotted column paths (default: ".")
    #[arg(long)]
    sep: Option<String>,

    /// Write missing cells as explicit nulls
    #[arg(long)]
    fill_missing: bool,

    /// Output file (stdout if omitted)
    #[arg(long, short = 'o')]
    output: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Build config
    let mut config = FlattenConfig::new(args.rows_to_check);
    if let Some(depth) = args.depth {
        config = config.with_depth(depth);
    }
    if let Some(sep) = args.sep {
        config = config.with_separator(sep);
    }

    let reader = if let Some(file_path) = &args.input {
        let file = File::open(file_path).with_context(|| format!("Failed to open {}", file_path))?;
        Box::new(BufReader::new(file)) as Box<dyn Read>
    } else {
        Box::new(std::io::stdin()) as Box<dyn Read>
    };

    let input = read_input(reader, args.ndjson)?;
    let flat = Flattener::new(config).flatten(input)?;
    tracing::info!(rows = flat.num_rows(), columns = flat.num_columns(), "Flattened input");

    let output = if let Some(path) = &args.output {
        let file = File::create(path).with_context(|| format!("Failed to create {}", path))?;
        Box::new(BufWriter::new(file)) as Box<dyn Write>
    } else {
        Box::new(BufWriter::new(std::io::stdout())) as Box<dyn Write>
    };

    let mut writer = TableWriter::new(output).with_fill_missing(args.fill_missing);
    writer.write_table(&flat)?;
    writer.flush()?;

    Ok(())
}
