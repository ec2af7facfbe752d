//! frame-inspect: Report which columns of a JSON input hold nested data
//!
//! Usage:
//!   # Classify the top-level fields of a single record
//!   frame-inspect --rows-to-check 1 record.json
//!
//!   # Classify the columns of an NDJSON batch with compact output
//!   frame-inspect --ndjson --rows-to-check 50 events.jsonl --compact
//!
//! Set RUST_LOG=info to see a classification summary on stderr.

use anyhow::Result;
use clap::Parser;
use frame_extras::input::read_input;
use frame_extras::NestingDetector;
use std::fs::File;
use std::io::{stdin, BufReader, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "frame-inspect")]
#[command(about = "Classify JSON columns as nested or scalar", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Process newline-delimited JSON (one JSON object per line)
    #[arg(long)]
    ndjson: bool,

    /// Number of leading rows sampled per column
    #[arg(long, short = 'n')]
    rows_to_check: usize,

    /// Separator for dotted column paths (default: ".")
    #[arg(long, default_value = ".")]
    sep: String,

    /// Compact output (no pretty-printing)
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Create reader based on input source
    let reader: Box<dyn Read> = if let Some(file_path) = &args.input {
        Box::new(BufReader::new(File::open(file_path)?))
    } else {
        Box::new(BufReader::new(stdin()))
    };

    let input = read_input(reader, args.ndjson)?;
    let info = NestingDetector::new(args.rows_to_check).column_info(&input, &args.sep);
    tracing::info!(
        columns = info.len(),
        nested = info.iter().filter(|c| c.nested).count(),
        sample_size = args.rows_to_check,
        "Classified columns"
    );

    if info.is_empty() {
        eprintln!("Warning: No columns found in input");
    }

    let output = if args.compact {
        serde_json::to_string(&info)?
    } else {
        serde_json::to_string_pretty(&info)?
    };

    println!("{}", output);

    Ok(())
}
