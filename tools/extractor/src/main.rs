//! CLI tool for extracting `files` records from a SQL dump.
//!
//! # Usage
//!
//! ```bash
//! # Dump rows to CSV
//! sqldump_extract --input files.sql --output files.csv
//!
//! # Read from stdin, write JSON Lines to stdout, skip INSERT/LOCK lines
//! cat dump.sql | sqldump_extract --skip-statements --output-format json
//!
//! # Inspect raw split fields
//! RUST_LOG=debug sqldump_extract -i files.sql --fields
//! ```

use std::fs::File;
use std::io::{Read, Write, stdin, stdout};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use sqldump::prelude::*;
use tracing::{debug, info};

/// Extract typed `files` records from the rows of a SQL `INSERT ... VALUES` dump.
///
/// Reads one row tuple per line from input (file or stdin) and writes
/// records to output (file or stdout). Blank lines and `--` / `#`
/// comments are skipped; any malformed row aborts the extraction.
#[derive(Parser, Debug)]
#[command(name = "sqldump_extract")]
#[command(version, about)]
struct Args {
    /// Input dump file. If not specified, reads from stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file path. If not specified, writes to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format. Defaults to the output file extension, then CSV.
    #[arg(long, value_enum)]
    output_format: Option<FormatArg>,

    /// Lines not longer than this (after trimming) are skipped.
    #[arg(long, default_value_t = 10)]
    min_line_len: usize,

    /// Skip SQL statement lines (INSERT INTO, LOCK TABLES, /*! ... */).
    #[arg(long)]
    skip_statements: bool,

    /// Emit raw split fields as JSON arrays instead of records.
    #[arg(long)]
    fields: bool,
}

/// Supported output formats for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// CSV with header row.
    Csv,
    /// JSON Lines, one record per line.
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::JsonLines,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        match e.downcast_ref::<ExtractError>() {
            // Отчёт уже начинается с заголовка ошибки
            Some(extract_err) => eprint!("{}", extract_err.report()),
            None => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let format = resolve_format(args.output_format, args.output.as_deref());
    let options = ExtractOptions::default()
        .min_line_len(args.min_line_len)
        .skip_statements(args.skip_statements);
    debug!(?format, ?options, raw_fields = args.fields, "starting extraction");

    // Open input source
    let input: Box<dyn Read> = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(stdin().lock()),
    };

    // Open output destination
    let output: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(stdout().lock()),
    };

    let count = extract(input, output, options, format, args.fields)?;
    info!(count, "extraction finished");

    // Report result to stderr (so it doesn't interfere with stdout output)
    eprintln!("Extracted {count} record(s)");

    Ok(())
}

/// Picks the output format: explicit flag, then output file extension, then CSV.
fn resolve_format(arg: Option<FormatArg>, output: Option<&Path>) -> OutputFormat {
    arg.map(OutputFormat::from)
        .or_else(|| {
            output
                .and_then(Path::extension)
                .and_then(|ext| ext.to_str())
                .and_then(OutputFormat::from_extension)
        })
        .unwrap_or(OutputFormat::Csv)
}

/// Extracts rows from input to output with runtime format selection.
///
/// Raw field arrays have no fixed width, so they are always written as JSON Lines.
fn extract<R: Read, W: Write>(
    input: R,
    output: W,
    options: ExtractOptions,
    format: OutputFormat,
    raw_fields: bool,
) -> Result<usize> {
    match (format, raw_fields) {
        (_, true) => extract_typed::<_, _, Vec<String>, JsonLines>(input, output, options, &[]),
        (OutputFormat::Csv, false) => {
            extract_typed::<_, _, FileRecord, Csv>(input, output, options, &FileRecord::COLUMNS)
        }
        (OutputFormat::JsonLines, false) => {
            extract_typed::<_, _, FileRecord, JsonLines>(input, output, options, &FileRecord::COLUMNS)
        }
    }
}

/// Streaming extraction using RowExtractor and RecordWriter.
///
/// Records are written as they are extracted; the first failing line
/// aborts the run.
fn extract_typed<R, W, T, F>(
    input: R,
    output: W,
    options: ExtractOptions,
    columns: &[&str],
) -> Result<usize>
where
    R: Read,
    W: Write,
    T: FromFields + Serialize,
    F: RecordFormat,
{
    let extractor = RowExtractor::<_, T>::with_options(input, options);
    let mut writer = RecordWriter::<_, F>::new(output);

    writer.write_header(columns).context("Failed to write output header")?;

    for result in extractor {
        let record = result?;
        writer.write(&record).context("Failed to write record")?;
    }

    writer.flush().context("Failed to flush output")?;

    Ok(writer.records_written())
}
