//! # tabwrite
//!
//! A CLI tool for turning a JSON table into tab- or comma-delimited text.
//!
//! ## Overview
//!
//! tabwrite is built on top of tabwritelib. It reads a JSON array of rows
//! (each row an array of values) and writes one delimited line per row.
//! Numbers are written bare; strings, booleans and nulls are quoted.
//!
//! ## Usage
//!
//! ```bash
//! # Tab-delimited output (default)
//! tabwrite rows.json
//!
//! # Comma-delimited output from stdin
//! cat rows.json | tabwrite --format csv
//!
//! # Reorder columns and hide the second output column
//! tabwrite rows.json --columns 2,0,1 --hide 1
//!
//! # Add a header line and write CRLF line endings to a file
//! tabwrite rows.json --header id,name,score --line-ending crlf -o out.csv
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::Style;
use log::{debug, info, warn};
use serde_json::Value;
use tabwritelib::{Cell, ColumnLayout, Delimiter, LineEnding, Row, TableWriter, WriteOptions};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("tabwrite")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Write a JSON table as tab- or comma-delimited text")
        .arg(
            Arg::new("input")
                .help("JSON file holding an array of rows (defaults to stdin)")
                .default_value("-"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_parser(["tsv", "csv"])
                .default_value("tsv")
                .help("Output format"),
        )
        .arg(
            Arg::new("delimiter")
                .short('d')
                .long("delimiter")
                .conflicts_with("format")
                .help("Field delimiter: tab, comma or any single character"),
        )
        .arg(
            Arg::new("columns")
                .short('c')
                .long("columns")
                .value_delimiter(',')
                .value_parser(clap::value_parser!(usize))
                .help("Source cell index for each output column (comma-separated)"),
        )
        .arg(
            Arg::new("hide")
                .long("hide")
                .value_delimiter(',')
                .value_parser(clap::value_parser!(usize))
                .help("Output column positions to leave out (comma-separated)"),
        )
        .arg(
            Arg::new("header")
                .long("header")
                .value_delimiter(',')
                .help("Header names, one per output column, written as the first line (comma-separated)"),
        )
        .arg(
            Arg::new("line-ending")
                .long("line-ending")
                .value_parser(["native", "lf", "crlf"])
                .default_value("native")
                .help("Line terminator"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Write to a file instead of stdout"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log progress to stderr (repeat for more detail)"),
        )
}

/// Set up logging: RUST_LOG wins, otherwise -v raises the level
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Convert a JSON value into a cell.
///
/// Integers that do not fit an i64 fall back to floats. Booleans, arrays and
/// objects become text holding their JSON form.
fn cell_from_json(value: Value) -> Cell {
    match value {
        Value::Null => Cell::Null,
        Value::Number(n) => match n.as_i64() {
            Some(i) => Cell::Int(i),
            None => n
                .as_f64()
                .map(Cell::Float)
                .unwrap_or_else(|| Cell::Text(n.to_string())),
        },
        Value::String(s) => Cell::Text(s),
        other => Cell::Text(other.to_string()),
    }
}

/// Parse the input document into rows
fn parse_table(text: &str) -> Result<Vec<Row>, anyhow::Error> {
    let value: Value = serde_json::from_str(text).context("input is not valid JSON")?;
    let rows = match value {
        Value::Array(rows) => rows,
        _ => return Err(anyhow!("input must be a JSON array of rows")),
    };

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| match row {
            Value::Array(cells) => Ok(cells.into_iter().map(cell_from_json).collect()),
            _ => Err(anyhow!("row {} is not an array", i)),
        })
        .collect()
}

/// Read the input file, or stdin for "-"
fn read_input(path: &str) -> Result<String, anyhow::Error> {
    let mut text = String::new();
    if path == "-" {
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
    } else {
        File::open(path)
            .and_then(|mut f| f.read_to_string(&mut text))
            .with_context(|| format!("failed to read '{}'", path))?;
    }
    Ok(text)
}

/// Build write options from matches
fn build_options(matches: &ArgMatches) -> Result<WriteOptions, anyhow::Error> {
    let delimiter = match matches.get_one::<String>("delimiter") {
        Some(d) => d.parse::<Delimiter>()?,
        None => match matches.get_one::<String>("format").map(|s| s.as_str()) {
            Some("csv") => Delimiter::Comma,
            _ => Delimiter::Tab,
        },
    };
    let line_ending = matches
        .get_one::<String>("line-ending")
        .map(|s| s.parse::<LineEnding>())
        .transpose()?
        .unwrap_or_default();

    let mut options = WriteOptions::new()
        .delimiter(delimiter)
        .line_ending(line_ending);
    if let Some(names) = matches.get_many::<String>("header") {
        options = options.header(names.cloned());
    }
    Ok(options)
}

/// Build the column layout: identity over the widest row unless --columns is given
fn build_layout(matches: &ArgMatches, table: &[Row]) -> ColumnLayout {
    let mut layout = match matches.get_many::<usize>("columns") {
        Some(order) => ColumnLayout::with_order(order.copied().collect()),
        None => ColumnLayout::identity(table.iter().map(Vec::len).max().unwrap_or(0)),
    };
    if let Some(hidden) = matches.get_many::<usize>("hide") {
        for &position in hidden {
            if position >= layout.len() {
                warn!(
                    "--hide {} ignored: only {} output columns",
                    position,
                    layout.len()
                );
            }
            layout = layout.hide(position);
        }
    }
    layout
}

fn run(matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let input = matches
        .get_one::<String>("input")
        .map(|s| s.as_str())
        .unwrap_or("-");
    let table = parse_table(&read_input(input)?)?;
    let options = build_options(matches)?;
    let layout = build_layout(matches, &table);
    debug!(
        "{} rows, {} output columns ({} hidden)",
        table.len(),
        layout.len(),
        layout.invisible_count()
    );

    let sink: Box<dyn Write> = match matches.get_one::<String>("output") {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("failed to create '{}'", path))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    let mut writer = TableWriter::new(BufWriter::new(sink), options);
    let rows = writer.write_table(&table, &layout)?;
    writer.finish()?;
    info!("wrote {} rows", rows);
    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let label = Style::new().red().bold().for_stderr();
            eprintln!("{} {:#}", label.apply_to("Error:"), e);
            ExitCode::FAILURE
        }
    }
}
