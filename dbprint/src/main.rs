//! # dbprint
//!
//! Print the first rows of database tables as bordered text tables.
//!
//! ## Overview
//!
//! dbprint is built on top of dbprintlib. It checks that the requested
//! driver is available and that the database can be opened, then prints
//! each requested table (or the result of an ad-hoc query) to the console,
//! a file, or the log.
//!
//! ## Usage
//!
//! ```bash
//! # Print the first 10 rows of a table
//! dbprint animal.db dog
//!
//! # Several tables, 5 rows each, text columns cut at 40 characters
//! dbprint animal.db dog breedLookup colorLookup --max-rows 5 --max-width 40
//!
//! # Ad-hoc query
//! dbprint animal.db --query "SELECT name, weight FROM dog WHERE weight > 10"
//!
//! # Append the tables to a file instead of the console
//! dbprint animal.db dog --sink file --output-file output.log
//!
//! # Collected columns as JSON
//! dbprint animal.db dog --output json
//! ```

mod render;

use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use dbprintlib::output::OutputSink;
use dbprintlib::source::{RowCursor, SqliteSource};
use dbprintlib::{
    print_table, RenderOptions, ResourceChain, TableModel, TableRenderer, DEFAULT_MAX_ROWS,
    DEFAULT_MAX_TEXT_WIDTH,
};
use tracing::{error, info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use render::{build_sink, write_json, OutputFormat, SinkKind};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("dbprint")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Print rows of database tables as bordered text tables")
        .arg(
            Arg::new("connection")
                .help("Database to open (path, sqlite://path, file: URI or :memory:)")
                .required(true),
        )
        .arg(
            Arg::new("table")
                .help("Tables to print")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("query")
                .short('q')
                .long("query")
                .help("Print the result of an SQL query instead of whole tables"),
        )
        .arg(
            Arg::new("driver")
                .short('d')
                .long("driver")
                .default_value("sqlite")
                .help("Database driver"),
        )
        .arg(
            Arg::new("max-rows")
                .short('n')
                .long("max-rows")
                .value_parser(clap::value_parser!(i64))
                .allow_negative_numbers(true)
                .default_value("10")
                .help("Maximum rows to print per table"),
        )
        .arg(
            Arg::new("max-width")
                .short('w')
                .long("max-width")
                .value_parser(clap::value_parser!(i64))
                .allow_negative_numbers(true)
                .default_value("150")
                .help("Maximum width of text columns"),
        )
        .arg(
            Arg::new("sink")
                .short('s')
                .long("sink")
                .value_parser(["console", "file", "log"])
                .default_value("console")
                .help("Where to print tables"),
        )
        .arg(
            Arg::new("output-file")
                .short('f')
                .long("output-file")
                .help("File to append to with --sink file"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_parser(["trace", "debug", "info", "warn", "error"])
                .default_value("info")
                .help("Minimum level of log messages (written to stderr)"),
        )
}

/// Install the stderr log subscriber
fn init_logging(matches: &ArgMatches) {
    let level = matches
        .get_one::<String>("log-level")
        .and_then(|s| s.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// Extract render options from matches
fn extract_options(matches: &ArgMatches) -> RenderOptions {
    let max_rows = matches
        .get_one::<i64>("max-rows")
        .copied()
        .unwrap_or(DEFAULT_MAX_ROWS);
    let max_width = matches
        .get_one::<i64>("max-width")
        .copied()
        .unwrap_or(DEFAULT_MAX_TEXT_WIDTH);

    RenderOptions::new()
        .max_rows(max_rows)
        .max_text_width(max_width)
}

/// Extract tables list from matches
fn extract_tables(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>("table")
        .map(|v| v.cloned().collect())
        .unwrap_or_default()
}

/// Print one table; errors are logged and reported back as `false`.
fn print_one(
    source: &SqliteSource,
    table: &str,
    options: RenderOptions,
    format: OutputFormat,
    sink: &mut dyn OutputSink,
    models: &mut Vec<TableModel>,
) -> bool {
    let result = match format {
        OutputFormat::Text => print_table(source, table, options, sink).map(|_| ()),
        OutputFormat::Json => {
            let renderer = TableRenderer::new(options);
            source
                .select_table(table, renderer.limits().max_rows)
                .and_then(|mut cursor| renderer.collect(&mut cursor))
                .map(|model| models.push(model))
        }
    };

    match result {
        Ok(()) => {
            info!(table, "Printed table");
            true
        }
        Err(e) => {
            error!(table, error = %e, "Failed to print table");
            false
        }
    }
}

/// Print the result of an ad-hoc query.
fn print_query(
    source: &SqliteSource,
    sql: &str,
    options: RenderOptions,
    format: OutputFormat,
    sink: &mut dyn OutputSink,
    models: &mut Vec<TableModel>,
) -> anyhow::Result<()> {
    let renderer = TableRenderer::new(options);
    let mut cursor = source.query(sql, renderer.limits().max_rows)?;
    match format {
        OutputFormat::Text => {
            renderer.render(&mut cursor, sink)?;
        }
        OutputFormat::Json => {
            let model = renderer.collect(&mut cursor)?;
            models.push(model);
        }
    }
    info!(columns = cursor.columns().len(), "Printed query result");
    Ok(())
}

fn run(matches: &ArgMatches) -> anyhow::Result<bool> {
    let connection = matches
        .get_one::<String>("connection")
        .map(|s| s.as_str())
        .unwrap_or(":memory:");
    let driver = matches
        .get_one::<String>("driver")
        .map(|s| s.as_str())
        .unwrap_or("sqlite");
    let tables = extract_tables(matches);
    let query = matches.get_one::<String>("query");

    if tables.is_empty() && query.is_none() {
        return Err(anyhow::anyhow!("Nothing to print: give a table name or --query"));
    }

    ResourceChain::new(driver, connection).verify()?;

    let options = extract_options(matches);
    let format = matches
        .get_one::<String>("output")
        .map(|s| OutputFormat::from_arg(s))
        .unwrap_or(OutputFormat::Text);
    let kind = matches
        .get_one::<String>("sink")
        .map(|s| SinkKind::from_arg(s))
        .unwrap_or(SinkKind::Console);
    let mut sink = build_sink(
        kind,
        matches.get_one::<String>("output-file").map(|s| s.as_str()),
    )?;

    let source = SqliteSource::open_existing(connection)?;
    let mut models = Vec::new();
    let mut all_printed = true;

    if let Some(sql) = query {
        if let Err(e) = print_query(&source, sql, options, format, sink.as_mut(), &mut models) {
            error!(error = %e, "Failed to print query result");
            all_printed = false;
        }
    }
    for table in &tables {
        all_printed &= print_one(&source, table, options, format, sink.as_mut(), &mut models);
    }
    source.close();

    if format == OutputFormat::Json {
        write_json(&models, sink.as_mut())?;
    }

    Ok(all_printed)
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(&matches);

    match run(&matches) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
