//! Output selection for the CLI: which sink, and text or JSON.

use anyhow::Context;
use dbprintlib::output::{ConsoleSink, FileSink, LogSink, OutputSink, TableModel};
use dbprintlib::DbPrintError;

/// Where rendered tables go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Console,
    File,
    Log,
}

impl SinkKind {
    /// Parse a `--sink` value.
    pub fn from_arg(value: &str) -> Self {
        match value {
            "file" => SinkKind::File,
            "log" => SinkKind::Log,
            _ => SinkKind::Console,
        }
    }
}

/// How tables are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Bordered text table
    Text,
    /// Collected columns as pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Parse an `--output` value.
    pub fn from_arg(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

/// Build the sink selected on the command line.
pub fn build_sink(kind: SinkKind, path: Option<&str>) -> anyhow::Result<Box<dyn OutputSink>> {
    match kind {
        SinkKind::Console => Ok(Box::new(ConsoleSink::new())),
        SinkKind::Log => Ok(Box::new(LogSink::new())),
        SinkKind::File => {
            let path = path.ok_or_else(|| {
                DbPrintError::InvalidConfiguration(
                    "--sink file requires --output-file".to_string(),
                )
            })?;
            let sink = FileSink::create(path)
                .with_context(|| format!("cannot open output file '{path}'"))?;
            Ok(Box::new(sink))
        }
    }
}

/// Write collected tables as one JSON array.
pub fn write_json(models: &[TableModel], sink: &mut dyn OutputSink) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(models)?;
    sink.write_line(&json).map_err(DbPrintError::SinkWrite)?;
    Ok(())
}
