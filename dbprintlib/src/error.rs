//! Error types for dbprintlib

use thiserror::Error;

/// Errors that can occur while checking resources, reading rows or
/// rendering a table
#[derive(Error, Debug)]
pub enum DbPrintError {
    /// A pre-check step (driver or connection) failed
    #[error("resource unavailable ({check}): {reason}")]
    ResourceUnavailable { check: String, reason: String },

    /// The cursor handed to the renderer cannot be read
    #[error("invalid cursor: {0}")]
    InvalidCursor(String),

    /// Configuration that cannot be recovered by falling back to a default
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Missing or empty table name
    #[error("invalid table name: {0:?}")]
    InvalidTableName(String),

    /// Structural failure while streaming rows
    #[error("failed to read rows: {0}")]
    SourceRead(String),

    /// A value could not be converted for its column's category
    #[error("cannot format value '{value}' in column '{column}' as {expected}")]
    ValueConversion {
        column: String,
        value: String,
        expected: &'static str,
    },

    /// SQLite error
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Writing to the output sink failed
    #[error("failed to write output: {0}")]
    SinkWrite(#[source] std::io::Error),
}
