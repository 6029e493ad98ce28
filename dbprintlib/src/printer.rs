//! High-level printing API.
//!
//! These are the main entry points: print an existing result set, print the
//! first rows of a table through an open source, or open a connection just
//! for one table.

use tracing::info;

use crate::options::RenderOptions;
use crate::output::{OutputSink, RenderSummary, TableRenderer};
use crate::source::{RowCursor, SqliteSource};
use crate::Result;

/// Print a result set to `sink`.
pub fn print_result_set<C, S>(
    cursor: &mut C,
    options: RenderOptions,
    sink: &mut S,
) -> Result<RenderSummary>
where
    C: RowCursor + ?Sized,
    S: OutputSink + ?Sized,
{
    TableRenderer::new(options).render(cursor, sink)
}

/// Print up to `options.max_rows` rows of `table`.
///
/// # Example
///
/// ```rust
/// use dbprintlib::{print_table, BufferSink, RenderOptions, SqliteSource};
///
/// let source = SqliteSource::open(":memory:").unwrap();
/// source
///     .connection()
///     .execute_batch(
///         "CREATE TABLE dog (ID INTEGER, NAME VARCHAR(10));
///          INSERT INTO dog VALUES (1, 'Ann'), (2, 'Robert');",
///     )
///     .unwrap();
///
/// let mut sink = BufferSink::new();
/// print_table(&source, "dog", RenderOptions::new(), &mut sink).unwrap();
/// assert!(sink.as_str().starts_with("Printing 2 rows from table dog\n"));
/// ```
pub fn print_table<S: OutputSink + ?Sized>(
    source: &SqliteSource,
    table: &str,
    options: RenderOptions,
    sink: &mut S,
) -> Result<RenderSummary> {
    let renderer = TableRenderer::new(options);
    let mut cursor = source.select_table(table, renderer.limits().max_rows)?;
    renderer.render(&mut cursor, sink)
}

/// Open `connection`, print `table` and close the connection again.
pub fn query_table<S: OutputSink + ?Sized>(
    connection: &str,
    table: &str,
    options: RenderOptions,
    sink: &mut S,
) -> Result<RenderSummary> {
    let source = SqliteSource::open_existing(connection)?;
    let result = print_table(&source, table, options, sink);
    source.close();

    if let Ok(summary) = &result {
        info!(table, rows = summary.rows, "Printed table");
    }
    result
}
