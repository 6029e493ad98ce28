//! # dbprintlib
//!
//! Render the rows of a relational query as a bordered, column-aligned text
//! table.
//!
//! ## Overview
//!
//! The library reads a result set through a forward-only cursor, formats
//! every value according to its column's type category and prints the
//! whole thing once all widths are known:
//!
//! - **Integer**, **DateTime**, **Boolean**: printed as-is, right justified
//! - **Decimal**: three fractional digits, right justified
//! - **Text**: left justified, truncated with `...` past the width limit
//! - **Other**: replaced by the type name, e.g. `(BLOB)`
//!
//! NULL prints as `NULL` in every category except Other.
//!
//! ## Pipeline
//!
//! 1. **source**: pre-check the driver and connection, run the query, get a cursor
//! 2. **data**: classify columns, format values, track column widths
//! 3. **output**: lay out the header, separators and rows, write them to a sink
//!
//! ## Example
//!
//! ```rust
//! use dbprintlib::source::{ColumnMeta, Row, VecCursor};
//! use dbprintlib::data::category::sql_type;
//! use dbprintlib::{print_result_set, BufferSink, RenderOptions};
//!
//! let mut cursor = VecCursor::new(
//!     vec![
//!         ColumnMeta::new("ID", sql_type::INTEGER, "INTEGER", "dog"),
//!         ColumnMeta::new("NAME", sql_type::VARCHAR, "VARCHAR", "dog"),
//!     ],
//!     vec![
//!         Row::new(vec![1i64.into(), "Ann".into()]),
//!         Row::new(vec![2i64.into(), "Robert".into()]),
//!     ],
//! );
//!
//! let mut sink = BufferSink::new();
//! print_result_set(&mut cursor, RenderOptions::new().max_text_width(10), &mut sink).unwrap();
//!
//! assert_eq!(
//!     sink.as_str(),
//!     "Printing 2 rows from table dog\n\
//!      +----+--------+\n\
//!      | ID |  NAME  |\n\
//!      +----+--------+\n\
//!      |  1 | Ann    |\n\
//!      +----+--------+\n\
//!      |  2 | Robert |\n\
//!      +----+--------+\n\
//!      \n"
//! );
//! ```

pub mod data;
pub mod error;
pub mod options;
pub mod output;
pub mod printer;
pub mod source;

pub use data::{ColumnModel, Justification, TypeCategory};
pub use error::DbPrintError;
pub use options::{RenderLimits, RenderOptions, DEFAULT_MAX_ROWS, DEFAULT_MAX_TEXT_WIDTH};
pub use output::{
    BufferSink, ConsoleSink, FileSink, LogSink, OutputSink, RenderSummary, TableModel,
    TableRenderer,
};
pub use printer::{print_result_set, print_table, query_table};
pub use source::{ColumnMeta, RawValue, ResourceChain, Row, RowCursor, SqliteSource, VecCursor};

/// Result type for dbprintlib operations
pub type Result<T> = std::result::Result<T, DbPrintError>;
