//! Output: lay out collected columns and write them to a sink.
//!
//! This module handles the final stage of the pipeline. It provides:
//!
//! - **TableRenderer**: Collects a cursor into columns and prints the bordered table
//! - **TableModel**: The collected columns, also serializable as JSON
//! - **Sinks**: Console, append-to-file, log and in-memory destinations
//!
//! ## Example
//!
//! ```rust
//! use dbprintlib::output::TableRenderer;
//! use dbprintlib::source::{ColumnMeta, Row, VecCursor};
//! use dbprintlib::RenderOptions;
//!
//! let mut cursor = VecCursor::new(
//!     vec![ColumnMeta::new("ID", 4, "INTEGER", "dog")],
//!     vec![Row::new(vec![1i64.into()])],
//! );
//! let text = TableRenderer::new(RenderOptions::new())
//!     .render_to_string(&mut cursor)
//!     .unwrap();
//! assert!(text.starts_with("Printing 1 row from table dog\n+----+\n| ID |\n"));
//! ```

pub mod sink;
pub mod table;

pub use sink::{BufferSink, ConsoleSink, FileSink, LogSink, OutputSink};
pub use table::{RenderSummary, TableLayout, TableModel, TableRenderer};
