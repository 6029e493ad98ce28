//! Data sources: where rows come from.
//!
//! This module handles the first stage of the pipeline - getting a result
//! set to print. It provides:
//!
//! - **Cursor**: The forward-only `RowCursor` trait, column metadata and raw values
//! - **SQLite**: A `rusqlite`-backed source that runs queries into cursors
//! - **Pre-check**: Driver and connection checks run before any query
//!
//! ## Example
//!
//! ```rust
//! use dbprintlib::source::{ResourceChain, RowCursor, SqliteSource};
//!
//! let source = SqliteSource::open(":memory:").unwrap();
//! source
//!     .connection()
//!     .execute_batch("CREATE TABLE dog (id INTEGER, name VARCHAR(20));")
//!     .unwrap();
//!
//! let cursor = source.select_table("dog", 10).unwrap();
//! assert_eq!(cursor.columns().len(), 2);
//!
//! assert!(!ResourceChain::new("mysql", ":memory:").has_resource());
//! ```

pub mod cursor;
pub mod precheck;
pub mod sqlite;

pub use cursor::{ColumnMeta, RawValue, Row, RowCursor, VecCursor};
pub use precheck::{is_known_driver, ResourceChain, ResourceCheck};
pub use sqlite::{SqliteCursor, SqliteSource};
