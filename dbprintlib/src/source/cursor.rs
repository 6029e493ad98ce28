//! Row cursor abstraction and the raw values it yields.
//!
//! A cursor is forward-only and consumed once. It exposes per-column
//! metadata up front and then hands out one row of raw values at a time.

use std::collections::VecDeque;
use std::fmt;

use crate::error::DbPrintError;
use crate::Result;

/// A single value as read from the data source, before any formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// SQL NULL
    Null,
    /// Integer storage
    Integer(i64),
    /// Floating point storage
    Real(f64),
    /// Text storage
    Text(String),
    /// Boolean storage
    Boolean(bool),
    /// Binary storage
    Blob(Vec<u8>),
}

impl RawValue {
    /// True for SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Read the value as a floating point number, if it has one.
    ///
    /// Text is parsed after trimming; booleans map to 0/1.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Integer(i) => Some(*i as f64),
            RawValue::Real(r) => Some(*r),
            RawValue::Text(s) => s.trim().parse().ok(),
            RawValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            RawValue::Null | RawValue::Blob(_) => None,
        }
    }
}

/// Canonical text of a value. NULL displays as `NULL`.
impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Null => f.write_str("NULL"),
            RawValue::Integer(i) => write!(f, "{i}"),
            RawValue::Real(r) => write!(f, "{r}"),
            RawValue::Text(s) => f.write_str(s),
            RawValue::Boolean(b) => write!(f, "{b}"),
            RawValue::Blob(bytes) => {
                f.write_str("0x")?;
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Real(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Boolean(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Null, Into::into)
    }
}

/// Metadata describing one result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    /// Display label
    pub label: String,
    /// Generic SQL type code (see [`crate::data::category::sql_type`])
    pub type_code: i32,
    /// Source type name, e.g. `VARCHAR(20)`
    pub type_name: String,
    /// Name of the table the column belongs to
    pub table: String,
}

impl ColumnMeta {
    /// Create column metadata.
    pub fn new(
        label: impl Into<String>,
        type_code: i32,
        type_name: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            type_code,
            type_name: type_name.into(),
            table: table.into(),
        }
    }
}

/// One row of raw values, in column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: Vec<RawValue>,
}

impl Row {
    /// Wrap a list of values.
    pub fn new(values: Vec<RawValue>) -> Self {
        Self { values }
    }

    /// Value at `index`, or `None` past the end of the row.
    pub fn get(&self, index: usize) -> Option<&RawValue> {
        self.values.get(index)
    }

    /// Number of values in the row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the row holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<RawValue>> for Row {
    fn from(values: Vec<RawValue>) -> Self {
        Row::new(values)
    }
}

/// Forward-only cursor over a query result.
pub trait RowCursor {
    /// Column metadata, in result order.
    fn columns(&self) -> &[ColumnMeta];

    /// Fetch the next row, or `None` once the result is exhausted.
    fn next_row(&mut self) -> Result<Option<Row>>;

    /// Whether the cursor has been closed and can no longer be read.
    fn is_closed(&self) -> bool {
        false
    }
}

/// In-memory cursor over pre-built rows.
#[derive(Debug, Clone, Default)]
pub struct VecCursor {
    columns: Vec<ColumnMeta>,
    rows: VecDeque<Row>,
    closed: bool,
}

impl VecCursor {
    /// Create a cursor over `rows` described by `columns`.
    pub fn new(columns: Vec<ColumnMeta>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows: rows.into(),
            closed: false,
        }
    }

    /// Close the cursor; further reads fail.
    pub fn close(&mut self) {
        self.closed = true;
        self.rows.clear();
    }
}

impl RowCursor for VecCursor {
    fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    fn next_row(&mut self) -> Result<Option<Row>> {
        if self.closed {
            return Err(DbPrintError::SourceRead("cursor is closed".to_string()));
        }
        Ok(self.rows.pop_front())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
