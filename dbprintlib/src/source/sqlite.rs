//! SQLite data source.
//!
//! Rows are stepped out of the statement up to the row cap and buffered
//! into a [`SqliteCursor`], so the cursor owns its data and does not borrow
//! the connection. Rows past the cap are never fetched. Table reads are
//! also bounded with `LIMIT`.

use std::collections::VecDeque;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::data::category::sql_type;
use crate::error::DbPrintError;
use crate::Result;

use super::cursor::{ColumnMeta, RawValue, Row, RowCursor};

/// Table name reported for columns of ad-hoc queries.
pub const QUERY_TABLE_NAME: &str = "(query)";

/// Connection string prefix accepted in addition to plain paths.
const SQLITE_SCHEME: &str = "sqlite://";

/// An open SQLite database.
#[derive(Debug)]
pub struct SqliteSource {
    conn: Connection,
}

impl SqliteSource {
    /// Open (or create) the database named by `connection`.
    ///
    /// Accepts a file path, `sqlite://path`, a `file:` URI or `:memory:`.
    pub fn open(connection: &str) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_URI;
        Self::open_with_flags(connection, flags)
    }

    /// Open an existing database; fails if it does not exist.
    pub fn open_existing(connection: &str) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_URI;
        Self::open_with_flags(connection, flags)
    }

    fn open_with_flags(connection: &str, flags: OpenFlags) -> Result<Self> {
        let target = database_path(connection);
        let conn = if target == ":memory:" {
            Connection::open_in_memory()?
        } else {
            Connection::open_with_flags(target, flags)?
        };
        Ok(Self { conn })
    }

    /// Wrap an already open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Run an arbitrary statement and buffer at most `max_rows` of its rows.
    pub fn query(&self, sql: &str, max_rows: usize) -> Result<SqliteCursor> {
        self.run(sql, QUERY_TABLE_NAME, max_rows)
    }

    /// `SELECT * FROM table LIMIT max_rows`.
    pub fn select_table(&self, table: &str, max_rows: usize) -> Result<SqliteCursor> {
        let table = table.trim();
        if table.is_empty() {
            return Err(DbPrintError::InvalidTableName(table.to_string()));
        }
        let sql = format!("SELECT * FROM {} LIMIT {}", quote_identifier(table), max_rows);
        self.run(&sql, table, max_rows)
    }

    fn run(&self, sql: &str, table: &str, max_rows: usize) -> Result<SqliteCursor> {
        debug!(sql, "Running query");
        let mut stmt = self.conn.prepare(sql)?;
        let declared: Vec<(String, Option<String>)> = stmt
            .columns()
            .iter()
            .map(|c| (c.name().to_string(), c.decl_type().map(str::to_string)))
            .collect();

        let mut rows = VecDeque::new();
        let mut query = stmt.query([])?;
        while rows.len() < max_rows {
            let Some(row) = query.next()? else {
                break;
            };
            let mut values = Vec::with_capacity(declared.len());
            for index in 0..declared.len() {
                values.push(raw_value(row.get_ref(index)?));
            }
            rows.push_back(Row::new(values));
        }

        let columns = declared
            .into_iter()
            .enumerate()
            .map(|(index, (label, decl_type))| {
                let (type_code, type_name) = match decl_type {
                    Some(decl) => decltype_to_code(&decl),
                    None => infer_from_values(&rows, index),
                };
                ColumnMeta::new(label, type_code, type_name, table)
            })
            .collect();

        Ok(SqliteCursor {
            columns,
            rows,
            closed: false,
        })
    }

    /// Close the connection. Close errors are logged and dropped; they cannot
    /// affect results already read.
    pub fn close(self) {
        if let Err((_, err)) = self.conn.close() {
            debug!(error = %err, "Ignoring error while closing connection");
        }
    }
}

/// Buffered result of a SQLite statement.
#[derive(Debug)]
pub struct SqliteCursor {
    columns: Vec<ColumnMeta>,
    rows: VecDeque<Row>,
    closed: bool,
}

impl SqliteCursor {
    /// Close the cursor and drop any unread rows.
    pub fn close(&mut self) {
        self.closed = true;
        self.rows.clear();
    }
}

impl RowCursor for SqliteCursor {
    fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    fn next_row(&mut self) -> Result<Option<Row>> {
        if self.closed {
            return Err(DbPrintError::SourceRead("result set is closed".to_string()));
        }
        Ok(self.rows.pop_front())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Strip the optional `sqlite://` scheme from a connection string.
pub fn database_path(connection: &str) -> &str {
    connection
        .strip_prefix(SQLITE_SCHEME)
        .unwrap_or(connection)
        .trim()
}

/// Quote a possibly schema-qualified name, one `.`-separated part at a time.
fn quote_identifier(name: &str) -> String {
    name.split('.')
        .map(|part| format!("\"{}\"", part.trim().replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(".")
}

fn raw_value(value: ValueRef<'_>) -> RawValue {
    match value {
        ValueRef::Null => RawValue::Null,
        ValueRef::Integer(i) => RawValue::Integer(i),
        ValueRef::Real(r) => RawValue::Real(r),
        ValueRef::Text(bytes) => RawValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => RawValue::Blob(bytes.to_vec()),
    }
}

/// Map a declared column type to a generic SQL type code and display name.
///
/// Known names map directly; anything else follows SQLite's column affinity
/// rules.
pub fn decltype_to_code(decl: &str) -> (i32, String) {
    let upper = decl.trim().to_ascii_uppercase();
    let base = upper
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    let code = match base.as_str() {
        "BIGINT" | "INT8" | "UNSIGNED BIG INT" => sql_type::BIGINT,
        "TINYINT" => sql_type::TINYINT,
        "SMALLINT" | "INT2" => sql_type::SMALLINT,
        "INTEGER" | "INT" | "INT4" | "MEDIUMINT" => sql_type::INTEGER,
        "REAL" => sql_type::REAL,
        "DOUBLE" | "DOUBLE PRECISION" => sql_type::DOUBLE,
        "FLOAT" => sql_type::FLOAT,
        "DECIMAL" => sql_type::DECIMAL,
        "NUMERIC" => sql_type::NUMERIC,
        "DATE" => sql_type::DATE,
        "TIME" => sql_type::TIME,
        "TIME WITH TIME ZONE" | "TIMETZ" => sql_type::TIME_WITH_TIMEZONE,
        "DATETIME" | "TIMESTAMP" => sql_type::TIMESTAMP,
        "TIMESTAMP WITH TIME ZONE" | "TIMESTAMPTZ" => sql_type::TIMESTAMP_WITH_TIMEZONE,
        "BOOLEAN" | "BOOL" => sql_type::BOOLEAN,
        "VARCHAR" | "VARYING CHARACTER" | "TEXT" => sql_type::VARCHAR,
        "NVARCHAR" => sql_type::NVARCHAR,
        "CHAR" | "CHARACTER" => sql_type::CHAR,
        "NCHAR" | "NATIVE CHARACTER" => sql_type::NCHAR,
        "CLOB" => sql_type::CLOB,
        "BLOB" => sql_type::BLOB,
        other if other.contains("INT") => sql_type::INTEGER,
        other if other.contains("CHAR") || other.contains("TEXT") => sql_type::VARCHAR,
        other if other.contains("CLOB") => sql_type::CLOB,
        other if other.contains("BLOB") || other.is_empty() => sql_type::BLOB,
        other if other.contains("REAL") || other.contains("FLOA") || other.contains("DOUB") => {
            sql_type::DOUBLE
        }
        _ => sql_type::NUMERIC,
    };

    (code, base)
}

/// Type of a column without a declared type, taken from its first non-null value.
fn infer_from_values(rows: &VecDeque<Row>, index: usize) -> (i32, String) {
    let first = rows
        .iter()
        .filter_map(|row| row.get(index))
        .find(|value| !value.is_null());

    match first {
        Some(RawValue::Integer(_)) => (sql_type::BIGINT, "INTEGER".to_string()),
        Some(RawValue::Real(_)) => (sql_type::DOUBLE, "REAL".to_string()),
        Some(RawValue::Text(_)) => (sql_type::VARCHAR, "TEXT".to_string()),
        Some(RawValue::Boolean(_)) => (sql_type::BOOLEAN, "BOOLEAN".to_string()),
        Some(RawValue::Blob(_)) => (sql_type::BLOB, "BLOB".to_string()),
        Some(RawValue::Null) | None => (sql_type::NULL, "NULL".to_string()),
    }
}
