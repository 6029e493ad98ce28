//! Bordered text table rendering.
//!
//! Rendering happens in two phases. [`TableRenderer::collect`] drains the
//! cursor (up to the row limit) into one [`ColumnModel`] per column and
//! settles the final widths. Only then does [`TableModel::write_to`] build
//! the layout and write anything, so a read failure never leaves a header
//! behind on the sink.
//!
//! The output looks like this:
//!
//! ```text
//! Printing 2 rows from table dog
//! +----+--------+
//! | ID |  NAME  |
//! +----+--------+
//! |  1 | Ann    |
//! +----+--------+
//! |  2 | Robert |
//! +----+--------+
//!
//! ```

use serde::Serialize;
use tracing::debug;

use crate::data::column::ColumnModel;
use crate::error::DbPrintError;
use crate::options::{RenderLimits, RenderOptions};
use crate::output::sink::{BufferSink, OutputSink};
use crate::source::RowCursor;
use crate::Result;

/// Separator and header lines, derived once all widths are final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    /// `+----+------+` rule printed around the header and after every row
    pub separator: String,
    /// `| ID | NAME |` line with centered labels
    pub header: String,
}

/// What a completed render printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderSummary {
    /// Data rows printed
    pub rows: usize,
    /// Columns printed
    pub columns: usize,
    /// Distinct source tables, in first-seen order
    pub tables: Vec<String>,
}

/// A fully collected result: every column with its formatted values.
#[derive(Debug, Clone, Serialize)]
pub struct TableModel {
    /// Columns in source order
    pub columns: Vec<ColumnModel>,
    /// Distinct source tables, in first-seen order
    pub tables: Vec<String>,
    /// Number of rows collected
    pub row_count: usize,
}

impl TableModel {
    /// Empty columns for the given cursor metadata.
    fn from_cursor<C: RowCursor + ?Sized>(cursor: &C) -> Self {
        let mut columns = Vec::with_capacity(cursor.columns().len());
        let mut tables: Vec<String> = Vec::new();
        for meta in cursor.columns() {
            columns.push(ColumnModel::new(meta));
            if !tables.contains(&meta.table) {
                tables.push(meta.table.clone());
            }
        }

        TableModel {
            columns,
            tables,
            row_count: 0,
        }
    }

    /// Widen columns so every label centers with equal padding.
    fn settle_widths(&mut self) {
        for column in &mut self.columns {
            column.pad_for_label();
        }
    }

    /// `Printing N rows from table(s) a, b`
    pub fn caption(&self) -> String {
        let rows = if self.row_count == 1 { "row" } else { "rows" };
        let tables = if self.tables.len() > 1 {
            "tables"
        } else {
            "table"
        };
        format!(
            "Printing {} {} from {} {}",
            self.row_count,
            rows,
            tables,
            self.tables.join(", ")
        )
    }

    /// Build the separator and header lines from the current widths.
    pub fn layout(&self) -> TableLayout {
        let mut separator = String::from("+");
        let mut header = String::new();
        for column in &self.columns {
            separator.push_str(&"-".repeat(column.width() + 2));
            separator.push('+');
            header.push_str(&format!("| {} ", column.centered_label()));
        }
        header.push('|');

        TableLayout { separator, header }
    }

    /// One data row with every cell justified and padded.
    pub fn row_line(&self, row: usize) -> String {
        let mut line = String::new();
        for column in &self.columns {
            line.push_str(&format!("| {} ", column.cell(row)));
        }
        line.push('|');
        line
    }

    /// Write caption, header block, rows and the trailing blank line.
    pub fn write_to<S: OutputSink + ?Sized>(&self, sink: &mut S) -> Result<RenderSummary> {
        let layout = self.layout();

        emit(sink, &self.caption())?;
        emit(sink, &layout.separator)?;
        emit(sink, &layout.header)?;
        emit(sink, &layout.separator)?;
        for row in 0..self.row_count {
            emit(sink, &self.row_line(row))?;
            emit(sink, &layout.separator)?;
        }
        emit(sink, "")?;

        Ok(RenderSummary {
            rows: self.row_count,
            columns: self.columns.len(),
            tables: self.tables.clone(),
        })
    }
}

fn emit<S: OutputSink + ?Sized>(sink: &mut S, line: &str) -> Result<()> {
    sink.write_line(line).map_err(DbPrintError::SinkWrite)
}

/// Renders result sets as bordered text tables.
///
/// The renderer only holds its limits; all per-table state lives in the
/// [`TableModel`] built by each call.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRenderer {
    limits: RenderLimits,
}

impl TableRenderer {
    /// Create a renderer, resolving the options into effective limits.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            limits: options.limits(),
        }
    }

    /// Create a renderer with already resolved limits.
    pub fn with_limits(limits: RenderLimits) -> Self {
        Self { limits }
    }

    /// Effective limits in use.
    pub fn limits(&self) -> RenderLimits {
        self.limits
    }

    /// Drain the cursor into a [`TableModel`] with final column widths.
    pub fn collect<C: RowCursor + ?Sized>(&self, cursor: &mut C) -> Result<TableModel> {
        if cursor.is_closed() {
            return Err(DbPrintError::InvalidCursor(
                "result set is closed".to_string(),
            ));
        }

        let mut model = TableModel::from_cursor(cursor);
        let column_count = model.columns.len();

        while model.row_count < self.limits.max_rows {
            let Some(row) = cursor.next_row()? else {
                break;
            };
            if row.len() != column_count {
                return Err(DbPrintError::SourceRead(format!(
                    "row {} has {} values, expected {}",
                    model.row_count + 1,
                    row.len(),
                    column_count
                )));
            }
            for (index, column) in model.columns.iter_mut().enumerate() {
                if let Some(raw) = row.get(index) {
                    column.push_raw(raw, self.limits.max_text_width)?;
                }
            }
            model.row_count += 1;
        }

        debug!(
            rows = model.row_count,
            columns = column_count,
            "Result set collected"
        );

        model.settle_widths();
        Ok(model)
    }

    /// Collect the cursor and write the table to `sink`.
    pub fn render<C, S>(&self, cursor: &mut C, sink: &mut S) -> Result<RenderSummary>
    where
        C: RowCursor + ?Sized,
        S: OutputSink + ?Sized,
    {
        let model = self.collect(cursor)?;
        model.write_to(sink)
    }

    /// Render into a string.
    pub fn render_to_string<C: RowCursor + ?Sized>(&self, cursor: &mut C) -> Result<String> {
        let mut sink = BufferSink::new();
        self.render(cursor, &mut sink)?;
        Ok(sink.into_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::category::sql_type;
    use crate::source::{ColumnMeta, RawValue, Row, VecCursor};
    use std::io;

    fn dog_columns() -> Vec<ColumnMeta> {
        vec![
            ColumnMeta::new("ID", sql_type::INTEGER, "INTEGER", "dog"),
            ColumnMeta::new("NAME", sql_type::VARCHAR, "VARCHAR", "dog"),
        ]
    }

    fn dog_cursor() -> VecCursor {
        VecCursor::new(
            dog_columns(),
            vec![
                Row::new(vec![1i64.into(), "Ann".into()]),
                Row::new(vec![2i64.into(), "Robert".into()]),
            ],
        )
    }

    fn renderer() -> TableRenderer {
        TableRenderer::new(RenderOptions::new().max_text_width(10))
    }

    /// Sink that fails on every write.
    struct BrokenSink;

    impl OutputSink for BrokenSink {
        fn write(&mut self, _text: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn write_line(&mut self, _text: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    /// Cursor that fails after yielding its rows.
    struct FailingCursor {
        inner: VecCursor,
    }

    impl RowCursor for FailingCursor {
        fn columns(&self) -> &[ColumnMeta] {
            self.inner.columns()
        }

        fn next_row(&mut self) -> Result<Option<Row>> {
            match self.inner.next_row()? {
                Some(row) => Ok(Some(row)),
                None => Err(DbPrintError::SourceRead("connection reset".to_string())),
            }
        }
    }

    #[test]
    fn test_two_column_table() {
        let output = renderer().render_to_string(&mut dog_cursor()).unwrap();

        let expected = "\
Printing 2 rows from table dog
+----+--------+
| ID |  NAME  |
+----+--------+
|  1 | Ann    |
+----+--------+
|  2 | Robert |
+----+--------+

";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_widths_after_collect() {
        let model = renderer().collect(&mut dog_cursor()).unwrap();

        assert_eq!(model.columns[0].width(), 2);
        assert_eq!(model.columns[1].width(), 6);
        for column in &model.columns {
            assert_eq!((column.width() - column.label.len()) % 2, 0);
            assert!(column.values().iter().all(|v| v.len() <= column.width()));
        }
    }

    #[test]
    fn test_odd_spare_room_is_evened() {
        let columns = vec![ColumnMeta::new("ID", sql_type::INTEGER, "INTEGER", "t")];
        let mut cursor = VecCursor::new(columns, vec![Row::new(vec![123i64.into()])]);

        let model = renderer().collect(&mut cursor).unwrap();
        assert_eq!(model.columns[0].width(), 4);
        assert_eq!(model.layout().header, "|  ID  |");
        assert_eq!(model.row_line(0), "|  123 |");
    }

    #[test]
    fn test_empty_result_set() {
        let mut cursor = VecCursor::new(dog_columns(), vec![]);
        let output = renderer().render_to_string(&mut cursor).unwrap();

        let expected = "\
Printing 0 rows from table dog
+----+------+
| ID | NAME |
+----+------+

";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_single_row_caption() {
        let mut cursor = VecCursor::new(
            dog_columns(),
            vec![Row::new(vec![1i64.into(), "Ann".into()])],
        );
        let model = renderer().collect(&mut cursor).unwrap();
        assert_eq!(model.caption(), "Printing 1 row from table dog");
    }

    #[test]
    fn test_multiple_tables_caption() {
        let columns = vec![
            ColumnMeta::new("ID", sql_type::INTEGER, "INTEGER", "dog"),
            ColumnMeta::new("BREED", sql_type::VARCHAR, "VARCHAR", "breedLookup"),
            ColumnMeta::new("OWNER", sql_type::VARCHAR, "VARCHAR", "dog"),
        ];
        let mut cursor = VecCursor::new(columns, vec![]);
        let model = renderer().collect(&mut cursor).unwrap();

        assert_eq!(
            model.caption(),
            "Printing 0 rows from tables dog, breedLookup"
        );
    }

    #[test]
    fn test_separator_matches_header_length() {
        let columns = vec![
            ColumnMeta::new("A", sql_type::DOUBLE, "DOUBLE", "t"),
            ColumnMeta::new("LONG_LABEL", sql_type::VARCHAR, "VARCHAR", "t"),
            ColumnMeta::new("DATA", sql_type::BLOB, "BLOB", "t"),
        ];
        let mut cursor = VecCursor::new(
            columns,
            vec![Row::new(vec![3.1f64.into(), "x".into(), RawValue::Null])],
        );
        let model = renderer().collect(&mut cursor).unwrap();
        let layout = model.layout();

        assert_eq!(layout.separator.len(), layout.header.len());
        assert_eq!(layout.separator.len(), model.row_line(0).len());
        assert_eq!(model.columns[0].values(), ["3.100"]);
        assert_eq!(model.columns[2].values(), ["(BLOB)"]);
    }

    #[test]
    fn test_text_is_truncated_to_limit() {
        let mut cursor = VecCursor::new(
            dog_columns(),
            vec![Row::new(vec![1i64.into(), "Bartholomew".into()])],
        );
        let model = renderer().collect(&mut cursor).unwrap();
        assert_eq!(model.columns[1].values(), ["Barthol..."]);
    }

    #[test]
    fn test_null_values() {
        let mut cursor = VecCursor::new(
            dog_columns(),
            vec![Row::new(vec![RawValue::Null, RawValue::Null])],
        );
        let model = renderer().collect(&mut cursor).unwrap();
        assert_eq!(model.row_line(0), "| NULL | NULL |");
    }

    #[test]
    fn test_row_limit_caps_output() {
        let rows = (0..15)
            .map(|i| Row::new(vec![RawValue::Integer(i), "dog".into()]))
            .collect();
        let mut cursor = VecCursor::new(dog_columns(), rows);

        let renderer = TableRenderer::new(RenderOptions::new().max_rows(0));
        let model = renderer.collect(&mut cursor).unwrap();

        assert_eq!(model.row_count, 10);
        assert_eq!(model.columns[0].values().len(), 10);
        assert!(model.caption().starts_with("Printing 10 rows"));
    }

    #[test]
    fn test_rendering_twice_is_identical() {
        let renderer = renderer();
        let first = renderer.render_to_string(&mut dog_cursor()).unwrap();
        let second = renderer.render_to_string(&mut dog_cursor()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_closed_cursor_is_rejected_without_output() {
        let mut cursor = dog_cursor();
        cursor.close();
        let mut sink = BufferSink::new();

        let err = renderer().render(&mut cursor, &mut sink).unwrap_err();
        assert!(matches!(err, DbPrintError::InvalidCursor(_)));
        assert!(sink.as_str().is_empty());
    }

    #[test]
    fn test_read_failure_writes_nothing() {
        let mut cursor = FailingCursor {
            inner: dog_cursor(),
        };
        let mut sink = BufferSink::new();

        let err = renderer().render(&mut cursor, &mut sink).unwrap_err();
        assert!(matches!(err, DbPrintError::SourceRead(_)));
        assert!(sink.as_str().is_empty());
    }

    #[test]
    fn test_ragged_row_is_a_read_failure() {
        let mut cursor = VecCursor::new(dog_columns(), vec![Row::new(vec![1i64.into()])]);
        let err = renderer().collect(&mut cursor).unwrap_err();
        assert!(matches!(err, DbPrintError::SourceRead(_)));
    }

    #[test]
    fn test_sink_failure_is_reported() {
        let err = renderer()
            .render(&mut dog_cursor(), &mut BrokenSink)
            .unwrap_err();
        assert!(matches!(err, DbPrintError::SinkWrite(_)));
    }

    #[test]
    fn test_summary() {
        let mut sink = BufferSink::new();
        let summary = renderer().render(&mut dog_cursor(), &mut sink).unwrap();

        assert_eq!(summary.rows, 2);
        assert_eq!(summary.columns, 2);
        assert_eq!(summary.tables, vec!["dog".to_string()]);
    }
}
