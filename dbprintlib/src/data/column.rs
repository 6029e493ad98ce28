//! Per-column accumulation of formatted values and display width.

use serde::Serialize;

use crate::error::DbPrintError;
use crate::source::{ColumnMeta, RawValue};
use crate::Result;

use super::category::{Justification, TypeCategory};
use super::format::format_value;

/// One result column: its label, category and every formatted value.
///
/// `width` starts at the label length and only grows as values are pushed.
/// Lengths are measured in characters.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnModel {
    /// Column label, printed centered in the header
    pub label: String,
    /// Source type name, e.g. `VARCHAR(20)`
    pub type_name: String,
    /// Table the column came from
    pub table: String,
    category: TypeCategory,
    justification: Justification,
    width: usize,
    values: Vec<String>,
}

impl ColumnModel {
    /// Build an empty column from source metadata.
    pub fn new(meta: &ColumnMeta) -> Self {
        let category = TypeCategory::classify(meta.type_code);
        Self {
            label: meta.label.clone(),
            type_name: meta.type_name.clone(),
            table: meta.table.clone(),
            category,
            justification: category.justification(),
            width: char_len(&meta.label),
            values: Vec::new(),
        }
    }

    /// Print category, fixed from the source type code.
    pub fn category(&self) -> TypeCategory {
        self.category
    }

    /// Cell alignment, fixed from the category.
    pub fn justification(&self) -> Justification {
        self.justification
    }

    /// Current display width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Formatted values in row order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Append an already formatted value and widen the column to fit it.
    pub fn push(&mut self, value: String) {
        self.width = self.width.max(char_len(&value));
        self.values.push(value);
    }

    /// Format a raw value for this column's category and append it.
    pub fn push_raw(&mut self, raw: &RawValue, max_text_width: usize) -> Result<()> {
        let value = format_value(raw, self.category, &self.type_name, max_text_width).map_err(
            |err| match err {
                DbPrintError::ValueConversion {
                    value, expected, ..
                } => DbPrintError::ValueConversion {
                    column: self.label.clone(),
                    value,
                    expected,
                },
                other => other,
            },
        )?;
        self.push(value);
        Ok(())
    }

    /// Width recomputed from the label and all stored values.
    pub fn derived_width(&self) -> usize {
        self.values
            .iter()
            .map(|v| v.chars().count())
            .fold(char_len(&self.label), usize::max)
    }

    /// Make the label centerable with equal padding on both sides.
    ///
    /// Widens the column by one when the spare room is odd and returns the
    /// padding for each side of the label.
    pub fn pad_for_label(&mut self) -> usize {
        let mut spare = self.width - char_len(&self.label);
        if spare % 2 == 1 {
            self.width += 1;
            spare += 1;
        }
        spare / 2
    }

    /// The label centered in the current width.
    pub fn centered_label(&self) -> String {
        let padding = " ".repeat((self.width - char_len(&self.label)) / 2);
        format!("{padding}{}{padding}", self.label)
    }

    /// The value at `row`, justified and padded to the column width.
    pub fn cell(&self, row: usize) -> String {
        let value = self.values.get(row).map(String::as_str).unwrap_or_default();
        let width = self.width;
        match self.justification {
            Justification::Left => format!("{value:<width$}"),
            Justification::Right => format!("{value:>width$}"),
        }
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
