//! Column data: classify, format and accumulate values.
//!
//! This module handles the second stage of the pipeline - turning raw
//! values into display strings. It provides:
//!
//! - **Categories**: Map generic SQL type codes to print categories
//! - **Formatting**: Per-category value formatting (NULL, decimals, truncation)
//! - **Columns**: Per-column value lists and width tracking
//!
//! ## Example
//!
//! ```rust
//! use dbprintlib::data::{format_value, TypeCategory};
//! use dbprintlib::data::category::sql_type;
//! use dbprintlib::source::RawValue;
//!
//! let category = TypeCategory::classify(sql_type::DOUBLE);
//! let text = format_value(&RawValue::Real(3.1), category, "DOUBLE", 150).unwrap();
//! assert_eq!(text, "3.100");
//! ```

pub mod category;
pub mod column;
pub mod format;

pub use category::{classify, Justification, TypeCategory};
pub use column::ColumnModel;
pub use format::{format_decimal, format_value, truncate_text};
