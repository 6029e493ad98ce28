//! Render configuration.
//!
//! Limits are accepted as signed integers so callers can pass whatever they
//! were given; [`RenderOptions::limits`] resolves them to usable values,
//! falling back to the defaults (with a warning) instead of failing.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default maximum number of rows to query and print.
pub const DEFAULT_MAX_ROWS: i64 = 10;

/// Default maximum width of text columns.
pub const DEFAULT_MAX_TEXT_WIDTH: i64 = 150;

/// Smallest text width that still leaves room for one character and `...`.
pub const MIN_TEXT_WIDTH: usize = 4;

/// Options for rendering a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Maximum number of rows to print
    pub max_rows: i64,
    /// Maximum width of text columns
    pub max_text_width: i64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            max_text_width: DEFAULT_MAX_TEXT_WIDTH,
        }
    }
}

impl RenderOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the row limit.
    pub fn max_rows(mut self, rows: i64) -> Self {
        self.max_rows = rows;
        self
    }

    /// Set the text column width limit.
    pub fn max_text_width(mut self, width: i64) -> Self {
        self.max_text_width = width;
        self
    }

    /// Resolve the configured values into effective limits.
    pub fn limits(&self) -> RenderLimits {
        let max_rows = if self.max_rows < 1 {
            warn!(
                max_rows = self.max_rows,
                "Invalid max. rows number. Using default ({DEFAULT_MAX_ROWS})"
            );
            DEFAULT_MAX_ROWS
        } else {
            self.max_rows
        };

        let max_text_width = if self.max_text_width < 1 {
            warn!(
                max_text_width = self.max_text_width,
                "Invalid max. text column width. Using default ({DEFAULT_MAX_TEXT_WIDTH})"
            );
            DEFAULT_MAX_TEXT_WIDTH as usize
        } else if self.max_text_width < MIN_TEXT_WIDTH as i64 {
            warn!(
                max_text_width = self.max_text_width,
                "Max. text column width too small. Using {MIN_TEXT_WIDTH}"
            );
            MIN_TEXT_WIDTH
        } else {
            usize::try_from(self.max_text_width).unwrap_or(usize::MAX)
        };

        RenderLimits {
            max_rows: usize::try_from(max_rows).unwrap_or(usize::MAX),
            max_text_width,
        }
    }
}

/// Effective limits used while rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderLimits {
    /// Rows to read from the cursor, at least 1
    pub max_rows: usize,
    /// Text column width, at least [`MIN_TEXT_WIDTH`]
    pub max_text_width: usize,
}

impl Default for RenderLimits {
    fn default() -> Self {
        RenderOptions::default().limits()
    }
}
