//! Type categories: how a column's values are printed.
//!
//! Every source column carries a generic SQL type code. Codes are grouped
//! into a small, closed set of categories according to print formatting
//! needs: integers are never truncated, text is left justified and can be
//! cut at a maximum width, decimals get a fixed number of fractional
//! digits, and anything unknown prints as a type-name placeholder.

use serde::{Deserialize, Serialize};

/// Generic SQL type codes, using the X/Open numbering shared by ODBC and JDBC.
pub mod sql_type {
    pub const BIT: i32 = -7;
    pub const TINYINT: i32 = -6;
    pub const BIGINT: i32 = -5;
    pub const LONGVARBINARY: i32 = -4;
    pub const VARBINARY: i32 = -3;
    pub const BINARY: i32 = -2;
    pub const LONGVARCHAR: i32 = -1;
    pub const NULL: i32 = 0;
    pub const CHAR: i32 = 1;
    pub const NUMERIC: i32 = 2;
    pub const DECIMAL: i32 = 3;
    pub const INTEGER: i32 = 4;
    pub const SMALLINT: i32 = 5;
    pub const FLOAT: i32 = 6;
    pub const REAL: i32 = 7;
    pub const DOUBLE: i32 = 8;
    pub const VARCHAR: i32 = 12;
    pub const BOOLEAN: i32 = 16;
    pub const DATE: i32 = 91;
    pub const TIME: i32 = 92;
    pub const TIMESTAMP: i32 = 93;
    pub const OTHER: i32 = 1111;
    pub const BLOB: i32 = 2004;
    pub const CLOB: i32 = 2005;
    pub const NCHAR: i32 = -15;
    pub const NVARCHAR: i32 = -9;
    pub const LONGNVARCHAR: i32 = -16;
    pub const TIME_WITH_TIMEZONE: i32 = 2013;
    pub const TIMESTAMP_WITH_TIMEZONE: i32 = 2014;
}

/// Horizontal alignment of a cell within its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Justification {
    Left,
    Right,
}

/// Print category of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeCategory {
    /// Whole numbers, printed unbounded
    Integer,
    /// Floating and fixed point numbers, printed with 3 fractional digits
    Decimal,
    /// Character data, left justified and truncated at the text width limit
    Text,
    /// Dates, times and timestamps
    DateTime,
    /// Booleans
    Boolean,
    /// Anything else; values are replaced by the type name
    Other,
}

impl TypeCategory {
    /// Classify a generic SQL type code. Unknown codes are [`TypeCategory::Other`].
    pub fn classify(type_code: i32) -> Self {
        use sql_type::*;

        match type_code {
            BIGINT | TINYINT | SMALLINT | INTEGER => TypeCategory::Integer,
            REAL | DOUBLE | DECIMAL => TypeCategory::Decimal,
            DATE | TIME | TIME_WITH_TIMEZONE | TIMESTAMP | TIMESTAMP_WITH_TIMEZONE => {
                TypeCategory::DateTime
            }
            BOOLEAN => TypeCategory::Boolean,
            VARCHAR | NVARCHAR | LONGVARCHAR | LONGNVARCHAR | CHAR | NCHAR => TypeCategory::Text,
            _ => TypeCategory::Other,
        }
    }

    /// Text is left justified, everything else right justified.
    pub fn justification(&self) -> Justification {
        match self {
            TypeCategory::Text => Justification::Left,
            _ => Justification::Right,
        }
    }
}

/// Shorthand for [`TypeCategory::classify`].
pub fn classify(type_code: i32) -> TypeCategory {
    TypeCategory::classify(type_code)
}

#[cfg(test)]
mod tests {
    use super::sql_type::*;
    use super::*;

    #[test]
    fn test_classify_integers() {
        for code in [BIGINT, TINYINT, SMALLINT, INTEGER] {
            assert_eq!(classify(code), TypeCategory::Integer, "code {code}");
        }
    }

    #[test]
    fn test_classify_decimals() {
        for code in [REAL, DOUBLE, DECIMAL] {
            assert_eq!(classify(code), TypeCategory::Decimal, "code {code}");
        }
    }

    #[test]
    fn test_classify_date_time() {
        for code in [DATE, TIME, TIME_WITH_TIMEZONE, TIMESTAMP, TIMESTAMP_WITH_TIMEZONE] {
            assert_eq!(classify(code), TypeCategory::DateTime, "code {code}");
        }
    }

    #[test]
    fn test_classify_text() {
        for code in [VARCHAR, NVARCHAR, LONGVARCHAR, LONGNVARCHAR, CHAR, NCHAR] {
            assert_eq!(classify(code), TypeCategory::Text, "code {code}");
        }
    }

    #[test]
    fn test_classify_boolean() {
        assert_eq!(classify(BOOLEAN), TypeCategory::Boolean);
    }

    #[test]
    fn test_classify_unlisted_codes_are_other() {
        // NUMERIC and FLOAT are deliberately not in the decimal group
        for code in [NUMERIC, FLOAT, BIT, BLOB, CLOB, NULL, OTHER, i32::MIN, i32::MAX, 42] {
            assert_eq!(classify(code), TypeCategory::Other, "code {code}");
        }
    }

    #[test]
    fn test_justification() {
        assert_eq!(TypeCategory::Text.justification(), Justification::Left);
        assert_eq!(TypeCategory::Integer.justification(), Justification::Right);
        assert_eq!(TypeCategory::Decimal.justification(), Justification::Right);
        assert_eq!(TypeCategory::Other.justification(), Justification::Right);
    }
}
