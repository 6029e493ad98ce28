//! Value formatting per type category.

use crate::error::DbPrintError;
use crate::source::RawValue;
use crate::Result;

use super::category::TypeCategory;

/// Placeholder printed for NULL in every category except `Other`.
pub const NULL_TEXT: &str = "NULL";

/// Suffix appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Fractional digits printed for decimal columns.
pub const DECIMAL_PLACES: usize = 3;

/// Produce the display string for `raw` in a column of `category`.
///
/// `type_name` is only used for `Other` columns, whose values are replaced
/// by `(TYPE_NAME)`. `max_text_width` bounds text columns; callers are
/// expected to pass a limit of at least 4 (see [`crate::options`]).
pub fn format_value(
    raw: &RawValue,
    category: TypeCategory,
    type_name: &str,
    max_text_width: usize,
) -> Result<String> {
    match category {
        TypeCategory::Other => Ok(format!("({type_name})")),
        _ if raw.is_null() => Ok(NULL_TEXT.to_string()),
        TypeCategory::Text => Ok(truncate_text(&raw.to_string(), max_text_width)),
        TypeCategory::Decimal => {
            let number = raw.as_f64().ok_or_else(|| DbPrintError::ValueConversion {
                column: type_name.to_string(),
                value: raw.to_string(),
                expected: "a decimal number",
            })?;
            Ok(format_decimal(number))
        }
        TypeCategory::Integer | TypeCategory::DateTime | TypeCategory::Boolean => {
            Ok(raw.to_string())
        }
    }
}

/// Print `number` with [`DECIMAL_PLACES`] fractional digits, rounding ties
/// away from zero.
///
/// Rounding works on the shortest decimal form of the value, so `1.0625`
/// prints as `1.063` and `0.1235` as `0.124`.
pub fn format_decimal(number: f64) -> String {
    if !number.is_finite() {
        return format!("{:.*}", DECIMAL_PLACES, number);
    }

    let shortest = number.abs().to_string();
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((&shortest, ""));
    let mut digits: Vec<u8> = int_part.bytes().map(|b| b - b'0').collect();
    let mut frac = frac_part.bytes().map(|b| b - b'0');
    for _ in 0..DECIMAL_PLACES {
        digits.push(frac.next().unwrap_or(0));
    }

    if frac.next().is_some_and(|next| next >= 5) {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if !carry {
                break;
            }
            *digit = (*digit + 1) % 10;
            carry = *digit == 0;
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let split = digits.len() - DECIMAL_PLACES;
    let mut out = String::with_capacity(digits.len() + 2);
    if number.is_sign_negative() {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|d| char::from(b'0' + d)));
    out.push('.');
    out.extend(digits[split..].iter().map(|d| char::from(b'0' + d)));
    out
}

/// Cut `text` to `max_width` characters, ending in `...` when it was longer.
pub fn truncate_text(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    let keep = max_width.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
