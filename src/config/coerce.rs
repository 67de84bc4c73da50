//! Coercion of loosely-typed YAML values.
//!
//! Coverage files are hand-written, so a year may arrive as `2005`,
//! `2005.0` or `"2005"`. These helpers accept the forms an integer
//! conversion reasonably can and reject everything else with
//! [`CoverageError::TypeMismatch`].

use serde_yaml::Value;

use crate::error::{CoverageError, CoverageResult};

/// Largest float that still converts to an `i64` without saturating.
const I64_FLOAT_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Coerces a YAML value to an integer year.
///
/// Integers pass through, finite floats truncate toward zero, strings are
/// parsed after trimming whitespace, and booleans become `0`/`1`.
pub fn to_year(value: &Value, field: &str) -> CoverageResult<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f >= -I64_FLOAT_LIMIT && f < I64_FLOAT_LIMIT => {
                    Ok(f.trunc() as i64)
                }
                _ => Err(mismatch(field, "an integer", value)),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| mismatch(field, "an integer", value)),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Tagged(tagged) => to_year(&tagged.value, field),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => {
            Err(mismatch(field, "an integer", value))
        }
    }
}

/// Coerces a YAML scalar to text.
///
/// Returns `None` for null so callers can apply their own default.
pub fn to_text(value: &Value, field: &str) -> CoverageResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Tagged(tagged) => to_text(&tagged.value, field),
        Value::Sequence(_) | Value::Mapping(_) => Err(mismatch(field, "text", value)),
    }
}

/// Builds a `TypeMismatch` error describing the offending value.
pub fn mismatch(field: &str, expected: &'static str, value: &Value) -> CoverageError {
    CoverageError::TypeMismatch {
        field: field.to_string(),
        expected,
        found: describe(value),
    }
}

/// Short human-readable rendering of a value for error messages.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{s:?}"),
        Value::Sequence(seq) => format!("a sequence of {} items", seq.len()),
        Value::Mapping(map) => format!("a mapping of {} entries", map.len()),
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, describe(&tagged.value)),
    }
}
