//! Year masks over plain sequences.
//!
//! [`mask_years`] works on anything whose items implement [`YearLike`], so
//! the same function serves integer columns, text read from a file, and raw
//! YAML values.

use serde_yaml::Value;

use crate::config::coerce;
use crate::error::{CoverageError, CoverageResult};
use crate::window::YearRange;

/// A value that can be read as an integer year.
pub trait YearLike {
    /// Converts the value to a year.
    ///
    /// `field` names the value's position for error reporting.
    fn to_year(&self, field: &str) -> CoverageResult<i64>;
}

impl<T: YearLike + ?Sized> YearLike for &T {
    fn to_year(&self, field: &str) -> CoverageResult<i64> {
        (**self).to_year(field)
    }
}

macro_rules! lossless_year {
    ($($ty:ty),*) => {
        $(
            impl YearLike for $ty {
                fn to_year(&self, _field: &str) -> CoverageResult<i64> {
                    Ok(i64::from(*self))
                }
            }
        )*
    };
}

lossless_year!(i8, i16, i32, i64, u8, u16, u32);

impl YearLike for u64 {
    fn to_year(&self, field: &str) -> CoverageResult<i64> {
        i64::try_from(*self).map_err(|_| mismatch(field, self.to_string()))
    }
}

impl YearLike for usize {
    fn to_year(&self, field: &str) -> CoverageResult<i64> {
        i64::try_from(*self).map_err(|_| mismatch(field, self.to_string()))
    }
}

impl YearLike for f64 {
    fn to_year(&self, field: &str) -> CoverageResult<i64> {
        coerce::to_year(&Value::from(*self), field)
    }
}

impl YearLike for f32 {
    fn to_year(&self, field: &str) -> CoverageResult<i64> {
        f64::from(*self).to_year(field)
    }
}

impl YearLike for str {
    fn to_year(&self, field: &str) -> CoverageResult<i64> {
        self.trim()
            .parse::<i64>()
            .map_err(|_| mismatch(field, format!("{self:?}")))
    }
}

impl YearLike for String {
    fn to_year(&self, field: &str) -> CoverageResult<i64> {
        self.as_str().to_year(field)
    }
}

impl YearLike for Value {
    fn to_year(&self, field: &str) -> CoverageResult<i64> {
        coerce::to_year(self, field)
    }
}

fn mismatch(field: &str, found: String) -> CoverageError {
    CoverageError::TypeMismatch {
        field: field.to_string(),
        expected: "an integer",
        found,
    }
}

/// Masks a sequence of years against an inclusive range.
///
/// Element `i` of the result is true iff `start_year <= values[i] <= end_year`.
/// The whole call fails with `TypeMismatch` if any element is not a year.
///
/// # Example
///
/// ```
/// use coverage_config::mask::mask_years;
///
/// let mask = mask_years(["1989", "1990", "2023", "2024"], 1990, 2023)?;
/// assert_eq!(mask, vec![false, true, true, false]);
/// # Ok::<(), coverage_config::error::CoverageError>(())
/// ```
pub fn mask_years<I>(values: I, start_year: i64, end_year: i64) -> CoverageResult<Vec<bool>>
where
    I: IntoIterator,
    I::Item: YearLike,
{
    let range = YearRange::new(start_year, end_year);
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| -> CoverageResult<bool> {
            Ok(range.contains(value.to_year(&format!("values[{i}]"))?))
        })
        .collect()
}
