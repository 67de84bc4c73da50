//! Table and cell types.
//!
//! A [`Table`] is an ordered list of column names and rows of [`Cell`]
//! values. Filtering always produces a new owned table.

use serde::Serialize;
use serde_yaml::Value;
use std::fmt;

use crate::config::coerce;
use crate::error::{CoverageError, CoverageResult};
use crate::mask::YearLike;

const TABLE_ORIGIN: &str = "<table>";

/// A single table value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// A missing value.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// Free text.
    Text(String),
}

impl Cell {
    /// Infers a typed cell from raw text.
    ///
    /// Empty text is null; otherwise integers, finite floats and
    /// `true`/`false` are recognised before falling back to text. Words such
    /// as `nan` or `inf` stay text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Null;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Cell::Int(i);
        }
        match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() => return Cell::Float(f),
            _ => {}
        }
        match trimmed {
            "true" => Cell::Bool(true),
            "false" => Cell::Bool(false),
            _ => Cell::Text(raw.to_string()),
        }
    }

    /// Returns true for [`Cell::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Int(i) => write!(f, "{i}"),
            // Debug keeps the decimal point, so `2.0` reads back as a float.
            Cell::Float(x) => write!(f, "{x:?}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl YearLike for Cell {
    fn to_year(&self, field: &str) -> CoverageResult<i64> {
        match self {
            Cell::Int(i) => Ok(*i),
            Cell::Float(x) => coerce::to_year(&Value::from(*x), field),
            Cell::Bool(b) => Ok(i64::from(*b)),
            Cell::Text(s) => s.as_str().to_year(field),
            Cell::Null => Err(CoverageError::TypeMismatch {
                field: field.to_string(),
                expected: "an integer",
                found: "null".to_string(),
            }),
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Int(i64::from(value))
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}

/// Rows of cells under named columns.
///
/// Every row has exactly one cell per column.
///
/// # Example
///
/// ```
/// use coverage_config::table::{Cell, Table};
///
/// let mut table = Table::new(["country", "year"]);
/// table.push_row(vec!["FR".into(), 2001.into()])?;
/// table.push_row(vec!["DE".into(), Cell::parse("2015")])?;
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.column("year")?, vec![&Cell::Int(2001), &Cell::Int(2015)]);
/// # Ok::<(), coverage_config::error::CoverageError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates an empty table with the given columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Creates a table from columns and rows, checking row widths.
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<Cell>>) -> CoverageResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Appends a row.
    ///
    /// Fails with `InvalidFormat` if the row's width differs from the
    /// column count.
    pub fn push_row(&mut self, row: Vec<Cell>) -> CoverageResult<()> {
        if row.len() != self.columns.len() {
            return Err(CoverageError::InvalidFormat {
                origin: TABLE_ORIGIN.to_string(),
                message: format!(
                    "row {} has {} cells but the table has {} columns",
                    self.rows.len(),
                    row.len(),
                    self.columns.len()
                ),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Returns the column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the rows, in order.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the position of a column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns the values of one column, in row order.
    pub fn column(&self, name: &str) -> CoverageResult<Vec<&Cell>> {
        let index = self.require_column(name)?;
        Ok(self.rows.iter().map(|row| &row[index]).collect())
    }

    pub(crate) fn require_column(&self, name: &str) -> CoverageResult<usize> {
        self.column_index(name)
            .ok_or_else(|| CoverageError::ColumnNotFound {
                column: name.to_string(),
            })
    }

    /// Builds a table with the same columns and the given rows.
    pub(crate) fn with_rows(&self, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }
}
