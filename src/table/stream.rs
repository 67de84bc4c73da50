//! Year filters over CSV streams.

use std::io;

use crate::config::CoverageConfig;
use crate::error::CoverageResult;
use crate::window::YearRange;

/// Copies the CSV rows whose year lies in `[start_year, end_year]`.
///
/// Reads headed CSV from `reader` and writes the header plus the kept rows,
/// unchanged and in order, to `writer`. Nothing is written unless every
/// year cell could be read. Returns the number of rows kept.
///
/// # Returns
///
/// Returns the kept row count, or an error if:
/// - The build lacks the tabular-data capability (`Unavailable`)
/// - `year_column` is not in the header (`ColumnNotFound`)
/// - The CSV is malformed (`InvalidFormat`)
/// - A year cell cannot be read as an integer (`TypeMismatch`)
///
/// # Example
///
/// ```
/// use coverage_config::table::mask_csv_by_year;
///
/// let input = "year,rate\n1985,1.5\n1995,2.0\n";
/// let mut output = Vec::new();
/// let kept = mask_csv_by_year(input.as_bytes(), &mut output, "year", 1990, 2019);
/// # #[cfg(feature = "tabular")]
/// # {
/// assert_eq!(kept?, 1);
/// assert_eq!(String::from_utf8(output).unwrap(), "year,rate\n1995,2.0\n");
/// # }
/// # #[cfg(not(feature = "tabular"))]
/// # assert!(kept.is_err());
/// # Ok::<(), coverage_config::error::CoverageError>(())
/// ```
pub fn mask_csv_by_year<R: io::Read, W: io::Write>(
    reader: R,
    writer: W,
    year_column: &str,
    start_year: i64,
    end_year: i64,
) -> CoverageResult<usize> {
    let range = YearRange::new(start_year, end_year);

    #[cfg(feature = "tabular")]
    {
        let kept = super::csv_io::filter_csv(reader, writer, year_column, range)?;
        tracing::debug!(column = year_column, %range, kept, "Masked CSV by year");
        Ok(kept)
    }

    #[cfg(not(feature = "tabular"))]
    {
        let _ = (reader, writer, year_column, range);
        Err(crate::error::CoverageError::Unavailable {
            capability: "Tabular data",
        })
    }
}

/// Copies the CSV rows inside one source's coverage window.
///
/// Resolves the source with [`CoverageConfig::source_coverage`] and then
/// filters with [`mask_csv_by_year`]; errors from either step are returned.
pub fn mask_csv_by_source<R: io::Read, W: io::Write>(
    reader: R,
    writer: W,
    year_column: &str,
    config: &CoverageConfig,
    source_key: &str,
) -> CoverageResult<usize> {
    let coverage = config.source_coverage(source_key)?;
    mask_csv_by_year(
        reader,
        writer,
        year_column,
        coverage.coverage_start,
        coverage.coverage_end,
    )
}
