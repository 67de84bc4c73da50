//! Year filters over tables.
//!
//! Only built with the `tabular` feature, which provides [`Table`].

use tracing::debug;

use crate::config::CoverageConfig;
use crate::error::CoverageResult;
use crate::mask::YearLike;
use crate::window::YearRange;

use super::Table;

/// Returns the rows of `table` whose year lies in `[start_year, end_year]`.
///
/// The result is a new table; row order is preserved and the input is left
/// untouched.
///
/// # Returns
///
/// Returns the filtered table, or an error if:
/// - `year_column` is not a column of `table` (`ColumnNotFound`)
/// - A year cell cannot be read as an integer (`TypeMismatch`)
///
/// # Example
///
/// ```
/// use coverage_config::table::{mask_table_by_year, Table};
///
/// let table = Table::from_rows(
///     ["year", "deaths"],
///     vec![
///         vec![1985.into(), 10.into()],
///         vec![1995.into(), 12.into()],
///         vec![2021.into(), 9.into()],
///     ],
/// )?;
///
/// let kept = mask_table_by_year(&table, "year", 1990, 2019)?;
/// assert_eq!(kept.len(), 1);
/// # Ok::<(), coverage_config::error::CoverageError>(())
/// ```
pub fn mask_table_by_year(
    table: &Table,
    year_column: &str,
    start_year: i64,
    end_year: i64,
) -> CoverageResult<Table> {
    let index = table.require_column(year_column)?;
    let range = YearRange::new(start_year, end_year);

    let mut kept = Vec::new();
    for (row_number, row) in table.rows().iter().enumerate() {
        let year = row[index].to_year(&format!("{year_column}[{row_number}]"))?;
        if range.contains(year) {
            kept.push(row.clone());
        }
    }

    debug!(
        column = year_column,
        %range,
        kept = kept.len(),
        total = table.len(),
        "Masked table by year"
    );
    Ok(table.with_rows(kept))
}

/// Returns the rows of `table` inside one source's coverage window.
///
/// Resolves the source with [`CoverageConfig::source_coverage`] and then
/// filters with [`mask_table_by_year`]; errors from either step are returned.
pub fn mask_table_by_source(
    table: &Table,
    year_column: &str,
    config: &CoverageConfig,
    source_key: &str,
) -> CoverageResult<Table> {
    let coverage = config.source_coverage(source_key)?;
    mask_table_by_year(
        table,
        year_column,
        coverage.coverage_start,
        coverage.coverage_end,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoverageError, ErrorKind};
    use crate::table::{tabular_available, Cell};
    use proptest::prelude::*;

    fn sample_table() -> Table {
        Table::from_rows(
            ["country", "year", "value"],
            vec![
                vec!["FR".into(), 1988.into(), 1.5.into()],
                vec!["FR".into(), 1990.into(), 2.5.into()],
                vec!["DE".into(), "2005".into(), 3.0.into()],
                vec!["DE".into(), 2019.into(), 4.0.into()],
                vec!["IT".into(), 2020.into(), Cell::Null],
            ],
        )
        .unwrap()
    }

    fn years(table: &Table) -> Vec<String> {
        table
            .column("year")
            .unwrap()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_keeps_rows_inside_inclusive_bounds_in_order() {
        let kept = mask_table_by_year(&sample_table(), "year", 1990, 2019).unwrap();
        assert_eq!(years(&kept), vec!["1990", "2005", "2019"]);
        assert_eq!(kept.columns(), sample_table().columns());
    }

    #[test]
    fn test_result_is_independent_copy() {
        let table = sample_table();
        let mut kept = mask_table_by_year(&table, "year", 1900, 2100).unwrap();
        kept.push_row(vec!["ES".into(), 2000.into(), 0.5.into()]).unwrap();
        assert_eq!(table.len(), 5);
        assert_eq!(kept.len(), 6);
    }

    #[test]
    fn test_missing_column_is_not_found() {
        let err = mask_table_by_year(&sample_table(), "yr", 1990, 2019).unwrap_err();
        assert!(matches!(err, CoverageError::ColumnNotFound { ref column } if column == "yr"));
    }

    #[test]
    fn test_non_year_cell_is_type_mismatch() {
        let table = Table::from_rows(
            ["year"],
            vec![vec![2000.into()], vec!["unknown".into()]],
        )
        .unwrap();
        let err = mask_table_by_year(&table, "year", 1990, 2019).unwrap_err();
        match err {
            CoverageError::TypeMismatch { field, .. } => assert_eq!(field, "year[1]"),
            other => panic!("Expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_table_stays_empty() {
        let table = Table::new(["year"]);
        let kept = mask_table_by_year(&table, "year", 1990, 2019).unwrap();
        assert!(kept.is_empty());
        assert_eq!(kept.columns().to_vec(), vec!["year".to_string()]);
    }

    #[test]
    fn test_mask_by_source_uses_coverage_window() {
        let config = CoverageConfig::from_yaml_str(
            "analysis_window: {start_year: 1990, end_year: 2020}\nsources: {gbd: {coverage_end: 2019}}",
        )
        .unwrap();
        let kept = mask_table_by_source(&sample_table(), "year", &config, "gbd").unwrap();
        assert_eq!(years(&kept), vec!["1990", "2005", "2019"]);
    }

    #[test]
    fn test_mask_by_source_unknown_source() {
        let config = CoverageConfig::from_yaml_str("sources: {}").unwrap();
        let err = mask_table_by_source(&sample_table(), "year", &config, "who").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_tabular_available_with_feature() {
        assert!(tabular_available());
    }

    proptest! {
        #[test]
        fn prop_mask_is_idempotent(
            rows in prop::collection::vec(1950i64..2050, 0..40),
            start in 1950i64..2050,
            end in 1950i64..2050,
        ) {
            let table = Table::from_rows(
                ["year"],
                rows.into_iter().map(|y| vec![Cell::Int(y)]).collect(),
            ).unwrap();
            let once = mask_table_by_year(&table, "year", start, end).unwrap();
            let twice = mask_table_by_year(&once, "year", start, end).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
