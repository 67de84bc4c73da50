//! Resolved coverage types.
//!
//! These are the typed views produced by looking up the loosely-typed
//! configuration mapping. They are plain values with no link back to the
//! mapping they came from.

use serde::Serialize;

use crate::window::YearRange;

/// First year of the analysis window when the config does not give one.
pub const DEFAULT_START_YEAR: i64 = 1990;

/// Last year of the analysis window when the config does not give one.
pub const DEFAULT_END_YEAR: i64 = 2023;

/// The global time range for an analysis.
///
/// Sources that do not declare their own coverage inherit these bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisWindow {
    /// First year of the analysis.
    pub start_year: i64,
    /// Last year of the analysis.
    pub end_year: i64,
}

impl AnalysisWindow {
    /// Returns the window as an inclusive year range.
    pub fn range(&self) -> YearRange {
        YearRange::new(self.start_year, self.end_year)
    }
}

impl Default for AnalysisWindow {
    fn default() -> Self {
        Self {
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
        }
    }
}

/// The valid year range of one named data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCoverage {
    /// The key the source is listed under in `sources`.
    pub key: String,
    /// Display name; the key when the config gives none.
    pub name: String,
    /// First year of valid data.
    pub coverage_start: i64,
    /// Last year of valid data.
    pub coverage_end: i64,
    /// Free-text notes, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SourceCoverage {
    /// Returns the coverage as an inclusive year range.
    pub fn range(&self) -> YearRange {
        YearRange::new(self.coverage_start, self.coverage_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_is_1990_to_2023() {
        let window = AnalysisWindow::default();
        assert_eq!(window.start_year, 1990);
        assert_eq!(window.end_year, 2023);
        assert_eq!(window.range(), YearRange::new(1990, 2023));
    }

    #[test]
    fn test_source_range_matches_bounds() {
        let source = SourceCoverage {
            key: "gbd".to_string(),
            name: "Global Burden of Disease".to_string(),
            coverage_start: 1990,
            coverage_end: 2019,
            notes: None,
        };
        assert_eq!(source.range(), YearRange::new(1990, 2019));
    }

    #[test]
    fn test_source_serializes_without_absent_notes() {
        let source = SourceCoverage {
            key: "a".to_string(),
            name: "a".to_string(),
            coverage_start: 2005,
            coverage_end: 2020,
            notes: None,
        };
        let json = serde_json::to_value(&source).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "key": "a",
                "name": "a",
                "coverage_start": 2005,
                "coverage_end": 2020
            })
        );
    }
}
