//! Integration tests for coverage configuration.
//!
//! This test suite covers:
//! - Loading coverage files from disk, including failure modes
//! - Analysis window and source coverage resolution
//! - Intersection windows across sources
//! - Year masks over sequences

use std::io::Write;

use coverage_config::config::{AnalysisWindow, CoverageConfig, SourceCoverage};
use coverage_config::error::{CoverageError, ErrorKind};
use coverage_config::mask::mask_years;
use coverage_config::window::YearRange;

// =============================================================================
// Test Helpers
// =============================================================================

fn fixture_config() -> CoverageConfig {
    CoverageConfig::load("./tests/fixtures/coverage.yaml").expect("Failed to load fixture config")
}

fn write_temp_yaml(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_fixture() {
    let config = fixture_config();
    assert!(config.origin().ends_with("coverage.yaml"));
    assert_eq!(
        config.source_keys(),
        vec!["gbd", "a", "early", "late", "ancient"]
    );
}

#[test]
fn test_load_shipped_sample_config() {
    let config = CoverageConfig::load("./config/data_sources_coverage.yaml").unwrap();
    let gbd = config.source_coverage("gbd").unwrap();
    assert_eq!(gbd.range(), YearRange::new(1990, 2019));
    assert_eq!(
        config.source_coverage("who_mortality").unwrap().range(),
        YearRange::new(2000, 2023)
    );
}

#[test]
fn test_load_nonexistent_path_is_not_found() {
    let err = CoverageConfig::load("./tests/fixtures/does_not_exist.yaml").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(matches!(err, CoverageError::ConfigNotFound { .. }));
}

#[test]
fn test_load_sequence_is_invalid_format() {
    let err = CoverageConfig::load("./tests/fixtures/not_a_mapping.yaml").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    assert!(err.to_string().contains("not_a_mapping.yaml"));
}

#[test]
fn test_load_scalar_is_invalid_format() {
    let file = write_temp_yaml("just a string\n");
    let err = CoverageConfig::load(file.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
}

#[test]
fn test_load_syntax_error_is_invalid_format() {
    let file = write_temp_yaml("sources:\n  gbd: {coverage_start: 1990\n");
    let err = CoverageConfig::load(file.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
}

// =============================================================================
// Windows
// =============================================================================

#[test]
fn test_empty_analysis_window_defaults() {
    let file = write_temp_yaml("analysis_window: {}\nsources: {}\n");
    let config = CoverageConfig::load(file.path()).unwrap();
    assert_eq!(
        config.analysis_window().unwrap(),
        AnalysisWindow {
            start_year: 1990,
            end_year: 2023
        }
    );
}

#[test]
fn test_gbd_round_trip() {
    let gbd = fixture_config().source_coverage("gbd").unwrap();
    assert_eq!(
        gbd,
        SourceCoverage {
            key: "gbd".to_string(),
            name: "Global Burden of Disease".to_string(),
            coverage_start: 1990,
            coverage_end: 2019,
            notes: Some("Modelled estimates".to_string()),
        }
    );
}

#[test]
fn test_missing_end_inherits_analysis_window() {
    let file = write_temp_yaml(
        "analysis_window: {start_year: 2000, end_year: 2020}\nsources: {a: {coverage_start: 2005}}\n",
    );
    let config = CoverageConfig::load(file.path()).unwrap();
    let a = config.source_coverage("a").unwrap();
    assert_eq!(a.coverage_start, 2005);
    assert_eq!(a.coverage_end, 2020);
    assert_eq!(a.name, "a");
    assert_eq!(a.notes, None);
}

#[test]
fn test_unknown_source_is_not_found() {
    let err = fixture_config().source_coverage("unknown").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_effective_window_overlapping_sources() {
    let window = fixture_config().effective_window(&["early", "late"]).unwrap();
    assert_eq!(window, YearRange::new(2000, 2010));
    assert_eq!(<(i64, i64)>::from(window), (2000, 2010));
}

#[test]
fn test_effective_window_disjoint_sources() {
    let window = fixture_config()
        .effective_window(&["ancient", "late"])
        .unwrap();
    assert!(window.start > window.end);
    assert!(window.is_empty());
}

#[test]
fn test_effective_window_empty_list() {
    let keys: Vec<String> = Vec::new();
    let err = fixture_config().effective_window(&keys).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn test_all_sources_resolve() {
    let sources = fixture_config().sources().unwrap();
    assert_eq!(sources.len(), 5);
    assert!(sources.iter().all(|s| !s.name.is_empty()));
}

// =============================================================================
// Masking
// =============================================================================

#[test]
fn test_mask_years_against_source_window() {
    let config = fixture_config();
    let gbd = config.source_coverage("gbd").unwrap();
    let mask = mask_years(
        &[1989, 1990, 2019, 2020],
        gbd.coverage_start,
        gbd.coverage_end,
    )
    .unwrap();
    assert_eq!(mask, vec![false, true, true, false]);
}
