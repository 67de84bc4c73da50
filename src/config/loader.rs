//! Coverage configuration loading and lookup.
//!
//! This module provides the [`CoverageConfig`] type, which holds a coverage
//! file's top-level mapping verbatim and resolves typed windows from it on
//! demand.

use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{CoverageError, CoverageResult};
use crate::mask::{mask_years, YearLike};
use crate::window::YearRange;

use super::coerce::{describe, mismatch, to_text, to_year};
use super::types::{AnalysisWindow, DEFAULT_END_YEAR, DEFAULT_START_YEAR, SourceCoverage};

const ANALYSIS_WINDOW: &str = "analysis_window";
const SOURCES: &str = "sources";
const MEMORY_ORIGIN: &str = "<memory>";

/// A loaded coverage configuration.
///
/// The mapping is kept exactly as parsed. Nothing is validated at load time
/// beyond the top level being a mapping; malformed entries are reported when
/// they are looked up.
///
/// # File Format
///
/// ```text
/// analysis_window:
///   start_year: 1990
///   end_year: 2023
/// sources:
///   gbd:
///     name: Global Burden of Disease
///     coverage_start: 1990
///     coverage_end: 2019
///     notes: Modelled estimates
/// ```
///
/// Every field is optional. A missing analysis window defaults to 1990-2023
/// and a source without bounds inherits the analysis window's.
///
/// # Example
///
/// ```
/// use coverage_config::config::CoverageConfig;
///
/// let config = CoverageConfig::from_yaml_str(
///     "analysis_window: {start_year: 2000, end_year: 2020}\n\
///      sources: {a: {coverage_start: 2005}}",
/// )?;
///
/// let a = config.source_coverage("a")?;
/// assert_eq!(a.coverage_start, 2005);
/// assert_eq!(a.coverage_end, 2020);
/// # Ok::<(), coverage_config::error::CoverageError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CoverageConfig {
    origin: String,
    mapping: Mapping,
}

impl CoverageConfig {
    /// Loads a coverage configuration from a YAML file.
    ///
    /// # Returns
    ///
    /// Returns the configuration on success, or an error if:
    /// - The path does not exist (`ConfigNotFound`, checked before reading)
    /// - The file cannot be read (`Io`)
    /// - The content is not YAML, or its top level is not a mapping (`InvalidFormat`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use coverage_config::config::CoverageConfig;
    ///
    /// let config = CoverageConfig::load("config/data_sources_coverage.yaml")?;
    /// println!("Analysis window: {}", config.analysis_window()?.range());
    /// # Ok::<(), coverage_config::error::CoverageError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> CoverageResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        if !path.exists() {
            return Err(CoverageError::ConfigNotFound { path: path_str });
        }

        let content = fs::read_to_string(path).map_err(|source| CoverageError::Io {
            path: path_str.clone(),
            source,
        })?;

        let config = Self::parse(&content, path_str)?;
        debug!(
            path = %config.origin,
            sources = config.source_keys().len(),
            "Loaded coverage config"
        );
        Ok(config)
    }

    /// Parses a coverage configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> CoverageResult<Self> {
        Self::parse(text, MEMORY_ORIGIN.to_string())
    }

    /// Wraps an already-parsed mapping.
    pub fn from_mapping(mapping: Mapping) -> Self {
        Self {
            origin: MEMORY_ORIGIN.to_string(),
            mapping,
        }
    }

    fn parse(text: &str, origin: String) -> CoverageResult<Self> {
        let invalid = |e: serde_yaml::Error| CoverageError::InvalidFormat {
            origin: origin.clone(),
            message: e.to_string(),
        };
        let mut value: Value = serde_yaml::from_str(text).map_err(invalid)?;
        // `<<: *anchor` entries are resolved here, not at lookup time.
        value.apply_merge().map_err(invalid)?;

        match value {
            Value::Mapping(mapping) => Ok(Self { origin, mapping }),
            other => Err(CoverageError::InvalidFormat {
                origin,
                message: format!(
                    "Coverage config must be a YAML mapping at the top level, found {}",
                    describe(&other)
                ),
            }),
        }
    }

    /// Returns where the configuration was loaded from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the raw top-level mapping.
    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    /// Resolves the global analysis window.
    ///
    /// A missing `analysis_window` section, or missing keys inside it, fall
    /// back to 1990 and 2023. Values that are present but not integers fail
    /// with `TypeMismatch`.
    pub fn analysis_window(&self) -> CoverageResult<AnalysisWindow> {
        let section = section(&self.mapping, ANALYSIS_WINDOW)?;

        Ok(AnalysisWindow {
            start_year: year_or(section, "start_year", ANALYSIS_WINDOW, DEFAULT_START_YEAR)?,
            end_year: year_or(section, "end_year", ANALYSIS_WINDOW, DEFAULT_END_YEAR)?,
        })
    }

    /// Resolves the coverage of one source.
    ///
    /// # Returns
    ///
    /// Returns the source's coverage, with defaults applied, or an error if:
    /// - `key` is not listed under `sources` (`SourceNotFound`)
    /// - A field is present but of the wrong type (`TypeMismatch`)
    ///
    /// # Example
    ///
    /// ```
    /// use coverage_config::config::CoverageConfig;
    ///
    /// let config = CoverageConfig::from_yaml_str(
    ///     "sources: {gbd: {name: GBD, coverage_start: 1990, coverage_end: 2019}}",
    /// )?;
    /// let gbd = config.source_coverage("gbd")?;
    /// assert_eq!((gbd.coverage_start, gbd.coverage_end), (1990, 2019));
    /// # Ok::<(), coverage_config::error::CoverageError>(())
    /// ```
    pub fn source_coverage(&self, key: &str) -> CoverageResult<SourceCoverage> {
        let entry = section(&self.mapping, SOURCES)?
            .and_then(|sources| find_source(sources, key))
            .ok_or_else(|| CoverageError::SourceNotFound {
                key: key.to_string(),
            })?;

        let path = format!("{SOURCES}.{key}");
        let entry = match entry {
            Value::Null => None,
            Value::Mapping(mapping) => Some(mapping),
            other => return Err(mismatch(&path, "a mapping", other)),
        };

        let window = self.analysis_window()?;
        let name = match entry.and_then(|e| e.get("name")) {
            Some(value) => to_text(value, &format!("{path}.name"))?,
            None => None,
        };
        let notes = match entry.and_then(|e| e.get("notes")) {
            Some(value) => to_text(value, &format!("{path}.notes"))?,
            None => None,
        };

        let coverage = SourceCoverage {
            key: key.to_string(),
            name: name.unwrap_or_else(|| key.to_string()),
            coverage_start: year_or(entry, "coverage_start", &path, window.start_year)?,
            coverage_end: year_or(entry, "coverage_end", &path, window.end_year)?,
            notes,
        };

        if coverage.range().is_empty() {
            warn!(
                source = key,
                coverage_start = coverage.coverage_start,
                coverage_end = coverage.coverage_end,
                "Source coverage starts after it ends"
            );
        }

        Ok(coverage)
    }

    /// Lists the keys under `sources`, in file order.
    ///
    /// Keys that are not scalars are skipped.
    pub fn source_keys(&self) -> Vec<String> {
        match section(&self.mapping, SOURCES) {
            Ok(Some(sources)) => sources
                .keys()
                .filter_map(|k| to_text(k, SOURCES).ok().flatten())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Resolves the coverage of every configured source, in file order.
    pub fn sources(&self) -> CoverageResult<Vec<SourceCoverage>> {
        self.source_keys()
            .iter()
            .map(|key| self.source_coverage(key))
            .collect()
    }

    /// Computes the window in which every named source has valid data.
    ///
    /// The result is `(max of starts, min of ends)`. When the sources do not
    /// overlap, the returned range is empty (`start > end`); callers must
    /// check [`YearRange::is_empty`] before using it.
    ///
    /// # Returns
    ///
    /// Returns the intersection window, or an error if:
    /// - `keys` is empty (`EmptySourceList`)
    /// - Any key fails to resolve (see [`CoverageConfig::source_coverage`])
    ///
    /// # Example
    ///
    /// ```
    /// use coverage_config::config::CoverageConfig;
    /// use coverage_config::window::YearRange;
    ///
    /// let config = CoverageConfig::from_yaml_str(
    ///     "sources:\n  a: {coverage_start: 1990, coverage_end: 2010}\n  b: {coverage_start: 2000}",
    /// )?;
    /// assert_eq!(config.effective_window(&["a", "b"])?, YearRange::new(2000, 2010));
    /// # Ok::<(), coverage_config::error::CoverageError>(())
    /// ```
    pub fn effective_window<S: AsRef<str>>(&self, keys: &[S]) -> CoverageResult<YearRange> {
        let (first, rest) = keys.split_first().ok_or(CoverageError::EmptySourceList)?;

        let mut window = self.source_coverage(first.as_ref())?.range();
        for key in rest {
            window = window.intersect(self.source_coverage(key.as_ref())?.range());
        }

        debug!(%window, sources = keys.len(), "Computed effective window");
        if window.is_empty() {
            warn!(%window, "Source coverage windows do not overlap");
        }
        Ok(window)
    }

    /// Masks a sequence of years against one source's coverage.
    pub fn mask_years_for_source<Y: YearLike>(
        &self,
        values: &[Y],
        key: &str,
    ) -> CoverageResult<Vec<bool>> {
        let coverage = self.source_coverage(key)?;
        mask_years(values, coverage.coverage_start, coverage.coverage_end)
    }
}

/// Returns a named sub-mapping, treating absence and null as "no section".
fn section<'a>(mapping: &'a Mapping, name: &str) -> CoverageResult<Option<&'a Mapping>> {
    match mapping.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Mapping(section)) => Ok(Some(section)),
        Some(other) => Err(mismatch(name, "a mapping", other)),
    }
}

/// Finds a source entry, matching non-string keys by their text form.
fn find_source<'a>(sources: &'a Mapping, key: &str) -> Option<&'a Value> {
    sources.get(key).or_else(|| {
        sources
            .iter()
            .find(|(k, _)| !k.is_string() && to_text(k, SOURCES).ok().flatten().as_deref() == Some(key))
            .map(|(_, v)| v)
    })
}

/// Reads an integer field, falling back to `default` when it is absent.
fn year_or(
    section: Option<&Mapping>,
    field: &str,
    parent: &str,
    default: i64,
) -> CoverageResult<i64> {
    match section.and_then(|s| s.get(field)) {
        Some(value) => to_year(value, &format!("{parent}.{field}")),
        None => Ok(default),
    }
}
