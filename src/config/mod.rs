//! Coverage configuration loading and lookup.
//!
//! This module loads a coverage file describing a global analysis window
//! and the valid year range of each data source, and resolves typed
//! windows from it.
//!
//! # Example
//!
//! ```no_run
//! use coverage_config::config::CoverageConfig;
//!
//! let config = CoverageConfig::load("config/data_sources_coverage.yaml").unwrap();
//! let gbd = config.source_coverage("gbd").unwrap();
//! println!("GBD coverage: {}-{}", gbd.coverage_start, gbd.coverage_end);
//! ```

pub(crate) mod coerce;
mod loader;
mod types;

pub use loader::CoverageConfig;
pub use types::{AnalysisWindow, DEFAULT_END_YEAR, DEFAULT_START_YEAR, SourceCoverage};
