//! Standalone check of a coverage configuration file.
//!
//! Loads the file, prints the analysis window and the coverage of the
//! requested sources, and their common window when more than one is given.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use coverage_config::config::{AnalysisWindow, CoverageConfig, SourceCoverage};
use coverage_config::error::CoverageResult;
use coverage_config::window::YearRange;

const DEFAULT_CONFIG_PATH: &str = "config/data_sources_coverage.yaml";

#[derive(Debug, Parser)]
#[command(name = "coverage-check", version, about = "Check a data source coverage file")]
struct Cli {
    /// Coverage YAML file
    #[arg(short, long, env = "COVERAGE_YAML", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Source keys to resolve
    #[arg(value_name = "SOURCE", default_value = "gbd")]
    sources: Vec<String>,

    /// Resolve every source in the file instead of the ones named
    #[arg(long)]
    all: bool,

    /// Print a JSON report
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    config: String,
    analysis_window: AnalysisWindow,
    sources: Vec<SourceCoverage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    effective_window: Option<YearRange>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("coverage_config=info")),
        )
        .init();

    let cli = Cli::parse();
    let rendered = build_report(&cli)
        .map_err(|err| err.to_string())
        .and_then(|report| {
            render_report(&report, cli.json)
                .map_err(|err| format!("Failed to render report: {err}"))
        });

    match rendered {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn build_report(cli: &Cli) -> CoverageResult<Report> {
    let config = CoverageConfig::load(&cli.config)?;
    let keys = if cli.all {
        config.source_keys()
    } else {
        cli.sources.clone()
    };

    let sources = keys
        .iter()
        .map(|key| config.source_coverage(key))
        .collect::<CoverageResult<Vec<_>>>()?;
    let effective_window = if keys.len() > 1 {
        Some(config.effective_window(&keys)?)
    } else {
        None
    };

    Ok(Report {
        config: config.origin().to_string(),
        analysis_window: config.analysis_window()?,
        sources,
        effective_window,
    })
}

fn render_report(report: &Report, json: bool) -> Result<String, serde_json::Error> {
    if json {
        return render_json(report);
    }

    let mut out = String::new();
    let window = report.analysis_window;
    out.push_str(&format!(
        "Analysis window: {}-{}\n",
        window.start_year, window.end_year
    ));
    for source in &report.sources {
        out.push_str(&format!(
            "{} coverage: {}-{}\n",
            source.name, source.coverage_start, source.coverage_end
        ));
        if let Some(notes) = &source.notes {
            out.push_str(&format!("  {notes}\n"));
        }
    }
    if let Some(effective) = report.effective_window {
        if effective.is_empty() {
            out.push_str(&format!("Effective window: none ({effective})\n"));
        } else {
            out.push_str(&format!("Effective window: {effective}\n"));
        }
    }
    Ok(out)
}

fn render_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value).map(|text| text + "\n")
}
