//! The `analyze` pipeline: version gate, build, classification, report.
//!
//! Every failure before the build has completed aborts the run without
//! touching the report file. The report is written only after a complete
//! build-and-collect cycle.

use crate::classify::classify;
use crate::codequality;
use crate::config::{Effective, ReportFormat};
use crate::driver::{BuildDriver, BuildRequest};
use crate::error::{Error, Result};
use crate::exit;
use crate::models::ErrorLevel;
use crate::report::ErrorReport;
use crate::version;
use std::fs;
use std::path::{Path, PathBuf};

pub struct Outcome {
    pub report: ErrorReport,
    pub exit_code: i32,
    pub report_written: Option<PathBuf>,
}

fn require_file(what: &'static str, path: Option<&PathBuf>) -> Result<PathBuf> {
    let path = path.ok_or_else(|| {
        Error::Config(format!("{} is not configured; pass it on the command line or in tcsa.toml", what))
    })?;
    if !path.is_file() {
        return Err(Error::MissingFile {
            what,
            path: path.clone(),
        });
    }
    Ok(path.clone())
}

/// Render the report in `format`.
pub fn render_report(report: &ErrorReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Default => report.to_json(),
        ReportFormat::Gitlab => codequality::to_json(report),
    }
}

fn write_report(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

/// Run the whole pipeline with `driver` standing in for the IDE.
pub fn run_analysis(eff: &Effective, driver: &mut dyn BuildDriver) -> Result<Outcome> {
    let solution = require_file("Visual Studio solution", eff.solution.as_ref())?;
    let project = require_file("TwinCAT project file", eff.project.as_ref())?;
    tracing::debug!(solution = %solution.display(), project = %project.display(), "Arguments");

    let tc_version = version::tc_version_from_file(&project)?;
    let supported = version::ensure_supported(&tc_version, version::MIN_TC_VERSION_FOR_SC_ANALYSIS)?;
    tracing::debug!(
        version = %supported,
        minimum = version::MIN_TC_VERSION_FOR_SC_ANALYSIS,
        "TwinCAT version supports static analysis"
    );
    let vs_version = version::vs_version_from_file(&solution)?;

    let request = BuildRequest {
        solution: &solution,
        project: &project,
        vs_version: &vs_version,
        tc_version: &tc_version,
    };
    tracing::info!(driver = driver.name(), "Building solution");
    let items = driver.build(&request)?;

    let mut report = ErrorReport::new(&solution, &project);
    for raw in items.iter().filter(|r| r.error_level != ErrorLevel::Low) {
        report.add_error(classify(raw, Some(&solution)));
    }

    for e in report.static_analyzer_errors() {
        tracing::info!(
            description = %e.description,
            error_level = e.error_level.as_str(),
            file_name = %e.location.file_name,
            "Static analysis finding"
        );
    }

    let report_written = match &eff.report_path {
        Some(path) => {
            write_report(path, &render_report(&report, eff.report_format)?)?;
            tracing::info!(path = %path.display(), format = ?eff.report_format, "Report written");
            Some(path.clone())
        }
        None => None,
    };

    let exit_code = exit::exit_code(report.static_analyzer_errors());
    Ok(Outcome {
        report,
        exit_code,
        report_written,
    })
}
