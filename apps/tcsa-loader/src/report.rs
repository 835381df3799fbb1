//! Native error report: identity of the run plus both error buckets.

use crate::error::Result;
use crate::models::{BuildError, Classified};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
/// Errors collected from one build. Serializes to the native JSON report.
pub struct ErrorReport {
    visual_studio_solution_name: String,
    #[serde(rename = "TwinCATProjectName")]
    twincat_project_name: String,
    time_stamp: DateTime<Local>,
    static_analyzer_errors: Vec<BuildError>,
    other_errors: Vec<BuildError>,
}

fn file_stem(p: &Path) -> String {
    p.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

impl ErrorReport {
    /// Start an empty report; the timestamp is taken now and never changes.
    pub fn new(solution_path: &Path, project_path: &Path) -> Self {
        Self::with_timestamp(solution_path, project_path, Local::now())
    }

    pub fn with_timestamp(
        solution_path: &Path,
        project_path: &Path,
        time_stamp: DateTime<Local>,
    ) -> Self {
        Self {
            visual_studio_solution_name: file_stem(solution_path),
            twincat_project_name: file_stem(project_path),
            time_stamp,
            static_analyzer_errors: Vec::new(),
            other_errors: Vec::new(),
        }
    }

    /// Append a classified error to its bucket, keeping insertion order.
    pub fn add_error(&mut self, error: Classified) {
        match error {
            Classified::StaticAnalysis(e) => self.static_analyzer_errors.push(e),
            Classified::Other(e) => self.other_errors.push(e),
        }
    }

    pub fn solution_name(&self) -> &str {
        &self.visual_studio_solution_name
    }

    pub fn project_name(&self) -> &str {
        &self.twincat_project_name
    }

    pub fn static_analyzer_errors(&self) -> &[BuildError] {
        &self.static_analyzer_errors
    }

    pub fn other_errors(&self) -> &[BuildError] {
        &self.other_errors
    }

    /// Static-analysis errors first, then the rest.
    pub fn all_errors(&self) -> impl Iterator<Item = &BuildError> {
        self.static_analyzer_errors
            .iter()
            .chain(self.other_errors.iter())
    }

    /// Pretty-printed native JSON report.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
