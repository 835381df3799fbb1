//! Version extraction from solution/project files and the TwinCAT version gate.
//!
//! - Visual Studio version: `VisualStudioVersion = 17.0` line of the `.sln`.
//! - TwinCAT version: `TcVersion="3.1.4024.0"` attribute of the `.tsproj`.
//!
//! Versions compare component-wise as integers; the shorter sequence is
//! padded with zeros on the right, so `3.1` equals `3.1.0.0`.

use crate::error::{Error, Result};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

/// First TwinCAT release that ships the TE1200 static analysis.
pub const MIN_TC_VERSION_FOR_SC_ANALYSIS: &str = "3.1.4022.0";

static VS_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^VisualStudioVersion\s*=\s*(\d+\.\d+)").expect("valid VS version regex")
});

// Stops at the closing quote so trailing attributes on the same line are not captured.
static TC_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"TcVersion\s*=\s*"(\d[^"]*)""#).expect("valid TcVersion regex")
});

#[derive(Debug, Clone)]
/// A dotted version such as `3.1.4024.0`.
pub struct DottedVersion {
    parts: Vec<u64>,
}

impl DottedVersion {
    fn component(&self, i: usize) -> u64 {
        self.parts.get(i).copied().unwrap_or(0)
    }
}

impl FromStr for DottedVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidVersion(s.to_string()));
        }
        let parts = trimmed
            .split('.')
            .map(|p| p.parse::<u64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| Error::InvalidVersion(s.to_string()))?;
        Ok(Self { parts })
    }
}

impl fmt::Display for DottedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .parts
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(".");
        f.write_str(&joined)
    }
}

impl Ord for DottedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for DottedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DottedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DottedVersion {}

/// Extract the Visual Studio version (`major.minor`) from solution text.
pub fn find_vs_version(solution_text: &str) -> Option<String> {
    VS_VERSION_RE
        .captures(solution_text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract the TwinCAT version string from project text.
pub fn find_tc_version(project_text: &str) -> Option<String> {
    TC_VERSION_RE
        .captures(project_text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Read a solution file and return its Visual Studio version.
pub fn vs_version_from_file(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)?;
    let version = find_vs_version(&text).ok_or_else(|| Error::VersionNotFound {
        what: "Visual Studio version",
        path: path.to_path_buf(),
    })?;
    tracing::info!(%version, "In Visual Studio solution file, found visual studio version");
    Ok(version)
}

/// Read a project file and return its TwinCAT version.
pub fn tc_version_from_file(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)?;
    let version = find_tc_version(&text).ok_or_else(|| Error::VersionNotFound {
        what: "TcVersion",
        path: path.to_path_buf(),
    })?;
    tracing::info!(%version, "In TwinCAT project file, found version");
    Ok(version)
}

/// Fail unless `detected` is at least `minimum`.
pub fn ensure_supported(detected: &str, minimum: &str) -> Result<DottedVersion> {
    let found: DottedVersion = detected.parse()?;
    let min: DottedVersion = minimum.parse()?;
    if found < min {
        return Err(Error::UnsupportedVersion {
            detected: detected.to_string(),
            minimum: minimum.to_string(),
        });
    }
    Ok(found)
}
