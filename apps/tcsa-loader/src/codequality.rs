//! GitLab CI code quality report.
//!
//! The report is a top-level JSON array of issues:
//!
//! ```json
//! [{ "description": "SA0033: Unused variable", "location": { "path": "POUs/MAIN.TcPOU",
//!    "lines": { "begin": 4 } }, "severity": "major", "fingerprint": "9F3C…" }]
//! ```
//!
//! Issues are identified by their fingerprint alone; the report keeps the
//! first issue of every fingerprint. GitLab uses the fingerprint to track and
//! suppress an issue across pipelines, so its input format is frozen: the
//! fields are concatenated without separators (so `"AB" + "C1"` and
//! `"A" + "BC1"` collide) and hashed with MD5 over ASCII bytes.

use crate::error::Result;
use crate::models::{BuildError, ErrorLevel};
use crate::report::ErrorReport;
use md5::{Digest, Md5};
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Impact of an issue, as understood by GitLab.
pub enum Severity {
    Info,
    Minor,
    Major,
    Critical,
    Blocker,
}

impl Severity {
    /// Token written to the report.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Minor => "minor",
            Severity::Major => "major",
            Severity::Critical => "critical",
            Severity::Blocker => "blocker",
        }
    }

    /// Variant name; this is what goes into the fingerprint.
    pub fn name(self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Minor => "Minor",
            Severity::Major => "Major",
            Severity::Critical => "Critical",
            Severity::Blocker => "Blocker",
        }
    }

    pub fn from_error_level(level: ErrorLevel) -> Self {
        match level {
            ErrorLevel::Low => Severity::Minor,
            ErrorLevel::Medium => Severity::Major,
            ErrorLevel::High => Severity::Critical,
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "minor" => Ok(Severity::Minor),
            "major" => Ok(Severity::Major),
            "critical" => Ok(Severity::Critical),
            "blocker" => Ok(Severity::Blocker),
            other => Err(format!(
                "unknown severity '{}' (expected info|minor|major|critical|blocker)",
                other
            )),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lines {
    pub begin: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Where the issue was found; `path` is relative to the repository.
pub struct Location {
    pub path: String,
    pub lines: Lines,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.path, self.lines.begin)
    }
}

#[derive(Debug, Clone, Serialize)]
/// One code quality issue. Equality and hashing use the fingerprint only.
pub struct Issue {
    description: String,
    location: Location,
    severity: Severity,
    fingerprint: String,
}

impl Issue {
    pub fn new(description: impl Into<String>, location: Location, severity: Severity) -> Self {
        let description = description.into();
        let fingerprint = fingerprint(&description, &location, severity);
        Self {
            description,
            location,
            severity,
            fingerprint,
        }
    }

    pub fn from_build_error(error: &BuildError) -> Self {
        Self::new(
            format!("{}: {}", error.code, error.description),
            Location {
                path: error.location.file_name.clone(),
                lines: Lines {
                    begin: error.location.line,
                },
            },
            Severity::from_error_level(error.error_level),
        )
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl PartialEq for Issue {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint
    }
}

impl Eq for Issue {}

impl Hash for Issue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint.hash(state);
    }
}

// ASCII encoding as GitLab consumers have always seen it: each UTF-16 code
// unit outside ASCII becomes '?'.
fn ascii_bytes(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for ch in s.chars() {
        if ch.is_ascii() {
            out.push(ch as u8);
        } else {
            for _ in 0..ch.len_utf16() {
                out.push(b'?');
            }
        }
    }
    out
}

/// Uppercase hex MD5 of `description + path + line + severity name`.
pub fn fingerprint(description: &str, location: &Location, severity: Severity) -> String {
    let input = format!("{}{}{}", description, location, severity.name());
    let mut h = Md5::new();
    h.update(ascii_bytes(&input));
    hex::encode_upper(h.finalize())
}

/// Issues for every error of the report, static analysis first, first
/// occurrence of each fingerprint kept.
pub fn issues(report: &ErrorReport) -> Vec<Issue> {
    let mut seen: HashSet<Issue> = HashSet::new();
    let mut out = Vec::new();
    for error in report.all_errors() {
        let issue = Issue::from_build_error(error);
        if seen.insert(issue.clone()) {
            out.push(issue);
        }
    }
    out
}

/// Pretty-printed code quality report.
pub fn to_json(report: &ErrorReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(&issues(report))?)
}
