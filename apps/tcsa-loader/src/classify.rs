//! Classification of raw error list entries.
//!
//! The description is split at its first colon into a code token and a
//! message (`"SA0033: Unused variable 'x'"` → `SA0033` / `Unused variable 'x'`).
//! Codes starting with `SA` come from the TE1200 static analysis and land in
//! the static-analysis bucket; everything else is an "other" error.

use crate::models::{BuildError, Classified, FileLocation, RawBuildError};
use std::path::Path;

/// Split a description into `(code, message)` at the first colon.
///
/// Without a colon the code is empty and the message is returned verbatim.
/// With a colon the message is the trimmed remainder, further colons included.
pub fn split_code(description: &str) -> (String, String) {
    match description.split_once(':') {
        Some((code, rest)) => (code.to_string(), rest.trim().to_string()),
        None => (String::new(), description.to_string()),
    }
}

/// Express `file_name` relative to the solution directory when it lies below it.
///
/// Both `\` and `/` separate components, whatever the host platform. A
/// solution at a drive or filesystem root (`C:\M.sln`, `/M.sln`) strips the
/// root itself.
pub fn relative_file_name(file_name: &str, solution_path: Option<&Path>) -> String {
    let Some(solution) = solution_path.map(|p| p.to_string_lossy()) else {
        return file_name.to_string();
    };
    let Some(sep) = solution.rfind(['\\', '/']) else {
        return file_name.to_string();
    };
    file_name
        .strip_prefix(&solution[..sep])
        .and_then(|rest| rest.strip_prefix(['\\', '/']))
        .map(str::to_string)
        .unwrap_or_else(|| file_name.to_string())
}

/// Classify one raw record. Pure; the bucket never changes afterwards.
pub fn classify(raw: &RawBuildError, solution_path: Option<&Path>) -> Classified {
    let (code, description) = split_code(&raw.description);
    let error = BuildError {
        error_level: raw.error_level,
        location: FileLocation {
            project: raw.project.clone(),
            file_name: relative_file_name(&raw.file_name, solution_path),
            line: raw.line,
            column: raw.column,
        },
        code,
        description,
    };
    if error.is_static_analysis() {
        Classified::StaticAnalysis(error)
    } else {
        Classified::Other(error)
    }
}
