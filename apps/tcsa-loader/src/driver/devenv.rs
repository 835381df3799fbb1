//! Driver running the IDE command-line front end (`devenv.com`).
//!
//! `devenv.com <solution> /Rebuild [configuration]` cleans and builds the
//! solution and prints MSBuild-style diagnostics:
//!
//! ```text
//! 1>------ Rebuild All started: Project: Plc, Configuration: Release TwinCAT RT (x64) ------
//! 1>C:\src\Plc\POUs\MAIN.TcPOU(12,3): warning SA0033: Unused variable 'x'
//! ```
//!
//! The `N>` prefix identifies the build node; banner lines map nodes to
//! project names. `error` maps to High, `warning` to Medium and `message`
//! to Low.

use super::{BuildDriver, BuildRequest};
use crate::error::{Error, Result};
use crate::models::{ErrorLevel, RawBuildError};
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;
use std::sync::LazyLock;

static BANNER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<node>\d+)>)?-+\s*(?:Rebuild All|Build|Clean) started: Project: (?P<project>[^,]+),")
        .expect("valid banner regex")
});

// The file group may contain parentheses; the `(line[,col]): kind` suffix anchors it.
static DIAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?P<node>\d+)>)?\s*(?P<file>.+?)\((?P<line>\d+)(?:,(?P<col>\d+))?(?:,\d+,\d+)?\)\s*:\s*(?P<kind>error|warning|message)\s*(?P<text>.*)$",
    )
    .expect("valid diagnostic regex")
});

pub struct DevenvDriver {
    devenv: PathBuf,
    configuration: Option<String>,
}

impl DevenvDriver {
    pub fn new(devenv: PathBuf, configuration: Option<String>) -> Self {
        Self {
            devenv,
            configuration,
        }
    }
}

fn level_of(kind: &str) -> ErrorLevel {
    match kind {
        "error" => ErrorLevel::High,
        "warning" => ErrorLevel::Medium,
        _ => ErrorLevel::Low,
    }
}

/// Parse devenv output into error list entries, in output order.
pub fn parse_output(output: &str) -> Vec<RawBuildError> {
    let mut projects: HashMap<String, String> = HashMap::new();
    let mut last_project = String::new();
    let mut items = Vec::new();
    for line in output.lines() {
        let line = line.trim_end();
        if let Some(c) = BANNER_RE.captures(line) {
            let project = c["project"].trim().to_string();
            if let Some(node) = c.name("node") {
                projects.insert(node.as_str().to_string(), project.clone());
            }
            last_project = project;
            continue;
        }
        let Some(c) = DIAG_RE.captures(line) else {
            continue;
        };
        let project = c
            .name("node")
            .and_then(|n| projects.get(n.as_str()))
            .cloned()
            .unwrap_or_else(|| last_project.clone());
        items.push(RawBuildError {
            error_level: level_of(&c["kind"]),
            description: c["text"].trim().to_string(),
            file_name: c["file"].trim().to_string(),
            line: c["line"].parse().unwrap_or(0),
            column: c
                .name("col")
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0),
            project,
        });
    }
    items
}

impl BuildDriver for DevenvDriver {
    fn name(&self) -> &'static str {
        "devenv"
    }

    fn build(&mut self, request: &BuildRequest<'_>) -> Result<Vec<RawBuildError>> {
        let mut cmd = Command::new(&self.devenv);
        cmd.arg(request.solution).arg("/Rebuild");
        if let Some(cfg) = &self.configuration {
            cmd.arg(cfg);
        }
        tracing::debug!(
            devenv = %self.devenv.display(),
            vs_version = request.vs_version,
            tc_version = request.tc_version,
            project = %request.project.display(),
            "Running IDE build"
        );
        // `output` waits for the child, so nothing is left running on any path.
        let out = cmd.output().map_err(|e| {
            Error::automation_io(
                format!(
                    "unable to start {} for Visual Studio {}",
                    self.devenv.display(),
                    request.vs_version
                ),
                e,
            )
        })?;
        if !out.status.success() {
            tracing::debug!(status = ?out.status.code(), "IDE build finished with failures");
        }
        let mut text = String::from_utf8_lossy(&out.stdout).to_string();
        text.push('\n');
        text.push_str(&String::from_utf8_lossy(&out.stderr));
        let items = parse_output(&text);
        tracing::debug!(count = items.len(), "Collected error list entries");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Microsoft Visual Studio 2022 Version 17.5.4.
1>------ Rebuild All started: Project: Plc, Configuration: Release TwinCAT RT (x64) ------
2>------ Rebuild All started: Project: Lib, Configuration: Release TwinCAT RT (x64) ------
1>C:\\src\\Plc\\POUs\\MAIN.TcPOU(12,3): warning SA0033: Unused variable 'x'
2>C:\\src\\Lib\\FB_A.TcPOU(7): error C0077: Unknown type: 'FOO'
1>C:\\src\\Plc\\GVLs\\GVL.TcGVL(2,1): message SA0150: Violation of lower or upper limits
1>Build succeeded.
========== Rebuild All: 1 succeeded, 1 failed, 0 skipped ==========
";

    #[test]
    fn test_parse_maps_nodes_to_projects() {
        let items = parse_output(SAMPLE);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].project, "Plc");
        assert_eq!(items[0].file_name, "C:\\src\\Plc\\POUs\\MAIN.TcPOU");
        assert_eq!(items[0].line, 12);
        assert_eq!(items[0].column, 3);
        assert_eq!(items[0].error_level, ErrorLevel::Medium);
        assert_eq!(items[0].description, "SA0033: Unused variable 'x'");

        assert_eq!(items[1].project, "Lib");
        assert_eq!(items[1].column, 0);
        assert_eq!(items[1].error_level, ErrorLevel::High);
        assert_eq!(items[1].description, "C0077: Unknown type: 'FOO'");

        assert_eq!(items[2].error_level, ErrorLevel::Low);
    }

    #[test]
    fn test_parse_without_node_prefix_uses_last_banner() {
        let out = "------ Build started: Project: Plc, Configuration: Debug ------\n\
                   /src/a.TcPOU(1,2): error SA0001: boom\n";
        let items = parse_output(out);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].project, "Plc");
        assert_eq!(items[0].file_name, "/src/a.TcPOU");
    }

    #[test]
    fn test_parse_paths_with_parentheses() {
        let out = "1>C:\\Program Files (x86)\\Proj\\MAIN.TcPOU(12,3): warning SA0033: Unused\n\
                   1>D:\\Plc (2)\\FB_B.TcPOU(4): error SA0001: boom\n";
        let items = parse_output(out);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].file_name, "C:\\Program Files (x86)\\Proj\\MAIN.TcPOU");
        assert_eq!(items[0].line, 12);
        assert_eq!(items[0].column, 3);
        assert_eq!(items[0].description, "SA0033: Unused");
        assert_eq!(items[1].file_name, "D:\\Plc (2)\\FB_B.TcPOU");
        assert_eq!(items[1].line, 4);
        assert_eq!(items[1].error_level, ErrorLevel::High);
    }

    #[test]
    fn test_non_diagnostic_lines_are_ignored() {
        assert!(parse_output("1>Compile complete -- 0 errors, 2 warnings\n").is_empty());
    }

    #[test]
    fn test_missing_devenv_is_automation_error() {
        let mut d = DevenvDriver::new(PathBuf::from("/definitely/not/devenv.com"), None);
        let req = BuildRequest {
            solution: std::path::Path::new("s.sln"),
            project: std::path::Path::new("p.tsproj"),
            vs_version: "17.0",
            tc_version: "3.1.4024.0",
        };
        assert!(matches!(d.build(&req), Err(Error::Automation { .. })));
    }
}
