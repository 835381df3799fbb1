//! Configuration discovery and effective settings resolution.
//!
//! The loader reads `tcsa.toml|yaml|yml` from the repository root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `output`: `human`
//! - `report.format`: `Default`
//! - `driver.kind`: `devenv`
//! - `driver.devenv`: `devenv.com`
//!
//! Overrides precedence: CLI > config file > defaults. Relative paths taken
//! from the config file are resolved against the repository root.

use crate::driver::{DriverKind, DriverSettings};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_FILES: [&str; 3] = ["tcsa.toml", "tcsa.yaml", "tcsa.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Report section under `[report]`.
pub struct ReportCfg {
    pub path: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Driver section under `[driver]`.
pub struct DriverCfg {
    pub kind: Option<String>,
    pub devenv: Option<String>,
    /// Solution configuration passed to devenv, e.g. `Release|TwinCAT RT (x64)`.
    pub configuration: Option<String>,
    pub error_list: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `tcsa.toml|yaml`.
pub struct LoaderConfig {
    pub solution: Option<String>,
    pub project: Option<String>,
    pub output: Option<String>,
    #[serde(default)]
    pub report: Option<ReportCfg>,
    #[serde(default)]
    pub driver: Option<DriverCfg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Format of the report file.
pub enum ReportFormat {
    Default,
    Gitlab,
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(ReportFormat::Default),
            "gitlab" => Ok(ReportFormat::Gitlab),
            other => Err(Error::Config(format!(
                "unknown report format '{}' (expected Default|Gitlab)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Console output mode.
pub enum OutputMode {
    Human,
    Json,
}

impl FromStr for OutputMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(OutputMode::Human),
            "json" => Ok(OutputMode::Json),
            other => Err(Error::Config(format!(
                "unknown output mode '{}' (expected human|json)",
                other
            ))),
        }
    }
}

#[derive(Debug, Default, Clone)]
/// Values given on the command line; `None` falls back to the config file.
pub struct Overrides {
    pub repo_root: Option<String>,
    pub solution: Option<String>,
    pub project: Option<String>,
    pub report_path: Option<String>,
    pub report_format: Option<String>,
    pub output: Option<String>,
    pub driver: Option<String>,
    pub devenv: Option<String>,
    pub configuration: Option<String>,
    pub error_list: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the `analyze` command.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub solution: Option<PathBuf>,
    pub project: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub report_format: ReportFormat,
    pub output: OutputMode,
    pub driver: DriverSettings,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `tcsa.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `LoaderConfig` from `tcsa.toml` or `tcsa.yaml|yml` if present.
pub fn load_config(root: &Path) -> Result<Option<LoaderConfig>> {
    let toml_path = root.join("tcsa.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path)?;
        let cfg: LoaderConfig = toml::from_str(&s)
            .map_err(|e| Error::Config(format!("{}: {}", toml_path.display(), e)))?;
        return Ok(Some(cfg));
    }
    for yml in ["tcsa.yaml", "tcsa.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p)?;
            let cfg: LoaderConfig = serde_yaml::from_str(&s)
                .map_err(|e| Error::Config(format!("{}: {}", p.display(), e)))?;
            return Ok(Some(cfg));
        }
    }
    Ok(None)
}

fn from_cli_or_config(cli: Option<&String>, cfg: Option<String>, root: &Path) -> Option<PathBuf> {
    match cli {
        Some(s) => Some(PathBuf::from(s)),
        None => cfg.map(|s| root.join(s)),
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &Overrides) -> Result<Effective> {
    let start = PathBuf::from(cli.repo_root.as_deref().unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();
    let report_cfg = cfg.report.unwrap_or_default();
    let driver_cfg = cfg.driver.unwrap_or_default();

    let solution = from_cli_or_config(cli.solution.as_ref(), cfg.solution, &repo_root);
    let project = from_cli_or_config(cli.project.as_ref(), cfg.project, &repo_root);
    let report_path = from_cli_or_config(cli.report_path.as_ref(), report_cfg.path, &repo_root)
        .filter(|p| !p.as_os_str().is_empty());

    let report_format = cli
        .report_format
        .clone()
        .or(report_cfg.format)
        .map(|s| s.parse::<ReportFormat>())
        .transpose()?
        .unwrap_or(ReportFormat::Default);

    let output = cli
        .output
        .clone()
        .or(cfg.output)
        .map(|s| s.parse::<OutputMode>())
        .transpose()?
        .unwrap_or(OutputMode::Human);

    let kind = cli
        .driver
        .clone()
        .or(driver_cfg.kind)
        .map(|s| s.parse::<DriverKind>())
        .transpose()?
        .unwrap_or(DriverKind::Devenv);

    // devenv is looked up on PATH unless the value names a location
    let devenv = cli
        .devenv
        .clone()
        .map(PathBuf::from)
        .or_else(|| {
            driver_cfg.devenv.map(|s| {
                if s.contains(['/', '\\']) {
                    repo_root.join(s)
                } else {
                    PathBuf::from(s)
                }
            })
        })
        .unwrap_or_else(|| PathBuf::from("devenv.com"));

    let driver = DriverSettings {
        kind,
        devenv,
        build_configuration: cli.configuration.clone().or(driver_cfg.configuration),
        error_list: from_cli_or_config(cli.error_list.as_ref(), driver_cfg.error_list, &repo_root),
    };

    Ok(Effective {
        repo_root,
        config_found,
        solution,
        project,
        report_path,
        report_format,
        output,
        driver,
    })
}
