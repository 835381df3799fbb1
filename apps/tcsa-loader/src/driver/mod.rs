//! Build drivers: clean + build a solution and hand back the IDE error list.
//!
//! - `devenv`: runs the IDE's command-line front end and parses its output.
//! - `error-list`: reads an error list exported as JSON by another tool.

pub mod devenv;
pub mod error_list;

use crate::error::{Error, Result};
use crate::models::RawBuildError;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// What a driver needs to know about the build.
pub struct BuildRequest<'a> {
    pub solution: &'a Path,
    pub project: &'a Path,
    pub vs_version: &'a str,
    pub tc_version: &'a str,
}

/// A source of IDE error lists. Implementations release whatever they
/// acquired (child processes, handles) before returning, on error paths too.
pub trait BuildDriver {
    fn name(&self) -> &'static str;

    fn build(&mut self, request: &BuildRequest<'_>) -> Result<Vec<RawBuildError>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKind {
    Devenv,
    ErrorList,
}

impl FromStr for DriverKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "devenv" => Ok(DriverKind::Devenv),
            "error-list" | "errorlist" | "error_list" => Ok(DriverKind::ErrorList),
            other => Err(Error::Config(format!(
                "unknown driver '{}' (expected devenv|error-list)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
/// Resolved driver settings (see `config::Effective`).
pub struct DriverSettings {
    pub kind: DriverKind,
    pub devenv: PathBuf,
    pub build_configuration: Option<String>,
    pub error_list: Option<PathBuf>,
}

/// Instantiate the configured driver.
pub fn make_driver(settings: &DriverSettings) -> Result<Box<dyn BuildDriver>> {
    match settings.kind {
        DriverKind::Devenv => Ok(Box::new(devenv::DevenvDriver::new(
            settings.devenv.clone(),
            settings.build_configuration.clone(),
        ))),
        DriverKind::ErrorList => {
            let path = settings.error_list.clone().ok_or_else(|| {
                Error::Config("the error-list driver needs --error-list <file>".into())
            })?;
            Ok(Box::new(error_list::ErrorListDriver::new(path)))
        }
    }
}
