//! Driver reading an error list exported as JSON.
//!
//! The file holds an array of entries with the IDE's `ErrorItem` property
//! names: `ErrorLevel`, `Description`, `FileName`, `Line`, `Column`, `Project`.
//! `ErrorLevel` is either the level name or the `vsBuildErrorLevel` ordinal.

use super::{BuildDriver, BuildRequest};
use crate::error::{Error, Result};
use crate::models::RawBuildError;
use std::fs;
use std::path::PathBuf;

pub struct ErrorListDriver {
    path: PathBuf,
}

impl ErrorListDriver {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl BuildDriver for ErrorListDriver {
    fn name(&self) -> &'static str {
        "error-list"
    }

    fn build(&mut self, request: &BuildRequest<'_>) -> Result<Vec<RawBuildError>> {
        tracing::debug!(
            solution = %request.solution.display(),
            error_list = %self.path.display(),
            "Loading exported error list"
        );
        let text = fs::read_to_string(&self.path).map_err(|e| {
            Error::automation_io(
                format!("cannot read error list {}", self.path.display()),
                e,
            )
        })?;
        serde_json::from_str(&text).map_err(|e| {
            Error::automation(format!(
                "error list {} is not valid: {}",
                self.path.display(),
                e
            ))
        })
    }
}
