//! Error type shared by every stage of the loader.
//!
//! All variants are terminal for a run: the binary prints them and exits
//! with [`crate::exit::RETURN_ERROR`].

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// An input file named on the command line or in `tcsa.toml` is missing.
    #[error("{what} {} does not exist", .path.display())]
    MissingFile { what: &'static str, path: PathBuf },

    /// The version attribute was not found in a solution/project file.
    #[error("did not find {what} in {}", .path.display())]
    VersionNotFound { what: &'static str, path: PathBuf },

    /// A version string was found but is not a dotted integer sequence.
    #[error("invalid version string '{0}'")]
    InvalidVersion(String),

    /// The detected TwinCAT version predates static analysis support.
    #[error(
        "the detected TwinCAT version {detected} does not support TE1200 static code analysis; \
         the minimum version that supports TE1200 is {minimum}"
    )]
    UnsupportedVersion { detected: String, minimum: String },

    #[error("configuration error: {0}")]
    Config(String),

    /// The build driver could not produce an error list.
    #[error("automation error: {message}")]
    Automation {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn automation(message: impl Into<String>) -> Self {
        Self::Automation {
            message: message.into(),
            source: None,
        }
    }

    pub fn automation_io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Automation {
            message: message.into(),
            source: Some(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
