//! Shared data models: raw IDE error records and their classified form.
//!
//! - `RawBuildError`: one entry of the IDE error list as a driver returns it.
//! - `BuildError`: the classified error carried by reports.
//! - `Classified`: the two-branch classifier result (static analysis or other).

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
/// Error level of an error list entry. Discriminants follow the IDE's
/// `vsBuildErrorLevel` values.
pub enum ErrorLevel {
    Low = 1,
    Medium = 2,
    High = 4,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorLevelRepr {
    Ordinal(u64),
    Name(String),
}

impl<'de> Deserialize<'de> for ErrorLevel {
    /// Accepts the level name (any case) or the IDE ordinal `1|2|4`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match ErrorLevelRepr::deserialize(deserializer)? {
            ErrorLevelRepr::Ordinal(n) => ErrorLevel::from_ordinal(n)
                .ok_or_else(|| D::Error::custom(format!("unknown error level {} (expected 1, 2 or 4)", n))),
            ErrorLevelRepr::Name(s) => ErrorLevel::from_name(&s)
                .ok_or_else(|| D::Error::custom(format!("unknown error level '{}' (expected Low|Medium|High)", s))),
        }
    }
}

impl ErrorLevel {
    pub fn from_ordinal(n: u64) -> Option<Self> {
        match n {
            1 => Some(ErrorLevel::Low),
            2 => Some(ErrorLevel::Medium),
            4 => Some(ErrorLevel::High),
            _ => None,
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        [ErrorLevel::Low, ErrorLevel::Medium, ErrorLevel::High]
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorLevel::Low => "Low",
            ErrorLevel::Medium => "Medium",
            ErrorLevel::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
/// An error list entry as produced by a build driver. Read-only input.
pub struct RawBuildError {
    pub error_level: ErrorLevel,
    pub description: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
    #[serde(default)]
    pub project: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
/// Source location of a classified error.
pub struct FileLocation {
    pub project: String,
    /// Relative to the solution directory when the IDE reported a path below it.
    pub file_name: String,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
/// A classified build error. Field order is the native report's key order.
pub struct BuildError {
    pub error_level: ErrorLevel,
    pub location: FileLocation,
    pub code: String,
    pub description: String,
}

impl BuildError {
    /// True when the code carries the TE1200 static-analysis prefix.
    pub fn is_static_analysis(&self) -> bool {
        self.code.starts_with("SA")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Classifier output; the bucket is decided once, when the raw record is read.
pub enum Classified {
    StaticAnalysis(BuildError),
    Other(BuildError),
}

impl Classified {
    pub fn error(&self) -> &BuildError {
        match self {
            Classified::StaticAnalysis(e) | Classified::Other(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_level_accepts_names_and_ordinals() {
        let levels: Vec<ErrorLevel> = serde_json::from_str(r#"["High", "medium", 1, 2, 4]"#).unwrap();
        assert_eq!(
            levels,
            vec![
                ErrorLevel::High,
                ErrorLevel::Medium,
                ErrorLevel::Low,
                ErrorLevel::Medium,
                ErrorLevel::High
            ]
        );
    }

    #[test]
    fn test_error_level_rejects_unknown_values() {
        assert!(serde_json::from_str::<ErrorLevel>("3").is_err());
        assert!(serde_json::from_str::<ErrorLevel>(r#""Critical""#).is_err());
    }

    #[test]
    fn test_error_level_serializes_as_name() {
        assert_eq!(serde_json::to_string(&ErrorLevel::Medium).unwrap(), r#""Medium""#);
    }
}
