//! Process exit codes reported to the calling CI system.
//!
//! The values are part of the CI contract and must not change.

use crate::models::{BuildError, ErrorLevel};

pub const RETURN_SUCCESSFULL: i32 = 0;
pub const RETURN_ERROR: i32 = 1;
pub const RETURN_UNSTABLE: i32 = 2;

/// Map static-analysis errors to an exit code: any High fails the build,
/// any Medium marks it unstable, anything else succeeds.
pub fn exit_code(static_analyzer_errors: &[BuildError]) -> i32 {
    if static_analyzer_errors
        .iter()
        .any(|e| e.error_level == ErrorLevel::High)
    {
        RETURN_ERROR
    } else if static_analyzer_errors
        .iter()
        .any(|e| e.error_level == ErrorLevel::Medium)
    {
        RETURN_UNSTABLE
    } else {
        RETURN_SUCCESSFULL
    }
}
