//! Process exit codes.
//! These codes are part of the public contract; CI steps branch on them.

use testcheck_core::CheckError;
use testcheck_github::PublishError;

pub const SUCCESS: i32 = 0;
pub const TESTS_FAILED: i32 = 1; // At least one failed test (and failures not ignored)
pub const CONFIG_ERROR: i32 = 2; // Missing or invalid invocation parameters
pub const INFRA_ERROR: i32 = 3; // Report parsing, file system or API failure

/// Exit code for a completed invocation with `failed` failing tests.
pub fn from_failed(failed: u64, ignore_failures: bool) -> i32 {
    if failed > 0 && !ignore_failures {
        TESTS_FAILED
    } else {
        SUCCESS
    }
}

/// Exit code for an invocation that ended in `err`.
pub fn for_error(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<CheckError>() {
        return e.exit_code();
    }
    if let Some(e) = err.downcast_ref::<PublishError>() {
        return e.exit_code();
    }
    INFRA_ERROR
}
