//! Shared test utilities for the artifacts crate.

use crate::command::CommandExecutor;
use crate::error::{ArtifactError, Result};
use std::collections::VecDeque;
use std::process::{ExitStatus, Output};
use std::sync::{Mutex, PoisonError};

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates an `ExitStatus` from an exit code (Windows implementation).
#[cfg(windows)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code.unsigned_abs())
}

/// Creates a successful command `Output` with the given stdout.
#[must_use]
pub fn stdout_output(stdout: &str) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.as_bytes().to_vec(),
        stderr: Vec::new(),
    }
}

/// Creates a successful command `Output` with empty stdout and stderr.
#[must_use]
pub fn success_output() -> Output {
    stdout_output("")
}

/// Creates a failed command `Output` with the given stderr message.
#[must_use]
pub fn failure_output(stderr: &str) -> Output {
    Output {
        status: exit_status(1),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// Represents an expected command invocation for testing.
#[derive(Debug)]
pub struct ExpectedCall {
    /// The command to execute (e.g., "bundletool").
    pub cmd: &'static str,
    /// The arguments to pass to the command.
    pub args: Vec<&'static str>,
    /// The result to return when this command is invoked.
    pub result: Result<Output>,
}

/// A stub implementation of `CommandExecutor` for testing.
///
/// Replays expected command invocations in order and returns their
/// predefined results. An unexpected or mismatched invocation yields
/// [`ArtifactError::StubMismatch`]. The queue sits behind a mutex so the
/// stub can back clients shared across threads.
#[derive(Debug)]
pub struct StubExecutor {
    expected: Mutex<VecDeque<ExpectedCall>>,
}

impl StubExecutor {
    /// Creates a new `StubExecutor` with the given expected calls.
    #[must_use]
    pub fn new(expected: Vec<ExpectedCall>) -> Self {
        Self {
            expected: Mutex::new(expected.into()),
        }
    }

    /// Asserts that all expected command invocations have been consumed.
    ///
    /// # Panics
    ///
    /// Panics if there are remaining expected calls that were not invoked.
    pub fn assert_finished(&self) {
        let remaining = self
            .expected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        assert!(
            remaining == 0,
            "expected no further command invocations, {remaining} remaining"
        );
    }
}

impl CommandExecutor for StubExecutor {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output> {
        let call = self
            .expected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or_else(|| ArtifactError::StubMismatch {
                message: format!("unexpected command invocation: {cmd} {}", args.join(" ")),
            })?;

        if call.cmd != cmd || call.args.as_slice() != args {
            return Err(ArtifactError::StubMismatch {
                message: format!(
                    "expected `{} {}`, got `{cmd} {}`",
                    call.cmd,
                    call.args.join(" "),
                    args.join(" ")
                ),
            });
        }

        call.result
    }
}
