//! External command execution.
//!
//! Version queries and cache refreshes shell out to external tools. Both go
//! through [`CommandExecutor`] so tests can replay canned output instead of
//! spawning processes.

use crate::error::{ArtifactError, Result};
use log::debug;
use std::process::{Command, Output};

/// Abstraction for running external commands.
pub trait CommandExecutor {
    /// Runs a command with arguments and returns the captured output.
    ///
    /// # Errors
    ///
    /// Returns any I/O errors encountered while spawning or running the command.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use flutter_artifacts::command::{CommandExecutor, SystemCommandExecutor};
    ///
    /// let executor = SystemCommandExecutor;
    /// let output = executor.run("flutter", &["--version"])?;
    /// assert!(output.status.success());
    /// # Ok::<(), flutter_artifacts::error::ArtifactError>(())
    /// ```
    fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        debug!("running {program} {}", args.join(" "));
        Command::new(program)
            .args(args)
            .output()
            .map_err(ArtifactError::from)
    }
}

/// Run `command` (program followed by leading arguments) with `extra_args`
/// appended, failing with [`ArtifactError::ToolFailed`] on a non-zero exit.
///
/// Returns the captured stdout, lossily decoded and trimmed.
///
/// # Errors
///
/// Returns [`ArtifactError::ToolFailed`] if `command` is empty or the process
/// exits unsuccessfully, and propagates spawn failures from the executor.
pub fn run_checked(
    executor: &dyn CommandExecutor,
    tool: &'static str,
    command: &[String],
    extra_args: &[&str],
) -> Result<String> {
    let (program, leading) = command.split_first().ok_or_else(|| ArtifactError::ToolFailed {
        tool,
        message: "no command configured".to_owned(),
    })?;

    let args: Vec<&str> = leading
        .iter()
        .map(String::as_str)
        .chain(extra_args.iter().copied())
        .collect();
    let output = executor.run(program, &args)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = match stderr.trim() {
            "" => format!("exited with {}", output.status),
            trimmed => trimmed.to_owned(),
        };
        return Err(ArtifactError::ToolFailed { tool, message });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
}
