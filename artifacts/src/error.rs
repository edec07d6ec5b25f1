//! Error types for artifact resolution and extraction.
//!
//! Every failure in this crate is surfaced to the immediate caller as an
//! [`ArtifactError`]. Variants carry enough context (searched directory,
//! candidate list, failing tool) for the caller to render actionable output.

use crate::extraction::DecompressionError;
use camino::Utf8PathBuf;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving, extracting, or versioning artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// No file in the searched directory matched the expected name.
    #[error("artifact {expected_name} not found in {searched_directory}")]
    ArtifactNotFound {
        /// The file name the locator was asked to find.
        expected_name: String,
        /// The directory that was searched.
        searched_directory: Utf8PathBuf,
    },

    /// More than one file matched the expected name after normalization.
    #[error(
        "multiple artifacts found in {searched_directory}:{}",
        format_candidates(.candidates)
    )]
    MultipleArtifactsFound {
        /// The directory that was searched.
        searched_directory: Utf8PathBuf,
        /// Every matching file, sorted by path.
        candidates: Vec<Utf8PathBuf>,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An external tool (cache refresh, version query) failed.
    #[error("{tool} failed: {message}")]
    ToolFailed {
        /// Name of the failing tool.
        tool: &'static str,
        /// Description of the failure, usually the tool's stderr.
        message: String,
    },

    /// The decompression operation failed.
    #[error(transparent)]
    Decompression(#[from] DecompressionError),

    /// A flavor, package identifier, or build number was malformed.
    #[error("invalid {kind} \"{value}\": {reason}")]
    InvalidIdentifier {
        /// Which kind of identifier was rejected.
        kind: &'static str,
        /// The rejected value.
        value: String,
        /// Description of the violated constraint.
        reason: String,
    },

    /// No Flutter project was found above the starting directory.
    #[error("no pubspec.yaml found in {start} or any parent directory")]
    ProjectNotFound {
        /// Directory the search started from.
        start: Utf8PathBuf,
    },

    /// The tool configuration file could not be read or parsed.
    #[error("invalid configuration at {path}: {reason}")]
    InvalidConfig {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// A filesystem path could not be represented as UTF-8.
    #[error("path is not valid UTF-8: {}", .path.display())]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// Test stub received an unexpected or mismatched command invocation.
    #[cfg(any(test, feature = "test-support"))]
    #[error("stub mismatch: {message}")]
    StubMismatch {
        /// Description of what was expected versus what was received.
        message: String,
    },
}

fn format_candidates(candidates: &[Utf8PathBuf]) -> String {
    candidates
        .iter()
        .map(|candidate| format!("\n  {candidate}"))
        .collect()
}

/// Result type alias using [`ArtifactError`].
pub type Result<T> = std::result::Result<T, ArtifactError>;
