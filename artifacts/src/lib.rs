//! Flutter build artifact resolution.
//!
//! This crate finds the release outputs a Flutter Android build leaves behind
//! (app bundles, APKs, and module library archives), tolerating the filename
//! drift that build flavors introduce. It also extracts library archives and
//! reads bundle versions through bundletool. It backs the `flutter-artifacts`
//! CLI binary and can be used directly by release tooling.
//!
//! # Modules
//!
//! - [`bundletool`] - Bundle manifest queries via bundletool
//! - [`cache`] - Command-backed tool cache refresh
//! - [`canonical`] - Filename normalization for tolerant matching
//! - [`cli`] - Command-line argument definitions
//! - [`command`] - External command execution
//! - [`config`] - Tool configuration loaded from `flutter_artifacts.toml`
//! - [`diagnostics`] - Progress and detail reporting sinks
//! - [`error`] - Error types
//! - [`extraction`] - Library archive extraction
//! - [`locator`] - Single-artifact lookup within an output directory
//! - [`paths`] - Output path derivation per build variant
//! - [`project`] - Flutter project root discovery
//! - [`report`] - Output formatting for command results
//! - [`variant`] - Build variants and validated identifiers
//! - [`version`] - Concurrent bundle version resolution

pub mod bundletool;
pub mod cache;
pub mod canonical;
pub mod cli;
pub mod command;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extraction;
pub mod locator;
pub mod paths;
pub mod project;
pub mod report;
pub mod variant;
pub mod version;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
