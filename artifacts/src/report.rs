//! Output formatting for command results.
//!
//! Each successful command produces an [`Outcome`], printed on stdout either
//! as a bare value for shell use or as a JSON object for scripting.

use crate::extraction::ExtractedArchive;
use crate::locator::ArtifactMatch;
use crate::version::VersionString;
use serde::Serialize;

/// The result of a successful command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// A located artifact.
    Located {
        /// Path to the artifact.
        path: String,
    },
    /// An extracted library archive.
    Extracted {
        /// Directory holding the extracted contents.
        directory: String,
    },
    /// A resolved bundle version.
    Version {
        /// The composed `{name}+{code}` string.
        version: String,
        /// The version name.
        name: String,
        /// The version code.
        code: String,
    },
}

impl From<&ArtifactMatch> for Outcome {
    fn from(found: &ArtifactMatch) -> Self {
        Self::Located {
            path: found.path().to_string(),
        }
    }
}

impl From<&ExtractedArchive> for Outcome {
    fn from(extracted: &ExtractedArchive) -> Self {
        Self::Extracted {
            directory: extracted.dir().to_string(),
        }
    }
}

impl From<&VersionString> for Outcome {
    fn from(version: &VersionString) -> Self {
        Self::Version {
            version: version.to_string(),
            name: version.name().to_owned(),
            code: version.code().to_owned(),
        }
    }
}

/// Format an outcome as its bare value.
///
/// # Examples
///
/// ```
/// use flutter_artifacts::report::{Outcome, format_human};
/// use flutter_artifacts::version::VersionString;
///
/// let outcome = Outcome::from(&VersionString::new("1.2.3", "17"));
/// assert_eq!(format_human(&outcome), "1.2.3+17");
/// ```
#[must_use]
pub fn format_human(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Located { path } => path.clone(),
        Outcome::Extracted { directory } => directory.clone(),
        Outcome::Version { version, .. } => version.clone(),
    }
}

/// Format an outcome as pretty-printed JSON.
///
/// # Examples
///
/// ```
/// use flutter_artifacts::report::{Outcome, format_json};
///
/// let outcome = Outcome::Located { path: "/app/app-release.aab".to_owned() };
/// let json = format_json(&outcome);
/// assert!(json.contains("\"kind\": \"located\""));
/// ```
#[must_use]
pub fn format_json(outcome: &Outcome) -> String {
    serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_owned())
}
