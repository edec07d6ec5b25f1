//! Release version resolution for app bundles.
//!
//! A bundle's version is reported as `{versionName}+{versionCode}`, read from
//! its Android manifest by an external build tool. The two queries are
//! independent, so they run on separate threads after the tool cache has
//! been refreshed. The first failure wins; the other query is left to finish
//! on its own and its result is discarded.

use crate::diagnostics::Diagnostics;
use crate::error::{ArtifactError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::trace;
use std::fmt;
use std::sync::{Arc, mpsc};
use std::thread;

/// Refreshes the cached tooling the version queries depend on.
#[cfg_attr(test, mockall::automock)]
pub trait CacheManager {
    /// Bring every cached artifact up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if the refresh fails. Callers do not retry.
    fn update_all(&self) -> Result<()>;
}

/// Reads version metadata from an app bundle.
#[cfg_attr(test, mockall::automock)]
pub trait BuildToolClient: Send + Sync {
    /// Return the human-readable version name, e.g. `1.2.3`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tool cannot be run or reports a failure.
    fn version_name(&self, bundle: &Utf8Path) -> Result<String>;

    /// Return the numeric version code, e.g. `17`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tool cannot be run or reports a failure.
    fn version_code(&self, bundle: &Utf8Path) -> Result<String>;
}

/// A composed `{name}+{code}` version.
///
/// # Examples
///
/// ```
/// use flutter_artifacts::version::VersionString;
///
/// let version = VersionString::new("1.2.3", "17");
/// assert_eq!(version.to_string(), "1.2.3+17");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionString {
    name: String,
    code: String,
}

impl VersionString {
    /// Compose a version from its name and code.
    #[must_use]
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }

    /// Return the version name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the version code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.name, self.code)
    }
}

#[derive(Debug, Clone, Copy)]
enum VersionPart {
    Name,
    Code,
}

impl fmt::Display for VersionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("version name"),
            Self::Code => f.write_str("version code"),
        }
    }
}

/// Resolves a bundle's version through the injected cache and tool client.
pub struct VersionResolver<'a> {
    cache: &'a dyn CacheManager,
    tools: Arc<dyn BuildToolClient>,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> VersionResolver<'a> {
    /// Create a resolver over the given collaborators.
    #[must_use]
    pub fn new(
        cache: &'a dyn CacheManager,
        tools: Arc<dyn BuildToolClient>,
        diagnostics: &'a dyn Diagnostics,
    ) -> Self {
        Self {
            cache,
            tools,
            diagnostics,
        }
    }

    /// Resolve the `{name}+{code}` version of the bundle at `bundle`.
    ///
    /// # Errors
    ///
    /// Returns the cache refresh error if the refresh fails, otherwise the
    /// first error reported by either version query. A query worker that
    /// dies without reporting yields [`ArtifactError::ToolFailed`], and one
    /// that cannot be started yields [`ArtifactError::Io`].
    pub fn resolve_version(&self, bundle: &Utf8Path) -> Result<VersionString> {
        self.diagnostics.progress("Updating tool cache");
        self.cache.update_all()?;

        self.diagnostics
            .progress(&format!("Reading version from {bundle}"));

        let (tx, rx) = mpsc::channel();
        for part in [VersionPart::Name, VersionPart::Code] {
            spawn_query(part, Arc::clone(&self.tools), bundle.to_owned(), tx.clone())?;
        }
        drop(tx);

        let mut name = None;
        let mut code = None;
        for (part, result) in rx {
            let value = result?;
            trace!("{part} resolved to {value}");
            match part {
                VersionPart::Name => name = Some(value),
                VersionPart::Code => code = Some(value),
            }
            if name.is_some() && code.is_some() {
                break;
            }
        }

        match (name, code) {
            (Some(name), Some(code)) => {
                let version = VersionString::new(name, code);
                self.diagnostics.detail(&format!("Resolved version {version}"));
                Ok(version)
            }
            _ => Err(ArtifactError::ToolFailed {
                tool: "version resolver",
                message: "a version query terminated without a result".to_owned(),
            }),
        }
    }
}

type QueryResult = (VersionPart, Result<String>);

fn spawn_query(
    part: VersionPart,
    tools: Arc<dyn BuildToolClient>,
    bundle: Utf8PathBuf,
    tx: mpsc::Sender<QueryResult>,
) -> Result<()> {
    thread::Builder::new()
        .name(format!("{part} query"))
        .spawn(move || {
            let result = match part {
                VersionPart::Name => tools.version_name(&bundle),
                VersionPart::Code => tools.version_code(&bundle),
            };
            if tx.send((part, result)).is_err() {
                trace!("resolution already finished; discarding {part} result");
            }
        })?;
    Ok(())
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
