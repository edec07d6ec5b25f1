//! Flutter project detection.
//!
//! A Flutter project is identified by a `pubspec.yaml` file at its root. The
//! root is resolved once per invocation and handed to the path derivation
//! and extraction code through [`ProjectEnvironment`].

use crate::error::{ArtifactError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;

/// File marking the root of a Flutter project.
pub const PUBSPEC_FILE: &str = "pubspec.yaml";

/// Provides the root directory of the current project.
pub trait ProjectEnvironment {
    /// Return the project root.
    fn project_root(&self) -> &Utf8Path;
}

/// A resolved project root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot(Utf8PathBuf);

impl ProjectRoot {
    /// Wrap an already-known project root without checking it.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self(root.into())
    }

    /// Find the nearest directory at or above `start` containing
    /// `pubspec.yaml`.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::ProjectNotFound`] if no ancestor of `start`
    /// contains a pubspec.
    pub fn discover(start: &Utf8Path) -> Result<Self> {
        start
            .ancestors()
            .find(|dir| is_flutter_project(dir))
            .map(|dir| {
                debug!("found Flutter project at {dir}");
                Self(dir.to_owned())
            })
            .ok_or_else(|| ArtifactError::ProjectNotFound {
                start: start.to_owned(),
            })
    }

    /// Discover the project enclosing the current working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be read, is not valid
    /// UTF-8, or is not inside a Flutter project.
    pub fn discover_from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let cwd = Utf8PathBuf::from_path_buf(cwd)
            .map_err(|path| ArtifactError::NonUtf8Path { path })?;
        Self::discover(&cwd)
    }

    /// Return the root as a path.
    #[must_use]
    pub fn as_path(&self) -> &Utf8Path {
        &self.0
    }
}

impl ProjectEnvironment for ProjectRoot {
    fn project_root(&self) -> &Utf8Path {
        &self.0
    }
}

/// Checks whether `dir` contains a `pubspec.yaml` file.
#[must_use]
pub fn is_flutter_project(dir: &Utf8Path) -> bool {
    dir.join(PUBSPEC_FILE).is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let path = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("UTF-8 temp dir");
        (temp, path)
    }

    #[test]
    fn discovers_project_at_start() {
        let (_temp, root) = temp_root();
        std::fs::write(root.join(PUBSPEC_FILE), "name: app\n").expect("write pubspec");

        let project = ProjectRoot::discover(&root).expect("should discover");
        assert_eq!(project.project_root(), root);
    }

    #[test]
    fn discovers_project_from_nested_directory() {
        let (_temp, root) = temp_root();
        std::fs::write(root.join(PUBSPEC_FILE), "name: app\n").expect("write pubspec");
        let nested = root.join("lib").join("src");
        std::fs::create_dir_all(&nested).expect("create nested");

        let project = ProjectRoot::discover(&nested).expect("should discover");
        assert_eq!(project.as_path(), root);
    }

    #[test]
    fn prefers_innermost_project() {
        let (_temp, root) = temp_root();
        std::fs::write(root.join(PUBSPEC_FILE), "name: outer\n").expect("write pubspec");
        let inner = root.join("packages").join("inner");
        std::fs::create_dir_all(&inner).expect("create inner");
        std::fs::write(inner.join(PUBSPEC_FILE), "name: inner\n").expect("write pubspec");

        let project = ProjectRoot::discover(&inner).expect("should discover");
        assert_eq!(project.as_path(), inner);
    }

    #[test]
    fn pubspec_directory_does_not_count() {
        let (_temp, root) = temp_root();
        std::fs::create_dir(root.join(PUBSPEC_FILE)).expect("create dir");
        assert!(!is_flutter_project(&root));
    }

    #[test]
    fn reports_missing_project() {
        let (_temp, root) = temp_root();
        let result = ProjectRoot::discover(&root);
        // A pubspec above the temp dir would make this vacuous; skip if so.
        if root.ancestors().skip(1).any(is_flutter_project) {
            return;
        }
        assert!(matches!(result, Err(ArtifactError::ProjectNotFound { .. })));
    }
}
