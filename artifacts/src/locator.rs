//! Artifact lookup by canonical file name.
//!
//! The locator lists a build output directory once and keeps every regular
//! file whose [`CanonicalKey`](crate::canonical::CanonicalKey) equals the
//! expected name's key. Exactly one match resolves; zero or several matches
//! are reported as typed errors so the caller can decide how to proceed.

use crate::canonical::normalize;
use crate::error::{ArtifactError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, trace};
use std::fs;
use std::io;

/// A single resolved artifact file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactMatch {
    path: Utf8PathBuf,
}

impl ArtifactMatch {
    /// Return the path to the resolved file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Return the resolved file's name.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name()
    }

    /// Consume the match and return its path.
    #[must_use]
    pub fn into_path(self) -> Utf8PathBuf {
        self.path
    }
}

/// Find the one file in `directory` whose normalized name equals that of
/// `expected_name`.
///
/// Only immediate children that are regular files are considered. Entries
/// whose names are not valid UTF-8 are skipped.
///
/// # Errors
///
/// Returns [`ArtifactError::ArtifactNotFound`] if `directory` does not exist
/// or holds no matching file, [`ArtifactError::MultipleArtifactsFound`] with
/// the candidates sorted by path if more than one file matches, and
/// [`ArtifactError::Io`] if the directory cannot be listed.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use flutter_artifacts::locator::locate;
///
/// let temp = tempfile::tempdir()?;
/// let dir = Utf8Path::from_path(temp.path()).expect("UTF-8 temp dir");
/// std::fs::write(dir.join("app-Pro-release.aab"), b"bundle")?;
///
/// let found = locate(dir, "app-pro-release.aab")?;
/// assert_eq!(found.file_name(), Some("app-Pro-release.aab"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn locate(directory: &Utf8Path, expected_name: &str) -> Result<ArtifactMatch> {
    let not_found = || ArtifactError::ArtifactNotFound {
        expected_name: expected_name.to_owned(),
        searched_directory: directory.to_owned(),
    };

    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
            debug!("artifact directory {directory} is missing");
            return Err(not_found());
        }
        Err(e) => return Err(e.into()),
    };

    let mut candidates = matching_files(entries, expected_name)?;
    candidates.sort();

    if candidates.len() > 1 {
        return Err(ArtifactError::MultipleArtifactsFound {
            searched_directory: directory.to_owned(),
            candidates,
        });
    }

    let path = candidates.pop().ok_or_else(not_found)?;
    debug!("resolved {expected_name} to {path}");
    Ok(ArtifactMatch { path })
}

/// Collect the regular files in `entries` whose names match `expected_name`.
fn matching_files(entries: fs::ReadDir, expected_name: &str) -> io::Result<Vec<Utf8PathBuf>> {
    let expected = normalize(expected_name);
    let mut matches = Vec::new();

    for entry in entries {
        let entry = entry?;
        let Ok(path) = Utf8PathBuf::from_path_buf(entry.path()) else {
            trace!("skipping non-UTF-8 entry {}", entry.path().display());
            continue;
        };

        let Some(file_name) = path.file_name() else {
            continue;
        };
        if !expected.matches(file_name) {
            continue;
        }

        // Follows symlinks so a linked artifact still counts as a file.
        if !path.is_file() {
            trace!("skipping {path}: not a regular file");
            continue;
        }

        matches.push(path);
    }

    Ok(matches)
}
