//! Library archive extraction.
//!
//! An `.aar` is a plain zip file under another extension. Decompressors pick
//! their format from the file extension, so the archive is first copied into
//! a private staging directory as `flutter_release-{build}.zip` and then
//! decompressed next to the original archive:
//!
//! ```text
//! {artifact_dir}/flutter_release-{build}.aar   (input, untouched)
//! {artifact_dir}/flutter_release-{build}/      (output)
//! ```
//!
//! The output directory is derived deterministically, so a failed extraction
//! can be retried in place. Partially written output is not cleaned up.

use crate::diagnostics::Diagnostics;
use crate::error::{ArtifactError, Result};
use crate::paths::LibraryArchiveLayout;
use crate::project::ProjectEnvironment;
use crate::variant::{BuildNumber, PackageId};
use camino::{Utf8Path, Utf8PathBuf};
use log::trace;
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path};

/// Extension decompressors recognise for zip archives.
const ZIP_EXTENSION: &str = "zip";

/// Trait for the decompression operation, enabling test mocking.
#[cfg_attr(test, mockall::automock)]
pub trait Decompressor {
    /// Decompress the archive at `archive` into `dest_dir`.
    ///
    /// # Errors
    ///
    /// Returns a [`DecompressionError`] if the archive cannot be read, is not
    /// in a supported format, or holds entries escaping `dest_dir`.
    fn decompress(
        &self,
        archive: &Utf8Path,
        dest_dir: &Utf8Path,
    ) -> std::result::Result<(), DecompressionError>;
}

/// Errors arising from archive decompression.
#[derive(Debug, thiserror::Error)]
pub enum DecompressionError {
    /// I/O error while reading the archive or writing its contents.
    #[error("decompression I/O error: {0}")]
    Io(#[from] io::Error),

    /// The archive could not be parsed as a zip file.
    #[error("invalid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The archive extension does not name a supported format.
    #[error("unsupported archive format: {path}")]
    UnsupportedFormat {
        /// Path to the rejected archive.
        path: Utf8PathBuf,
    },

    /// An entry attempts to escape the destination directory.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending entry name.
        path: String,
    },
}

/// Zip decompressor backed by the `zip` crate.
///
/// Existing files in the destination are overwritten, so decompressing the
/// same archive twice leaves the same tree. Every entry name is checked
/// before the first file is written, so a rejected archive leaves the
/// destination untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipDecompressor;

impl Decompressor for ZipDecompressor {
    fn decompress(
        &self,
        archive: &Utf8Path,
        dest_dir: &Utf8Path,
    ) -> std::result::Result<(), DecompressionError> {
        if archive.extension() != Some(ZIP_EXTENSION) {
            return Err(DecompressionError::UnsupportedFormat {
                path: archive.to_owned(),
            });
        }

        let mut zip = zip::ZipArchive::new(File::open(archive)?)?;
        // Reject the whole archive before anything is written.
        for name in zip.file_names() {
            validate_entry_path(Path::new(name))?;
        }
        fs::create_dir_all(dest_dir)?;

        for index in 0..zip.len() {
            let mut entry = zip.by_index(index)?;
            let entry_name = entry.name().to_owned();

            let dest_path = dest_dir.as_std_path().join(&entry_name);
            if entry.is_dir() {
                fs::create_dir_all(&dest_path)?;
                continue;
            }
            if let Some(parent) = dest_path.parent() {
                fs::create_dir_all(parent)?;
            }

            let mut out = File::create(&dest_path)?;
            io::copy(&mut entry, &mut out)?;
            trace!("extracted {entry_name}");
        }

        Ok(())
    }
}

/// Validate that an entry path does not escape the destination directory via
/// `..` components or absolute paths.
fn validate_entry_path(path: &Path) -> std::result::Result<(), DecompressionError> {
    let escapes = path.is_absolute()
        || path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
    if escapes {
        return Err(DecompressionError::PathTraversal {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

/// A directory holding an extracted library archive.
///
/// The caller owns the directory; nothing in this crate deletes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArchive {
    dir: Utf8PathBuf,
}

impl ExtractedArchive {
    /// Return the extraction directory.
    #[must_use]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Consume the value and return the extraction directory.
    #[must_use]
    pub fn into_dir(self) -> Utf8PathBuf {
        self.dir
    }
}

/// Extracts release library archives for a project.
pub struct ArchiveExtractor<'a> {
    project: &'a dyn ProjectEnvironment,
    decompressor: &'a dyn Decompressor,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> ArchiveExtractor<'a> {
    /// Create an extractor over the given collaborators.
    #[must_use]
    pub fn new(
        project: &'a dyn ProjectEnvironment,
        decompressor: &'a dyn Decompressor,
        diagnostics: &'a dyn Diagnostics,
    ) -> Self {
        Self {
            project,
            decompressor,
            diagnostics,
        }
    }

    /// Extract the release archive published for `package_id` at
    /// `build_number`.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::Io`] if the
    /// staging directory cannot be created or the archive cannot be copied
    /// (for example because it does not exist), and
    /// [`ArtifactError::Decompression`] if decompression fails.
    pub fn extract_archive(
        &self,
        package_id: &PackageId,
        build_number: &BuildNumber,
    ) -> Result<ExtractedArchive> {
        let layout =
            LibraryArchiveLayout::new(self.project.project_root(), package_id, build_number);
        let artifact_path = layout.artifact_path();
        let target_dir = layout.extraction_dir();

        let staging = tempfile::tempdir()?;
        let staged_zip = staged_zip_path(staging.path(), &layout)?;

        self.diagnostics
            .detail(&format!("Staging {artifact_path} as {staged_zip}"));
        fs::copy(&artifact_path, &staged_zip)?;

        self.diagnostics
            .progress(&format!("Extracting {} to {target_dir}", layout.artifact_file_name()));
        self.decompressor.decompress(&staged_zip, &target_dir)?;

        // Dropping `staging` removes the intermediate zip.
        Ok(ExtractedArchive { dir: target_dir })
    }
}

/// Return `{staging}/flutter_release-{build}.zip`.
fn staged_zip_path(staging: &Path, layout: &LibraryArchiveLayout) -> Result<Utf8PathBuf> {
    let staging = Utf8Path::from_path(staging).ok_or_else(|| ArtifactError::NonUtf8Path {
        path: staging.to_path_buf(),
    })?;
    let mut staged = staging.join(layout.artifact_file_name());
    staged.set_extension(ZIP_EXTENSION);
    Ok(staged)
}

#[cfg(test)]
#[path = "extraction_tests.rs"]
mod tests;
