//! Output path derivation for Flutter Android builds.
//!
//! These functions encode where `flutter build appbundle`, `flutter build apk`
//! and `flutter build aar` place their release outputs. The layout is dictated
//! by the Flutter Gradle plugin, so the rules must match it exactly:
//!
//! ```text
//! {project}/build/app/outputs/bundle/{flavor}Release/app-{flavor}-release.aab
//! {project}/build/app/outputs/flutter-apk/app-{flavor}-release.apk
//! {project}/build/host/outputs/repo/{package/id/segments}/flutter_release/{build}/flutter_release-{build}.aar
//! ```

use crate::error::Result;
use crate::locator::{ArtifactMatch, locate};
use crate::variant::{BuildNumber, BuildVariant, Flavor, PackageId};
use camino::{Utf8Path, Utf8PathBuf};

/// Name of the library module the Flutter tool publishes release archives under.
const LIBRARY_MODULE: &str = "flutter_release";

/// A directory to search and the file name expected inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactQuery {
    directory: Utf8PathBuf,
    expected_file_name: String,
}

impl ArtifactQuery {
    /// Create a query from its parts.
    #[must_use]
    pub fn new(directory: impl Into<Utf8PathBuf>, expected_file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            expected_file_name: expected_file_name.into(),
        }
    }

    /// Return the directory to search.
    #[must_use]
    pub fn directory(&self) -> &Utf8Path {
        &self.directory
    }

    /// Return the expected file name.
    #[must_use]
    pub fn expected_file_name(&self) -> &str {
        &self.expected_file_name
    }

    /// Resolve this query to exactly one file.
    ///
    /// # Errors
    ///
    /// See [`locate`].
    pub fn locate(&self) -> Result<ArtifactMatch> {
        locate(&self.directory, &self.expected_file_name)
    }
}

impl BuildVariant {
    /// Derive the query that resolves this variant's release output.
    ///
    /// For library archives the query targets the archive inside its
    /// versioned repository directory.
    #[must_use]
    pub fn query(&self, project_root: &Utf8Path) -> ArtifactQuery {
        match self {
            Self::Bundle { flavor } => bundle_query(project_root, flavor.as_ref()),
            Self::Package { flavor } => package_query(project_root, flavor.as_ref()),
            Self::LibraryArchive {
                package_id,
                build_number,
            } => LibraryArchiveLayout::new(project_root, package_id, build_number).query(),
        }
    }
}

/// Return the Gradle app outputs directory.
fn app_outputs_dir(project_root: &Utf8Path) -> Utf8PathBuf {
    project_root.join("build").join("app").join("outputs")
}

/// Return `app-{flavor}-release.{extension}` or `app-release.{extension}`.
fn release_file_name(flavor: Option<&Flavor>, extension: &str) -> String {
    match flavor {
        Some(flavor) => format!("app-{flavor}-release.{extension}"),
        None => format!("app-release.{extension}"),
    }
}

/// Derive the query for a release app bundle.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use flutter_artifacts::paths::bundle_query;
/// use flutter_artifacts::variant::Flavor;
///
/// let pro = Flavor::try_from("pro").expect("valid flavor");
/// let query = bundle_query(Utf8Path::new("/app"), Some(&pro));
/// assert_eq!(query.directory().as_str(), "/app/build/app/outputs/bundle/proRelease");
/// assert_eq!(query.expected_file_name(), "app-pro-release.aab");
/// ```
#[must_use]
pub fn bundle_query(project_root: &Utf8Path, flavor: Option<&Flavor>) -> ArtifactQuery {
    let variant_dir = match flavor {
        Some(flavor) => format!("{flavor}Release"),
        None => "release".to_owned(),
    };
    ArtifactQuery::new(
        app_outputs_dir(project_root).join("bundle").join(variant_dir),
        release_file_name(flavor, "aab"),
    )
}

/// Derive the query for a release APK.
///
/// The Flutter tool copies every APK into a single `flutter-apk` directory,
/// so the flavor only affects the file name.
#[must_use]
pub fn package_query(project_root: &Utf8Path, flavor: Option<&Flavor>) -> ArtifactQuery {
    ArtifactQuery::new(
        app_outputs_dir(project_root).join("flutter-apk"),
        release_file_name(flavor, "apk"),
    )
}

/// On-disk layout of one published release library archive.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use flutter_artifacts::paths::LibraryArchiveLayout;
/// use flutter_artifacts::variant::{BuildNumber, PackageId};
///
/// let id = PackageId::try_from("com.example.app").expect("valid package id");
/// let build = BuildNumber::try_from("42").expect("valid build number");
/// let layout = LibraryArchiveLayout::new(Utf8Path::new("/app"), &id, &build);
/// assert_eq!(
///     layout.artifact_path(),
///     "/app/build/host/outputs/repo/com/example/app/flutter_release/42/flutter_release-42.aar"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryArchiveLayout {
    library_root: Utf8PathBuf,
    artifact_dir: Utf8PathBuf,
    build_number: BuildNumber,
}

impl LibraryArchiveLayout {
    /// Compute the layout for `package_id` at `build_number`.
    #[must_use]
    pub fn new(project_root: &Utf8Path, package_id: &PackageId, build_number: &BuildNumber) -> Self {
        let library_root = library_root(project_root);
        let mut artifact_dir = library_root.clone();
        for segment in package_id.segments() {
            artifact_dir.push(segment);
        }
        artifact_dir.push(LIBRARY_MODULE);
        artifact_dir.push(build_number.as_str());

        Self {
            library_root,
            artifact_dir,
            build_number: build_number.clone(),
        }
    }

    /// Return the local Maven repository the archive is published into.
    #[must_use]
    pub fn library_root(&self) -> &Utf8Path {
        &self.library_root
    }

    /// Return the versioned directory containing the archive.
    #[must_use]
    pub fn artifact_dir(&self) -> &Utf8Path {
        &self.artifact_dir
    }

    /// Return the archive's file name, `flutter_release-{build}.aar`.
    #[must_use]
    pub fn artifact_file_name(&self) -> String {
        format!("{}.aar", self.artifact_stem())
    }

    /// Return the full path to the archive.
    #[must_use]
    pub fn artifact_path(&self) -> Utf8PathBuf {
        self.artifact_dir.join(self.artifact_file_name())
    }

    /// Return the directory the archive is extracted into.
    ///
    /// Extraction lands alongside the archive rather than in a temporary
    /// location, so repeated extractions target the same directory.
    #[must_use]
    pub fn extraction_dir(&self) -> Utf8PathBuf {
        self.artifact_dir.join(self.artifact_stem())
    }

    /// Return a locator query for the archive.
    #[must_use]
    pub fn query(&self) -> ArtifactQuery {
        ArtifactQuery::new(self.artifact_dir.clone(), self.artifact_file_name())
    }

    fn artifact_stem(&self) -> String {
        format!("{LIBRARY_MODULE}-{}", self.build_number)
    }
}

/// Return the local repository `flutter build aar` publishes into.
#[must_use]
pub fn library_root(project_root: &Utf8Path) -> Utf8PathBuf {
    project_root
        .join("build")
        .join("host")
        .join("outputs")
        .join("repo")
}
