//! Behaviour-driven tests for library archive extraction.
//!
//! Archives are real zip files written into a temporary project and unpacked
//! with the production `ZipDecompressor`.

use camino::Utf8PathBuf;
use flutter_artifacts::diagnostics::LogDiagnostics;
use flutter_artifacts::error::{ArtifactError, Result as ArtifactResult};
use flutter_artifacts::extraction::{ArchiveExtractor, ExtractedArchive, ZipDecompressor};
use flutter_artifacts::paths::LibraryArchiveLayout;
use flutter_artifacts::project::ProjectRoot;
use flutter_artifacts::variant::{BuildNumber, PackageId};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::fs::{self, File};
use std::io::Write;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ExtractionWorld {
    // Keeps the project directory alive for the scenario.
    _temp: Option<TempDir>,
    project: Option<ProjectRoot>,
    layout: Option<LibraryArchiveLayout>,
    results: Vec<ArtifactResult<ExtractedArchive>>,
}

impl ExtractionWorld {
    fn project(&self) -> &ProjectRoot {
        self.project.as_ref().expect("project not created")
    }

    fn last_result(&self) -> &ArtifactResult<ExtractedArchive> {
        self.results.last().expect("nothing was extracted")
    }
}

#[fixture]
fn world() -> ExtractionWorld {
    ExtractionWorld::default()
}

fn identifiers(package_id: String, build: String) -> (PackageId, BuildNumber) {
    (
        PackageId::try_from(package_id).expect("valid package id"),
        BuildNumber::try_from(build).expect("valid build number"),
    )
}

// ---------------------------------------------------------------------------
// Step definitions
// ---------------------------------------------------------------------------

#[given("a Flutter project")]
fn given_project(world: &mut ExtractionWorld) {
    let temp = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("UTF-8 temp dir");
    fs::write(root.join("pubspec.yaml"), "name: module\n").expect("write pubspec");
    world._temp = Some(temp);
    world.project = Some(ProjectRoot::new(root));
}

#[given("a published archive for \"{package_id}\" build \"{build}\" containing \"{entry}\"")]
fn given_published_archive(
    world: &mut ExtractionWorld,
    package_id: String,
    build: String,
    entry: String,
) {
    let (package_id, build) = identifiers(package_id, build);
    let layout = LibraryArchiveLayout::new(world.project().as_path(), &package_id, &build);
    fs::create_dir_all(layout.artifact_dir()).expect("create artifact dir");

    let file = File::create(layout.artifact_path()).expect("create archive");
    let mut writer = zip::ZipWriter::new(file);
    writer
        .start_file(entry.as_str(), SimpleFileOptions::default())
        .expect("start entry");
    writer.write_all(b"payload").expect("write entry");
    writer.finish().expect("finish archive");

    world.layout = Some(layout);
}

#[when("the archive for \"{package_id}\" build \"{build}\" is extracted")]
fn when_extracted(world: &mut ExtractionWorld, package_id: String, build: String) {
    let (package_id, build) = identifiers(package_id, build);
    let result = ArchiveExtractor::new(world.project(), &ZipDecompressor, &LogDiagnostics)
        .extract_archive(&package_id, &build);
    world.results.push(result);
}

#[then("the archive is extracted into \"{dir_name}\" beside it")]
fn then_extracted_beside(world: &mut ExtractionWorld, dir_name: String) {
    let layout = world.layout.as_ref().expect("archive published");
    let extracted = world.last_result().as_ref().expect("extraction succeeds");
    assert_eq!(extracted.dir(), layout.artifact_dir().join(dir_name));
    assert!(layout.artifact_path().is_file(), "archive must be kept");
}

#[then("the extracted directory contains \"{entry}\"")]
fn then_contains(world: &mut ExtractionWorld, entry: String) {
    let extracted = world.last_result().as_ref().expect("extraction succeeds");
    let contents = fs::read(extracted.dir().join(entry)).expect("entry extracted");
    assert_eq!(contents, b"payload");
}

#[then("every extraction used the same directory")]
fn then_same_directory(world: &mut ExtractionWorld) {
    let dirs: Vec<_> = world
        .results
        .iter()
        .map(|result| result.as_ref().expect("extraction succeeds").dir())
        .collect();
    assert!(dirs.len() > 1, "expected repeated extractions");
    let first = dirs.first().expect("at least one extraction");
    assert!(dirs.iter().all(|dir| dir == first), "directories differ: {dirs:?}");
}

#[then("extraction fails with an I/O error")]
fn then_io_error(world: &mut ExtractionWorld) {
    let result = world.last_result();
    assert!(
        matches!(result, Err(ArtifactError::Io(_))),
        "expected Io error, got {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/extraction.feature",
    name = "Extract a published archive beside itself"
)]
fn scenario_extract_beside(world: ExtractionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/extraction.feature",
    name = "Repeated extraction reuses the same directory"
)]
fn scenario_repeated_extraction(world: ExtractionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/extraction.feature",
    name = "Extracting an archive that was never published fails"
)]
fn scenario_missing_archive(world: ExtractionWorld) {
    let _ = world;
}
