//! Log output from the library pipelines.
//!
//! `logtest` installs a process-wide logger, so everything that inspects log
//! records lives in this one test.

use camino::Utf8PathBuf;
use flutter_artifacts::diagnostics::{Diagnostics, LogDiagnostics};
use flutter_artifacts::locator::locate;
use log::Level;
use logtest::Logger;
use std::fs;
use tempfile::TempDir;

#[test]
fn diagnostics_and_locator_log_through_the_facade() {
    let mut logger = Logger::start();

    LogDiagnostics.progress("Extracting flutter_release-42.aar");
    LogDiagnostics.detail("Staging into a private directory");

    let temp = TempDir::new().expect("temp dir");
    let dir = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("UTF-8 temp dir");
    fs::write(dir.join("app-release.aab"), "aab").expect("write bundle");
    locate(&dir, "app-release.aab").expect("bundle located");

    let mut records = Vec::new();
    while let Some(record) = logger.pop() {
        records.push((record.level(), record.args().to_string()));
    }

    assert!(
        records.contains(&(Level::Info, "Extracting flutter_release-42.aar".to_owned())),
        "progress should log at info: {records:?}"
    );
    assert!(
        records.contains(&(Level::Debug, "Staging into a private directory".to_owned())),
        "detail should log at debug: {records:?}"
    );
    assert!(
        records
            .iter()
            .any(|(_, message)| message.contains("app-release.aab")),
        "locator should log the match: {records:?}"
    );
}
