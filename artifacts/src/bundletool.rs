//! Bundle manifest queries via bundletool.
//!
//! `bundletool dump manifest` prints a single attribute of an app bundle's
//! `AndroidManifest.xml` when given an XPath expression, which is all the
//! version resolver needs.

use crate::command::{CommandExecutor, run_checked};
use crate::error::{ArtifactError, Result};
use crate::version::BuildToolClient;
use camino::Utf8Path;

const VERSION_NAME_XPATH: &str = "/manifest/@android:versionName";
const VERSION_CODE_XPATH: &str = "/manifest/@android:versionCode";

/// [`BuildToolClient`] that shells out to bundletool.
#[derive(Debug)]
pub struct BundletoolClient<E> {
    executor: E,
    command: Vec<String>,
}

impl<E: CommandExecutor> BundletoolClient<E> {
    /// Create a client running `command` (e.g. `["bundletool"]` or
    /// `["java", "-jar", "bundletool.jar"]`) through `executor`.
    pub fn new(executor: E, command: Vec<String>) -> Self {
        Self { executor, command }
    }

    /// Read the manifest attribute selected by `xpath`.
    fn dump_manifest(&self, bundle: &Utf8Path, xpath: &str) -> Result<String> {
        let bundle_arg = format!("--bundle={bundle}");
        let xpath_arg = format!("--xpath={xpath}");
        let value = run_checked(
            &self.executor,
            "bundletool",
            &self.command,
            &["dump", "manifest", &bundle_arg, &xpath_arg],
        )?;

        if value.is_empty() {
            return Err(ArtifactError::ToolFailed {
                tool: "bundletool",
                message: format!("empty output for {xpath} in {bundle}"),
            });
        }
        Ok(value)
    }
}

impl<E: CommandExecutor + Send + Sync> BuildToolClient for BundletoolClient<E> {
    fn version_name(&self, bundle: &Utf8Path) -> Result<String> {
        self.dump_manifest(bundle, VERSION_NAME_XPATH)
    }

    fn version_code(&self, bundle: &Utf8Path) -> Result<String> {
        self.dump_manifest(bundle, VERSION_CODE_XPATH)
    }
}
