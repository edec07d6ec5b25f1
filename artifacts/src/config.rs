//! Tool configuration.
//!
//! External tool commands are read from an optional `flutter_artifacts.toml`
//! at the project root:
//!
//! ```toml
//! [tools]
//! bundletool = ["java", "-jar", "/opt/bundletool.jar"]
//!
//! [cache]
//! refresh = ["flutter", "precache", "--android"]
//! ```
//!
//! Every field is optional. Each command is a program followed by its
//! leading arguments.

use crate::error::{ArtifactError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Deserialize;

/// Name of the configuration file looked up at the project root.
pub const CONFIG_FILE: &str = "flutter_artifacts.toml";

/// External tool configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtifactsConfig {
    /// Commands used to inspect build outputs.
    pub tools: ToolsConfig,
    /// Commands used to refresh cached tooling.
    pub cache: CacheConfig,
}

/// The `[tools]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Command that runs bundletool.
    pub bundletool: Vec<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            bundletool: vec!["bundletool".to_owned()],
        }
    }
}

/// The `[cache]` table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Command refreshing cached tooling; empty when nothing needs refreshing.
    pub refresh: Vec<String>,
}

impl ArtifactsConfig {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::InvalidConfig`] if the text is not valid TOML,
    /// contains unknown keys, or configures an empty bundletool command.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use flutter_artifacts::config::ArtifactsConfig;
    ///
    /// let config = ArtifactsConfig::parse(
    ///     "[cache]\nrefresh = [\"flutter\", \"precache\"]\n",
    ///     Utf8Path::new("flutter_artifacts.toml"),
    /// )
    /// .expect("valid config");
    /// assert_eq!(config.tools.bundletool, ["bundletool"]);
    /// assert_eq!(config.cache.refresh, ["flutter", "precache"]);
    /// ```
    pub fn parse(contents: &str, path: &Utf8Path) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| ArtifactError::InvalidConfig {
            path: path.to_owned(),
            reason: format!("TOML parse error: {e}"),
        })?;

        if config.tools.bundletool.is_empty() {
            return Err(ArtifactError::InvalidConfig {
                path: path.to_owned(),
                reason: "tools.bundletool must name a command".to_owned(),
            });
        }

        Ok(config)
    }

    /// Read configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::InvalidConfig`] if the file cannot be read or
    /// parsed.
    pub fn from_file(path: &Utf8Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ArtifactError::InvalidConfig {
                path: path.to_owned(),
                reason: e.to_string(),
            })?;
        Self::parse(&contents, path)
    }

    /// Load configuration for a project.
    ///
    /// An explicit `path` must exist. Without one, `flutter_artifacts.toml`
    /// at the project root is used when present, and defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::InvalidConfig`] if the selected file cannot be
    /// read or parsed.
    pub fn load(project_root: &Utf8Path, path: Option<&Utf8Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let default_path = default_config_path(project_root);
        if default_path.is_file() {
            debug!("loading configuration from {default_path}");
            Self::from_file(&default_path)
        } else {
            debug!("no {CONFIG_FILE} in {project_root}; using defaults");
            Ok(Self::default())
        }
    }
}

/// Return the conventional configuration path for a project.
#[must_use]
pub fn default_config_path(project_root: &Utf8Path) -> Utf8PathBuf {
    project_root.join(CONFIG_FILE)
}
