//! Canonical comparison keys for artifact file names.
//!
//! The Flutter Gradle plugin renders flavor-qualified output names with
//! different separators and casing depending on how many flavor dimensions a
//! project declares (`app-free-arm-release.aab`, `app-freeArm-release.aab`,
//! `app_free_arm_release.aab`). Projecting every name onto its lowercase
//! ASCII alphanumerics lets a single expected name match whichever rendering
//! the toolchain chose.

use std::fmt;

/// A file name reduced to its lowercase ASCII alphanumeric characters.
///
/// Two file names refer to the same artifact iff their keys are equal.
///
/// # Examples
///
/// ```
/// use flutter_artifacts::canonical::CanonicalKey;
///
/// let expected = CanonicalKey::from("app-pro-release.aab");
/// assert!(expected.matches("APP_PRO_RELEASE.AAB"));
/// assert_eq!(expected.as_str(), "appproreleaseaab");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// Get the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if `name` normalizes to this key.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        normalize(name) == *self
    }
}

impl AsRef<str> for CanonicalKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CanonicalKey {
    fn from(name: &str) -> Self {
        normalize(name)
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalize a file name into its [`CanonicalKey`].
///
/// Drops every character outside `[A-Za-z0-9]` and lowercases the rest.
///
/// # Examples
///
/// ```
/// use flutter_artifacts::canonical::normalize;
///
/// assert_eq!(
///     normalize("app-flavor1-flavor2-release.aab"),
///     normalize("APP_FLAVOR1_FLAVOR2_RELEASE.AAB"),
/// );
/// ```
#[must_use]
pub fn normalize(name: &str) -> CanonicalKey {
    CanonicalKey(
        name.chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect(),
    )
}
