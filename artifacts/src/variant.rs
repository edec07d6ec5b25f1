//! Build variant descriptors and their validated identifiers.
//!
//! A [`BuildVariant`] names one kind of release output: an app bundle, an
//! installable package, or a library archive. The identifiers that flow into
//! output paths ([`Flavor`], [`PackageId`], [`BuildNumber`]) are newtypes that
//! validate on construction, so path derivation never sees a value that could
//! escape the build directory.

use crate::error::{ArtifactError, Result};
use std::fmt;

/// Characters that would split a path segment.
const PATH_SEPARATORS: [char; 2] = ['/', '\\'];

/// A build flavor name such as `pro` or `freeArm`.
///
/// # Examples
///
/// ```
/// use flutter_artifacts::variant::Flavor;
///
/// let flavor: Flavor = "pro".try_into().expect("valid flavor");
/// assert_eq!(flavor.as_str(), "pro");
/// assert!(Flavor::try_from("pro/../x").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Flavor(String);

/// A dot-separated application package identifier such as `com.example.app`.
///
/// # Examples
///
/// ```
/// use flutter_artifacts::variant::PackageId;
///
/// let id: PackageId = "com.example.app".try_into().expect("valid package id");
/// assert_eq!(id.segments().collect::<Vec<_>>(), ["com", "example", "app"]);
/// assert!(PackageId::try_from("com..app").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageId(String);

/// An opaque build number token, typically numeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildNumber(String);

macro_rules! identifier_newtype {
    ($ty:ident, $validate:ident) => {
        impl $ty {
            /// Return the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<&str> for $ty {
            type Error = ArtifactError;

            fn try_from(value: &str) -> Result<Self> {
                $validate(value)?;
                Ok(Self(value.to_owned()))
            }
        }

        impl TryFrom<String> for $ty {
            type Error = ArtifactError;

            fn try_from(value: String) -> Result<Self> {
                $validate(&value)?;
                Ok(Self(value))
            }
        }

        impl std::str::FromStr for $ty {
            type Err = ArtifactError;

            fn from_str(value: &str) -> Result<Self> {
                Self::try_from(value)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

identifier_newtype!(Flavor, validate_flavor);
identifier_newtype!(PackageId, validate_package_id);
identifier_newtype!(BuildNumber, validate_build_number);

impl PackageId {
    /// Iterate over the dot-separated namespace segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

/// The kind of release output to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildVariant {
    /// An Android App Bundle (`.aab`).
    Bundle {
        /// Optional product flavor.
        flavor: Option<Flavor>,
    },
    /// An installable Android package (`.apk`).
    Package {
        /// Optional product flavor.
        flavor: Option<Flavor>,
    },
    /// A Flutter module library archive (`.aar`) published to a local repo.
    LibraryArchive {
        /// The host application's package identifier.
        package_id: PackageId,
        /// The build number the archive was published under.
        build_number: BuildNumber,
    },
}

impl BuildVariant {
    /// Return the flavor for bundle and package variants.
    #[must_use]
    pub fn flavor(&self) -> Option<&Flavor> {
        match self {
            Self::Bundle { flavor } | Self::Package { flavor } => flavor.as_ref(),
            Self::LibraryArchive { .. } => None,
        }
    }
}

fn invalid(kind: &'static str, value: &str, reason: impl Into<String>) -> ArtifactError {
    ArtifactError::InvalidIdentifier {
        kind,
        value: value.to_owned(),
        reason: reason.into(),
    }
}

/// Shared rules for values that become a single path segment.
fn validate_segment(kind: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(invalid(kind, value, "must not be empty"));
    }
    if value.contains(PATH_SEPARATORS) {
        return Err(invalid(kind, value, "must not contain path separators"));
    }
    if let Some(bad) = value.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid(kind, value, format!("unexpected character {bad:?}")));
    }
    if value == "." || value == ".." {
        return Err(invalid(kind, value, "must not be a relative path component"));
    }
    Ok(())
}

fn validate_flavor(value: &str) -> Result<()> {
    validate_segment("flavor", value)
}

fn validate_build_number(value: &str) -> Result<()> {
    validate_segment("build number", value)
}

fn validate_package_id(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(invalid("package id", value, "must not be empty"));
    }
    for segment in value.split('.') {
        if segment.is_empty() {
            return Err(invalid("package id", value, "contains an empty segment"));
        }
        validate_segment("package id", segment)
            .map_err(|_| invalid("package id", value, format!("invalid segment \"{segment}\"")))?;
    }
    Ok(())
}
