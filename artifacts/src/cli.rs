//! CLI argument definitions for `flutter-artifacts`.
//!
//! Parsing is kept apart from the binary so the argument surface can be
//! tested without spawning a process.

use crate::variant::{BuildNumber, BuildVariant, Flavor, PackageId};
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Locate, extract, and version Flutter Android release artifacts.
#[derive(Parser, Debug)]
#[command(name = "flutter-artifacts")]
#[command(version, about)]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Print the release bundle for the `pro` flavor:\n",
    "    $ flutter-artifacts locate bundle --flavor pro\n\n",
    "  Extract a module's release library archive:\n",
    "    $ flutter-artifacts extract-aar --package-id com.example.app --build-number 42\n\n",
    "  Print the release bundle's version as JSON:\n",
    "    $ flutter-artifacts --json version",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Flutter project root [default: nearest directory with pubspec.yaml].
    #[arg(long, global = true, value_name = "DIR")]
    pub project_dir: Option<Utf8PathBuf>,

    /// Configuration file [default: flutter_artifacts.toml in the project].
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Print the result as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Show resolved paths and other detail on stderr.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the path of a release artifact.
    Locate {
        /// Artifact kind to locate.
        #[command(subcommand)]
        target: LocateTarget,
    },

    /// Extract a release library archive next to the archive itself.
    ExtractAar(LibraryArgs),

    /// Print the `{versionName}+{versionCode}` of a release bundle.
    Version(VersionArgs),
}

/// Artifact kinds accepted by `locate`.
#[derive(Subcommand, Debug, Clone)]
pub enum LocateTarget {
    /// Release app bundle (`.aab`).
    Bundle(FlavorArgs),
    /// Release APK.
    Package(FlavorArgs),
    /// Release library archive (`.aar`).
    Aar(LibraryArgs),
}

impl LocateTarget {
    /// Return the build variant selected by these arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use flutter_artifacts::cli::{FlavorArgs, LocateTarget};
    /// use flutter_artifacts::variant::BuildVariant;
    ///
    /// let target = LocateTarget::Bundle(FlavorArgs { flavor: None });
    /// assert_eq!(target.variant(), BuildVariant::Bundle { flavor: None });
    /// ```
    #[must_use]
    pub fn variant(&self) -> BuildVariant {
        match self {
            Self::Bundle(args) => BuildVariant::Bundle {
                flavor: args.flavor.clone(),
            },
            Self::Package(args) => BuildVariant::Package {
                flavor: args.flavor.clone(),
            },
            Self::Aar(args) => BuildVariant::LibraryArchive {
                package_id: args.package_id.clone(),
                build_number: args.build_number.clone(),
            },
        }
    }
}

/// Flavor selection for app outputs.
#[derive(Args, Debug, Clone)]
pub struct FlavorArgs {
    /// Product flavor [default: none].
    #[arg(long, value_name = "FLAVOR")]
    pub flavor: Option<Flavor>,
}

/// Identifies a published library archive.
#[derive(Args, Debug, Clone)]
pub struct LibraryArgs {
    /// Host application package identifier, e.g. `com.example.app`.
    #[arg(long, value_name = "ID")]
    pub package_id: PackageId,

    /// Build number the archive was published under.
    #[arg(long, value_name = "N")]
    pub build_number: BuildNumber,
}

/// Arguments for the version command.
#[derive(Args, Debug, Clone)]
pub struct VersionArgs {
    /// App bundle to inspect [default: the located release bundle].
    #[arg(long, value_name = "PATH", conflicts_with = "flavor")]
    pub bundle: Option<Utf8PathBuf>,

    /// Product flavor of the bundle to locate.
    #[arg(long, value_name = "FLAVOR")]
    pub flavor: Option<Flavor>,
}
