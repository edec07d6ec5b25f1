//! `flutter-artifacts` CLI entrypoint.
//!
//! Resolves the project root, wires the production collaborators into the
//! library pipelines, and prints the result on stdout. Progress goes to
//! stderr so the printed path or version can be captured by scripts.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use flutter_artifacts::bundletool::BundletoolClient;
use flutter_artifacts::cache::CommandCacheManager;
use flutter_artifacts::cli::{Cli, Command, LibraryArgs, LocateTarget, VersionArgs};
use flutter_artifacts::command::SystemCommandExecutor;
use flutter_artifacts::config::ArtifactsConfig;
use flutter_artifacts::diagnostics::{Diagnostics, WriterDiagnostics};
use flutter_artifacts::error::Result;
use flutter_artifacts::extraction::{ArchiveExtractor, ZipDecompressor};
use flutter_artifacts::paths::bundle_query;
use flutter_artifacts::project::ProjectRoot;
use flutter_artifacts::report::{Outcome, format_human, format_json};
use flutter_artifacts::version::VersionResolver;
use std::io::{self, Write};
use std::sync::Arc;

fn main() {
    let cli = Cli::parse();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let diagnostics = WriterDiagnostics::new(io::stderr(), cli.quiet, cli.verbose);
    let run_result = run(&cli, &diagnostics, &mut stdout);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, diagnostics: &dyn Diagnostics, stdout: &mut dyn Write) -> Result<()> {
    let project = resolve_project(cli.project_dir.as_deref())?;
    diagnostics.detail(&format!("Project root: {}", project.as_path()));

    let outcome = match &cli.command {
        Command::Locate { target } => locate(&project, target, diagnostics)?,
        Command::ExtractAar(args) => extract(&project, args, diagnostics)?,
        Command::Version(args) => {
            let config = ArtifactsConfig::load(project.as_path(), cli.config.as_deref())?;
            version(&project, &config, args, diagnostics)?
        }
    };

    let rendered = if cli.json {
        format_json(&outcome)
    } else {
        format_human(&outcome)
    };
    writeln!(stdout, "{rendered}")?;
    Ok(())
}

/// Uses the explicit project directory, or discovers one from the cwd.
fn resolve_project(project_dir: Option<&Utf8Path>) -> Result<ProjectRoot> {
    match project_dir {
        Some(dir) => Ok(ProjectRoot::new(dir)),
        None => ProjectRoot::discover_from_cwd(),
    }
}

fn locate(
    project: &ProjectRoot,
    target: &LocateTarget,
    diagnostics: &dyn Diagnostics,
) -> Result<Outcome> {
    let query = target.variant().query(project.as_path());
    diagnostics.detail(&format!(
        "Searching {} for {}",
        query.directory(),
        query.expected_file_name()
    ));
    let found = query.locate()?;
    Ok(Outcome::from(&found))
}

fn extract(
    project: &ProjectRoot,
    args: &LibraryArgs,
    diagnostics: &dyn Diagnostics,
) -> Result<Outcome> {
    let decompressor = ZipDecompressor;
    let extracted = ArchiveExtractor::new(project, &decompressor, diagnostics)
        .extract_archive(&args.package_id, &args.build_number)?;
    Ok(Outcome::from(&extracted))
}

fn version(
    project: &ProjectRoot,
    config: &ArtifactsConfig,
    args: &VersionArgs,
    diagnostics: &dyn Diagnostics,
) -> Result<Outcome> {
    let bundle = resolve_bundle(project, args)?;
    let cache = CommandCacheManager::new(SystemCommandExecutor, config.cache.refresh.clone());
    let tools = Arc::new(BundletoolClient::new(
        SystemCommandExecutor,
        config.tools.bundletool.clone(),
    ));

    let version = VersionResolver::new(&cache, tools, diagnostics).resolve_version(&bundle)?;
    Ok(Outcome::from(&version))
}

/// Returns the requested bundle, or locates the release bundle.
fn resolve_bundle(project: &ProjectRoot, args: &VersionArgs) -> Result<Utf8PathBuf> {
    if let Some(bundle) = &args.bundle {
        return Ok(bundle.clone());
    }
    let found = bundle_query(project.as_path(), args.flavor.as_ref()).locate()?;
    Ok(found.into_path())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort reporting; ignore write failures.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flutter_artifacts::diagnostics::LogDiagnostics;
    use flutter_artifacts::error::ArtifactError;
    use rstest::{fixture, rstest};
    use std::fs;
    use tempfile::TempDir;

    struct Project {
        _temp: TempDir,
        root: Utf8PathBuf,
    }

    #[fixture]
    fn project() -> Project {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("UTF-8 temp dir");
        fs::write(root.join("pubspec.yaml"), "name: app\n").expect("write pubspec");
        Project { _temp: temp, root }
    }

    fn run_args(project: &Project, args: &[&str]) -> (Result<()>, String) {
        let cli = Cli::try_parse_from(
            ["flutter-artifacts", "--project-dir", project.root.as_str()]
                .into_iter()
                .chain(args.iter().copied()),
        )
        .expect("valid arguments");
        let mut stdout = Vec::new();
        let result = run(&cli, &LogDiagnostics, &mut stdout);
        (result, String::from_utf8(stdout).expect("UTF-8 stdout"))
    }

    #[test]
    fn exit_code_for_run_result_returns_zero_on_success() {
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Ok(()), &mut stderr);
        assert_eq!(exit_code, 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_for_run_result_prints_candidates_and_returns_one() {
        let err = ArtifactError::MultipleArtifactsFound {
            searched_directory: Utf8PathBuf::from("/out"),
            candidates: vec![
                Utf8PathBuf::from("/out/APP-RELEASE.AAB"),
                Utf8PathBuf::from("/out/app-release.aab"),
            ],
        };

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, 1);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(stderr_text.contains("/out/APP-RELEASE.AAB"));
        assert!(stderr_text.contains("/out/app-release.aab"));
    }

    #[rstest]
    fn locate_prints_the_matched_path(project: Project) {
        let dir = project.root.join("build/app/outputs/bundle/proRelease");
        fs::create_dir_all(&dir).expect("create output dir");
        fs::write(dir.join("app-pro_release.aab"), "aab").expect("write bundle");

        let (result, stdout) = run_args(&project, &["locate", "bundle", "--flavor", "pro"]);

        result.expect("locate succeeds");
        assert_eq!(stdout.trim_end(), dir.join("app-pro_release.aab").as_str());
    }

    #[rstest]
    fn locate_reports_missing_outputs(project: Project) {
        let (result, stdout) = run_args(&project, &["locate", "package"]);

        let err = result.expect_err("nothing was built");
        assert!(matches!(err, ArtifactError::ArtifactNotFound { .. }));
        assert!(stdout.is_empty());
    }

    #[rstest]
    fn json_flag_wraps_the_result(project: Project) {
        let dir = project.root.join("build/app/outputs/flutter-apk");
        fs::create_dir_all(&dir).expect("create output dir");
        fs::write(dir.join("app-release.apk"), "apk").expect("write apk");

        let (result, stdout) = run_args(&project, &["--json", "locate", "package"]);

        result.expect("locate succeeds");
        let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
        assert_eq!(parsed["kind"], "located");
    }

    #[rstest]
    fn version_uses_explicit_bundle_without_locating(project: Project) {
        let args = VersionArgs {
            bundle: Some(Utf8PathBuf::from("/elsewhere/app.aab")),
            flavor: None,
        };
        let root = ProjectRoot::new(project.root.clone());

        let bundle = resolve_bundle(&root, &args).expect("explicit bundle");
        assert_eq!(bundle.as_str(), "/elsewhere/app.aab");
    }

    #[rstest]
    fn version_rejects_malformed_config_before_running_tools(project: Project) {
        fs::write(project.root.join("flutter_artifacts.toml"), "[tools").expect("write config");

        let (result, _) = run_args(&project, &["version", "--bundle", "/tmp/app.aab"]);

        assert!(matches!(result, Err(ArtifactError::InvalidConfig { .. })));
    }
}
