use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use serde::Serialize;

use packhorse::action::Action;
use packhorse::actions::{InstallAction, PackAction, RunScriptAction};
use packhorse::npm::{NpmRunner, SubprocessNpm};
use packhorse::osutils::{OsUtils, StdOsUtils};
use packhorse::workflow::{self, WorkflowReport, WorkflowStatus};
use packhorse::Error;

use crate::commands::{require_dir, require_file, CmdResult};

#[derive(Args)]
pub struct BuildArgs {
    /// Path to the project's package.json
    #[arg(long)]
    pub manifest: PathBuf,

    /// Directory receiving the packaged tree (created if missing)
    #[arg(long)]
    pub artifacts: PathBuf,

    /// Existing writable directory for intermediate files.
    /// A temporary directory is provisioned when omitted.
    #[arg(long)]
    pub scratch: Option<PathBuf>,

    /// Manifest script to run after installing, in order; undeclared
    /// scripts are skipped. May be repeated.
    #[arg(long = "script")]
    pub scripts: Vec<String>,

    /// Package-tool binary to invoke
    #[arg(long, default_value = "npm")]
    pub npm: String,
}

#[derive(Debug, Serialize)]
pub struct BuildOutput {
    pub artifacts_dir: String,
    /// Root of the packaged tree: the pack step extracts under a `package/`
    /// subdirectory of the artifacts directory.
    pub package_dir: String,
    #[serde(flatten)]
    pub report: WorkflowReport,
}

/// Assemble and run the standard pipeline: pack, install, then any
/// requested scripts. The pipeline core never chooses actions; this command
/// is the workflow assembler.
pub fn run(args: BuildArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<BuildOutput> {
    require_file(&args.manifest, "manifest")?;

    std::fs::create_dir_all(&args.artifacts).map_err(|e| {
        Error::internal_io(
            format!("Failed to create {}: {}", args.artifacts.display(), e),
            Some("create artifacts dir".to_string()),
        )
    })?;

    // Provisioned scratch lives exactly as long as this run; a caller-supplied
    // scratch is left untouched, intermediate archive included.
    let (scratch_dir, scratch_guard): (PathBuf, Option<tempfile::TempDir>) = match args.scratch {
        Some(dir) => {
            require_dir(&dir, "scratch")?;
            (dir, None)
        }
        None => {
            let tmp = tempfile::tempdir().map_err(|e| {
                Error::internal_io(
                    format!("Failed to create scratch directory: {}", e),
                    Some("create scratch dir".to_string()),
                )
            })?;
            (tmp.path().to_path_buf(), Some(tmp))
        }
    };

    let osutils: Arc<dyn OsUtils> = Arc::new(StdOsUtils::new());
    let npm: Arc<dyn NpmRunner> = Arc::new(SubprocessNpm::with_program(&args.npm));

    let package_dir = osutils.joinpath(&args.artifacts, "package");
    let package_manifest = osutils.joinpath(&package_dir, "package.json");

    let mut actions: Vec<Box<dyn Action>> = vec![
        Box::new(PackAction::new(
            &args.artifacts,
            scratch_dir,
            &args.manifest,
            Arc::clone(&osutils),
            Arc::clone(&npm),
        )),
        Box::new(InstallAction::new(&package_dir, Arc::clone(&npm))),
    ];
    for script in &args.scripts {
        actions.push(Box::new(RunScriptAction::new(
            &package_dir,
            &package_manifest,
            script,
            Arc::clone(&npm),
            Arc::clone(&osutils),
        )));
    }

    let report = workflow::run(&actions);
    let exit_code = match report.status {
        WorkflowStatus::Success => 0,
        WorkflowStatus::Failed => 20,
    };

    drop(scratch_guard);

    Ok((
        BuildOutput {
            artifacts_dir: args.artifacts.display().to_string(),
            package_dir: package_dir.display().to_string(),
            report,
        },
        exit_code,
    ))
}
